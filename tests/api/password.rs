use crate::helpers::{
    get_random_email, last_emailed_token, log_in_member, onboard_member,
    TestApp,
};
use chrono::{Duration, Utc};
use team_manager::{
    domain::{Email, MemberId},
    services::mock_email_client::SentEmailKind,
    ErrorResponse,
};
use secrecy::Secret;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_email_a_reset_token_and_clear_pending_invites(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();
    onboard_member(app, &email, "password123").await;

    let response = app
        .patch_forgot_password(&serde_json::json!({ "email": email }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let sent = app.email_client.sent();
    assert_eq!(sent.last().unwrap().kind, SentEmailKind::PasswordReset);

    let parsed = Email::parse(Secret::new(email)).unwrap();
    let store = app.member_store.read().await;
    let member = store.get_member_by_email(&parsed).await.unwrap();
    assert!(member.reset_token_hash.is_some());
    assert!(member.reset_token_expires_at.is_some());
    assert!(
        member.invite_token_hash.is_none(),
        "A reset request should invalidate any outstanding invite"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_email_on_forgot_password(
    app: &mut TestApp,
) {
    let response = app
        .patch_forgot_password(
            &serde_json::json!({ "email": get_random_email() }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reset_the_password_with_a_valid_token(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    onboard_member(app, &email, "password123").await;

    let response = app
        .patch_forgot_password(&serde_json::json!({ "email": email }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let reset_token = last_emailed_token(app);

    let response = app
        .patch_reset_password(
            Some(&reset_token),
            &serde_json::json!({ "password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": "brand-new-pass"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // The token is single use
    let response = app
        .patch_reset_password(
            Some(&reset_token),
            &serde_json::json!({ "password": "another-pass1" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_expired_reset_tokens(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    let member_id = onboard_member(app, &email, "password123").await;

    let response = app
        .patch_forgot_password(&serde_json::json!({ "email": email }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let reset_token = last_emailed_token(app);

    {
        let member_id = MemberId::parse(&member_id).unwrap();
        let mut store = app.member_store.write().await;
        let mut member = store.get_member(&member_id).await.unwrap();
        member.reset_token_expires_at =
            Some(Utc::now() - Duration::minutes(1));
        store.update_member(&member).await.unwrap();
    }

    let response = app
        .patch_reset_password(
            Some(&reset_token),
            &serde_json::json!({ "password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse")
            .error,
        "Reset token has expired"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_when_reset_token_is_missing(app: &mut TestApp) {
    let response = app
        .patch_reset_password(
            None,
            &serde_json::json!({ "password": "brand-new-pass" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_change_own_password(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    log_in_member(app, &email, "password123").await;

    let response = app
        .patch_me_password(&serde_json::json!({
            "oldPassword": "password123",
            "newPassword": "new-password-1",
            "newPasswordConfirm": "new-password-1"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": "new-password-1"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_silently_ignore_incomplete_change_requests(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();
    log_in_member(app, &email, "password123").await;

    let test_cases = [
        serde_json::json!({}),
        serde_json::json!({ "oldPassword": "password123" }),
        serde_json::json!({
            "oldPassword": "password123",
            "newPassword": "new-password-1"
        }),
    ];

    for body in test_cases.iter() {
        let response = app.patch_me_password(body).await;
        assert_eq!(
            response.status().as_u16(),
            200,
            "Incomplete requests are a no-op. Input: {}",
            body
        );
    }

    // Password is unchanged
    let response = app
        .post_login(&serde_json::json!({
            "email": email,
            "password": "password123"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_bad_change_requests(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let test_cases = [
        (
            serde_json::json!({
                "oldPassword": "wrong-password",
                "newPassword": "new-password-1",
                "newPasswordConfirm": "new-password-1"
            }),
            401,
        ),
        (
            serde_json::json!({
                "oldPassword": "password123",
                "newPassword": "new-password-1",
                "newPasswordConfirm": "new-password-2"
            }),
            400,
        ),
        (
            serde_json::json!({
                "oldPassword": "password123",
                "newPassword": "password123",
                "newPasswordConfirm": "password123"
            }),
            400,
        ),
    ];

    for (body, expected_status) in test_cases.iter() {
        let response = app.patch_me_password(body).await;
        assert_eq!(
            response.status().as_u16(),
            *expected_status,
            "Unexpected status for input: {}",
            body
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_admin_credentials_on_me_surface(
    app: &mut TestApp,
) {
    app.log_in_as_admin();

    let response = app
        .patch_me_password(&serde_json::json!({
            "oldPassword": "password123",
            "newPassword": "new-password-1",
            "newPasswordConfirm": "new-password-1"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 403);
}
