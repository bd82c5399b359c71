use crate::helpers::{
    get_random_email, last_emailed_token, onboard_member, TestApp,
};
use team_manager::{
    domain::{MemberId, MemberStatus},
    services::mock_email_client::SentEmailKind,
    utils::constants::JWT_COOKIE_NAME,
};
use test_context::test_context;

fn login_body(email: &str, password: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": password
    })
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200_and_set_jwt_cookie_for_valid_credentials(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();
    onboard_member(app, &email, "password123").await;

    let response = app.post_login(&login_body(&email, "password123")).await;
    assert_eq!(response.status().as_u16(), 200);

    let auth_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == JWT_COOKIE_NAME)
        .expect("No auth cookie found");
    assert!(!auth_cookie.value().is_empty());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_email(app: &mut TestApp) {
    let response = app
        .post_login(&login_body(&get_random_email(), "password123"))
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_401_for_wrong_password(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    onboard_member(app, &email, "password123").await;

    let response = app.post_login(&login_body(&email, "wrong-password")).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reissue_invite_when_onboarding_is_incomplete(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();
    crate::helpers::add_member(app, &email).await;
    let original_token = last_emailed_token(app);

    let response = app.post_login(&login_body(&email, "password123")).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Members without a password cannot log in"
    );

    let sent = app.email_client.sent();
    assert_eq!(sent.len(), 2, "A fresh invite should have been emailed");
    assert_eq!(sent[1].kind, SentEmailKind::Invite);

    // The original invite is superseded by the reissued one
    let stale = app
        .post_create_password(
            Some(&original_token),
            &serde_json::json!({
                "password": "password123",
                "passwordConfirm": "password123",
                "email": email
            }),
        )
        .await;
    assert_eq!(stale.status().as_u16(), 401);

    let fresh_token = last_emailed_token(app);
    let fresh = app
        .post_create_password(
            Some(&fresh_token),
            &serde_json::json!({
                "password": "password123",
                "passwordConfirm": "password123",
                "email": email
            }),
        )
        .await;
    assert_eq!(fresh.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_when_access_has_been_revoked(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    let member_id = onboard_member(app, &email, "password123").await;

    // A member pushed back to INACTIVE with a password on file is locked out
    {
        let member_id = MemberId::parse(&member_id).unwrap();
        let mut store = app.member_store.write().await;
        let mut member = store.get_member(&member_id).await.unwrap();
        member.status = MemberStatus::Inactive;
        store.update_member(&member).await.unwrap();
    }

    let response = app.post_login(&login_body(&email, "password123")).await;
    assert_eq!(response.status().as_u16(), 403);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_allow_deactivated_members_to_log_in(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    let member_id = onboard_member(app, &email, "password123").await;

    let response = app
        .patch_status(&member_id, &serde_json::json!({ "status": "DEACTIVATED" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_login(&login_body(&email, "password123")).await;
    assert_eq!(
        response.status().as_u16(),
        200,
        "Deactivation does not revoke login"
    );
}
