use crate::helpers::{
    add_member, get_json_response_body, get_random_email, log_in_member,
    member_body, TestApp,
};
use team_manager::{
    domain::MemberId, services::mock_email_client::SentEmailKind,
    ErrorResponse,
};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_and_inactive_member_for_valid_requests(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();

    let response = app.post_members(&member_body(&email)).await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("firstName").unwrap(), "Jamie");
    assert_eq!(body.get("email").unwrap(), &email);
    assert_eq!(body.get("status").unwrap(), "INACTIVE");

    let member_id = body.get("memberId").unwrap().as_str().unwrap();
    assert!(
        uuid::Uuid::try_parse(member_id).is_ok(),
        "Member ID should be a valid UUID: {member_id}"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_email_an_invite_to_new_members(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    add_member(app, &email).await;

    let sent = app.email_client.sent();
    assert_eq!(sent.len(), 1, "Expected exactly one email to be sent");
    assert_eq!(sent[0].kind, SentEmailKind::Invite);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    app.log_in_as_admin();

    let test_cases = [
        (
            serde_json::json!({
                "firstName": "",
                "lastName": "Woods",
                "email": get_random_email(),
                "position": "Engineer",
                "joinDate": "2024-03-01"
            }),
            "Validation error: Missing required field: first name",
        ),
        (
            serde_json::json!({
                "firstName": "Jamie",
                "lastName": "Woods",
                "email": "not-an-email",
                "position": "Engineer",
                "joinDate": "2024-03-01"
            }),
            "Validation error: Invalid email address: not-an-email",
        ),
    ];

    for (body, expected_error) in test_cases.iter() {
        let response = app.post_members(body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            body
        );
        assert_eq!(
            response
                .json::<ErrorResponse>()
                .await
                .expect("Could not deserialise response body to ErrorResponse")
                .error,
            expected_error.to_string()
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_duplicate_email(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    add_member(app, &email).await;

    let response = app.post_members(&member_body(&email)).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_duplicate_email_with_different_case(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();
    add_member(app, &email).await;

    let response = app.post_members(&member_body(&email.to_uppercase())).await;
    assert_eq!(
        response.status().as_u16(),
        409,
        "Emails should be compared case-insensitively"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_not_authenticated(app: &mut TestApp) {
    let response = app.post_members(&member_body(&get_random_email())).await;
    assert_eq!(
        response.status().as_u16(),
        400,
        "Should report a missing token for unauthenticated requests"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_member_credentials(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let response = app.post_members(&member_body(&get_random_email())).await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Member sessions must not reach the admin surface"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_members_sorted_by_join_date(app: &mut TestApp) {
    app.log_in_as_admin();

    let early = get_random_email();
    let late = get_random_email();

    let mut late_body = member_body(&late);
    late_body["joinDate"] = serde_json::json!("2025-06-15");
    assert_eq!(app.post_members(&late_body).await.status().as_u16(), 201);

    let mut early_body = member_body(&early);
    early_body["joinDate"] = serde_json::json!("2023-01-02");
    assert_eq!(app.post_members(&early_body).await.status().as_u16(), 201);

    let response = app.get_members().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let members = body.as_array().expect("Response should be an array");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].get("email").unwrap(), &early);
    assert_eq!(members[1].get("email").unwrap(), &late);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_update_member_fields(app: &mut TestApp) {
    app.log_in_as_admin();
    let member_id = add_member(app, &get_random_email()).await;

    let response = app
        .patch_member(
            &member_id,
            &serde_json::json!({
                "position": "Staff Engineer"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("position").unwrap(), "Staff Engineer");
    assert_eq!(
        body.get("firstName").unwrap(),
        "Jamie",
        "Fields not named in the update should be untouched"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_empty_update(app: &mut TestApp) {
    app.log_in_as_admin();
    let member_id = add_member(app, &get_random_email()).await;

    let response =
        app.patch_member(&member_id, &serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_member(app: &mut TestApp) {
    app.log_in_as_admin();
    let unknown_id = MemberId::default().as_ref().to_string();

    let response = app
        .patch_member(
            &unknown_id,
            &serde_json::json!({ "position": "Engineer" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.delete_member(&unknown_id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_activate_and_deactivate_members(app: &mut TestApp) {
    app.log_in_as_admin();
    let email = get_random_email();
    let member_id =
        crate::helpers::onboard_member(app, &email, "password123").await;

    let response = app
        .patch_status(&member_id, &serde_json::json!({ "status": "DEACTIVATED" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "DEACTIVATED");

    let response = app
        .patch_status(&member_id, &serde_json::json!({ "status": "ACTIVE" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_transitions_touching_inactive(
    app: &mut TestApp,
) {
    app.log_in_as_admin();
    let email = get_random_email();

    // Target INACTIVE is never a valid transition
    let member_id =
        crate::helpers::onboard_member(app, &email, "password123").await;
    let response = app
        .patch_status(&member_id, &serde_json::json!({ "status": "INACTIVE" }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    // Neither is transitioning away from INACTIVE by hand
    let pending_id = add_member(app, &get_random_email()).await;
    let response = app
        .patch_status(&pending_id, &serde_json::json!({ "status": "ACTIVE" }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        409,
        "Activation should only happen through the invite flow"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_only_delete_inactive_members(app: &mut TestApp) {
    app.log_in_as_admin();

    let active_id = crate::helpers::onboard_member(
        app,
        &get_random_email(),
        "password123",
    )
    .await;
    let response = app.delete_member(&active_id).await;
    assert_eq!(
        response.status().as_u16(),
        409,
        "Active members must not be deletable"
    );

    let pending_id = add_member(app, &get_random_email()).await;
    let response = app.delete_member(&pending_id).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.delete_member(&pending_id).await;
    assert_eq!(response.status().as_u16(), 404);
}
