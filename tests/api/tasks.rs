use crate::helpers::{
    get_json_response_body, get_random_email, log_in_member, TestApp,
};
use team_manager::{domain::TaskId, ErrorResponse};
use test_context::test_context;

async fn create_task(app: &TestApp, title: &str) -> String {
    let response = app
        .post_task(&serde_json::json!({
            "title": title,
            "due": "2025-09-30"
        }))
        .await;
    assert_eq!(
        response.status().as_u16(),
        201,
        "Failed to create task: {title}"
    );

    let body = get_json_response_body(response).await;
    body.get("taskId")
        .expect("No taskId in response")
        .as_str()
        .expect("taskId is not a string")
        .to_owned()
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_create_tasks_with_todo_status(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let response = app
        .post_task(&serde_json::json!({
            "title": "Write onboarding notes",
            "description": "First week summary",
            "due": "2025-09-30"
        }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("title").unwrap(), "Write onboarding notes");
    assert_eq!(body.get("status").unwrap(), "TODO");
    assert_eq!(body.get("due").unwrap(), "2025-09-30");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_invalid_tasks(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let test_cases = [
        (
            serde_json::json!({ "due": "2025-09-30" }),
            "Validation error: Missing required field: title",
        ),
        (
            serde_json::json!({ "title": "No deadline" }),
            "Validation error: Missing required field: due",
        ),
    ];

    for (body, expected_error) in test_cases.iter() {
        let response = app.post_task(body).await;
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
async fn should_list_tasks_in_insertion_order(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let first = create_task(app, "First").await;
    let second = create_task(app, "Second").await;

    let response = app.get_tasks().await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    let tasks = body.as_array().expect("Response should be an array");
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].get("taskId").unwrap().as_str(), Some(&*first));
    assert_eq!(tasks[1].get("taskId").unwrap().as_str(), Some(&*second));
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_fetch_a_single_task(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;
    let task_id = create_task(app, "Solo").await;

    let response = app.get_task(&task_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("title").unwrap(), "Solo");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_task(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;

    let unknown_id = TaskId::default().as_ref().to_string();
    let response = app.get_task(&unknown_id).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_update_tasks(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;
    let task_id = create_task(app, "Review PRs").await;

    let response = app
        .patch_task(&task_id, &serde_json::json!({ "status": "DONE" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(body.get("status").unwrap(), "DONE");
    assert_eq!(
        body.get("title").unwrap(),
        "Review PRs",
        "Fields not named in the update should be untouched"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_empty_task_updates(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;
    let task_id = create_task(app, "Review PRs").await;

    let response = app.patch_task(&task_id, &serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_tasks(app: &mut TestApp) {
    app.log_in_as_admin();
    log_in_member(app, &get_random_email(), "password123").await;
    let task_id = create_task(app, "Throwaway").await;

    let response = app.delete_task(&task_id).await;
    assert_eq!(response.status().as_u16(), 204);

    let response = app.delete_task(&task_id).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get_tasks().await;
    let body = get_json_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_403_for_admin_credentials(app: &mut TestApp) {
    app.log_in_as_admin();

    let response = app.get_tasks().await;
    assert_eq!(
        response.status().as_u16(),
        403,
        "Admin sessions must not reach the member surface"
    );
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_not_authenticated(app: &mut TestApp) {
    let response = app.get_tasks().await;
    assert_eq!(
        response.status().as_u16(),
        400,
        "Should report a missing token for unauthenticated requests"
    );
}
