use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, NewTask, Task},
    utils::auth::member_identity,
};

#[tracing::instrument(name = "Create task route handler", skip_all)]
pub async fn create_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, CookieJar, Json<Task>), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;

    let new_task = NewTask {
        title: request.title,
        description: request.description,
        due: request.due,
    };

    let task = state.task_manager.create_task(&member_id, new_task).await?;

    Ok((StatusCode::CREATED, jar, Json(task)))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
}
