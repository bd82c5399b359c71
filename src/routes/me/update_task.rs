use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Task, TaskId, TaskUpdate},
    utils::auth::member_identity,
};

#[tracing::instrument(name = "Update task route handler", skip_all)]
pub async fn update_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<(StatusCode, CookieJar, Json<Task>), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    let update = TaskUpdate {
        title: request.title,
        description: request.description,
        due: request.due,
        status: request.status,
    };

    let task = state
        .task_manager
        .update_task(&member_id, &task_id, update)
        .await?;

    Ok((StatusCode::OK, jar, Json(task)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
    pub status: Option<String>,
}
