use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Task, TaskId},
    utils::auth::member_identity,
};

#[tracing::instrument(name = "Get task route handler", skip_all)]
pub async fn get_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, CookieJar, Json<Task>), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    let task = state.task_manager.get_task(&member_id, &task_id).await?;

    Ok((StatusCode::OK, jar, Json(task)))
}
