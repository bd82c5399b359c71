use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, TaskId},
    utils::auth::member_identity,
};

#[tracing::instrument(name = "Delete task route handler", skip_all)]
pub async fn delete_task(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(task_id): Path<String>,
) -> Result<(StatusCode, CookieJar), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;
    let task_id = TaskId::parse(&task_id)?;

    state.task_manager.delete_task(&member_id, &task_id).await?;

    Ok((StatusCode::NO_CONTENT, jar))
}
