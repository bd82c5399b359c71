use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Task},
    utils::auth::member_identity,
};

#[tracing::instrument(name = "List tasks route handler", skip_all)]
pub async fn list_tasks(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<Vec<Task>>), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;

    let tasks = state.task_manager.list_tasks(&member_id).await?;

    Ok((StatusCode::OK, jar, Json(tasks)))
}
