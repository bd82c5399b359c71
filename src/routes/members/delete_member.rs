use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::CookieJar;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, MemberId},
    utils::auth::admin_identity,
};

#[tracing::instrument(name = "Delete member route handler", skip_all)]
pub async fn delete_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
) -> Result<(StatusCode, CookieJar), MemberAPIError> {
    let admin_id = admin_identity(&jar)?;
    let member_id = MemberId::parse(&member_id)?;

    state
        .member_lifecycle
        .delete_member(&admin_id, &member_id)
        .await?;

    Ok((StatusCode::NO_CONTENT, jar))
}
