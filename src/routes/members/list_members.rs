use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;

use super::MemberResponse;
use crate::{
    app_state::AppState, domain::MemberAPIError, utils::auth::admin_identity,
};

#[tracing::instrument(name = "List members route handler", skip_all)]
pub async fn list_members(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar, Json<Vec<MemberResponse>>), MemberAPIError>
{
    let admin_id = admin_identity(&jar)?;

    let members = state.member_lifecycle.list_members(&admin_id).await?;
    let response = members.iter().map(MemberResponse::from).collect();

    Ok((StatusCode::OK, jar, Json(response)))
}
