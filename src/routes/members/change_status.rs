use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::MemberResponse;
use crate::{
    app_state::AppState,
    domain::{MemberAPIError, MemberId, MemberStatus},
    utils::auth::admin_identity,
};

#[tracing::instrument(name = "Change member status route handler", skip_all)]
pub async fn change_status(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
    Json(request): Json<ChangeStatusRequest>,
) -> Result<(StatusCode, CookieJar, Json<MemberResponse>), MemberAPIError> {
    let admin_id = admin_identity(&jar)?;
    let member_id = MemberId::parse(&member_id)?;
    let target = MemberStatus::parse(&request.status)?;

    let member = state
        .member_lifecycle
        .change_status(&admin_id, &member_id, target)
        .await?;

    Ok((StatusCode::OK, jar, Json(MemberResponse::from(&member))))
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}
