use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use secrecy::Secret;
use serde::Deserialize;

use super::MemberResponse;
use crate::{
    app_state::AppState,
    domain::{Email, MemberAPIError, MemberId, MemberUpdate},
    utils::auth::admin_identity,
};

#[tracing::instrument(name = "Update member route handler", skip_all)]
pub async fn update_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(member_id): Path<String>,
    Json(request): Json<UpdateMemberRequest>,
) -> Result<(StatusCode, CookieJar, Json<MemberResponse>), MemberAPIError> {
    let admin_id = admin_identity(&jar)?;
    let member_id = MemberId::parse(&member_id)?;

    let email = request
        .email
        .map(|e| Email::parse(Secret::new(e)))
        .transpose()?;

    let update = MemberUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        email,
        position: request.position,
        join_date: request.join_date,
    };

    let member = state
        .member_lifecycle
        .update_member(&admin_id, &member_id, update)
        .await?;

    Ok((StatusCode::OK, jar, Json(MemberResponse::from(&member))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "joinDate")]
    pub join_date: Option<NaiveDate>,
}
