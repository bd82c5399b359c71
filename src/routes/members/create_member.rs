use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use secrecy::Secret;
use serde::Deserialize;

use super::MemberResponse;
use crate::{
    app_state::AppState,
    domain::{Email, MemberAPIError, MemberProfile},
    utils::auth::admin_identity,
};

#[tracing::instrument(name = "Create member route handler", skip_all)]
pub async fn create_member(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<CreateMemberRequest>,
) -> Result<(StatusCode, CookieJar, Json<MemberResponse>), MemberAPIError> {
    let admin_id = admin_identity(&jar)?;

    let email = Email::parse(Secret::new(request.email))?;
    let profile = MemberProfile::parse(
        request.first_name,
        request.last_name,
        email,
        request.position,
        request.join_date,
    )?;

    let member = state
        .member_lifecycle
        .create_member(&admin_id, profile)
        .await?;

    Ok((StatusCode::CREATED, jar, Json(MemberResponse::from(&member))))
}

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub position: String,
    #[serde(rename = "joinDate")]
    pub join_date: NaiveDate,
}
