use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState, domain::MemberAPIError,
    services::ChangePasswordFields, utils::auth::member_identity,
};

#[tracing::instrument(name = "Change own password route handler", skip_all)]
pub async fn change_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<(StatusCode, CookieJar, Json<serde_json::Value>), MemberAPIError> {
    let (member_id, _) = member_identity(&jar)?;

    let fields = ChangePasswordFields {
        old_password: request.old_password,
        new_password: request.new_password,
        new_password_confirm: request.new_password_confirm,
    };

    state
        .credential_manager
        .change_own_password(&member_id, fields)
        .await?;

    Ok((
        StatusCode::OK,
        jar,
        Json(serde_json::json!({
            "message": "Password changed successfully"
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: Option<Secret<String>>,
    #[serde(rename = "newPassword")]
    pub new_password: Option<Secret<String>>,
    #[serde(rename = "newPasswordConfirm")]
    pub new_password_confirm: Option<Secret<String>>,
}
