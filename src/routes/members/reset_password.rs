use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Password, PlaintextToken},
};

#[tracing::instrument(name = "Reset password route handler", skip_all)]
pub async fn reset_password(
    State(state): State<AppState>,
    Query(query): Query<ResetPasswordQuery>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), MemberAPIError> {
    let reset_token = query
        .reset_token
        .ok_or(MemberAPIError::MissingToken)
        .and_then(|t| {
            PlaintextToken::parse(t).map_err(|_| MemberAPIError::MissingToken)
        })?;

    let password = Password::parse(request.password)?;

    state
        .member_lifecycle
        .complete_reset(&reset_token, &password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Your password has been reset"
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordQuery {
    #[serde(rename = "resetToken")]
    pub reset_token: Option<Secret<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: Secret<String>,
}
