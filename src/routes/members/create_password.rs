use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{MemberAPIError, Password, PlaintextToken},
};

#[tracing::instrument(name = "Create password route handler", skip_all)]
pub async fn create_password(
    State(state): State<AppState>,
    Query(query): Query<CreatePasswordQuery>,
    Json(request): Json<CreatePasswordRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), MemberAPIError> {
    let invite_token = query
        .invite_token
        .ok_or(MemberAPIError::MissingToken)
        .and_then(|t| {
            PlaintextToken::parse(t).map_err(|_| MemberAPIError::MissingToken)
        })?;

    if request.password.expose_secret()
        != request.password_confirm.expose_secret()
    {
        return Err(MemberAPIError::PasswordMismatch);
    }

    let password = Password::parse(request.password)?;

    state
        .member_lifecycle
        .consume_invite(&invite_token, &password, &request.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "You successfully created a password. Now you can login."
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CreatePasswordQuery {
    #[serde(rename = "inviteToken")]
    pub invite_token: Option<Secret<String>>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePasswordRequest {
    pub password: Secret<String>,
    #[serde(rename = "passwordConfirm")]
    pub password_confirm: Secret<String>,
    pub email: String,
}
