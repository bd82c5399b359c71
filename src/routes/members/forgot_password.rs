use axum::{extract::State, http::StatusCode, Json};
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    app_state::AppState,
    domain::{Email, MemberAPIError},
};

#[tracing::instrument(name = "Forgot password route handler", skip_all)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), MemberAPIError> {
    let email = Email::parse(Secret::new(request.email))?;

    state.member_lifecycle.request_password_reset(&email).await?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Password reset email has been sent"
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}
