use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::{
    app_state::AppState,
    domain::{Email, MemberAPIError, Password},
    utils::auth::create_auth_cookie,
};

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, CookieJar, Json<LoginResponse>), MemberAPIError> {
    let email = Email::parse(Secret::new(request.email))?;
    let password = Password::parse(request.password)?;

    let token = state.auth_gateway.login(&email, &password).await?;

    let updated_jar = jar.add(create_auth_cookie(token));

    Ok((
        StatusCode::OK,
        updated_jar,
        Json(LoginResponse {
            message: "Logged in successfully".to_string(),
        }),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct LoginResponse {
    pub message: String,
}
