use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::MemberAPIError;
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    auth::login,
    me::{
        change_password, create_task, delete_task, get_task, list_tasks,
        update_task,
    },
    members::{
        change_status, create_member, create_password, delete_member,
        forgot_password, list_members, reset_password, update_member,
    },
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for MemberAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            MemberAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
            MemberAPIError::MissingToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, "Missing token".to_string())
            }
            MemberAPIError::EmailMismatch => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Email does not match the invited member".to_string(),
                )
            }
            MemberAPIError::PasswordMismatch => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "Password and password confirmation must match"
                        .to_string(),
                )
            }
            MemberAPIError::SamePassword => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::BAD_REQUEST,
                    "New password must differ from the current password"
                        .to_string(),
                )
            }
            MemberAPIError::InvalidToken => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            MemberAPIError::TokenExpired => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::UNAUTHORIZED,
                    "Reset token has expired".to_string(),
                )
            }
            MemberAPIError::InvalidCredentials => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string())
            }
            MemberAPIError::Forbidden => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }
            MemberAPIError::OnboardingIncomplete => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::FORBIDDEN,
                    "Onboarding incomplete: a new invite has been emailed"
                        .to_string(),
                )
            }
            MemberAPIError::AccessRevoked => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, "Access revoked".to_string())
            }
            MemberAPIError::NotFound => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, "Member not found".to_string())
            }
            MemberAPIError::EmailAlreadyExists => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, "Email already in use".to_string())
            }
            MemberAPIError::InvalidTransition { from, to } => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    format!(
                        "Invalid status transition: {} -> {}",
                        from.as_str(),
                        to.as_str()
                    ),
                )
            }
            MemberAPIError::InvalidState(status) => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    format!(
                        "Member must be inactive before deletion, current status: {}",
                        status.as_str()
                    ),
                )
            }
            MemberAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/auth/login", post(login))
            .route("/members", post(create_member).get(list_members))
            .route("/members/create-password", post(create_password))
            .route("/members/forgot-password", patch(forgot_password))
            .route("/members/reset-password", patch(reset_password))
            .route(
                "/members/:member_id",
                patch(update_member).delete(delete_member),
            )
            .route("/members/:member_id/status", patch(change_status))
            .route("/me/password", patch(change_password))
            .route("/me/tasks", post(create_task).get(list_tasks))
            .route(
                "/me/tasks/:task_id",
                get(get_task).patch(update_task).delete(delete_task),
            )
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

#[allow(dead_code)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}
