use reqwest::Client;
use std::sync::Arc;
use team_manager::{
    app_state::AppState,
    domain::Email,
    get_postgres_pool,
    services::{
        data_stores::PostgresMemberStore, PostmarkEmailClient,
    },
    utils::{
        constants::{
            prod, DATABASE_URL, POSTMARK_AUTH_TOKEN,
            POSTMARK_EMAIL_SENDER_ADDRESS,
        },
        tracing::init_tracing,
    },
    Application,
};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let pg_pool = get_postgres_pool(&DATABASE_URL)
        .await
        .expect("Failed to create Postgres connection pool");
    sqlx::migrate!()
        .run(&pg_pool)
        .await
        .expect("Failed to run migrations");

    let member_store = Arc::new(RwLock::new(PostgresMemberStore::new(pg_pool)));
    let email_client = Arc::new(configure_postmark_email_client());

    let app_state = AppState::new(member_store, email_client);

    let app = Application::build(app_state, prod::APP_ADDRESS)
        .await
        .expect("Failed to build app");

    app.run().await.expect("Failed to run app");
}

fn configure_postmark_email_client() -> PostmarkEmailClient {
    let sender = Email::parse(POSTMARK_EMAIL_SENDER_ADDRESS.to_owned())
        .expect("Invalid sender email address");

    let http_client = Client::builder()
        .timeout(prod::email_client::TIMEOUT)
        .build()
        .expect("Failed to build HTTP client");

    PostmarkEmailClient::new(
        prod::email_client::BASE_URL.to_owned(),
        sender,
        POSTMARK_AUTH_TOKEN.to_owned(),
        http_client,
    )
}
