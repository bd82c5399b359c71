use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::domain::{Email, EmailClient, PlaintextToken};

pub struct PostmarkEmailClient {
    http_client: reqwest::Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: reqwest::Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<()> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            text_body: content,
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(&url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending invite email", skip_all)]
    async fn send_invite(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()> {
        let content = format!(
            "You have been added to a team. Use this invite token to create \
             your password: {}",
            token.as_ref().expose_secret()
        );
        self.send_email(recipient, "Create your password", &content)
            .await
    }

    #[tracing::instrument(name = "Sending password reset email", skip_all)]
    async fn send_password_reset(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()> {
        let content = format!(
            "Use this token to reset your password within the next 10 \
             minutes: {}",
            token.as_ref().expose_secret()
        );
        self.send_email(recipient, "Reset your password", &content)
            .await
    }
}

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
