use std::sync::Mutex;

use color_eyre::eyre::Result;

use crate::domain::{Email, EmailClient, PlaintextToken};

/// Recording email client for tests: captures every dispatched message so
/// assertions can read back the plaintext tokens.
#[derive(Default)]
pub struct MockEmailClient {
    sent: Mutex<Vec<SentEmail>>,
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub token: PlaintextToken,
    pub kind: SentEmailKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentEmailKind {
    Invite,
    PasswordReset,
}

impl MockEmailClient {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last_token(&self) -> Option<PlaintextToken> {
        self.sent.lock().unwrap().last().map(|e| e.token.clone())
    }

    fn record(&self, recipient: &Email, token: &PlaintextToken, kind: SentEmailKind) {
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.clone(),
            token: token.clone(),
            kind,
        });
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_invite(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()> {
        self.record(recipient, token, SentEmailKind::Invite);
        Ok(())
    }

    async fn send_password_reset(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()> {
        self.record(recipient, token, SentEmailKind::PasswordReset);
        Ok(())
    }
}
