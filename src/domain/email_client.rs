use super::{Email, PlaintextToken};
use color_eyre::eyre::Result;

/// Outbound mail, fire-and-forget from the caller's perspective: dispatch
/// failures are logged by the services and never fail the surrounding
/// operation.
#[async_trait::async_trait]
pub trait EmailClient {
    async fn send_invite(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()>;

    async fn send_password_reset(
        &self,
        recipient: &Email,
        token: &PlaintextToken,
    ) -> Result<()>;
}
