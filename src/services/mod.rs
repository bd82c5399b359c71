mod auth_gateway;
mod credential_manager;
pub mod data_stores;
pub mod member_lifecycle;
pub mod mock_email_client;
pub mod postmark_email_client;
mod task_manager;

pub use auth_gateway::*;
pub use credential_manager::*;
pub use member_lifecycle::{MemberLifecycle, RESET_TOKEN_TTL_MINUTES};
pub use postmark_email_client::PostmarkEmailClient;
pub use task_manager::*;
