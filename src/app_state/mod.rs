use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::{EmailClient, MemberStore};
use crate::services::{
    AuthGateway, CredentialManager, MemberLifecycle, TaskManager,
};

pub type MemberStoreType = Arc<RwLock<dyn MemberStore + Send + Sync>>;
pub type EmailClientType = Arc<dyn EmailClient + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub member_lifecycle: MemberLifecycle,
    pub credential_manager: CredentialManager,
    pub task_manager: TaskManager,
    pub auth_gateway: AuthGateway,
}

impl AppState {
    pub fn new(
        member_store: MemberStoreType,
        email_client: EmailClientType,
    ) -> Self {
        Self {
            member_lifecycle: MemberLifecycle::new(
                member_store.clone(),
                email_client.clone(),
            ),
            credential_manager: CredentialManager::new(member_store.clone()),
            task_manager: TaskManager::new(member_store.clone()),
            auth_gateway: AuthGateway::new(member_store, email_client),
        }
    }
}
