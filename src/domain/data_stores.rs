use super::{AdminId, Email, Member, MemberId, TokenHash};
use color_eyre::eyre::Report;
use thiserror::Error;

/// Persistence gateway for the member aggregate. Task mutations go through
/// `update_member` as whole-record rewrites; the store is responsible for
/// applying each write atomically per record.
#[async_trait::async_trait]
pub trait MemberStore {
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError>;
    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member_by_email(
        &self,
        email: &Email,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member_by_invite_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError>;
    async fn get_member_by_reset_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError>;
    async fn list_members(
        &self,
        admin_id: &AdminId,
    ) -> Result<Vec<Member>, MemberStoreError>;
    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError>;
    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError>;
}

#[derive(Debug, Error)]
pub enum MemberStoreError {
    #[error("Email already in use")]
    EmailAlreadyExists,
    #[error("Member not found")]
    MemberNotFound,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
}

impl PartialEq for MemberStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists)
                | (Self::MemberNotFound, Self::MemberNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}
