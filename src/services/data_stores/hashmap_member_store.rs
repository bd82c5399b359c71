use crate::domain::{
    AdminId, Email, Member, MemberId, MemberStore, MemberStoreError, TokenHash,
};
use std::collections::HashMap;

/// In-memory store used by unit and integration tests.
#[derive(Default)]
pub struct HashmapMemberStore {
    members: HashMap<MemberId, Member>,
}

#[async_trait::async_trait]
impl MemberStore for HashmapMemberStore {
    async fn add_member(
        &mut self,
        member: Member,
    ) -> Result<(), MemberStoreError> {
        if self.members.values().any(|m| m.email == member.email) {
            return Err(MemberStoreError::EmailAlreadyExists);
        }

        self.members.insert(member.id, member);
        Ok(())
    }

    async fn get_member(
        &self,
        id: &MemberId,
    ) -> Result<Member, MemberStoreError> {
        match self.members.get(id) {
            Some(member) => Ok(member.clone()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn get_member_by_email(
        &self,
        email: &Email,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .values()
            .find(|m| &m.email == email)
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn get_member_by_invite_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .values()
            .find(|m| m.invite_token_hash.as_ref() == Some(hash))
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn get_member_by_reset_token(
        &self,
        hash: &TokenHash,
    ) -> Result<Member, MemberStoreError> {
        self.members
            .values()
            .find(|m| m.reset_token_hash.as_ref() == Some(hash))
            .cloned()
            .ok_or(MemberStoreError::MemberNotFound)
    }

    async fn list_members(
        &self,
        admin_id: &AdminId,
    ) -> Result<Vec<Member>, MemberStoreError> {
        let mut members: Vec<Member> = self
            .members
            .values()
            .filter(|m| &m.admin_id == admin_id)
            .cloned()
            .collect();
        members.sort_by_key(|m| m.join_date);
        Ok(members)
    }

    async fn update_member(
        &mut self,
        member: &Member,
    ) -> Result<(), MemberStoreError> {
        if self
            .members
            .values()
            .any(|m| m.id != member.id && m.email == member.email)
        {
            return Err(MemberStoreError::EmailAlreadyExists);
        }

        match self.members.get_mut(&member.id) {
            Some(existing) => {
                *existing = member.clone();
                Ok(())
            }
            None => Err(MemberStoreError::MemberNotFound),
        }
    }

    async fn delete_member(
        &mut self,
        id: &MemberId,
    ) -> Result<(), MemberStoreError> {
        match self.members.remove(id) {
            Some(_) => Ok(()),
            None => Err(MemberStoreError::MemberNotFound),
        }
    }
}
