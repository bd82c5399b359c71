use chrono::{Duration, Utc};
use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;

use crate::app_state::{EmailClientType, MemberStoreType};
use crate::domain::{
    AdminId, Email, Member, MemberAPIError, MemberId, MemberPasswordHash,
    MemberProfile, MemberStatus, MemberStoreError, MemberUpdate, Password,
    PlaintextToken, TokenHash, ValidationError,
};

/// Reset tokens are only honored for this long after issuance. Invite
/// tokens never expire.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// Owns the member status state machine, invite and reset token flows, and
/// all admin-side ownership checks.
#[derive(Clone)]
pub struct MemberLifecycle {
    member_store: MemberStoreType,
    email_client: EmailClientType,
}

impl MemberLifecycle {
    pub fn new(
        member_store: MemberStoreType,
        email_client: EmailClientType,
    ) -> Self {
        Self {
            member_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "Creating member", skip_all)]
    pub async fn create_member(
        &self,
        acting_admin: &AdminId,
        profile: MemberProfile,
    ) -> Result<Member, MemberAPIError> {
        let invite_token = PlaintextToken::generate();
        let member =
            Member::new(*acting_admin, profile, TokenHash::of(&invite_token));

        {
            let mut store = self.member_store.write().await;
            store.add_member(member.clone()).await.map_err(|e| match e {
                MemberStoreError::EmailAlreadyExists => {
                    MemberAPIError::EmailAlreadyExists
                }
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?;
        }

        // Best-effort: the member is already persisted and the invite can be
        // re-issued from the login path.
        if let Err(e) = self
            .email_client
            .send_invite(&member.email, &invite_token)
            .await
        {
            tracing::warn!("Failed to dispatch invite email: {e:#}");
        }

        Ok(member)
    }

    /// First password set. The supplied email is compared byte-for-byte
    /// against the stored (lower-cased) address; a mismatch leaves the
    /// invite token consumable.
    #[tracing::instrument(name = "Consuming invite token", skip_all)]
    pub async fn consume_invite(
        &self,
        invite_token: &PlaintextToken,
        password: &Password,
        email: &str,
    ) -> Result<(), MemberAPIError> {
        let hash = TokenHash::of(invite_token);

        let mut member = {
            let store = self.member_store.read().await;
            store
                .get_member_by_invite_token(&hash)
                .await
                .map_err(|e| match e {
                    MemberStoreError::MemberNotFound => {
                        MemberAPIError::InvalidToken
                    }
                    err => MemberAPIError::UnexpectedError(eyre!(err)),
                })?
        };

        if member.email.as_ref().expose_secret() != email {
            return Err(MemberAPIError::EmailMismatch);
        }

        let password_hash = MemberPasswordHash::from_password(password)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;

        member.password_hash = Some(password_hash);
        member.status = MemberStatus::Active;
        member.invite_token_hash = None;

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Requesting password reset", skip_all)]
    pub async fn request_password_reset(
        &self,
        email: &Email,
    ) -> Result<(), MemberAPIError> {
        let mut member = {
            let store = self.member_store.read().await;
            store.get_member_by_email(email).await.map_err(|e| match e {
                MemberStoreError::MemberNotFound => MemberAPIError::NotFound,
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?
        };

        let reset_token = PlaintextToken::generate();
        member.reset_token_hash = Some(TokenHash::of(&reset_token));
        member.reset_token_expires_at =
            Some(Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES));
        // Invite and reset tokens are mutually exclusive per member.
        member.invite_token_hash = None;

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        if let Err(e) = self
            .email_client
            .send_password_reset(&member.email, &reset_token)
            .await
        {
            tracing::warn!("Failed to dispatch password reset email: {e:#}");
        }

        Ok(())
    }

    /// Installs a new password; never touches the member's status.
    #[tracing::instrument(name = "Completing password reset", skip_all)]
    pub async fn complete_reset(
        &self,
        reset_token: &PlaintextToken,
        new_password: &Password,
    ) -> Result<(), MemberAPIError> {
        let hash = TokenHash::of(reset_token);

        let mut member = {
            let store = self.member_store.read().await;
            store
                .get_member_by_reset_token(&hash)
                .await
                .map_err(|e| match e {
                    MemberStoreError::MemberNotFound => {
                        MemberAPIError::InvalidToken
                    }
                    err => MemberAPIError::UnexpectedError(eyre!(err)),
                })?
        };

        match member.reset_token_expires_at {
            Some(expires_at) if Utc::now() <= expires_at => (),
            _ => return Err(MemberAPIError::TokenExpired),
        }

        let password_hash = MemberPasswordHash::from_password(new_password)
            .await
            .map_err(MemberAPIError::UnexpectedError)?;

        member.password_hash = Some(password_hash);
        member.reset_token_hash = None;
        member.reset_token_expires_at = None;

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    /// Active and Deactivated move freely between each other (no-ops
    /// included); an Inactive member may never be status-changed here.
    #[tracing::instrument(name = "Changing member status", skip_all)]
    pub async fn change_status(
        &self,
        acting_admin: &AdminId,
        member_id: &MemberId,
        target: MemberStatus,
    ) -> Result<Member, MemberAPIError> {
        let mut member = self.owned_member(acting_admin, member_id).await?;

        if member.status == MemberStatus::Inactive
            || target == MemberStatus::Inactive
        {
            return Err(MemberAPIError::InvalidTransition {
                from: member.status,
                to: target,
            });
        }

        member.status = target;

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        Ok(member)
    }

    /// Removal is only permitted while the member is still Inactive; the
    /// embedded tasks go with the record.
    #[tracing::instrument(name = "Deleting member", skip_all)]
    pub async fn delete_member(
        &self,
        acting_admin: &AdminId,
        member_id: &MemberId,
    ) -> Result<(), MemberAPIError> {
        let member = self.owned_member(acting_admin, member_id).await?;

        if member.status != MemberStatus::Inactive {
            return Err(MemberAPIError::InvalidState(member.status));
        }

        self.member_store
            .write()
            .await
            .delete_member(member_id)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }

    #[tracing::instrument(name = "Updating member profile", skip_all)]
    pub async fn update_member(
        &self,
        acting_admin: &AdminId,
        member_id: &MemberId,
        update: MemberUpdate,
    ) -> Result<Member, MemberAPIError> {
        if update.is_empty() {
            return Err(ValidationError::new(
                "No fields supplied for update".to_string(),
            )
            .into());
        }

        let mut member = self.owned_member(acting_admin, member_id).await?;

        if let Some(first_name) = update.first_name {
            member.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            member.last_name = last_name;
        }
        if let Some(email) = update.email {
            member.email = email;
        }
        if let Some(position) = update.position {
            member.position = position;
        }
        if let Some(join_date) = update.join_date {
            member.join_date = join_date;
        }

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| match e {
                MemberStoreError::EmailAlreadyExists => {
                    MemberAPIError::EmailAlreadyExists
                }
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?;

        Ok(member)
    }

    #[tracing::instrument(name = "Listing members", skip_all)]
    pub async fn list_members(
        &self,
        acting_admin: &AdminId,
    ) -> Result<Vec<Member>, MemberAPIError> {
        self.member_store
            .read()
            .await
            .list_members(acting_admin)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))
    }

    async fn owned_member(
        &self,
        acting_admin: &AdminId,
        member_id: &MemberId,
    ) -> Result<Member, MemberAPIError> {
        let member = self
            .member_store
            .read()
            .await
            .get_member(member_id)
            .await
            .map_err(|e| match e {
                MemberStoreError::MemberNotFound => MemberAPIError::NotFound,
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?;

        if &member.admin_id != acting_admin {
            return Err(MemberAPIError::Forbidden);
        }

        Ok(member)
    }
}
