use color_eyre::eyre::eyre;
use secrecy::Secret;

use crate::app_state::{EmailClientType, MemberStoreType};
use crate::domain::{
    verify_password_hash, Email, MemberAPIError, MemberStatus,
    MemberStoreError, Password, PlaintextToken, TokenHash,
};
use crate::utils::auth::generate_member_auth_token;

/// Verifies member credentials and issues the signed bearer token. The
/// login-gating table only treats INACTIVE specially: a deactivated member
/// with a valid password still falls through to the password check.
#[derive(Clone)]
pub struct AuthGateway {
    member_store: MemberStoreType,
    email_client: EmailClientType,
}

impl AuthGateway {
    pub fn new(
        member_store: MemberStoreType,
        email_client: EmailClientType,
    ) -> Self {
        Self {
            member_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "Member login", skip_all)]
    pub async fn login(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Secret<String>, MemberAPIError> {
        let mut member = {
            let store = self.member_store.read().await;
            store.get_member_by_email(email).await.map_err(|e| match e {
                MemberStoreError::MemberNotFound => MemberAPIError::NotFound,
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?
        };

        if member.status == MemberStatus::Inactive {
            if member.password_hash.is_none() {
                // Onboarding was never finished: re-issue the invite and
                // point the caller back at the create-password flow.
                let invite_token = PlaintextToken::generate();
                member.invite_token_hash = Some(TokenHash::of(&invite_token));
                member.reset_token_hash = None;
                member.reset_token_expires_at = None;

                self.member_store
                    .write()
                    .await
                    .update_member(&member)
                    .await
                    .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

                if let Err(e) = self
                    .email_client
                    .send_invite(&member.email, &invite_token)
                    .await
                {
                    tracing::warn!("Failed to dispatch invite email: {e:#}");
                }

                return Err(MemberAPIError::OnboardingIncomplete);
            }

            // INACTIVE with a password set marks a member pulled from active
            // use but not yet purged.
            return Err(MemberAPIError::AccessRevoked);
        }

        let stored_hash = member
            .password_hash
            .as_ref()
            .ok_or(MemberAPIError::InvalidCredentials)?;

        verify_password_hash(
            stored_hash.as_ref().to_owned(),
            password.as_ref().to_owned(),
        )
        .await
        .map_err(|_| MemberAPIError::InvalidCredentials)?;

        generate_member_auth_token(&member)
            .map_err(MemberAPIError::UnexpectedError)
    }
}
