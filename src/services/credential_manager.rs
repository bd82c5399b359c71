use color_eyre::eyre::eyre;
use secrecy::{ExposeSecret, Secret};

use crate::app_state::MemberStoreType;
use crate::domain::{
    verify_password_hash, MemberAPIError, MemberId, MemberPasswordHash,
    MemberStoreError, Password,
};

/// Fields for an authenticated member's own password change. When any field
/// is absent the whole operation is a silent no-op; this leniency is load
/// bearing for callers that PATCH profile and password through one form.
#[derive(Debug, Clone, Default)]
pub struct ChangePasswordFields {
    pub old_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
    pub new_password_confirm: Option<Secret<String>>,
}

#[derive(Clone)]
pub struct CredentialManager {
    member_store: MemberStoreType,
}

impl CredentialManager {
    pub fn new(member_store: MemberStoreType) -> Self {
        Self { member_store }
    }

    #[tracing::instrument(name = "Changing own password", skip_all)]
    pub async fn change_own_password(
        &self,
        member_id: &MemberId,
        fields: ChangePasswordFields,
    ) -> Result<(), MemberAPIError> {
        let (old_password, new_password, new_password_confirm) = match (
            fields.old_password,
            fields.new_password,
            fields.new_password_confirm,
        ) {
            (Some(old), Some(new), Some(confirm)) => (old, new, confirm),
            _ => return Ok(()),
        };

        let mut member = {
            let store = self.member_store.read().await;
            store.get_member(member_id).await.map_err(|e| match e {
                MemberStoreError::MemberNotFound => MemberAPIError::NotFound,
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })?
        };

        let stored_hash = member
            .password_hash
            .clone()
            .ok_or(MemberAPIError::InvalidCredentials)?;

        verify_password_hash(stored_hash.as_ref().to_owned(), old_password)
            .await
            .map_err(|_| MemberAPIError::InvalidCredentials)?;

        if new_password.expose_secret() != new_password_confirm.expose_secret()
        {
            return Err(MemberAPIError::PasswordMismatch);
        }

        let new_password = Password::parse(new_password)?;

        // Argon2 salts make direct hash comparison meaningless; sameness is
        // detected by verifying the candidate against the stored hash.
        if verify_password_hash(
            stored_hash.as_ref().to_owned(),
            new_password.as_ref().to_owned(),
        )
        .await
        .is_ok()
        {
            return Err(MemberAPIError::SamePassword);
        }

        member.password_hash = Some(
            MemberPasswordHash::from_password(&new_password)
                .await
                .map_err(MemberAPIError::UnexpectedError)?,
        );

        self.member_store
            .write()
            .await
            .update_member(&member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))?;

        Ok(())
    }
}
