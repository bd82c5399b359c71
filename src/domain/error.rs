use super::MemberStatus;
use color_eyre::eyre::Report;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemberAPIError {
    #[error("Access revoked")]
    AccessRevoked,
    #[error("Email already in use")]
    EmailAlreadyExists,
    #[error("Email does not match the invited member")]
    EmailMismatch,
    #[error("Forbidden: member does not belong to your team")]
    Forbidden,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Member must be inactive before deletion, current status: {0:?}")]
    InvalidState(MemberStatus),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: MemberStatus,
        to: MemberStatus,
    },
    #[error("Missing token")]
    MissingToken,
    #[error("Member not found")]
    NotFound,
    #[error("Onboarding incomplete: a new invite has been emailed")]
    OnboardingIncomplete,
    #[error("Password and password confirmation must match")]
    PasswordMismatch,
    #[error("New password must differ from the current password")]
    SamePassword,
    #[error("Reset token has expired")]
    TokenExpired,
    #[error("Unexpected error")]
    UnexpectedError(#[source] Report),
    #[error("Validation error")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Validation error: {0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: String) -> Self {
        Self(message)
    }

    pub fn as_ref(&self) -> &String {
        &self.0
    }
}
