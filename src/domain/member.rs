use super::{
    AdminId, Email, MemberId, MemberPasswordHash, Task, TokenHash,
    ValidationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Inactive,
    Active,
    Deactivated,
}

impl MemberStatus {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "INACTIVE" => Ok(Self::Inactive),
            "ACTIVE" => Ok(Self::Active),
            "DEACTIVATED" => Ok(Self::Deactivated),
            other => Err(ValidationError::new(format!(
                "Invalid member status: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
            Self::Deactivated => "DEACTIVATED",
        }
    }
}

/// The member aggregate. Tasks are embedded and rewritten with the record;
/// at most one of the two token hashes is ever present.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub admin_id: AdminId,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub position: String,
    pub join_date: NaiveDate,
    pub status: MemberStatus,
    pub password_hash: Option<MemberPasswordHash>,
    pub invite_token_hash: Option<TokenHash>,
    pub reset_token_hash: Option<TokenHash>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub tasks: Vec<Task>,
}

impl Member {
    pub fn new(
        admin_id: AdminId,
        profile: MemberProfile,
        invite_token_hash: TokenHash,
    ) -> Self {
        Self {
            id: MemberId::default(),
            admin_id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            position: profile.position,
            join_date: profile.join_date,
            status: MemberStatus::Inactive,
            password_hash: None,
            invite_token_hash: Some(invite_token_hash),
            reset_token_hash: None,
            reset_token_expires_at: None,
            tasks: Vec::new(),
        }
    }
}

/// Required profile fields for onboarding a new member.
#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub position: String,
    pub join_date: NaiveDate,
}

impl MemberProfile {
    pub fn parse(
        first_name: String,
        last_name: String,
        email: Email,
        position: String,
        join_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("first name", &first_name),
            ("last name", &last_name),
            ("position", &position),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::new(format!(
                    "Missing required field: {field}"
                )));
            }
        }

        Ok(Self {
            first_name,
            last_name,
            email,
            position,
            join_date,
        })
    }
}

/// Partial profile update; at least one field must be supplied.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub position: Option<String>,
    pub join_date: Option<NaiveDate>,
}

impl MemberUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.position.is_none()
            && self.join_date.is_none()
    }
}
