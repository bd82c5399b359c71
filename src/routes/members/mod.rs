mod change_status;
mod create_member;
mod create_password;
mod delete_member;
mod forgot_password;
mod list_members;
mod reset_password;
mod update_member;

pub use change_status::change_status;
pub use create_member::create_member;
pub use create_password::create_password;
pub use delete_member::delete_member;
pub use forgot_password::forgot_password;
pub use list_members::list_members;
pub use reset_password::reset_password;
pub use update_member::update_member;

use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::domain::{Member, MemberStatus};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MemberResponse {
    #[serde(rename = "memberId")]
    pub member_id: uuid::Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub position: String,
    #[serde(rename = "joinDate")]
    pub join_date: chrono::NaiveDate,
    pub status: MemberStatus,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            member_id: *member.id.as_ref(),
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.as_ref().expose_secret().to_owned(),
            position: member.position.clone(),
            join_date: member.join_date,
            status: member.status,
        }
    }
}
