mod admin_id;
mod data_stores;
mod email;
mod email_client;
mod error;
mod member;
mod member_id;
mod password;
mod password_hash;
mod task;
mod task_id;
mod token;

pub use admin_id::*;
pub use data_stores::*;
pub use email::*;
pub use email_client::*;
pub use error::*;
pub use member::*;
pub use member_id::*;
pub use password::*;
pub use password_hash::*;
pub use task::*;
pub use task_id::*;
pub use token::*;
