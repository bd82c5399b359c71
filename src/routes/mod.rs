pub mod auth;
pub mod me;
pub mod members;
