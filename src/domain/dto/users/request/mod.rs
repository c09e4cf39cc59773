pub mod auth_request;
pub mod create_user;
pub mod update_user;

pub use auth_request::*;
pub use create_user::CreateUser;
pub use update_user::{UpdatePasswordRequest, UpdateUserRequest};
