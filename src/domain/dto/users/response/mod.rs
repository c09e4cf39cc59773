pub mod google_login_response;
pub mod user_response;

pub use google_login_response::{GoogleLoginResult, PendingGoogleUser};
pub use user_response::{AuthResponse, AuthUser, MessageResponse, UserResponse};
