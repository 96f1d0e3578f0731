//! Avendro Session Management
//!
//! - A session is an access token, a refresh token and the user's profile
//! - It is written to the local store on login or registration
//! - Refresh replaces the access token only
//! - Logout, or anything unreadable on load, removes all three keys together

mod error;
mod manager;
mod profile;
mod session;

pub use error::SessionError;
pub use manager::{
    SessionManager, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, USER_DATA_KEY,
};
pub use profile::{Role, UserProfile, UserType};
pub use session::{Session, TokenPair};

pub type Result<T> = std::result::Result<T, SessionError>;
