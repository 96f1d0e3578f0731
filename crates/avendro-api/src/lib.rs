//! Avendro API Client
//!
//! Single point of contact between the UI and the lending backend's REST
//! API. Owns bearer-token attachment and the session side effects of the
//! auth endpoints:
//! - login and registration persist tokens and profile
//! - refresh replaces the access token
//! - logout clears the local session even when the server call fails

mod auth;
mod client;
mod error;
mod registration;
mod resources;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, AuthFailure};
pub use registration::{
    BorrowerRegistrationRequest, CompanyRegistrationRequest, EmploymentStatus, FieldErrors,
    Gender, LendingPolicy, MaritalStatus, Region,
};
pub use resources::Resource;
pub use types::{AuthResponse, LoginRequest, RefreshResponse};

pub type Result<T> = std::result::Result<T, ApiError>;
