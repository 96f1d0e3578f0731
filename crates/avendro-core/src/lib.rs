//! Avendro Core
//!
//! Wires the local store, the session and the API client together and
//! answers the questions the UI shell asks: which view to show, how to
//! present a failed submission, whether a submit is already in flight.

mod app;
mod config;
mod error;
mod form;
mod submit;
mod view;

pub use app::Avendro;
pub use config::{Config, DEFAULT_API_BASE_URL};
pub use error::CoreError;
pub use form::FormErrors;
pub use submit::{SubmitControl, SubmitGuard};
pub use view::AppView;

// Re-export core components
pub use avendro_api::{
    ApiClient, ApiError, AuthFailure, AuthResponse, BorrowerRegistrationRequest,
    CompanyRegistrationRequest, EmploymentStatus, FieldErrors, Gender, LendingPolicy,
    LoginRequest, MaritalStatus, RefreshResponse, Region, Resource,
};
pub use avendro_session::{Role, Session, SessionError, SessionManager, TokenPair, UserProfile, UserType};
pub use avendro_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
