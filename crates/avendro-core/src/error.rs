//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] avendro_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] avendro_session::SessionError),

    #[error(transparent)]
    Api(#[from] avendro_api::ApiError),

    #[error("Please correct the highlighted fields.")]
    Validation(#[from] avendro_api::FieldErrors),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
