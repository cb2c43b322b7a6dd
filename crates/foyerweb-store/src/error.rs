//! Error types for foyerweb-store

use thiserror::Error;

/// Persistence error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Field encryption error: {0}")]
    Crypto(#[from] foyerweb_crypto::CryptoError),

    #[error("A sheet already exists for {month}/{year}")]
    DuplicatePeriod { year: i32, month: u32 },

    #[error("An account already exists for {email}")]
    DuplicateEmail { email: String },

    #[error("Stored timestamp is not RFC 3339: {value}")]
    InvalidTimestamp { value: String },
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// True when the error is a SQLite UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ffi::ErrorCode::ConstraintViolation,
                ..
            },
            _,
        )
    )
}
