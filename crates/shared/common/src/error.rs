//! Unified error handling.
//!
//! Precondition failures are raised before any storage access. Storage
//! failures are carried through unchanged so callers see the original
//! `DbErr`.

use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Precondition errors
    #[error("Value cannot be null. Parameter name: {0}")]
    InvalidArgument(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn invalid_argument(param: impl Into<String>) -> Self {
        AppError::InvalidArgument(param.into())
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::NotFound => "NOT_FOUND",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Get user-facing message (hides storage details)
    pub fn user_message(&self) -> String {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Check if this is a precondition failure raised before any I/O
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_))
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}
