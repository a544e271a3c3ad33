//! Application error taxonomy
//!
//! Every variant is recovered at the route boundary: `IntoResponse`
//! turns it into a redirect plus a transient notice, never a raw
//! error page.

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::flash::{self, Notice};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Empty required field during registration
    #[error("please fill in all fields")]
    InvalidInput,

    /// Registration attempt with an existing username
    #[error("username already exists")]
    DuplicateUsername,

    /// Login with unknown username or wrong password
    #[error("invalid username or password")]
    AuthenticationFailure,

    /// Missing required generation fields
    #[error("{0}")]
    Validation(String),

    /// Upstream text-generation failure of any kind
    #[error("error generating project statement: {0}")]
    Generation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error("password hashing error: {0}")]
    Hash(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (location, notice) = match self {
            AppError::InvalidInput => ("/register", Notice::danger("Please fill in all fields")),
            AppError::DuplicateUsername => {
                ("/register", Notice::danger("Username already exists"))
            }
            AppError::AuthenticationFailure => {
                ("/", Notice::danger("Invalid username or password"))
            }
            AppError::Validation(message) => ("/home", Notice::danger(message)),
            AppError::Generation(message) => (
                "/home",
                Notice::danger(format!("Error generating project statement: {message}")),
            ),
            AppError::Database(e) => {
                error!("Database error: {}", e);
                ("/", Notice::danger("Something went wrong. Please try again."))
            }
            AppError::Hash(e) => {
                error!("Password hashing error: {}", e);
                ("/", Notice::danger("Something went wrong. Please try again."))
            }
        };

        flash::redirect_with_notice(location, &notice)
    }
}

/// Type alias for handler results
pub type AppResult<T> = Result<T, AppError>;
