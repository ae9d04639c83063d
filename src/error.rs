//! Error types for the Activity Roster API
//!
//! Provides structured error types for the roster store, seed configuration
//! loading, and the HTTP layer.

use axum::http::StatusCode;
use thiserror::Error;

/// Unified error type for the service
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Roster Errors
    // =========================================================================
    #[error("Activity not found: {name}")]
    ActivityNotFound { name: String },

    #[error("Student {email} is already signed up for {activity}")]
    AlreadyEnrolled { email: String, activity: String },

    #[error("Activity {activity} is full ({max_participants} participants)")]
    ActivityFull {
        activity: String,
        max_participants: u32,
    },

    #[error("Student {email} is not registered for {activity}")]
    NotRegistered { email: String, activity: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid request: {0}")]
    Validation(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Seed file parse error: {0}")]
    SeedParse(#[from] serde_yaml::Error),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error maps to at the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ActivityNotFound { .. } => StatusCode::NOT_FOUND,

            Error::AlreadyEnrolled { .. }
            | Error::ActivityFull { .. }
            | Error::NotRegistered { .. }
            | Error::Validation(_) => StatusCode::BAD_REQUEST,

            Error::Configuration(_)
            | Error::SeedParse(_)
            | Error::Internal(_)
            | Error::Json(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Check if this error was caused by the client's request
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Result type alias for the service
pub type Result<T> = std::result::Result<T, Error>;
