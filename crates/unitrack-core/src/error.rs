//! Unified application error types for Unitrack.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The command layer turns an
//! [`AppError`] into a private chat reply via [`AppError::user_message`].

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The command was issued outside of a guild.
    Context,
    /// The referenced unicycle, role, or pending transfer does not exist.
    NotFound,
    /// The caller does not have permission to perform the action.
    Authorization,
    /// A duplicate name or duplicate admin-role registration.
    Conflict,
    /// Input validation failed.
    Validation,
    /// A persistence operation failed.
    Database,
    /// The chat platform could not answer a lookup.
    ExternalService,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context => write!(f, "CONTEXT"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Database => write!(f, "DATABASE"),
            Self::ExternalService => write!(f, "EXTERNAL_SERVICE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout Unitrack.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-guild-context error.
    pub fn context(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Context, message)
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create an external service error.
    pub fn external_service(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ExternalService, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the message is safe to show to the person who issued the command.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Context
                | ErrorKind::NotFound
                | ErrorKind::Authorization
                | ErrorKind::Conflict
                | ErrorKind::Validation
        )
    }

    /// Text shown privately to the caller.
    ///
    /// Store, platform, and internal failures are replaced with a generic
    /// sentence so nothing about the backend leaks into chat.
    pub fn user_message(&self) -> String {
        match self.kind {
            _ if self.is_user_facing() => self.message.clone(),
            ErrorKind::Database => {
                "Something went wrong while saving. Nothing was changed, please try again."
                    .to_string()
            }
            ErrorKind::ExternalService => {
                "Could not verify your permissions right now. Please try again.".to_string()
            }
            _ => "An unexpected error occurred. Please try again.".to_string(),
        }
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}
