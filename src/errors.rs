// errors.rs
use crate::domain::validation::ValidationErrors;
use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, validation, auth) or downstream layers (DB, config).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Payload Too Large")]
    PayloadTooLarge,

    #[error("Database Error: {0}")]
    DbError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::BadRequest(_) | ServerError::Validation(_) => 400,
            ServerError::Unauthorized(_) => 401,
            ServerError::Forbidden(_) => 403,
            ServerError::NotFound => 404,
            ServerError::PayloadTooLarge => 413,
            ServerError::DbError(_)
            | ServerError::Config(_)
            | ServerError::Io(_)
            | ServerError::InternalError => 500,
        }
    }

    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::NotFound => "not_found",
            ServerError::BadRequest(_) => "bad_request",
            ServerError::Validation(_) => "validation_failed",
            ServerError::Unauthorized(_) => "unauthorized",
            ServerError::Forbidden(_) => "forbidden",
            ServerError::PayloadTooLarge => "payload_too_large",
            _ => "internal_error",
        }
    }

    /// Message safe to show to the caller. Server-side faults never leak details.
    pub fn public_message(&self) -> String {
        if self.status() >= 500 {
            "Internal Server Error".to_string()
        } else {
            match self {
                ServerError::Validation(_) => "One or more fields are invalid".to_string(),
                ServerError::BadRequest(msg)
                | ServerError::Unauthorized(msg)
                | ServerError::Forbidden(msg) => msg.clone(),
                other => other.to_string(),
            }
        }
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
