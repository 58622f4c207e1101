use std::fmt;
use thiserror::Error;

/// The base error type for the booking workspace.
///
/// Each crate can extend this by implementing `From<SpecificError> for AgendaError`.
#[derive(Error, Debug)]
pub enum AgendaError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during a collaborator call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> AgendaError {
    AgendaError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn timeout_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::TimeoutError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> AgendaError {
    AgendaError::InternalError(message.to_string())
}
