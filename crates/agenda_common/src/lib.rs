// --- File: crates/agenda_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;    // Booking data structures
pub mod error;     // Error handling
pub mod services;  // Collaborator abstractions
pub mod logging;   // Logging utilities

// Re-export error types and utilities for easier access
pub use error::{
    AgendaError,
    config_error,
    validation_error,
    not_found,
    external_service_error,
    timeout_error,
    internal_error,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, log_error, log_result};

// This crate holds what the booking wizard shares with its collaborators:
// the data model, the collaborator traits, the common error type and logging setup.
