// --- File: crates/agenda_booking/src/error.rs ---
use agenda_common::{external_service_error, internal_error, timeout_error, validation_error, AgendaError};
use std::time::Duration;
use thiserror::Error;

use crate::logic::ValidationErrors;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Booking form is invalid: {0}")]
    Validation(ValidationErrors),
    #[error("A booking submission is already in progress")]
    SubmissionInFlight,
    #[error("Booking already confirmed; start a new booking first")]
    AlreadyConfirmed,
    #[error("Booking submission failed: {0}")]
    Submission(String),
    #[error("Booking submission timed out after {0:?}")]
    SubmissionTimeout(Duration),
    #[error("Could not load the professional directory: {0}")]
    Directory(String),
}

impl From<BookingError> for AgendaError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation(errors) => validation_error(errors),
            BookingError::SubmissionTimeout(after) => {
                timeout_error(format!("booking submission after {:?}", after))
            }
            BookingError::Submission(message) => external_service_error("booking-submission", message),
            BookingError::Directory(message) => external_service_error("professional-directory", message),
            other => internal_error(other),
        }
    }
}
