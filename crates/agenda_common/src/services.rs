// --- File: crates/agenda_common/src/services.rs ---
//! Collaborator abstractions for the booking wizard.
//!
//! The wizard never talks to a backend directly. Everything it consumes (the
//! professional directory, insurance providers, availability and the booking
//! endpoint) and the notice channel it reports to are traits, so the simulated
//! implementations can be swapped for real ones without touching the controller.

use chrono::NaiveDate;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{BookingFormValues, BookingReceipt, Modality, Notice, Professional, TimeSlot};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl BoxedError {
    pub fn new<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        BoxedError(Box::new(err))
    }

    /// Builds an error from a plain message, for collaborators without an error type of their own.
    pub fn msg(message: impl Into<String>) -> Self {
        let message: String = message.into();
        BoxedError(message.into())
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

impl From<Box<dyn StdError + Send + Sync>> for BoxedError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        BoxedError(err)
    }
}

/// Supplies the bookable professionals and the specialty list.
pub trait ProfessionalDirectory: Send + Sync {
    /// Error type returned by directory operations.
    type Error: StdError + Send + Sync + 'static;

    fn list_professionals(&self) -> BoxFuture<'_, Vec<Professional>, Self::Error>;

    fn list_specialties(&self) -> BoxFuture<'_, Vec<String>, Self::Error>;
}

/// Supplies the insurance providers a patient can pick from.
pub trait InsuranceProviderList: Send + Sync {
    /// Error type returned by insurance list operations.
    type Error: StdError + Send + Sync + 'static;

    fn list_insurance_providers(&self) -> BoxFuture<'_, Vec<String>, Self::Error>;
}

/// Source of truth for slot availability.
pub trait AvailabilityService: Send + Sync {
    /// Error type returned by availability operations.
    type Error: StdError + Send + Sync + 'static;

    /// Slots for one (date, professional, modality) triple.
    ///
    /// Implementations must not borrow `professional_id` beyond the call.
    fn get_available_slots(
        &self,
        date: NaiveDate,
        professional_id: &str,
        modality: Modality,
    ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error>;
}

/// The endpoint that persists a completed booking request.
pub trait BookingSubmissionService: Send + Sync {
    /// Error type returned by submission operations.
    type Error: StdError + Send + Sync + 'static;

    fn submit_booking(&self, booking: BookingFormValues) -> BoxFuture<'_, BookingReceipt, Self::Error>;
}

/// Channel for user-facing notices. Presentation is up to the implementor.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Adapter that erases a collaborator's error type to [`BoxedError`].
///
/// Lets differently-typed implementations sit behind the same
/// `Arc<dyn Trait<Error = BoxedError>>`.
pub struct Boxed<S>(pub S);

impl<S: ProfessionalDirectory> ProfessionalDirectory for Boxed<S> {
    type Error = BoxedError;

    fn list_professionals(&self) -> BoxFuture<'_, Vec<Professional>, Self::Error> {
        let inner = self.0.list_professionals();
        Box::pin(async move { inner.await.map_err(BoxedError::new) })
    }

    fn list_specialties(&self) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let inner = self.0.list_specialties();
        Box::pin(async move { inner.await.map_err(BoxedError::new) })
    }
}

impl<S: InsuranceProviderList> InsuranceProviderList for Boxed<S> {
    type Error = BoxedError;

    fn list_insurance_providers(&self) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let inner = self.0.list_insurance_providers();
        Box::pin(async move { inner.await.map_err(BoxedError::new) })
    }
}

impl<S: AvailabilityService> AvailabilityService for Boxed<S> {
    type Error = BoxedError;

    fn get_available_slots(
        &self,
        date: NaiveDate,
        professional_id: &str,
        modality: Modality,
    ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
        let inner = self.0.get_available_slots(date, professional_id, modality);
        Box::pin(async move { inner.await.map_err(BoxedError::new) })
    }
}

impl<S: BookingSubmissionService> BookingSubmissionService for Boxed<S> {
    type Error = BoxedError;

    fn submit_booking(&self, booking: BookingFormValues) -> BoxFuture<'_, BookingReceipt, Self::Error> {
        let inner = self.0.submit_booking(booking);
        Box::pin(async move { inner.await.map_err(BoxedError::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Unreachable;

    impl fmt::Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("scheduler unreachable")
        }
    }

    impl StdError for Unreachable {}

    struct FailingAvailability;

    impl AvailabilityService for FailingAvailability {
        type Error = Unreachable;

        fn get_available_slots(
            &self,
            _date: NaiveDate,
            _professional_id: &str,
            _modality: Modality,
        ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
            Box::pin(async move { Err(Unreachable) })
        }
    }

    #[tokio::test]
    async fn test_boxed_adapter_erases_error_type() {
        let service: Arc<dyn AvailabilityService<Error = BoxedError>> =
            Arc::new(Boxed(FailingAvailability));
        let date = NaiveDate::from_ymd_opt(2026, 10, 21).unwrap();

        let err = service
            .get_available_slots(date, "3", Modality::Online)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "scheduler unreachable");
    }

    #[test]
    fn test_boxed_error_from_message() {
        let err = BoxedError::msg("timeout talking to the agenda");
        assert_eq!(err.to_string(), "timeout talking to the agenda");
    }
}
