// --- File: crates/agenda_booking/src/resolver.rs ---
//! Availability lookups with stale-result discard.
//!
//! Every lookup is issued a ticket carrying a monotonically increasing token
//! and the (date, professional, modality) triple it was issued for. A result
//! may only be applied while its token is still the latest one issued; any
//! newer selection, or an explicit invalidation, makes older tickets stale.

use agenda_common::models::{Modality, TimeSlot};
use agenda_common::services::{AvailabilityService, BoxedError};
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// The triple a slot list is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub professional_id: String,
    pub modality: Modality,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotTicket {
    token: u64,
    query: SlotQuery,
}

impl SlotTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &SlotQuery {
        &self.query
    }
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Availability service error: {0}")]
    Service(#[source] BoxedError),
    #[error("Availability lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// What happened to a requested slot refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRefresh {
    /// The result was current and applied; holds the number of slots.
    Applied(usize),
    /// A newer selection superseded the lookup; its result was dropped.
    Stale,
    /// The lookup failed and the failure was surfaced.
    Failed,
    /// Date, professional or modality is missing, so nothing was requested.
    Incomplete,
}

pub struct AvailabilityResolver {
    service: Arc<dyn AvailabilityService<Error = BoxedError>>,
    latest: AtomicU64,
    timeout: Duration,
}

impl AvailabilityResolver {
    pub fn new(service: Arc<dyn AvailabilityService<Error = BoxedError>>, timeout: Duration) -> Self {
        Self {
            service,
            latest: AtomicU64::new(0),
            timeout,
        }
    }

    /// Starts a new lookup generation. All previously issued tickets become stale.
    pub fn issue(&self, query: SlotQuery) -> SlotTicket {
        let token = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Issued availability ticket {} for {:?}", token, query);
        SlotTicket { token, query }
    }

    /// Makes every outstanding ticket stale without starting a new lookup.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: &SlotTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.token
    }

    /// Runs the lookup for a ticket. Staleness is for the caller to check
    /// once the result is back.
    pub async fn fetch(&self, ticket: &SlotTicket) -> Result<Vec<TimeSlot>, ResolveError> {
        let query = &ticket.query;
        let request = self
            .service
            .get_available_slots(query.date, &query.professional_id, query.modality);

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(slots)) => {
                debug!("Ticket {} resolved {} slots", ticket.token, slots.len());
                Ok(slots)
            }
            Ok(Err(e)) => {
                warn!("Ticket {} failed: {}", ticket.token, e);
                Err(ResolveError::Service(e))
            }
            Err(_) => {
                warn!("Ticket {} timed out after {:?}", ticket.token, self.timeout);
                Err(ResolveError::TimedOut(self.timeout))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_common::services::BoxFuture;

    struct FixedSlots;

    impl AvailabilityService for FixedSlots {
        type Error = BoxedError;

        fn get_available_slots(
            &self,
            _date: NaiveDate,
            _professional_id: &str,
            _modality: Modality,
        ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
            Box::pin(async move { Ok(vec![TimeSlot::new("09:00", true)]) })
        }
    }

    struct NeverAnswers;

    impl AvailabilityService for NeverAnswers {
        type Error = BoxedError;

        fn get_available_slots(
            &self,
            _date: NaiveDate,
            _professional_id: &str,
            _modality: Modality,
        ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
            Box::pin(std::future::pending())
        }
    }

    fn query(day: u32) -> SlotQuery {
        SlotQuery {
            date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            professional_id: "1".to_string(),
            modality: Modality::Presencial,
        }
    }

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let resolver = AvailabilityResolver::new(Arc::new(FixedSlots), Duration::from_secs(1));
        let first = resolver.issue(query(20));
        let second = resolver.issue(query(21));

        assert!(!resolver.is_current(&first));
        assert!(resolver.is_current(&second));
        assert!(second.token() > first.token());
    }

    #[test]
    fn test_invalidate_makes_ticket_stale() {
        let resolver = AvailabilityResolver::new(Arc::new(FixedSlots), Duration::from_secs(1));
        let ticket = resolver.issue(query(20));
        resolver.invalidate();
        assert!(!resolver.is_current(&ticket));
    }

    #[tokio::test]
    async fn test_fetch_returns_service_slots() {
        let resolver = AvailabilityResolver::new(Arc::new(FixedSlots), Duration::from_secs(1));
        let ticket = resolver.issue(query(20));
        let slots = resolver.fetch(&ticket).await.unwrap();
        assert_eq!(slots, vec![TimeSlot::new("09:00", true)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_times_out() {
        let resolver = AvailabilityResolver::new(Arc::new(NeverAnswers), Duration::from_secs(10));
        let ticket = resolver.issue(query(20));
        let err = resolver.fetch(&ticket).await.unwrap_err();
        assert!(matches!(err, ResolveError::TimedOut(d) if d == Duration::from_secs(10)));
    }
}
