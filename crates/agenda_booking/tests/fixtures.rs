//! Test fixtures for booking wizard tests
//!
//! Scripted collaborators whose latency and failures are set per call, plus
//! factory functions for a controller pinned to a fixed clinic date.
#![allow(dead_code)]

use agenda_booking::service::RecordingNotificationSink;
use agenda_booking::{BookingController, BookingServices, BookingSettings};
use agenda_common::models::{BookingFormValues, BookingReceipt, Modality, TimeSlot};
use agenda_common::services::{
    AvailabilityService, BookingSubmissionService, BoxFuture, BoxedError, NotificationSink,
};
use agenda_config::{AppConfig, SimulationConfig};
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Friday 2026-10-16
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()
}

pub fn thursday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 22).unwrap()
}

pub fn settings() -> BookingSettings {
    BookingSettings::from_config(&AppConfig::default()).unwrap()
}

/// A slot list that identifies the date it was produced for.
pub fn slots_for(date: NaiveDate) -> Vec<TimeSlot> {
    vec![
        TimeSlot::new(format!("{:02}:00", 8 + date.day() % 10), true),
        TimeSlot::new("17:00", false),
    ]
}

/// Availability service with per-date latency and failures.
#[derive(Default)]
pub struct ScriptedAvailability {
    delays: HashMap<NaiveDate, Duration>,
    failing: HashSet<NaiveDate>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(mut self, date: NaiveDate, delay: Duration) -> Self {
        self.delays.insert(date, delay);
        self
    }

    pub fn fail_on(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl AvailabilityService for ScriptedAvailability {
    type Error = BoxedError;

    fn get_available_slots(
        &self,
        date: NaiveDate,
        _professional_id: &str,
        _modality: Modality,
    ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.get(&date).copied().unwrap_or_default();
        let fails = self.failing.contains(&date);
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if fails {
                Err(BoxedError::msg("agenda offline"))
            } else {
                Ok(slots_for(date))
            }
        })
    }
}

/// Submission endpoint that counts calls and can be told to fail.
pub struct CountingSubmission {
    calls: Arc<AtomicUsize>,
    delay: Duration,
    fails: bool,
    received: Arc<std::sync::Mutex<Vec<BookingFormValues>>>,
}

impl CountingSubmission {
    pub fn new(delay: Duration) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            delay,
            fails: false,
            received: Arc::default(),
        }
    }

    pub fn failing(delay: Duration) -> Self {
        Self {
            fails: true,
            ..Self::new(delay)
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    pub fn received(&self) -> Arc<std::sync::Mutex<Vec<BookingFormValues>>> {
        self.received.clone()
    }
}

impl BookingSubmissionService for CountingSubmission {
    type Error = BoxedError;

    fn submit_booking(&self, booking: BookingFormValues) -> BoxFuture<'_, BookingReceipt, Self::Error> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.received.lock().unwrap().push(booking);
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            if self.fails {
                Err(BoxedError::msg("booking endpoint returned 503"))
            } else {
                Ok(BookingReceipt {
                    reference: format!("AG-TEST-{}", call),
                    status: "requested".to_string(),
                })
            }
        })
    }
}

/// Simulated services with zero latency and notices kept in memory.
pub fn quiet_services() -> (BookingServices, Arc<RecordingNotificationSink>) {
    let simulation = SimulationConfig {
        availability_delay_ms: 0,
        submission_delay_ms: 0,
    };
    let notices = Arc::new(RecordingNotificationSink::new());
    let services = BookingServices::simulated(&settings(), &simulation).with_notifier(notices.clone());
    (services, notices)
}

pub fn services_with(
    availability: ScriptedAvailability,
    submission: CountingSubmission,
    notifier: Arc<dyn NotificationSink>,
) -> BookingServices {
    let (services, _) = quiet_services();
    services
        .with_availability(availability)
        .with_submission(submission)
        .with_notifier(notifier)
}

pub async fn build_controller(services: BookingServices) -> BookingController {
    BookingController::load(services, settings())
        .await
        .unwrap()
        .with_clock(today)
}
