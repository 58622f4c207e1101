// --- File: crates/agenda_booking/src/controller.rs ---
//! The booking wizard state machine.
//!
//! `BookingController` owns the wizard state behind a mutex that is never held
//! across an `.await`. Intents mutate the state synchronously; the async parts
//! (slot lookups and the submission) run unlocked and re-enter the lock to
//! apply their outcome. Slot results go through the [`AvailabilityResolver`]
//! so a superseded lookup can never overwrite the slots of a newer selection.

use agenda_common::log_error;
use agenda_common::models::{BookingFormValues, BookingReceipt, Modality, Professional};
use agenda_common::services::{BookingSubmissionService, BoxedError, NotificationSink};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

use crate::error::BookingError;
use crate::logic::{FieldError, FormField};
use crate::notices;
use crate::resolver::{AvailabilityResolver, SlotRefresh, SlotTicket};
use crate::service::BookingServices;
use crate::settings::BookingSettings;
use crate::state::{BookingPhase, BookingState, WizardStep};
use crate::view::{self, SpecialtyFilter, StepView};

/// Directory data loaded once when the wizard opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectorySnapshot {
    pub professionals: Vec<Professional>,
    pub specialties: Vec<String>,
    pub insurance_providers: Vec<String>,
}

impl DirectorySnapshot {
    pub async fn load(services: &BookingServices) -> Result<Self, BookingError> {
        let professionals = services
            .directory
            .list_professionals()
            .await
            .map_err(|e| BookingError::Directory(e.to_string()))?;
        let specialties = services
            .directory
            .list_specialties()
            .await
            .map_err(|e| BookingError::Directory(e.to_string()))?;
        let insurance_providers = services
            .insurance
            .list_insurance_providers()
            .await
            .map_err(|e| BookingError::Directory(e.to_string()))?;

        info!(
            "Loaded {} professionals, {} specialties, {} insurance providers",
            professionals.len(),
            specialties.len(),
            insurance_providers.len()
        );
        Ok(Self {
            professionals,
            specialties,
            insurance_providers,
        })
    }

    pub fn find(&self, professional_id: &str) -> Option<&Professional> {
        self.professionals.iter().find(|p| p.id == professional_id)
    }
}

type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub struct BookingController {
    directory: DirectorySnapshot,
    resolver: AvailabilityResolver,
    submission: Arc<dyn BookingSubmissionService<Error = BoxedError>>,
    notifier: Arc<dyn NotificationSink>,
    settings: BookingSettings,
    today: Clock,
    state: Mutex<BookingState>,
}

impl BookingController {
    /// Loads the directory from `services` and opens the wizard on step 1.
    pub async fn load(services: BookingServices, settings: BookingSettings) -> Result<Self, BookingError> {
        let directory = DirectorySnapshot::load(&services).await?;
        Ok(Self::new(directory, services, settings))
    }

    pub fn new(directory: DirectorySnapshot, services: BookingServices, settings: BookingSettings) -> Self {
        let time_zone = settings.time_zone;
        Self {
            directory,
            resolver: AvailabilityResolver::new(services.availability, settings.availability_timeout),
            submission: services.submission,
            notifier: services.notifier,
            settings,
            today: Arc::new(move || chrono::Utc::now().with_timezone(&time_zone).date_naive()),
            state: Mutex::new(BookingState::default()),
        }
    }

    /// Replaces the clinic-time clock used for the booking window.
    pub fn with_clock<F>(mut self, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.today = Arc::new(today);
        self
    }

    pub fn directory(&self) -> &DirectorySnapshot {
        &self.directory
    }

    pub fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    pub fn today(&self) -> NaiveDate {
        (self.today)()
    }

    fn lock(&self) -> MutexGuard<'_, BookingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Queries ---

    pub fn snapshot(&self) -> BookingState {
        self.lock().clone()
    }

    pub fn phase(&self) -> BookingPhase {
        self.lock().phase()
    }

    pub fn current_step(&self) -> WizardStep {
        self.lock().wizard.step
    }

    pub fn can_continue(&self) -> bool {
        self.lock().can_continue()
    }

    /// The presentation of whatever step is current.
    pub fn view(&self, filter: &SpecialtyFilter) -> StepView {
        view::render(
            &self.snapshot(),
            &self.directory,
            filter,
            &self.settings.rules,
            self.today(),
        )
    }

    // --- Step 1 ---

    /// Picks a professional and moves to step 2.
    ///
    /// Returns false when the id is unknown or the booking is already confirmed.
    #[instrument(skip(self))]
    pub async fn select_professional(&self, professional_id: &str) -> bool {
        let Some(professional) = self.directory.find(professional_id).cloned() else {
            warn!("Ignoring unknown professional id");
            return false;
        };

        let ticket = {
            let mut state = self.lock();
            if state.wizard.success {
                debug!("Booking already confirmed; ignoring professional selection");
                return false;
            }
            let changed = state
                .professional
                .as_ref()
                .map_or(true, |current| current.id != professional.id);

            state.form.professional_id = Some(professional.id.clone());
            state.form.specialty = Some(professional.specialty.clone());
            info!("Selected {} ({})", professional.name, professional.specialty);
            state.professional = Some(professional);
            state.wizard.step = WizardStep::SelectDateTime;

            if changed {
                self.restart_slots(&mut state)
            } else {
                None
            }
        };

        if let Some(ticket) = ticket {
            self.resolve(ticket).await;
        }
        true
    }

    // --- Step 2 ---

    /// Records the chosen date and refreshes slots.
    ///
    /// `None` (a cleared picker) is ignored. Dates outside the booking window
    /// or on a closed day are rejected.
    #[instrument(skip(self))]
    pub async fn select_date(&self, date: Option<NaiveDate>) -> bool {
        let Some(date) = date else {
            debug!("Date picker cleared; keeping previous date");
            return false;
        };
        if let Err(rejection) = self.settings.rules.check_date(date, self.today()) {
            warn!("Rejected date: {}", rejection);
            return false;
        }

        let ticket = {
            let mut state = self.lock();
            if state.wizard.success {
                return false;
            }
            state.form.date = Some(date);
            self.restart_slots(&mut state)
        };

        if let Some(ticket) = ticket {
            self.resolve(ticket).await;
        }
        true
    }

    #[instrument(skip(self))]
    pub async fn select_modality(&self, modality: Modality) -> bool {
        let ticket = {
            let mut state = self.lock();
            if state.wizard.success {
                return false;
            }
            state.form.modality = Some(modality);
            self.restart_slots(&mut state)
        };

        if let Some(ticket) = ticket {
            self.resolve(ticket).await;
        }
        true
    }

    /// Records an available slot and moves to step 3.
    #[instrument(skip(self))]
    pub fn select_time_slot(&self, time: &str) -> bool {
        let mut state = self.lock();
        if state.wizard.success {
            return false;
        }
        let Some(slot) = state.slots.iter().find(|s| s.time == time).cloned() else {
            debug!("Time is not in the current slot list");
            return false;
        };
        if !slot.available {
            debug!("Time slot is taken");
            return false;
        }

        state.form.time = Some(slot.time);
        if state.wizard.step == WizardStep::SelectDateTime {
            state.wizard.step = WizardStep::PersonalData;
        }
        true
    }

    /// Re-runs the lookup for the current triple.
    pub async fn refresh_availability(&self) -> SlotRefresh {
        let ticket = {
            let mut state = self.lock();
            if state.wizard.success {
                return SlotRefresh::Incomplete;
            }
            self.restart_slots(&mut state)
        };

        match ticket {
            Some(ticket) => self.resolve(ticket).await,
            None => SlotRefresh::Incomplete,
        }
    }

    // Caller holds the lock. Issuing under the lock keeps token order equal to
    // the order in which selections were applied.
    fn restart_slots(&self, state: &mut BookingState) -> Option<SlotTicket> {
        state.discard_slots();
        match state.slot_query() {
            Some(query) => {
                state.loading_slots = true;
                Some(self.resolver.issue(query))
            }
            None => {
                self.resolver.invalidate();
                None
            }
        }
    }

    async fn resolve(&self, ticket: SlotTicket) -> SlotRefresh {
        let outcome = self.resolver.fetch(&ticket).await;

        let notice = {
            let mut state = self.lock();
            let current_query = state.slot_query();
            if !self.resolver.is_current(&ticket) || current_query.as_ref() != Some(ticket.query()) {
                debug!("Discarding stale availability for ticket {}", ticket.token());
                return SlotRefresh::Stale;
            }

            state.loading_slots = false;
            match outcome {
                Ok(slots) => {
                    let count = slots.len();
                    state.slots = slots;
                    state.availability_error = None;
                    return SlotRefresh::Applied(count);
                }
                Err(e) => {
                    log_error(&e, "Failed to load available slots");
                    state.slots.clear();
                    state.availability_error = Some(e.to_string());
                    notices::availability_failed()
                }
            }
        };

        self.notifier.notify(notice);
        SlotRefresh::Failed
    }

    // --- Navigation ---

    pub fn go_to_next_step(&self) -> WizardStep {
        let mut state = self.lock();
        if !state.wizard.success {
            state.wizard.step = state.wizard.step.next();
        }
        state.wizard.step
    }

    pub fn go_to_previous_step(&self) -> WizardStep {
        let mut state = self.lock();
        if !state.wizard.success {
            state.wizard.step = state.wizard.step.previous();
        }
        state.wizard.step
    }

    // --- Step 3 ---

    /// Writes one of the typed-in fields. Picks made through the wizard
    /// (professional, date, modality, time) are rejected here.
    pub fn set_field(&self, field: FormField, value: impl Into<String>) -> bool {
        if !field.is_free_text() {
            warn!("{} cannot be set as free text", field);
            return false;
        }
        let value = value.into();
        let mut state = self.lock();
        if state.wizard.success {
            return false;
        }

        let form = &mut state.form;
        match field {
            FormField::Name => form.name = value,
            FormField::Email => form.email = value,
            FormField::Phone => form.phone = value,
            FormField::Insurance => form.insurance = non_empty(value),
            FormField::Notes => form.notes = non_empty(value),
            _ => return false,
        }
        true
    }

    /// Checks one field as it currently stands, for inline error display.
    pub fn validate_field(&self, field: FormField) -> Option<FieldError> {
        let today = self.today();
        let state = self.lock();
        self.settings.rules.validate_field(field, &state.form, today)
    }

    /// Validates and sends the booking.
    ///
    /// At most one submission is outstanding at any time; a second call while
    /// one is in flight returns [`BookingError::SubmissionInFlight`] without
    /// contacting the service.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<BookingReceipt, BookingError> {
        let today = self.today();
        let booking = {
            let mut state = self.lock();
            if state.wizard.success {
                return Err(BookingError::AlreadyConfirmed);
            }
            if state.wizard.submitting {
                warn!("Submission already in flight; ignoring");
                return Err(BookingError::SubmissionInFlight);
            }
            if let Err(errors) = self.settings.rules.validate(&state.form, today) {
                info!("Booking form rejected: {}", errors);
                return Err(BookingError::Validation(errors));
            }
            state.wizard.submitting = true;
            state.submission_error = None;
            state.form.clone()
        };

        info!(
            "Submitting booking for {:?} on {:?} at {:?}",
            booking.professional_id, booking.date, booking.time
        );
        let timeout = self.settings.submission_timeout;
        let result = match tokio::time::timeout(timeout, self.submission.submit_booking(booking)).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(BookingError::Submission(e.to_string())),
            Err(_) => Err(BookingError::SubmissionTimeout(timeout)),
        };

        let notice = {
            let mut state = self.lock();
            state.wizard.submitting = false;
            match &result {
                Ok(receipt) => {
                    info!("Booking accepted with reference {}", receipt.reference);
                    state.form = BookingFormValues::default();
                    state.wizard.success = true;
                    state.receipt = Some(receipt.clone());
                    notices::booking_confirmed()
                }
                Err(e) => {
                    log_error(e, "Booking submission failed");
                    state.submission_error = Some(e.to_string());
                    notices::booking_failed()
                }
            }
        };

        self.notifier.notify(notice);
        result
    }

    /// Clears everything and returns to step 1.
    ///
    /// Refused while a submission is outstanding, so a late result cannot
    /// land on the fresh wizard.
    pub fn reset(&self) -> bool {
        let mut state = self.lock();
        if state.wizard.submitting {
            warn!("Reset requested while submitting; ignoring");
            return false;
        }
        *state = BookingState::default();
        self.resolver.invalidate();
        info!("Booking wizard reset");
        true
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
