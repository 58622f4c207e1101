// --- File: crates/agenda_booking/src/service.rs ---
//! In-process collaborators for the booking wizard.
//!
//! The static directory and simulated backends stand in for the clinic's real
//! services: they answer after a configured delay and never fail. The
//! notification sinks either log notices or keep them for inspection.

use agenda_common::models::{
    BookingFormValues, BookingReceipt, Modality, Notice, NoticeLevel, Professional, TimeSlot,
};
use agenda_common::services::{
    AvailabilityService, BookingSubmissionService, Boxed, BoxFuture, BoxedError,
    InsuranceProviderList, NotificationSink, ProfessionalDirectory,
};
use agenda_config::models::SimulationConfig;
use chrono::NaiveDate;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::settings::{BookingSettings, ScheduleRules};

// --- Directory ---

pub struct StaticProfessionalDirectory {
    professionals: Vec<Professional>,
    specialties: Vec<String>,
}

impl StaticProfessionalDirectory {
    pub fn new(professionals: Vec<Professional>, specialties: Vec<String>) -> Self {
        Self {
            professionals,
            specialties,
        }
    }

    /// The clinic's current roster.
    pub fn clinic_defaults() -> Self {
        let professionals = vec![
            Professional::new("1", "Dra. Rochelle Marquetto", "Psiquiatria")
                .with_registration("CREMERS: 39448 | RQE 43138")
                .with_photo("/lovable-uploads/c34a8ed3-b933-4a34-9758-66f764adb5ef.png")
                .with_biography(
                    "CEO e Responsável técnica (medicina) da Pontual Psiquiatria. \
                     Especialização em Psiquiatria pela Pontifícia Universidade Católica do Rio Grande \
                     do Sul (PUC-RS). MBA em Gestão em Saúde pelo Instituto Singularidades. \
                     Realizou Psychiatry Observership Program at The University of Texas Health \
                     Science Center at Houston. Especialização em Psicoterapia de Orientação Analítica \
                     pelo Centro de Estudos Luiz Guedes da Universidade Federal do Rio Grande do Sul \
                     (UFRGS).",
                ),
            Professional::new("2", "Dr. Carlos Silva", "Neurologia")
                .with_registration("CRM: 56789")
                .with_biography("Especialista em neurologia com 15 anos de experiência."),
            Professional::new("3", "Dra. Ana Santos", "Cardiologia")
                .with_registration("CRM: 45678")
                .with_biography("Cardiologista com experiência em procedimentos avançados."),
        ];
        let specialties = [
            "Clínica Geral",
            "Cardiologia",
            "Dermatologia",
            "Ginecologia",
            "Neurologia",
            "Oftalmologia",
            "Ortopedia",
            "Pediatria",
            "Psiquiatria",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self::new(professionals, specialties)
    }
}

impl ProfessionalDirectory for StaticProfessionalDirectory {
    type Error = Infallible;

    fn list_professionals(&self) -> BoxFuture<'_, Vec<Professional>, Self::Error> {
        let professionals = self.professionals.clone();
        Box::pin(async move { Ok(professionals) })
    }

    fn list_specialties(&self) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let specialties = self.specialties.clone();
        Box::pin(async move { Ok(specialties) })
    }
}

pub struct StaticInsuranceProviders(Vec<String>);

impl StaticInsuranceProviders {
    pub fn new(providers: Vec<String>) -> Self {
        Self(providers)
    }

    pub fn clinic_defaults() -> Self {
        Self::new(
            ["Unimed", "Bradesco Saúde", "SulAmérica", "Amil", "Particular"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl InsuranceProviderList for StaticInsuranceProviders {
    type Error = Infallible;

    fn list_insurance_providers(&self) -> BoxFuture<'_, Vec<String>, Self::Error> {
        let providers = self.0.clone();
        Box::pin(async move { Ok(providers) })
    }
}

// --- Simulated Backends ---

/// Reports the full catalog for any triple, with the configured times taken.
pub struct SimulatedAvailabilityService {
    schedule: ScheduleRules,
    delay: Duration,
}

impl SimulatedAvailabilityService {
    pub fn new(schedule: ScheduleRules, delay: Duration) -> Self {
        Self { schedule, delay }
    }
}

impl AvailabilityService for SimulatedAvailabilityService {
    type Error = Infallible;

    fn get_available_slots(
        &self,
        date: NaiveDate,
        professional_id: &str,
        modality: Modality,
    ) -> BoxFuture<'_, Vec<TimeSlot>, Self::Error> {
        debug!(
            "Simulated availability for professional {} on {} ({})",
            professional_id, date, modality
        );
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            Ok(crate::logic::mark_availability(
                &self.schedule.catalog(),
                &self.schedule.unavailable,
            ))
        })
    }
}

/// Accepts every booking and hands back a fresh reference.
pub struct SimulatedBookingSubmission {
    delay: Duration,
}

impl SimulatedBookingSubmission {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl BookingSubmissionService for SimulatedBookingSubmission {
    type Error = Infallible;

    fn submit_booking(&self, booking: BookingFormValues) -> BoxFuture<'_, BookingReceipt, Self::Error> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            match serde_json::to_string(&booking) {
                Ok(payload) => debug!("Simulated submission payload: {}", payload),
                Err(e) => warn!("Could not serialize booking for logging: {}", e),
            }
            let receipt = BookingReceipt {
                reference: format!("AG-{}", Uuid::new_v4().simple()),
                status: "requested".to_string(),
            };
            info!("Simulated booking accepted with reference {}", receipt.reference);
            Ok(receipt)
        })
    }
}

// --- Notification Sinks ---

/// Writes notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!(title = %notice.title, "{}", notice.description),
            NoticeLevel::Error => warn!(title = %notice.title, "{}", notice.description),
        }
    }
}

/// Keeps every notice in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

// --- Wiring ---

/// The collaborators a controller is built from.
#[derive(Clone)]
pub struct BookingServices {
    pub directory: Arc<dyn ProfessionalDirectory<Error = BoxedError>>,
    pub insurance: Arc<dyn InsuranceProviderList<Error = BoxedError>>,
    pub availability: Arc<dyn AvailabilityService<Error = BoxedError>>,
    pub submission: Arc<dyn BookingSubmissionService<Error = BoxedError>>,
    pub notifier: Arc<dyn NotificationSink>,
}

impl BookingServices {
    /// Static directory, simulated backends and log-only notices.
    pub fn simulated(settings: &BookingSettings, simulation: &SimulationConfig) -> Self {
        Self {
            directory: Arc::new(Boxed(StaticProfessionalDirectory::clinic_defaults())),
            insurance: Arc::new(Boxed(StaticInsuranceProviders::clinic_defaults())),
            availability: Arc::new(Boxed(SimulatedAvailabilityService::new(
                settings.schedule.clone(),
                Duration::from_millis(simulation.availability_delay_ms),
            ))),
            submission: Arc::new(Boxed(SimulatedBookingSubmission::new(Duration::from_millis(
                simulation.submission_delay_ms,
            )))),
            notifier: Arc::new(TracingNotificationSink),
        }
    }

    pub fn with_availability<S>(mut self, service: S) -> Self
    where
        S: AvailabilityService + 'static,
    {
        self.availability = Arc::new(Boxed(service));
        self
    }

    pub fn with_submission<S>(mut self, service: S) -> Self
    where
        S: BookingSubmissionService + 'static,
    {
        self.submission = Arc::new(Boxed(service));
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }
}
