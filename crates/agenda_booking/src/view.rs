// --- File: crates/agenda_booking/src/view.rs ---
//! Pure projections of the wizard state into what each step shows.
//!
//! Nothing here mutates state or talks to a collaborator; a front end renders
//! a [`StepView`] and turns user actions into controller calls.

use agenda_common::models::{Modality, Professional};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::controller::DirectorySnapshot;
use crate::logic::BookingRules;
use crate::notices;
use crate::state::{BookingState, WizardStep};

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// "Dia 21 de outubro"
pub fn format_date_label(date: NaiveDate) -> String {
    format!("Dia {:02} de {}", date.day(), MONTHS_PT[date.month0() as usize])
}

/// "09:00 - Presencial"
pub fn format_time_label(time: &str, modality: Modality) -> String {
    format!("{} - {}", time, modality.label())
}

// --- Step Indicator ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepMarker {
    pub number: u8,
    pub label: &'static str,
    /// Current or already passed.
    pub reached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub current: u8,
    pub total: u8,
    pub steps: Vec<StepMarker>,
}

impl StepIndicator {
    pub fn for_step(step: WizardStep) -> Self {
        let current = step.number();
        Self {
            current,
            total: WizardStep::COUNT,
            steps: WizardStep::ALL
                .iter()
                .map(|s| StepMarker {
                    number: s.number(),
                    label: s.label(),
                    reached: s.number() <= current,
                })
                .collect(),
        }
    }
}

// --- Specialty Filter ---

/// Step 1 specialty filter. Only narrows the visible list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialtyFilter(Option<String>);

impl SpecialtyFilter {
    /// Sentinel the picker uses for "no filter".
    pub const ALL: &'static str = "todas";

    pub fn select(&mut self, value: &str) {
        let value = value.trim();
        self.0 = if value.is_empty() || value == Self::ALL {
            None
        } else {
            Some(value.to_string())
        };
    }

    pub fn current(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn apply<'a>(&self, professionals: &'a [Professional]) -> Vec<&'a Professional> {
        professionals
            .iter()
            .filter(|p| self.0.as_deref().map_or(true, |s| p.specialty == s))
            .collect()
    }
}

// --- Step Views ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionalCard {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub registration: Option<String>,
    pub biography: Option<String>,
    pub photo: Option<String>,
    pub initials: String,
    pub selected: bool,
}

impl ProfessionalCard {
    fn new(professional: &Professional, selected_id: Option<&str>) -> Self {
        Self {
            id: professional.id.clone(),
            name: professional.name.clone(),
            specialty: professional.specialty.clone(),
            registration: professional.registration.clone(),
            biography: professional.biography.clone(),
            photo: professional.photo.clone(),
            initials: professional.initials(),
            selected: selected_id == Some(professional.id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionalStep {
    pub indicator: StepIndicator,
    pub specialties: Vec<String>,
    pub filter: Option<String>,
    pub professionals: Vec<ProfessionalCard>,
    pub continue_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotButton {
    pub time: String,
    pub available: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SlotPanel {
    /// Date or modality still missing.
    AwaitingSelection,
    Loading { message: &'static str },
    Failed { message: String },
    Empty { message: &'static str },
    Slots(Vec<SlotButton>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeStep {
    pub indicator: StepIndicator,
    pub professional: ProfessionalCard,
    pub date: Option<NaiveDate>,
    pub date_label: Option<String>,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub closed_days: Vec<Weekday>,
    pub modality: Option<Modality>,
    pub modalities: [Modality; 2],
    pub slots: SlotPanel,
    pub continue_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentSummary {
    pub professional_name: String,
    pub specialty: String,
    pub initials: String,
    pub photo: Option<String>,
    pub date_label: String,
    pub time_label: String,
}

impl AppointmentSummary {
    /// Needs professional, date, time and modality; otherwise there is nothing to summarize.
    pub fn from_state(state: &BookingState) -> Option<Self> {
        let professional = state.professional.as_ref()?;
        let date = state.form.date?;
        let time = state.form.time.as_deref()?;
        let modality = state.form.modality?;

        Some(Self {
            professional_name: professional.name.clone(),
            specialty: professional.specialty.clone(),
            initials: professional.initials(),
            photo: professional.photo.clone(),
            date_label: format_date_label(date),
            time_label: format_time_label(time, modality),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalDataStep {
    pub indicator: StepIndicator,
    pub summary: Option<AppointmentSummary>,
    pub insurance_providers: Vec<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub insurance: Option<String>,
    pub notes: Option<String>,
    pub submitting: bool,
    pub submit_enabled: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub title: &'static str,
    pub text: &'static str,
    pub action: &'static str,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepView {
    Professional(ProfessionalStep),
    DateTime(DateTimeStep),
    PersonalData(PersonalDataStep),
    Confirmation(ConfirmationView),
    /// Step 2 reached with no professional chosen; the step renders empty.
    Blank(StepIndicator),
}

pub fn render(
    state: &BookingState,
    directory: &DirectorySnapshot,
    filter: &SpecialtyFilter,
    rules: &BookingRules,
    today: NaiveDate,
) -> StepView {
    if state.wizard.success {
        return StepView::Confirmation(ConfirmationView {
            title: notices::CONFIRMATION_TITLE,
            text: notices::CONFIRMATION_TEXT,
            action: notices::NEW_BOOKING_ACTION,
            reference: state.receipt.as_ref().map(|r| r.reference.clone()),
        });
    }

    let indicator = StepIndicator::for_step(state.wizard.step);
    let selected_id = state.professional.as_ref().map(|p| p.id.as_str());

    match state.wizard.step {
        WizardStep::SelectProfessional => StepView::Professional(ProfessionalStep {
            indicator,
            specialties: directory.specialties.clone(),
            filter: filter.current().map(str::to_string),
            professionals: filter
                .apply(&directory.professionals)
                .into_iter()
                .map(|p| ProfessionalCard::new(p, selected_id))
                .collect(),
            continue_enabled: state.can_continue(),
        }),
        WizardStep::SelectDateTime => {
            let Some(professional) = state.professional.as_ref() else {
                return StepView::Blank(indicator);
            };
            StepView::DateTime(DateTimeStep {
                indicator,
                professional: ProfessionalCard::new(professional, selected_id),
                date: state.form.date,
                date_label: state.form.date.map(format_date_label),
                earliest_date: rules.earliest_bookable_date(today),
                latest_date: rules.latest_bookable_date(today),
                closed_days: rules.closed_days.clone(),
                modality: state.form.modality,
                modalities: Modality::ALL,
                slots: slot_panel(state),
                continue_enabled: state.can_continue(),
            })
        }
        WizardStep::PersonalData => StepView::PersonalData(PersonalDataStep {
            indicator,
            summary: AppointmentSummary::from_state(state),
            insurance_providers: directory.insurance_providers.clone(),
            name: state.form.name.clone(),
            email: state.form.email.clone(),
            phone: state.form.phone.clone(),
            insurance: state.form.insurance.clone(),
            notes: state.form.notes.clone(),
            submitting: state.wizard.submitting,
            submit_enabled: state.can_continue(),
            error: state.submission_error.clone(),
        }),
    }
}

fn slot_panel(state: &BookingState) -> SlotPanel {
    if state.form.date.is_none() || state.form.modality.is_none() {
        return SlotPanel::AwaitingSelection;
    }
    if state.loading_slots {
        return SlotPanel::Loading {
            message: notices::LOADING_SLOTS,
        };
    }
    if let Some(message) = &state.availability_error {
        return SlotPanel::Failed {
            message: message.clone(),
        };
    }
    if state.slots.is_empty() {
        return SlotPanel::Empty {
            message: notices::NO_SLOTS,
        };
    }

    let selected = state.form.time.as_deref();
    SlotPanel::Slots(
        state
            .slots
            .iter()
            .map(|s| SlotButton {
                time: s.time.clone(),
                available: s.available,
                selected: selected == Some(s.time.as_str()),
            })
            .collect(),
    )
}
