// --- File: crates/agenda_booking/src/state.rs ---
use agenda_common::models::{BookingFormValues, BookingReceipt, Professional, TimeSlot};
use serde::Serialize;

use crate::resolver::SlotQuery;

/// The three wizard steps, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum WizardStep {
    #[default]
    SelectProfessional,
    SelectDateTime,
    PersonalData,
}

impl WizardStep {
    pub const COUNT: u8 = 3;
    pub const ALL: [WizardStep; 3] = [
        WizardStep::SelectProfessional,
        WizardStep::SelectDateTime,
        WizardStep::PersonalData,
    ];

    /// 1-based position.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::SelectProfessional => 1,
            WizardStep::SelectDateTime => 2,
            WizardStep::PersonalData => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::SelectProfessional),
            2 => Some(WizardStep::SelectDateTime),
            3 => Some(WizardStep::PersonalData),
            _ => None,
        }
    }

    /// Saturates at the last step.
    pub fn next(self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(self)
    }

    /// Saturates at the first step.
    pub fn previous(self) -> Self {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(self)
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::SelectProfessional => "Profissional",
            WizardStep::SelectDateTime => "Data e Hora",
            WizardStep::PersonalData => "Dados",
        }
    }
}

/// Coarse position in the wizard, with the terminal success state folded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookingPhase {
    SelectProfessional,
    SelectDateTime,
    PersonalData,
    Success,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub success: bool,
    pub submitting: bool,
}

/// Everything the wizard knows at one point in time.
///
/// The controller owns the live copy; callers get clones through
/// `BookingController::snapshot`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookingState {
    pub wizard: WizardState,
    pub professional: Option<Professional>,
    pub form: BookingFormValues,
    pub slots: Vec<TimeSlot>,
    pub loading_slots: bool,
    /// Message of the last failed lookup for the current triple.
    pub availability_error: Option<String>,
    /// Message of the last failed submission.
    pub submission_error: Option<String>,
    pub receipt: Option<BookingReceipt>,
}

impl BookingState {
    pub fn phase(&self) -> BookingPhase {
        if self.wizard.success {
            return BookingPhase::Success;
        }
        match self.wizard.step {
            WizardStep::SelectProfessional => BookingPhase::SelectProfessional,
            WizardStep::SelectDateTime => BookingPhase::SelectDateTime,
            WizardStep::PersonalData => BookingPhase::PersonalData,
        }
    }

    /// Whether the current step's "continue" action is enabled.
    pub fn can_continue(&self) -> bool {
        if self.wizard.success {
            return false;
        }
        match self.wizard.step {
            WizardStep::SelectProfessional => self.professional.is_some(),
            WizardStep::SelectDateTime => {
                self.form.date.is_some() && self.form.modality.is_some() && self.form.time.is_some()
            }
            WizardStep::PersonalData => !self.wizard.submitting,
        }
    }

    /// The triple the slot list belongs to, once all three parts are chosen.
    pub fn slot_query(&self) -> Option<SlotQuery> {
        Some(SlotQuery {
            date: self.form.date?,
            professional_id: self.professional.as_ref()?.id.clone(),
            modality: self.form.modality?,
        })
    }

    /// Drops slots and the chosen time; both belong to the previous triple.
    pub(crate) fn discard_slots(&mut self) {
        self.slots.clear();
        self.form.time = None;
        self.loading_slots = false;
        self.availability_error = None;
    }

    pub fn available_slots(&self) -> impl Iterator<Item = &TimeSlot> {
        self.slots.iter().filter(|s| s.available)
    }
}
