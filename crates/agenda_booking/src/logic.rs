// --- File: crates/agenda_booking/src/logic.rs ---
use agenda_common::models::{BookingFormValues, TimeSlot};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// --- Booking Schema ---

/// Every field of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Professional,
    Specialty,
    Date,
    Modality,
    Time,
    Insurance,
    Notes,
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Professional => "professional_id",
            FormField::Specialty => "specialty",
            FormField::Date => "date",
            FormField::Modality => "modality",
            FormField::Time => "time",
            FormField::Insurance => "insurance",
            FormField::Notes => "notes",
        }
    }

    /// Fields the patient types in, as opposed to picks made through the wizard.
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            FormField::Name | FormField::Email | FormField::Phone | FormField::Insurance | FormField::Notes
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Requirement {
    Required,
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: FormField,
    pub requirement: Requirement,
}

const fn required(field: FormField) -> FieldSpec {
    FieldSpec { field, requirement: Requirement::Required }
}

const fn optional(field: FormField) -> FieldSpec {
    FieldSpec { field, requirement: Requirement::Optional }
}

/// Validation order matters: errors are reported in this order.
pub const BOOKING_SCHEMA: [FieldSpec; 10] = [
    required(FormField::Name),
    required(FormField::Email),
    required(FormField::Phone),
    required(FormField::Professional),
    required(FormField::Specialty),
    required(FormField::Date),
    required(FormField::Modality),
    required(FormField::Time),
    optional(FormField::Insurance),
    optional(FormField::Notes),
];

// --- Validation Errors ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FormField, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field errors collected by a full-form validation, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: FormField) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.0.iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self.0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

// --- Date Window ---

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRejection {
    #[error("Selecione uma data a partir de amanhã.")]
    NotInFuture,
    #[error("Agendamentos só podem ser feitos até {}.", .latest.format("%d/%m/%Y"))]
    BeyondWindow { latest: NaiveDate },
    #[error("A clínica não atende neste dia da semana.")]
    ClosedDay(Weekday),
}

// Local part, "@", then a domain ending in a TLD of two or more letters.
static EMAIL_PATTERN: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex")
});

const MAX_EMAIL_LEN: usize = 254;

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.len() <= MAX_EMAIL_LEN && EMAIL_PATTERN.is_match(email)
}

/// Business rules applied to the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRules {
    pub closed_days: Vec<Weekday>,
    pub max_months_ahead: u32,
    pub min_name_chars: usize,
    pub min_phone_chars: usize,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            closed_days: vec![Weekday::Sun],
            max_months_ahead: 3,
            min_name_chars: 3,
            min_phone_chars: 10,
        }
    }
}

impl BookingRules {
    /// Today is never bookable.
    pub fn earliest_bookable_date(&self, today: NaiveDate) -> NaiveDate {
        today.succ_opt().unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive upper bound of the booking window.
    pub fn latest_bookable_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.max_months_ahead))
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn is_closed(&self, date: NaiveDate) -> bool {
        self.closed_days.contains(&date.weekday())
    }

    pub fn check_date(&self, date: NaiveDate, today: NaiveDate) -> Result<(), DateRejection> {
        if date <= today {
            return Err(DateRejection::NotInFuture);
        }
        let latest = self.latest_bookable_date(today);
        if date > latest {
            return Err(DateRejection::BeyondWindow { latest });
        }
        if self.is_closed(date) {
            return Err(DateRejection::ClosedDay(date.weekday()));
        }
        Ok(())
    }

    /// Checks one field against the form. Optional fields are unconstrained.
    pub fn validate_field(
        &self,
        field: FormField,
        values: &BookingFormValues,
        today: NaiveDate,
    ) -> Option<FieldError> {
        let message = match field {
            FormField::Name => (values.name.trim().chars().count() < self.min_name_chars)
                .then(|| format!("Nome deve ter pelo menos {} caracteres.", self.min_name_chars)),
            FormField::Email => (!is_valid_email(&values.email)).then(|| "Email inválido.".to_string()),
            FormField::Phone => (values.phone.trim().chars().count() < self.min_phone_chars)
                .then(|| "Telefone inválido.".to_string()),
            FormField::Professional => is_blank(&values.professional_id)
                .then(|| "Por favor selecione um profissional.".to_string()),
            FormField::Specialty => is_blank(&values.specialty)
                .then(|| "Por favor selecione uma especialidade.".to_string()),
            FormField::Date => match values.date {
                None => Some("Por favor selecione uma data.".to_string()),
                Some(date) => self.check_date(date, today).err().map(|r| r.to_string()),
            },
            FormField::Modality => values
                .modality
                .is_none()
                .then(|| "Por favor selecione uma modalidade.".to_string()),
            FormField::Time => match values.time.as_deref() {
                None | Some("") => Some("Por favor selecione um horário.".to_string()),
                Some(time) => parse_slot_time(time).err().map(|_| "Horário inválido.".to_string()),
            },
            FormField::Insurance | FormField::Notes => None,
        };
        message.map(|m| FieldError::new(field, m))
    }

    /// Validates the whole form in schema order.
    pub fn validate(&self, values: &BookingFormValues, today: NaiveDate) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = BOOKING_SCHEMA
            .iter()
            .filter(|spec| spec.requirement == Requirement::Required)
            .filter_map(|spec| self.validate_field(spec.field, values, today))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

// --- Slot Catalog ---

pub fn format_slot_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn parse_slot_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
}

/// Start times of every slot that fits between `opening` and `closing`.
///
/// A slot is only listed when it ends at or before closing. Never wraps past
/// midnight.
pub fn slot_catalog(opening: NaiveTime, closing: NaiveTime, step: Duration) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if step <= Duration::zero() {
        return slots;
    }

    let mut current = opening;
    loop {
        let (end, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 || end > closing {
            break;
        }
        slots.push(current);
        current = end;
    }
    slots
}

/// Flags each catalog entry as available unless it is in `taken`.
pub fn mark_availability(catalog: &[NaiveTime], taken: &[NaiveTime]) -> Vec<TimeSlot> {
    catalog
        .iter()
        .map(|t| TimeSlot::new(format_slot_time(*t), !taken.contains(t)))
        .collect()
}

/// First date strictly after `from` that falls on `weekday`.
pub fn next_weekday_after(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (7 + weekday.num_days_from_monday() as i64
        - from.weekday().num_days_from_monday() as i64)
        % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    from + Duration::days(ahead)
}
