// --- File: crates/agenda_common/src/models.rs ---

// Data structures shared between the booking wizard and its collaborators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable professional as supplied by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professional {
    /// Unique identifier within the directory
    pub id: String,
    pub name: String,
    pub specialty: String,
    /// Council registration text, e.g. "CRM: 45678"
    pub registration: Option<String>,
    /// Photo reference (URL or asset path)
    pub photo: Option<String>,
    pub biography: Option<String>,
}

impl Professional {
    pub fn new(id: impl Into<String>, name: impl Into<String>, specialty: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            specialty: specialty.into(),
            registration: None,
            photo: None,
            biography: None,
        }
    }

    pub fn with_registration(mut self, registration: impl Into<String>) -> Self {
        self.registration = Some(registration.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_biography(mut self, biography: impl Into<String>) -> Self {
        self.biography = Some(biography.into());
        self
    }

    /// Avatar fallback: the first two characters of the name, uppercased.
    pub fn initials(&self) -> String {
        self.name.chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Appointment delivery mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Presencial,
    Online,
}

impl Modality {
    pub const ALL: [Modality; 2] = [Modality::Presencial, Modality::Online];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Presencial => "presencial",
            Modality::Online => "online",
        }
    }

    /// Label shown to the patient.
    pub fn label(&self) -> &'static str {
        match self {
            Modality::Presencial => "Presencial",
            Modality::Online => "Online",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable time with its availability flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// "HH:MM", 24-hour clock
    pub time: String,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(time: impl Into<String>, available: bool) -> Self {
        Self {
            time: time.into(),
            available,
        }
    }
}

/// The booking record under construction across the wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub professional_id: Option<String>,
    /// Copied from the selected professional
    pub specialty: Option<String>,
    pub date: Option<NaiveDate>,
    pub modality: Option<Modality>,
    pub time: Option<String>,
    pub insurance: Option<String>,
    pub notes: Option<String>,
}

/// What the submission endpoint hands back for an accepted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub reference: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-facing notice (toast) emitted by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
