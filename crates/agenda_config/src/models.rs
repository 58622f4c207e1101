// --- File: crates/agenda_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Clinic Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ClinicConfig {
    pub name: String,
    /// IANA zone used to decide what "today" is for the booking window.
    pub time_zone: String,
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            name: "LuminaCare".to_string(),
            time_zone: "America/Sao_Paulo".to_string(),
        }
    }
}

// --- Booking Rules Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BookingConfig {
    /// Weekday abbreviations ("Sun", "Sat", ...) on which the clinic is closed.
    pub closed_days: Vec<String>,
    /// How many calendar months ahead a booking may be placed.
    pub max_months_ahead: u32,
    pub min_name_chars: usize,
    pub min_phone_chars: usize,
    pub availability_timeout_ms: u64,
    pub submission_timeout_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            closed_days: vec!["Sun".to_string()],
            max_months_ahead: 3,
            min_name_chars: 3,
            min_phone_chars: 10,
            availability_timeout_ms: 10_000,
            submission_timeout_ms: 15_000,
        }
    }
}

// --- Business Hours Config ---
// Times are "HH:MM" strings, parsed by the booking crate.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ScheduleConfig {
    pub opening_time: String,
    pub closing_time: String,
    pub slot_minutes: u32,
    /// Catalog entries that the simulated availability service reports as taken.
    pub unavailable_times: Vec<String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening_time: "08:00".to_string(),
            closing_time: "18:00".to_string(),
            slot_minutes: 60,
            unavailable_times: vec!["12:00".to_string(), "15:00".to_string()],
        }
    }
}

// --- Simulated Backend Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub availability_delay_ms: u64,
    pub submission_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            availability_delay_ms: 500,
            submission_delay_ms: 1_500,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub clinic: ClinicConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}
