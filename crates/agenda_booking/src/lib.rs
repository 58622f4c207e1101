// --- File: crates/agenda_booking/src/lib.rs ---
// Declare modules within this crate
pub mod controller;
pub mod error;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod notices;
pub mod resolver;
pub mod service;
pub mod settings;
pub mod state;
pub mod view;

pub use controller::{BookingController, DirectorySnapshot};
pub use error::BookingError;
pub use resolver::SlotRefresh;
pub use service::BookingServices;
pub use settings::BookingSettings;
pub use state::{BookingPhase, BookingState, WizardStep};
