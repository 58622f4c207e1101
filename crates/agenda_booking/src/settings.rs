// --- File: crates/agenda_booking/src/settings.rs ---
//! Typed view of the configuration the booking crate needs.
//!
//! `agenda_config` keeps everything as plain strings and numbers; parsing into
//! weekdays, times and a time zone happens here, once, at startup.

use agenda_common::{config_error, AgendaError};
use agenda_config::models::{AppConfig, ScheduleConfig};
use chrono::{Duration, NaiveTime, Weekday};
use chrono_tz::Tz;
use std::time::Duration as StdDuration;

use crate::logic::{parse_slot_time, slot_catalog, BookingRules};

/// Business hours used to build the slot catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRules {
    pub opening: NaiveTime,
    pub closing: NaiveTime,
    pub step: Duration,
    pub unavailable: Vec<NaiveTime>,
}

impl ScheduleRules {
    pub fn from_config(config: &ScheduleConfig) -> Result<Self, AgendaError> {
        let opening = parse_time("schedule.opening_time", &config.opening_time)?;
        let closing = parse_time("schedule.closing_time", &config.closing_time)?;
        if opening >= closing {
            return Err(config_error(format!(
                "schedule.opening_time ({}) must be before schedule.closing_time ({})",
                config.opening_time, config.closing_time
            )));
        }
        if config.slot_minutes == 0 {
            return Err(config_error("schedule.slot_minutes must be greater than zero"));
        }
        let unavailable = config
            .unavailable_times
            .iter()
            .map(|t| parse_time("schedule.unavailable_times", t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            opening,
            closing,
            step: Duration::minutes(config.slot_minutes as i64),
            unavailable,
        })
    }

    pub fn catalog(&self) -> Vec<NaiveTime> {
        slot_catalog(self.opening, self.closing, self.step)
    }
}

#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub rules: BookingRules,
    pub schedule: ScheduleRules,
    /// Zone that decides what "today" means for the booking window.
    pub time_zone: Tz,
    pub availability_timeout: StdDuration,
    pub submission_timeout: StdDuration,
}

impl BookingSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, AgendaError> {
        let time_zone: Tz = config
            .clinic
            .time_zone
            .parse()
            .map_err(|_| config_error(format!("Unknown clinic.time_zone: {}", config.clinic.time_zone)))?;

        let closed_days = config
            .booking
            .closed_days
            .iter()
            .map(|d| {
                d.trim()
                    .parse::<Weekday>()
                    .map_err(|_| config_error(format!("Invalid weekday in booking.closed_days: {}", d)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if config.booking.availability_timeout_ms == 0 || config.booking.submission_timeout_ms == 0 {
            return Err(config_error("booking timeouts must be greater than zero"));
        }

        Ok(Self {
            rules: BookingRules {
                closed_days,
                max_months_ahead: config.booking.max_months_ahead,
                min_name_chars: config.booking.min_name_chars,
                min_phone_chars: config.booking.min_phone_chars,
            },
            schedule: ScheduleRules::from_config(&config.schedule)?,
            time_zone,
            availability_timeout: StdDuration::from_millis(config.booking.availability_timeout_ms),
            submission_timeout: StdDuration::from_millis(config.booking.submission_timeout_ms),
        })
    }
}

fn parse_time(key: &str, value: &str) -> Result<NaiveTime, AgendaError> {
    parse_slot_time(value).map_err(|e| config_error(format!("Invalid {} '{}': {}", key, value, e)))
}
