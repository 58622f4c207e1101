#[cfg(test)]
mod tests {
    use crate::logic::{slot_catalog, BookingRules, DateRejection, FormField};
    use agenda_common::models::BookingFormValues;
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
    use proptest::prelude::*;

    fn base_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    proptest! {
        // Past dates and today are always refused, whatever else is configured
        #[test]
        fn test_past_dates_rejected(
            today_offset in 0..730i64,
            days_back in 0..400i64,
            max_months in 1..12u32,
        ) {
            let today = base_date() + Duration::days(today_offset);
            let candidate = today - Duration::days(days_back);
            let rules = BookingRules { max_months_ahead: max_months, ..BookingRules::default() };

            prop_assert_eq!(rules.check_date(candidate, today), Err(DateRejection::NotInFuture));
        }

        // Inside the window only closed weekdays are refused
        #[test]
        fn test_dates_inside_window(
            today_offset in 0..730i64,
            days_ahead in 1..90i64,
        ) {
            let today = base_date() + Duration::days(today_offset);
            let candidate = today + Duration::days(days_ahead);
            let rules = BookingRules::default();

            let result = rules.check_date(candidate, today);
            if candidate.weekday() == Weekday::Sun {
                prop_assert_eq!(result, Err(DateRejection::ClosedDay(Weekday::Sun)));
            } else {
                prop_assert!(result.is_ok(), "{} should be bookable from {}", candidate, today);
            }
        }

        // Anything past the window is refused with the window end attached
        #[test]
        fn test_dates_beyond_window(
            today_offset in 0..730i64,
            days_past in 1..365i64,
        ) {
            let today = base_date() + Duration::days(today_offset);
            let rules = BookingRules::default();
            let latest = rules.latest_bookable_date(today);

            prop_assert_eq!(
                rules.check_date(latest + Duration::days(days_past), today),
                Err(DateRejection::BeyondWindow { latest })
            );
        }

        // Every slot fits inside business hours, and slots are evenly spaced
        #[test]
        fn test_catalog_fits_business_hours(
            open_hour in 0..12u32,
            close_hour in 13..24u32,
            step_minutes in 5..180i64,
        ) {
            let opening = NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap();
            let closing = if close_hour == 24 {
                NaiveTime::from_hms_opt(23, 59, 0).unwrap()
            } else {
                NaiveTime::from_hms_opt(close_hour, 0, 0).unwrap()
            };
            let step = Duration::minutes(step_minutes);

            let catalog = slot_catalog(opening, closing, step);

            for slot in &catalog {
                prop_assert!(*slot >= opening);
                prop_assert!(*slot + step <= closing);
            }
            for pair in catalog.windows(2) {
                prop_assert_eq!(pair[1] - pair[0], step);
            }
            if let Some(last) = catalog.last() {
                // No room for one more
                prop_assert!(*last + step + step > closing || (*last + step + step) < *last);
            }
        }

        // Surrounding whitespace never counts towards the name length
        #[test]
        fn test_name_length_ignores_padding(
            name in "[A-Za-z]{0,8}",
            left in 0..4usize,
            right in 0..4usize,
        ) {
            let rules = BookingRules::default();
            let form = BookingFormValues {
                name: format!("{}{}{}", " ".repeat(left), name, " ".repeat(right)),
                ..BookingFormValues::default()
            };
            let today = base_date();

            let error = rules.validate_field(FormField::Name, &form, today);
            prop_assert_eq!(error.is_none(), name.chars().count() >= 3);
        }
    }
}
