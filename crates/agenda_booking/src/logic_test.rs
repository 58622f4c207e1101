#[cfg(test)]
mod tests {
    use crate::logic::*;
    use agenda_common::models::{BookingFormValues, Modality, TimeSlot};
    use chrono::{Duration, NaiveDate, NaiveTime, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // Friday
    fn today() -> NaiveDate {
        date(2026, 10, 16)
    }

    fn valid_form() -> BookingFormValues {
        BookingFormValues {
            name: "Maria Souza".to_string(),
            email: "maria.souza@example.com".to_string(),
            phone: "(51) 99999-8888".to_string(),
            professional_id: Some("1".to_string()),
            specialty: Some("Psiquiatria".to_string()),
            date: Some(date(2026, 10, 21)),
            modality: Some(Modality::Presencial),
            time: Some("09:00".to_string()),
            insurance: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        let rules = BookingRules::default();
        assert!(rules.validate(&valid_form(), today()).is_ok());
    }

    #[test]
    fn test_empty_form_reports_required_fields_in_schema_order() {
        let rules = BookingRules::default();
        let errors = rules.validate(&BookingFormValues::default(), today()).unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![
                FormField::Name,
                FormField::Email,
                FormField::Phone,
                FormField::Professional,
                FormField::Specialty,
                FormField::Date,
                FormField::Modality,
                FormField::Time,
            ]
        );
        assert_eq!(
            errors.for_field(FormField::Date).unwrap().message,
            "Por favor selecione uma data."
        );
    }

    #[test]
    fn test_name_is_trimmed_before_counting() {
        let rules = BookingRules::default();
        let mut form = valid_form();

        form.name = "  Al  ".to_string();
        let err = rules.validate_field(FormField::Name, &form, today()).unwrap();
        assert_eq!(err.message, "Nome deve ter pelo menos 3 caracteres.");

        form.name = "Ana".to_string();
        assert!(rules.validate_field(FormField::Name, &form, today()).is_none());
    }

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("paciente@clinica.com.br"));
        assert!(is_valid_email(" paciente+agenda@clinica.com "));
        assert!(!is_valid_email("paciente@"));
        assert!(!is_valid_email("paciente.clinica.com"));
        assert!(!is_valid_email("paciente@clinica.c"));
        assert!(!is_valid_email(""));

        let too_long = format!("{}@example.com", "a".repeat(250));
        assert!(!is_valid_email(&too_long));
    }

    #[test]
    fn test_phone_needs_ten_characters() {
        let rules = BookingRules::default();
        let mut form = valid_form();

        form.phone = "519999888".to_string();
        let err = rules.validate_field(FormField::Phone, &form, today()).unwrap();
        assert_eq!(err.message, "Telefone inválido.");

        form.phone = "5199998888".to_string();
        assert!(rules.validate_field(FormField::Phone, &form, today()).is_none());
    }

    #[test]
    fn test_today_is_not_bookable() {
        let rules = BookingRules::default();
        assert_eq!(rules.check_date(today(), today()), Err(DateRejection::NotInFuture));
        assert_eq!(
            rules.check_date(date(2026, 10, 1), today()),
            Err(DateRejection::NotInFuture)
        );
        assert_eq!(rules.earliest_bookable_date(today()), date(2026, 10, 17));
        assert!(rules.check_date(date(2026, 10, 17), today()).is_ok());
    }

    #[test]
    fn test_sunday_is_closed() {
        let rules = BookingRules::default();
        assert_eq!(
            rules.check_date(date(2026, 10, 18), today()),
            Err(DateRejection::ClosedDay(Weekday::Sun))
        );
    }

    #[test]
    fn test_saturday_can_be_closed_by_configuration() {
        let rules = BookingRules {
            closed_days: vec![Weekday::Sat, Weekday::Sun],
            ..BookingRules::default()
        };
        assert_eq!(
            rules.check_date(date(2026, 10, 17), today()),
            Err(DateRejection::ClosedDay(Weekday::Sat))
        );
    }

    #[test]
    fn test_window_end_is_inclusive() {
        let rules = BookingRules::default();
        let latest = rules.latest_bookable_date(today());
        assert_eq!(latest, date(2027, 1, 16));
        assert!(rules.check_date(latest, today()).is_ok());

        let rejection = rules.check_date(date(2027, 1, 18), today()).unwrap_err();
        assert_eq!(rejection, DateRejection::BeyondWindow { latest });
        assert_eq!(
            rejection.to_string(),
            "Agendamentos só podem ser feitos até 16/01/2027."
        );
    }

    #[test]
    fn test_window_clamps_at_month_end() {
        let rules = BookingRules::default();
        assert_eq!(rules.latest_bookable_date(date(2026, 11, 30)), date(2027, 2, 28));
    }

    #[test]
    fn test_date_error_surfaces_through_validation() {
        let rules = BookingRules::default();
        let mut form = valid_form();
        form.date = Some(date(2026, 10, 18));

        let errors = rules.validate(&form, today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field(FormField::Date).unwrap().message,
            "A clínica não atende neste dia da semana."
        );
    }

    #[test]
    fn test_malformed_time_is_rejected() {
        let rules = BookingRules::default();
        let mut form = valid_form();
        form.time = Some("9h".to_string());

        let err = rules.validate_field(FormField::Time, &form, today()).unwrap();
        assert_eq!(err.message, "Horário inválido.");
    }

    #[test]
    fn test_optional_fields_never_fail() {
        let rules = BookingRules::default();
        let form = BookingFormValues::default();
        assert!(rules.validate_field(FormField::Insurance, &form, today()).is_none());
        assert!(rules.validate_field(FormField::Notes, &form, today()).is_none());
    }

    #[test]
    fn test_default_catalog_is_hourly_from_eight_to_seventeen() {
        let catalog = slot_catalog(time(8, 0), time(18, 0), Duration::minutes(60));
        let labels: Vec<String> = catalog.iter().map(|t| format_slot_time(*t)).collect();
        assert_eq!(
            labels,
            vec!["08:00", "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00"]
        );
    }

    #[test]
    fn test_catalog_drops_slot_that_overruns_closing() {
        let catalog = slot_catalog(time(8, 0), time(10, 0), Duration::minutes(45));
        assert_eq!(catalog, vec![time(8, 0), time(8, 45)]);
    }

    #[test]
    fn test_catalog_does_not_wrap_past_midnight() {
        let catalog = slot_catalog(time(22, 0), time(23, 59), Duration::minutes(60));
        assert_eq!(catalog, vec![time(22, 0)]);
    }

    #[test]
    fn test_catalog_with_zero_step_is_empty() {
        assert!(slot_catalog(time(8, 0), time(18, 0), Duration::zero()).is_empty());
    }

    #[test]
    fn test_mark_availability() {
        let catalog = vec![time(11, 0), time(12, 0), time(13, 0)];
        let slots = mark_availability(&catalog, &[time(12, 0)]);
        assert_eq!(
            slots,
            vec![
                TimeSlot::new("11:00", true),
                TimeSlot::new("12:00", false),
                TimeSlot::new("13:00", true),
            ]
        );
    }

    #[test]
    fn test_next_weekday_after() {
        assert_eq!(next_weekday_after(today(), Weekday::Wed), date(2026, 10, 21));
        assert_eq!(next_weekday_after(today(), Weekday::Fri), date(2026, 10, 23));
        assert_eq!(next_weekday_after(today(), Weekday::Sat), date(2026, 10, 17));
    }
}
