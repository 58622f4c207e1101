// File: services/agenda_walkthrough/src/main.rs
//
// Drives one booking through every wizard step against the simulated
// backends and prints what each step would show.
use agenda_booking::logic::{next_weekday_after, FormField};
use agenda_booking::view::{SpecialtyFilter, StepView};
use agenda_booking::{BookingController, BookingServices, BookingSettings};
use agenda_common::models::Modality;
use agenda_common::{config_error, internal_error, log_result, logging, not_found, AgendaError};
use agenda_config::load_config;
use chrono::Weekday;
use tracing::{info, warn};

fn print_view(view: &StepView) {
    match serde_json::to_string_pretty(view) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Could not render view: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), AgendaError> {
    logging::init();

    let config = load_config().map_err(config_error)?;
    let settings = log_result(
        BookingSettings::from_config(&config),
        "Booking settings parsed",
        "Invalid booking settings",
    )?;
    let services = BookingServices::simulated(&settings, &config.simulation);
    info!("Opening booking wizard for {}", config.clinic.name);

    let controller = BookingController::load(services, settings).await?;
    let filter = SpecialtyFilter::default();
    print_view(&controller.view(&filter));

    let professional = controller
        .directory()
        .professionals
        .first()
        .cloned()
        .ok_or_else(|| not_found("directory has no professionals"))?;
    controller.select_professional(&professional.id).await;

    let rules = &controller.settings().rules;
    let mut date = next_weekday_after(controller.today(), Weekday::Wed);
    while rules.check_date(date, controller.today()).is_err() {
        date = date.succ_opt().ok_or_else(|| internal_error("ran out of calendar"))?;
    }
    controller.select_date(Some(date)).await;
    controller.select_modality(Modality::Presencial).await;
    print_view(&controller.view(&filter));

    let time = controller
        .snapshot()
        .available_slots()
        .next()
        .map(|s| s.time.clone())
        .ok_or_else(|| not_found(format!("no free slot on {}", date)))?;
    controller.select_time_slot(&time);

    controller.set_field(FormField::Name, "Paciente de Demonstração");
    controller.set_field(FormField::Email, "paciente@example.com");
    controller.set_field(FormField::Phone, "(51) 99999-0000");
    controller.set_field(FormField::Insurance, "Particular");
    print_view(&controller.view(&filter));

    let receipt = controller.submit().await?;
    info!("Booking {} is {}", receipt.reference, receipt.status);
    print_view(&controller.view(&filter));

    Ok(())
}
