// --- File: crates/agenda_booking/src/notices.rs ---
// Patient-facing texts. The clinic is Brazilian, so these stay in Portuguese.
use agenda_common::models::Notice;

pub const LOADING_SLOTS: &str = "Carregando horários disponíveis...";
pub const NO_SLOTS: &str = "Nenhum horário disponível para esta data.";

pub const CONFIRMATION_TITLE: &str = "Agendamento solicitado com sucesso!";
pub const CONFIRMATION_TEXT: &str =
    "Sua solicitação foi recebida. Entraremos em contato por email para confirmar seu agendamento.";
pub const NEW_BOOKING_ACTION: &str = "Fazer novo agendamento";

pub fn availability_failed() -> Notice {
    Notice::error(
        "Erro ao carregar horários",
        "Não foi possível carregar os horários disponíveis. Tente novamente mais tarde.",
    )
}

pub fn booking_confirmed() -> Notice {
    Notice::info(
        CONFIRMATION_TITLE,
        "Você receberá uma confirmação por email em breve.",
    )
}

pub fn booking_failed() -> Notice {
    Notice::error(
        "Erro ao agendar consulta",
        "Ocorreu um erro ao processar sua solicitação. Tente novamente.",
    )
}
