use crate::currency::LocaleConfig;
use crate::ledger::RosterStatus;

/// Fixed report and screen vocabulary for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub person_report_title: &'static str,
    pub general_report_title: &'static str,
    pub person: &'static str,
    pub phone: &'static str,
    pub monthly_pledge: &'static str,
    pub month: &'static str,
    pub promised: &'static str,
    pub paid: &'static str,
    pub balance: &'static str,
    pub pending: &'static str,
    pub status: &'static str,
    pub expected: &'static str,
    pub offered: &'static str,
    pub pending_total: &'static str,
    pub complete: &'static str,
    pub has_pending: &'static str,
    pub no_contributions: &'static str,
    pub no_people: &'static str,
    pub page: &'static str,
}

pub const SPANISH: Labels = Labels {
    person_report_title: "Reporte de misiones",
    general_report_title: "Reporte general de misiones",
    person: "Persona",
    phone: "Teléfono",
    monthly_pledge: "Monto prometido mensual",
    month: "Mes",
    promised: "Prometido",
    paid: "Abonado",
    balance: "Saldo",
    pending: "Pendiente",
    status: "Estado",
    expected: "Monto esperado",
    offered: "Total ofrendado",
    pending_total: "Total pendiente del mes",
    complete: "Completo",
    has_pending: "Con pendiente",
    no_contributions: "No hay abonos registrados",
    no_people: "No hay personas registradas.",
    page: "Página",
};

pub const ENGLISH: Labels = Labels {
    person_report_title: "Contribution report",
    general_report_title: "General contribution report",
    person: "Person",
    phone: "Phone",
    monthly_pledge: "Monthly pledge",
    month: "Month",
    promised: "Promised",
    paid: "Paid",
    balance: "Balance",
    pending: "Pending",
    status: "Status",
    expected: "Expected",
    offered: "Total offered",
    pending_total: "Pending this month",
    complete: "Complete",
    has_pending: "Has pending",
    no_contributions: "No payments recorded",
    no_people: "No people registered yet.",
    page: "Page",
};

impl Labels {
    pub fn for_locale(locale: &LocaleConfig) -> &'static Labels {
        if locale.is_spanish() {
            &SPANISH
        } else {
            &ENGLISH
        }
    }

    pub fn status(&self, status: RosterStatus) -> &'static str {
        match status {
            RosterStatus::Complete => self.complete,
            RosterStatus::HasPending => self.has_pending,
        }
    }
}
