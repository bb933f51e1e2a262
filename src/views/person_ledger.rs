use tracing::debug;
use uuid::Uuid;

use crate::core::services::ContributionService;
use crate::currency::Formatter;
use crate::domain::{Contribution, Person};
use crate::errors::LedgerError;
use crate::export::{person_report_stem, Labels, ReportDocument, ReportTable};
use crate::ledger::{compute_person_row, sort_history, PersonRow};
use crate::storage::LedgerStore;

/// One person's pledge and full contribution history.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonLedger {
    pub person: Person,
    pub contributions: Vec<Contribution>,
    pub rows: Vec<PersonRow>,
}

/// The fields a person report is built from, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonExport {
    pub name: String,
    pub phone: String,
    pub pledge: String,
    pub rows: Vec<Vec<String>>,
}

impl PersonLedger {
    pub fn build(person: Person, mut contributions: Vec<Contribution>) -> Self {
        sort_history(&mut contributions);
        let rows = contributions
            .iter()
            .map(|entry| compute_person_row(&person, entry.period, Some(entry)))
            .collect();
        Self {
            person,
            contributions,
            rows,
        }
    }

    /// `Teléfono: … | Monto prometido mensual: …`
    pub fn summary_line(&self, fmt: &Formatter, labels: &Labels) -> String {
        format!(
            "{}: {} | {}: {}",
            labels.phone,
            self.person.phone,
            labels.monthly_pledge,
            fmt.amount(self.person.promised_amount)
        )
    }

    pub fn display_rows(&self, fmt: &Formatter) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    fmt.month(row.period),
                    fmt.amount(row.promised),
                    fmt.amount(row.paid),
                    fmt.amount(row.balance),
                ]
            })
            .collect()
    }

    pub fn headers(labels: &Labels) -> Vec<String> {
        [labels.month, labels.promised, labels.paid, labels.balance]
            .iter()
            .map(|h| h.to_string())
            .collect()
    }

    pub fn export_fields(&self, fmt: &Formatter) -> PersonExport {
        PersonExport {
            name: self.person.name.clone(),
            phone: self.person.phone.clone(),
            pledge: fmt.amount(self.person.promised_amount),
            rows: self.display_rows(fmt),
        }
    }

    pub fn to_document(&self, fmt: &Formatter, labels: &Labels) -> ReportDocument {
        let fields = self.export_fields(fmt);
        ReportDocument {
            title: labels.person_report_title.to_string(),
            logo: None,
            summary_lines: vec![
                format!("{}: {}", labels.person, fields.name),
                format!("{}: {}", labels.phone, fields.phone),
                format!("{}: {}", labels.monthly_pledge, fields.pledge),
            ],
            table: ReportTable {
                headers: Self::headers(labels),
                rows: fields.rows,
            },
            file_stem: person_report_stem(&fields.name),
        }
    }
}

/// Detail view for the selected person.
#[derive(Debug, Default)]
pub struct PersonLedgerView {
    snapshot: Option<PersonLedger>,
}

impl PersonLedgerView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&PersonLedger> {
        self.snapshot.as_ref()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.snapshot.as_ref().map(|ledger| ledger.person.id)
    }

    /// Fetches the person and their history. An unknown id is not an error:
    /// the view declines to render and keeps whatever it showed before.
    pub fn load(
        &mut self,
        store: &dyn LedgerStore,
        id: Uuid,
    ) -> Result<Option<&PersonLedger>, LedgerError> {
        let Some(person) = store.get_person(id)? else {
            debug!(person = %id, "selected person no longer exists");
            return Ok(None);
        };
        let contributions = store.list_contributions(id)?;
        self.snapshot = Some(PersonLedger::build(person, contributions));
        Ok(self.snapshot.as_ref())
    }

    pub fn reload(&mut self, store: &dyn LedgerStore) -> Result<Option<&PersonLedger>, LedgerError> {
        match self.selected_id() {
            Some(id) => self.load(store, id),
            None => Ok(None),
        }
    }

    /// Records a payment for the selected person, then recomputes every row.
    pub fn record_payment(
        &mut self,
        store: &dyn LedgerStore,
        period_input: &str,
        amount_input: &str,
    ) -> Result<&PersonLedger, LedgerError> {
        let id = self
            .selected_id()
            .ok_or_else(|| LedgerError::validation("no person selected"))?;
        ContributionService::record(store, id, period_input, amount_input)?;
        self.load(store, id)?
            .ok_or_else(|| LedgerError::not_found(format!("person {id}")))
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Period, PersonDraft};
    use crate::export::labels::{ENGLISH, SPANISH};
    use crate::storage::InMemoryStore;

    #[test]
    fn rows_follow_history_order_and_balance_rule() {
        let store = InMemoryStore::new();
        let ana = store
            .create_person(PersonDraft::new("Ana", "8888-0000", 10_000.0))
            .unwrap();
        for (key, amount) in [("2024-01", 10_000.0), ("2024-03", 2_500.0), ("2024-02", 12_000.0)] {
            store
                .upsert_contribution(ana.id, Period::parse(key).unwrap(), amount)
                .unwrap();
        }

        let mut view = PersonLedgerView::new();
        let ledger = view.load(&store, ana.id).unwrap().expect("person exists");
        let balances: Vec<(String, f64)> = ledger
            .rows
            .iter()
            .map(|row| (row.period.key(), row.balance))
            .collect();
        assert_eq!(
            balances,
            vec![
                ("2024-03".to_string(), 7_500.0),
                ("2024-02".to_string(), -2_000.0),
                ("2024-01".to_string(), 0.0),
            ]
        );

        let fmt = Formatter::default();
        assert_eq!(
            ledger.display_rows(&fmt)[1],
            vec!["febrero de 2024", "₡10 000,00", "₡12 000,00", "-₡2 000,00"]
        );
        assert_eq!(
            ledger.summary_line(&fmt, &SPANISH),
            "Teléfono: 8888-0000 | Monto prometido mensual: ₡10 000,00"
        );
        assert_eq!(
            ledger.summary_line(&Formatter::new("en-US", "USD"), &ENGLISH),
            "Phone: 8888-0000 | Monthly pledge: $10,000.00"
        );
    }

    #[test]
    fn unknown_person_keeps_previous_snapshot() {
        let store = InMemoryStore::new();
        let ana = store
            .create_person(PersonDraft::new("Ana", "8888-0000", 10_000.0))
            .unwrap();
        let mut view = PersonLedgerView::new();
        view.load(&store, ana.id).unwrap();

        assert!(view.load(&store, Uuid::new_v4()).unwrap().is_none());
        assert_eq!(view.selected_id(), Some(ana.id));
    }

    #[test]
    fn record_payment_requires_selection() {
        let store = InMemoryStore::new();
        let mut view = PersonLedgerView::new();
        let err = view.record_payment(&store, "2024-01", "10").expect_err("nothing selected");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn document_carries_formatted_fields() {
        let store = InMemoryStore::new();
        let ana = store
            .create_person(PersonDraft::new("Ana María", "8888-0000", 10_000.0))
            .unwrap();
        store
            .upsert_contribution(ana.id, Period::parse("2024-05").unwrap(), 4_000.0)
            .unwrap();
        let mut view = PersonLedgerView::new();
        let ledger = view.load(&store, ana.id).unwrap().unwrap();

        let doc = ledger.to_document(&Formatter::default(), &SPANISH);
        assert_eq!(doc.title, "Reporte de misiones");
        assert_eq!(doc.file_stem, "reporte_misiones_ana_maría");
        assert_eq!(doc.summary_lines[0], "Persona: Ana María");
        assert_eq!(doc.summary_lines[2], "Monto prometido mensual: ₡10 000,00");
        assert_eq!(doc.table.headers, vec!["Mes", "Prometido", "Abonado", "Saldo"]);
        assert_eq!(
            doc.table.rows,
            vec![vec!["mayo de 2024", "₡10 000,00", "₡4 000,00", "₡6 000,00"]]
        );
    }
}
