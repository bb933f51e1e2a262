use tracing::info;
use uuid::Uuid;

use crate::core::input;
use crate::domain::{Contribution, Period};
use crate::errors::LedgerError;
use crate::storage::LedgerStore;

pub struct ContributionService;

impl ContributionService {
    /// Validates typed input and upserts the payment for that month.
    pub fn record(
        store: &dyn LedgerStore,
        person_id: Uuid,
        period_input: &str,
        amount_input: &str,
    ) -> Result<Contribution, LedgerError> {
        let period = Period::parse(period_input)?;
        let amount = input::parse_amount("amount", amount_input)?;
        Self::record_amount(store, person_id, period, amount)
    }

    pub fn record_amount(
        store: &dyn LedgerStore,
        person_id: Uuid,
        period: Period,
        amount: f64,
    ) -> Result<Contribution, LedgerError> {
        let contribution = store.upsert_contribution(person_id, period, amount)?;
        info!(person = %person_id, %period, amount, "recorded contribution");
        Ok(contribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersonDraft;
    use crate::storage::InMemoryStore;

    #[test]
    fn rejects_bad_period_or_amount_without_writing() {
        let store = InMemoryStore::new();
        let ana = store
            .create_person(PersonDraft::new("Ana", "8888-0000", 100.0))
            .unwrap();
        for (period, amount) in [("2024-13", "10"), ("", "10"), ("2024-01", "diez")] {
            let err = ContributionService::record(&store, ana.id, period, amount)
                .expect_err("invalid");
            assert!(matches!(err, LedgerError::Validation(_)));
        }
        assert!(store.list_contributions(ana.id).unwrap().is_empty());

        let saved = ContributionService::record(&store, ana.id, "2024-01", "75").unwrap();
        assert_eq!(saved.amount, 75.0);
    }
}
