use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{coerce_amount, Contribution, Period, Person, PersonDraft};
use crate::errors::LedgerError;

use super::ordering::{sort_history, sort_people, PeopleOrder};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Every person on the roster together with their contributions.
///
/// Contributions are keyed by period inside each person's map, so a person can
/// never hold two records for the same month.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    #[serde(default)]
    pub people: BTreeMap<Uuid, Person>,
    #[serde(default)]
    pub contributions: BTreeMap<Uuid, BTreeMap<Period, Contribution>>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            ..Self::default()
        }
    }

    pub fn add_person(&mut self, draft: PersonDraft, created_at: DateTime<Utc>) -> Person {
        let mut person = Person::new(draft, created_at);
        // v4 collisions are not expected, but an id is never handed out twice.
        while self.people.contains_key(&person.id) {
            person.id = Uuid::new_v4();
        }
        self.people.insert(person.id, person.clone());
        person
    }

    pub fn update_person(
        &mut self,
        id: Uuid,
        draft: PersonDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Person, LedgerError> {
        let person = self
            .people
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found(format!("person {id}")))?;
        person.apply(draft, updated_at);
        Ok(person.clone())
    }

    pub fn person(&self, id: Uuid) -> Option<&Person> {
        self.people.get(&id)
    }

    pub fn people(&self, order: PeopleOrder) -> Vec<Person> {
        let mut people: Vec<Person> = self.people.values().cloned().collect();
        sort_people(&mut people, order);
        people
    }

    /// A person's contributions, most recent period first.
    pub fn history(&self, person_id: Uuid) -> Vec<Contribution> {
        let mut history: Vec<Contribution> = self
            .contributions
            .get(&person_id)
            .map(|entries| entries.values().cloned().collect())
            .unwrap_or_default();
        sort_history(&mut history);
        history
    }

    pub fn contribution(&self, person_id: Uuid, period: Period) -> Option<&Contribution> {
        self.contributions
            .get(&person_id)
            .and_then(|entries| entries.get(&period))
    }

    /// Writes the single record for `(person, period)`, replacing any earlier
    /// amount rather than adding to it.
    pub fn upsert_contribution(
        &mut self,
        person_id: Uuid,
        period: Period,
        amount: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<Contribution, LedgerError> {
        if !self.people.contains_key(&person_id) {
            return Err(LedgerError::not_found(format!("person {person_id}")));
        }
        let contribution =
            Contribution::new(person_id, period, coerce_amount(amount), updated_at);
        self.contributions
            .entry(person_id)
            .or_default()
            .insert(period, contribution.clone());
        Ok(contribution)
    }

    #[cfg(test)]
    pub(crate) fn contribution_count(&self) -> usize {
        self.contributions.values().map(BTreeMap::len).sum()
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
