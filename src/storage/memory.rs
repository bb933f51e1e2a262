use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::core::{Clock, SystemClock};
use crate::domain::{Contribution, Period, Person, PersonDraft};
use crate::ledger::{Ledger, PeopleOrder};

use super::{poisoned, LedgerStore, Result};

/// Process-local store, mainly for tests and throwaway sessions.
pub struct InMemoryStore {
    ledger: RwLock<Ledger>,
    clock: Arc<dyn Clock>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: RwLock::new(Ledger::new()),
            clock,
        }
    }

    /// Copy of the current ledger contents.
    pub fn snapshot(&self) -> Result<Ledger> {
        Ok(self.ledger.read().map_err(poisoned)?.clone())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryStore {
    fn list_people(&self, order: PeopleOrder) -> Result<Vec<Person>> {
        Ok(self.ledger.read().map_err(poisoned)?.people(order))
    }

    fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        Ok(self.ledger.read().map_err(poisoned)?.person(id).cloned())
    }

    fn list_contributions(&self, person_id: Uuid) -> Result<Vec<Contribution>> {
        Ok(self.ledger.read().map_err(poisoned)?.history(person_id))
    }

    fn get_contribution(&self, person_id: Uuid, period: Period) -> Result<Option<Contribution>> {
        Ok(self
            .ledger
            .read()
            .map_err(poisoned)?
            .contribution(person_id, period)
            .cloned())
    }

    fn create_person(&self, draft: PersonDraft) -> Result<Person> {
        let now = self.clock.now();
        Ok(self.ledger.write().map_err(poisoned)?.add_person(draft, now))
    }

    fn update_person(&self, id: Uuid, draft: PersonDraft) -> Result<Person> {
        let now = self.clock.now();
        self.ledger
            .write()
            .map_err(poisoned)?
            .update_person(id, draft, now)
    }

    fn upsert_contribution(
        &self,
        person_id: Uuid,
        period: Period,
        amount: f64,
    ) -> Result<Contribution> {
        let now = self.clock.now();
        self.ledger
            .write()
            .map_err(poisoned)?
            .upsert_contribution(person_id, period, amount, now)
    }
}
