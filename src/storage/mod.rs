//! The backing document store contract and its implementations.

pub mod json_backend;
pub mod memory;

use uuid::Uuid;

use crate::domain::{Contribution, Period, Person, PersonDraft};
use crate::errors::LedgerError;
use crate::ledger::PeopleOrder;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Queries and writes the views need from a persistence backend.
///
/// Write timestamps are assigned by the store, never by the caller.
pub trait LedgerStore: Send + Sync {
    fn list_people(&self, order: PeopleOrder) -> Result<Vec<Person>>;
    fn get_person(&self, id: Uuid) -> Result<Option<Person>>;
    /// Contributions for one person, most recent period first.
    fn list_contributions(&self, person_id: Uuid) -> Result<Vec<Contribution>>;
    fn get_contribution(&self, person_id: Uuid, period: Period) -> Result<Option<Contribution>>;
    fn create_person(&self, draft: PersonDraft) -> Result<Person>;
    fn update_person(&self, id: Uuid, draft: PersonDraft) -> Result<Person>;
    fn upsert_contribution(&self, person_id: Uuid, period: Period, amount: f64)
        -> Result<Contribution>;
}

pub use json_backend::JsonStore;
pub use memory::InMemoryStore;

pub(crate) fn poisoned<T>(_: T) -> LedgerError {
    LedgerError::backend("ledger state lock poisoned")
}
