use uuid::Uuid;

use crate::currency::Formatter;
use crate::domain::{Identifiable, Person};
use crate::errors::LedgerError;
use crate::ledger::PeopleOrder;
use crate::storage::LedgerStore;

/// The admin's list of registered people, newest first.
#[derive(Debug, Default)]
pub struct RosterView {
    people: Vec<Person>,
}

impl RosterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, store: &dyn LedgerStore) -> Result<&[Person], LedgerError> {
        self.people = store.list_people(PeopleOrder::CreatedDesc)?;
        Ok(&self.people)
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn find(&self, id: Uuid) -> Option<&Person> {
        self.people.iter().find(|person| person.id() == id)
    }

    /// 1-based lookup, matching the numbering shown to the administrator.
    pub fn get(&self, position: usize) -> Option<&Person> {
        position.checked_sub(1).and_then(|idx| self.people.get(idx))
    }

    pub fn display_rows(&self, fmt: &Formatter) -> Vec<Vec<String>> {
        self.people
            .iter()
            .enumerate()
            .map(|(idx, person)| {
                vec![
                    (idx + 1).to_string(),
                    person.name.clone(),
                    person.phone.clone(),
                    fmt.amount(person.promised_amount),
                ]
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.people.clear();
    }
}
