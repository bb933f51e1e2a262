use tracing::info;
use uuid::Uuid;

use crate::core::{input, Clock};
use crate::domain::{Contribution, Person, PersonDraft};
use crate::errors::LedgerError;
use crate::storage::LedgerStore;

/// Raw registration/edit input as typed by the administrator.
#[derive(Debug, Clone, Default)]
pub struct PersonForm {
    pub name: String,
    pub phone: String,
    pub promised: String,
    /// Only read on registration; blank means no initial payment.
    pub initial_payment: String,
}

impl PersonForm {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        promised: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            promised: promised.into(),
            initial_payment: String::new(),
        }
    }

    pub fn with_initial_payment(mut self, amount: impl Into<String>) -> Self {
        self.initial_payment = amount.into();
        self
    }
}

/// Outcome of a registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub person: Person,
    pub initial_contribution: Option<Contribution>,
}

pub struct PersonService;

impl PersonService {
    pub fn validate(form: &PersonForm) -> Result<PersonDraft, LedgerError> {
        let name = input::required_text("name", &form.name)?;
        let phone = input::required_text("phone", &form.phone)?;
        let promised = input::parse_amount("promised amount", &form.promised)?;
        Ok(PersonDraft::new(name, phone, promised))
    }

    /// Registers a person and, when an initial payment is given, records it for
    /// the current month. Nothing is written if any field is invalid.
    pub fn register(
        store: &dyn LedgerStore,
        clock: &dyn Clock,
        form: &PersonForm,
    ) -> Result<Registration, LedgerError> {
        let draft = Self::validate(form)?;
        let initial = input::parse_optional_amount("initial payment", &form.initial_payment)?;

        let person = store.create_person(draft)?;
        info!(person = %person.id, name = %person.name, "registered person");

        let initial_contribution = if initial > 0.0 {
            let period = clock.current_period();
            let contribution = store.upsert_contribution(person.id, period, initial)?;
            info!(person = %person.id, %period, amount = initial, "recorded initial payment");
            Some(contribution)
        } else {
            None
        };

        Ok(Registration {
            person,
            initial_contribution,
        })
    }

    pub fn edit(
        store: &dyn LedgerStore,
        id: Uuid,
        form: &PersonForm,
    ) -> Result<Person, LedgerError> {
        let draft = Self::validate(form)?;
        let person = store.update_person(id, draft)?;
        info!(person = %person.id, name = %person.name, "updated person");
        Ok(person)
    }
}
