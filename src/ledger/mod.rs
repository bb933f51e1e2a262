//! The contribution ledger: people, their monthly payments, and the rules that
//! derive balances and roster-wide aggregates from them.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod ordering;
pub mod rows;

pub use ledger::{Ledger, CURRENT_SCHEMA_VERSION};
pub use ordering::{collation_key, compare_names, sort_history, sort_people, PeopleOrder};
pub use rows::{
    compute_person_row, compute_roster_row, compute_roster_totals, PersonRow, RosterRow,
    RosterStatus, RosterTotals, UNNAMED_PERSON,
};
