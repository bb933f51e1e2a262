//! View state: each view owns its last computed snapshot and replaces it
//! wholesale on every successful load.

pub mod aggregate_report;
pub mod person_ledger;
pub mod roster;

pub use aggregate_report::{AggregateReport, AggregateReportView};
pub use person_ledger::{PersonExport, PersonLedger, PersonLedgerView};
pub use roster::RosterView;
