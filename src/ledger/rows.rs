use std::fmt;

use serde::Serialize;

use crate::domain::{coerce_amount, Contribution, Period, Person};

/// Label used when a stored person has a blank name.
pub const UNNAMED_PERSON: &str = "Sin nombre";

/// One line of a person's contribution history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonRow {
    pub period: Period,
    pub promised: f64,
    pub paid: f64,
    /// `promised - paid`; negative when the person overpaid.
    pub balance: f64,
}

/// Derives a history row. A missing contribution counts as a zero payment.
pub fn compute_person_row(
    person: &Person,
    period: Period,
    contribution: Option<&Contribution>,
) -> PersonRow {
    let promised = coerce_amount(person.promised_amount);
    let paid = contribution
        .map(|entry| coerce_amount(entry.amount))
        .unwrap_or(0.0);
    PersonRow {
        period,
        promised,
        paid,
        balance: promised - paid,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RosterStatus {
    Complete,
    HasPending,
}

impl fmt::Display for RosterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterStatus::Complete => f.write_str("Complete"),
            RosterStatus::HasPending => f.write_str("Has pending"),
        }
    }
}

/// One person's standing for the selected month of the aggregate report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub name: String,
    pub promised: f64,
    pub paid: f64,
    /// Raw `promised - paid`, kept signed.
    pub pending: f64,
    pub status: RosterStatus,
}

impl RosterRow {
    /// The pending amount worth showing: only a positive shortfall; an exact or
    /// over payment displays blank.
    pub fn displayed_pending(&self) -> Option<f64> {
        (self.pending > 0.0).then_some(self.pending)
    }
}

pub fn compute_roster_row(person: &Person, contribution: Option<&Contribution>) -> RosterRow {
    let promised = coerce_amount(person.promised_amount);
    let paid = contribution
        .map(|entry| coerce_amount(entry.amount))
        .unwrap_or(0.0);
    let pending = promised - paid;
    let name = if person.name.trim().is_empty() {
        UNNAMED_PERSON.to_string()
    } else {
        person.name.clone()
    };
    RosterRow {
        name,
        promised,
        paid,
        pending,
        status: if pending <= 0.0 {
            RosterStatus::Complete
        } else {
            RosterStatus::HasPending
        },
    }
}

/// Roster-wide figures for one period.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RosterTotals {
    pub expected: f64,
    pub offered: f64,
    pub pending_total: f64,
}

/// Sums a roster. Overpayments are clamped per person so they never offset
/// someone else's shortfall.
pub fn compute_roster_totals(rows: &[RosterRow]) -> RosterTotals {
    rows.iter().fold(RosterTotals::default(), |acc, row| RosterTotals {
        expected: acc.expected + row.promised,
        offered: acc.offered + row.paid,
        pending_total: acc.pending_total + row.pending.max(0.0),
    })
}
