use std::{num::NonZeroUsize, thread};

use tracing::info;

use crate::currency::Formatter;
use crate::domain::{Contribution, Period, Person};
use crate::errors::LedgerError;
use crate::export::{general_report_stem, Labels, ReportDocument, ReportTable};
use crate::ledger::{
    compute_roster_row, compute_roster_totals, PeopleOrder, RosterRow, RosterTotals,
};
use crate::storage::LedgerStore;

const MAX_FETCH_WORKERS: usize = 8;

/// Every person's standing for one month plus the roster-wide totals.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub period: Period,
    pub rows: Vec<RosterRow>,
    pub totals: RosterTotals,
}

impl AggregateReport {
    /// `entries` must already be in roster (name) order.
    pub fn build(period: Period, entries: &[(Person, Option<Contribution>)]) -> Self {
        let rows: Vec<RosterRow> = entries
            .iter()
            .map(|(person, contribution)| compute_roster_row(person, contribution.as_ref()))
            .collect();
        let totals = compute_roster_totals(&rows);
        Self {
            period,
            rows,
            totals,
        }
    }

    pub fn headers(labels: &Labels) -> Vec<String> {
        [
            labels.person,
            labels.promised,
            labels.paid,
            labels.pending,
            labels.status,
        ]
        .iter()
        .map(|h| h.to_string())
        .collect()
    }

    /// Formatted rows; pending is blank unless the person still owes money.
    pub fn display_rows(&self, fmt: &Formatter, labels: &Labels) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                vec![
                    row.name.clone(),
                    fmt.amount(row.promised),
                    fmt.amount(row.paid),
                    row.displayed_pending()
                        .map(|pending| fmt.amount(pending))
                        .unwrap_or_default(),
                    labels.status(row.status).to_string(),
                ]
            })
            .collect()
    }

    pub fn summary_lines(&self, fmt: &Formatter, labels: &Labels) -> Vec<String> {
        vec![
            format!("{}: {}", labels.month, fmt.month(self.period)),
            format!("{}: {}", labels.expected, fmt.amount(self.totals.expected)),
            format!("{}: {}", labels.offered, fmt.amount(self.totals.offered)),
            format!(
                "{}: {}",
                labels.pending_total,
                fmt.amount(self.totals.pending_total)
            ),
        ]
    }

    pub fn to_document(&self, fmt: &Formatter, labels: &Labels) -> ReportDocument {
        ReportDocument {
            title: labels.general_report_title.to_string(),
            logo: None,
            summary_lines: self.summary_lines(fmt, labels),
            table: ReportTable {
                headers: Self::headers(labels),
                rows: self.display_rows(fmt, labels),
            },
            file_stem: general_report_stem(&self.period.key()),
        }
    }
}

/// Roster-wide view for a selected month.
#[derive(Debug, Default)]
pub struct AggregateReportView {
    snapshot: Option<AggregateReport>,
}

impl AggregateReportView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&AggregateReport> {
        self.snapshot.as_ref()
    }

    /// Recomputes the report for `period` from scratch. Any failed fetch
    /// aborts the whole report and leaves the previous snapshot in place.
    pub fn load(
        &mut self,
        store: &dyn LedgerStore,
        period: Period,
    ) -> Result<&AggregateReport, LedgerError> {
        let people = store.list_people(PeopleOrder::NameAsc)?;
        let contributions = fetch_contributions(store, period, &people)?;
        let entries: Vec<(Person, Option<Contribution>)> =
            people.into_iter().zip(contributions).collect();
        let report = AggregateReport::build(period, &entries);
        info!(
            %period,
            people = report.rows.len(),
            expected = report.totals.expected,
            offered = report.totals.offered,
            pending = report.totals.pending_total,
            "computed aggregate report"
        );
        Ok(&*self.snapshot.insert(report))
    }

    pub fn clear(&mut self) {
        self.snapshot = None;
    }
}

/// Fetches each person's contribution for `period` across a few scoped
/// workers and waits for all of them before returning, preserving roster order.
fn fetch_contributions(
    store: &dyn LedgerStore,
    period: Period,
    people: &[Person],
) -> Result<Vec<Option<Contribution>>, LedgerError> {
    if people.is_empty() {
        return Ok(Vec::new());
    }
    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .clamp(1, MAX_FETCH_WORKERS);
    let chunk_size = people.len().div_ceil(workers);

    thread::scope(|scope| -> Result<Vec<Option<Contribution>>, LedgerError> {
        let handles: Vec<_> = people
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|person| store.get_contribution(person.id, period))
                        .collect::<Result<Vec<_>, LedgerError>>()
                })
            })
            .collect();

        let mut fetched = Vec::with_capacity(people.len());
        for handle in handles {
            let chunk = handle
                .join()
                .map_err(|_| LedgerError::backend("contribution fetch worker panicked"))??;
            fetched.extend(chunk);
        }
        Ok(fetched)
    })
}
