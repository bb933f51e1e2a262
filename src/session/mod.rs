//! The application shell: session state plus the views it owns.

pub mod auth;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::core::input::parse_period;
use crate::core::services::{PersonForm, PersonService, Registration};
use crate::core::Clock;
use crate::currency::Formatter;
use crate::domain::{Period, Person};
use crate::errors::LedgerError;
use crate::export::{load_logo, write_report, Labels, LogoSource, ReportRenderer};
use crate::storage::LedgerStore;
use crate::views::{AggregateReport, AggregateReportView, PersonLedger, PersonLedgerView, RosterView};

pub use auth::{ensure_admin_account, AdminIdentity, AdminUser, AuthError, AuthProvider};

pub struct AppShell {
    store: Arc<dyn LedgerStore>,
    clock: Arc<dyn Clock>,
    config: Config,
    formatter: Formatter,
    user: Option<AdminUser>,
    pub roster: RosterView,
    pub person: PersonLedgerView,
    pub report: AggregateReportView,
}

impl AppShell {
    pub fn new(store: Arc<dyn LedgerStore>, clock: Arc<dyn Clock>, config: Config) -> Self {
        Self {
            formatter: config.formatter(),
            store,
            clock,
            config,
            user: None,
            roster: RosterView::new(),
            person: PersonLedgerView::new(),
            report: AggregateReportView::new(),
        }
    }

    /// Reacts to sign-in (`Some`) by loading the roster and to sign-out
    /// (`None`) by dropping every view snapshot.
    pub fn on_session_changed(&mut self, user: Option<AdminUser>) -> Result<(), LedgerError> {
        match user {
            Some(user) => {
                info!(user = %user.username, "session started");
                self.user = Some(user);
                self.roster.load(self.store.as_ref())?;
            }
            None => {
                if let Some(previous) = self.user.take() {
                    info!(user = %previous.username, "session ended");
                }
                self.roster.clear();
                self.person.clear();
                self.report.clear();
            }
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&AdminUser> {
        self.user.as_ref()
    }

    fn require_session(&self) -> Result<(), LedgerError> {
        if self.user.is_some() {
            Ok(())
        } else {
            Err(LedgerError::validation("sign in first"))
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Swaps in new settings. Snapshots hold raw values, so the next render
    /// already uses the new locale and currency.
    pub fn apply_config(&mut self, config: Config) {
        info!(locale = %config.locale, currency = %config.currency, "configuration changed");
        self.formatter = config.formatter();
        self.config = config;
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn labels(&self) -> &'static Labels {
        self.config.labels()
    }

    pub fn current_period(&self) -> Period {
        self.clock.current_period()
    }

    /// Registers a person, then refreshes the roster and the open detail view.
    pub fn register(&mut self, form: &PersonForm) -> Result<Registration, LedgerError> {
        self.require_session()?;
        let registration = PersonService::register(self.store.as_ref(), self.clock.as_ref(), form)?;
        self.refresh()?;
        Ok(registration)
    }

    pub fn edit(&mut self, id: Uuid, form: &PersonForm) -> Result<Person, LedgerError> {
        self.require_session()?;
        let person = PersonService::edit(self.store.as_ref(), id, form)?;
        self.refresh()?;
        Ok(person)
    }

    fn refresh(&mut self) -> Result<(), LedgerError> {
        self.roster.load(self.store.as_ref())?;
        self.person.reload(self.store.as_ref())?;
        Ok(())
    }

    pub fn select(&mut self, id: Uuid) -> Result<Option<&PersonLedger>, LedgerError> {
        self.require_session()?;
        self.person.load(self.store.as_ref(), id)
    }

    pub fn record_payment(
        &mut self,
        period_input: &str,
        amount_input: &str,
    ) -> Result<&PersonLedger, LedgerError> {
        self.require_session()?;
        self.person
            .record_payment(self.store.as_ref(), period_input, amount_input)
    }

    /// Computes the aggregate report; blank input means the current month.
    pub fn load_report(&mut self, period_input: &str) -> Result<&AggregateReport, LedgerError> {
        self.require_session()?;
        let period = parse_period(period_input, self.clock.current_period())?;
        self.report.load(self.store.as_ref(), period)
    }

    /// Exports the selected person's report. `None` when nobody is selected.
    pub fn export_person(
        &self,
        renderer: &dyn ReportRenderer,
        dir: &Path,
    ) -> Result<Option<PathBuf>, LedgerError> {
        self.require_session()?;
        let Some(ledger) = self.person.snapshot() else {
            return Ok(None);
        };
        let document = ledger
            .to_document(&self.formatter, self.labels())
            .with_logo(self.logo());
        write_report(&document, renderer, dir).map(Some)
    }

    /// Exports the last computed aggregate report. `None` before any report.
    pub fn export_report(
        &self,
        renderer: &dyn ReportRenderer,
        dir: &Path,
    ) -> Result<Option<PathBuf>, LedgerError> {
        self.require_session()?;
        let Some(report) = self.report.snapshot() else {
            return Ok(None);
        };
        let document = report
            .to_document(&self.formatter, self.labels())
            .with_logo(self.logo());
        write_report(&document, renderer, dir).map(Some)
    }

    fn logo(&self) -> Option<Vec<u8>> {
        let source = self.config.logo();
        load_logo(source.as_ref().map(|logo| logo as &dyn LogoSource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::export::{labels::SPANISH, TextReportRenderer};
    use crate::storage::InMemoryStore;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn shell() -> AppShell {
        let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()));
        let store = Arc::new(InMemoryStore::with_clock(clock.clone()));
        AppShell::new(store, clock, Config::default())
    }

    #[test]
    fn actions_require_a_session() {
        let mut shell = shell();
        let err = shell
            .register(&PersonForm::new("Ana", "1", "100"))
            .expect_err("signed out");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn sign_out_clears_every_view() {
        let mut shell = shell();
        shell.on_session_changed(Some(AdminUser::local("admin"))).unwrap();
        let ana = shell
            .register(&PersonForm::new("Ana", "1", "100"))
            .unwrap()
            .person;
        shell.select(ana.id).unwrap();
        shell.load_report("").unwrap();
        assert_eq!(shell.roster.people().len(), 1);
        assert_eq!(shell.report.snapshot().unwrap().period.key(), "2026-10");

        shell.on_session_changed(None).unwrap();
        assert!(shell.user().is_none());
        assert!(shell.roster.people().is_empty());
        assert!(shell.person.snapshot().is_none());
        assert!(shell.report.snapshot().is_none());
    }

    #[test]
    fn editing_refreshes_the_open_detail_view() {
        let mut shell = shell();
        shell.on_session_changed(Some(AdminUser::local("admin"))).unwrap();
        let ana = shell
            .register(&PersonForm::new("Ana", "1", "100"))
            .unwrap()
            .person;
        shell.select(ana.id).unwrap();
        shell
            .edit(ana.id, &PersonForm::new("Ana Mora", "2", "250"))
            .unwrap();
        let ledger = shell.person.snapshot().unwrap();
        assert_eq!(ledger.person.name, "Ana Mora");
        assert_eq!(ledger.person.promised_amount, 250.0);
    }

    #[test]
    fn applied_config_changes_formatting_and_labels() {
        let mut shell = shell();
        let mut config = Config::default();
        config.set("locale", "en-US").unwrap();
        config.set("currency", "USD").unwrap();
        shell.apply_config(config);
        assert_eq!(shell.formatter().amount(1234.5), "$1,234.50");
        assert_eq!(shell.labels().month, "Month");
    }

    #[test]
    fn export_without_selection_writes_nothing() {
        let mut shell = shell();
        shell.on_session_changed(Some(AdminUser::local("admin"))).unwrap();
        let dir = tempdir().unwrap();
        let renderer = TextReportRenderer::new(10, &SPANISH);
        assert!(shell.export_person(&renderer, dir.path()).unwrap().is_none());
        assert!(shell.export_report(&renderer, dir.path()).unwrap().is_none());
    }
}
