//! Shell commands over the application shell.
//!
//! The shell trusts whoever runs it: `login` opens a session for the
//! configured `admin_username` without asking for credentials. Real
//! authentication is host-supplied, by implementing
//! [`AuthProvider`](crate::session::AuthProvider) and calling
//! [`ensure_admin_account`](crate::session::ensure_admin_account) before
//! delivering the user to `AppShell::on_session_changed`.

use std::path::PathBuf;

use uuid::Uuid;

use crate::cli::shell::{LoopControl, ShellContext};
use crate::cli::{output, CliError};
use crate::config::ConfigManager;
use crate::core::services::PersonForm;
use crate::domain::Displayable;
use crate::export::{HtmlReportRenderer, ReportRenderer, TextReportRenderer, TextTable};
use crate::session::AdminUser;
use crate::utils::{build_info, paths};
use crate::views::{AggregateReport, PersonLedger};

/// Command names with their one-line usage, in help order.
pub(crate) const COMMANDS: &[(&str, &str)] = &[
    ("help", "help - show this list"),
    ("version", "version - show build information"),
    ("people", "people - list registered people, newest first"),
    ("add", "add <name> <phone> <pledge> [initial] - register a person"),
    ("edit", "edit <n> <name> <phone> <pledge> - change a person's details"),
    ("select", "select <n> - open a person's contribution history"),
    ("pay", "pay <YYYY-MM> <amount> - record the selected person's payment"),
    ("history", "history - show the selected person's history again"),
    ("report", "report [YYYY-MM] - general report, current month by default"),
    ("export", "export [txt|html] - write the selected person's report"),
    ("export-report", "export-report [txt|html] - write the last general report"),
    ("config", "config [set <key> <value>] - show or change configuration"),
    ("login", "login - start a trusted local session as the configured admin"),
    ("logout", "logout - end the session"),
    ("exit", "exit - leave the shell"),
];

impl ShellContext {
    pub(crate) fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CliError> {
        match command {
            "help" => self.cmd_help(),
            "version" => output::info(build_info::current().summary()),
            "people" | "ls" => self.cmd_people(),
            "add" => self.cmd_add(args)?,
            "edit" => self.cmd_edit(args)?,
            "select" => self.cmd_select(args)?,
            "pay" => self.cmd_pay(args)?,
            "history" => self.cmd_history()?,
            "report" => self.cmd_report(args)?,
            "export" => self.cmd_export(args, false)?,
            "export-report" => self.cmd_export(args, true)?,
            "config" => self.cmd_config(args)?,
            "login" => {
                let admin = AdminUser::local(self.app.config().admin_username.clone());
                self.app.on_session_changed(Some(admin))?;
                output::success("Session started.");
            }
            "logout" => {
                self.app.on_session_changed(None)?;
                output::success("Session ended.");
            }
            "exit" | "quit" => return Ok(LoopControl::Exit),
            other => self.unknown(other),
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_help(&self) {
        output::section("Commands");
        for (_, usage) in COMMANDS {
            output::info(format!("  {usage}"));
        }
    }

    fn cmd_people(&self) {
        let labels = self.app.labels();
        let people = self.app.roster.people();
        if people.is_empty() {
            output::info(labels.no_people);
            return;
        }
        let headers = vec![
            "#".to_string(),
            labels.person.to_string(),
            labels.phone.to_string(),
            labels.monthly_pledge.to_string(),
        ];
        let rows = self.app.roster.display_rows(self.app.formatter());
        print!("{}", TextTable::new(headers, rows).render());
    }

    fn cmd_add(&mut self, args: &[&str]) -> Result<(), CliError> {
        let (name, phone, pledge, initial) = match args {
            [name, phone, pledge] => (*name, *phone, *pledge, ""),
            [name, phone, pledge, initial] => (*name, *phone, *pledge, *initial),
            _ => return Err(usage("add")),
        };
        let form = PersonForm::new(name, phone, pledge).with_initial_payment(initial);
        let registration = self.app.register(&form)?;
        output::success(format!("Registered {}.", registration.person.name));
        if let Some(contribution) = registration.initial_contribution {
            output::info(format!(
                "Initial payment of {} recorded for {}.",
                self.app.formatter().amount(contribution.amount),
                self.app.formatter().month(contribution.period)
            ));
        }
        Ok(())
    }

    fn cmd_edit(&mut self, args: &[&str]) -> Result<(), CliError> {
        let [target, name, phone, pledge] = args else {
            return Err(usage("edit"));
        };
        let id = self.resolve_person(target)?;
        let person = self.app.edit(id, &PersonForm::new(*name, *phone, *pledge))?;
        output::success(format!("Updated {}.", person.display_label()));
        Ok(())
    }

    fn cmd_select(&mut self, args: &[&str]) -> Result<(), CliError> {
        let [target] = args else {
            return Err(usage("select"));
        };
        let id = self.resolve_person(target)?;
        if self.app.select(id)?.is_none() {
            output::warning("That person is no longer registered.");
            return Ok(());
        }
        self.cmd_history()
    }

    fn cmd_pay(&mut self, args: &[&str]) -> Result<(), CliError> {
        let [period, amount] = args else {
            return Err(usage("pay"));
        };
        self.app.record_payment(period, amount)?;
        output::success("Payment saved.");
        self.cmd_history()
    }

    fn cmd_history(&self) -> Result<(), CliError> {
        let ledger = self
            .app
            .person
            .snapshot()
            .ok_or_else(|| CliError::Input("select a person first".into()))?;
        let labels = self.app.labels();
        let fmt = self.app.formatter();
        output::section(&ledger.person.name);
        output::info(ledger.summary_line(fmt, labels));
        if ledger.rows.is_empty() {
            output::info(labels.no_contributions);
        } else {
            let table = TextTable::new(PersonLedger::headers(labels), ledger.display_rows(fmt));
            print!("{}", table.render());
        }
        Ok(())
    }

    fn cmd_report(&mut self, args: &[&str]) -> Result<(), CliError> {
        let period = match args {
            [] => "",
            [period] => *period,
            _ => return Err(usage("report")),
        };
        self.app.load_report(period)?;
        let Some(report) = self.app.report.snapshot() else {
            return Ok(());
        };
        let labels = self.app.labels();
        let fmt = self.app.formatter();
        output::section(format!(
            "{} - {}",
            labels.general_report_title,
            fmt.month(report.period)
        ));
        for line in report.summary_lines(fmt, labels) {
            output::info(line);
        }
        if report.rows.is_empty() {
            output::info(labels.no_people);
        } else {
            let table = TextTable::new(
                AggregateReport::headers(labels),
                report.display_rows(fmt, labels),
            );
            print!("{}", table.render());
        }
        Ok(())
    }

    fn cmd_export(&self, args: &[&str], general: bool) -> Result<(), CliError> {
        let config = self.app.config();
        let labels = self.app.labels();
        let renderer: Box<dyn ReportRenderer> = match args {
            [] | ["txt"] | ["text"] => {
                Box::new(TextReportRenderer::new(config.rows_per_page(), labels))
            }
            ["html"] => Box::new(HtmlReportRenderer::new(config.rows_per_page(), labels)),
            _ => return Err(usage(if general { "export-report" } else { "export" })),
        };
        let dir = config.export_dir_in(&self.base);
        let written = if general {
            self.app.export_report(renderer.as_ref(), &dir)?
        } else {
            self.app.export_person(renderer.as_ref(), &dir)?
        };
        match written {
            Some(path) => output::success(format!("Report written to {}", path.display())),
            None if general => output::warning("Run `report` before exporting it."),
            None => output::warning("Select a person before exporting."),
        }
        Ok(())
    }

    fn cmd_config(&mut self, args: &[&str]) -> Result<(), CliError> {
        match args {
            [] => {
                self.show_config();
                Ok(())
            }
            ["set", key, value] => {
                let mut config = self.app.config().clone();
                config.set(key, value)?;
                ConfigManager::with_base_dir(self.base.clone())?.save(&config)?;
                self.app.apply_config(config);
                output::success(format!("Saved {key}."));
                Ok(())
            }
            _ => Err(usage("config")),
        }
    }

    fn show_config(&self) {
        let config = self.app.config();
        let shown = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "-".into())
        };
        output::section("Configuration");
        output::info(format!("  locale:        {}", config.locale));
        output::info(format!("  currency:      {}", config.currency));
        output::info(format!("  admin:         {}", config.admin_username));
        output::info(format!("  logo:          {}", shown(&config.logo_path)));
        output::info(format!("  rows per page: {}", config.rows_per_page()));
        output::info(format!(
            "  ledger:        {}",
            paths::ledger_file_in(&self.base).display()
        ));
        output::info(format!(
            "  exports:       {}",
            config.export_dir_in(&self.base).display()
        ));
        match self.app.user() {
            Some(user) => output::info(format!("  signed in as:  {}", user.username)),
            None => output::info("  signed in as:  -"),
        }
    }

    /// Accepts a 1-based roster position or a person id.
    fn resolve_person(&self, token: &str) -> Result<Uuid, CliError> {
        if let Ok(position) = token.parse::<usize>() {
            return self
                .app
                .roster
                .get(position)
                .map(|person| person.id)
                .ok_or_else(|| CliError::Input(format!("no person at position {position}")));
        }
        let id = Uuid::parse_str(token)
            .map_err(|_| CliError::Input(format!("`{token}` is not a roster position or id")))?;
        self.app
            .roster
            .find(id)
            .map(|person| person.id)
            .ok_or_else(|| CliError::Input(format!("no person with id {id}")))
    }

    fn unknown(&self, command: &str) {
        match suggest(command) {
            Some(close) => output::warning(format!(
                "Unknown command `{command}`. Did you mean `{close}`?"
            )),
            None => output::warning(format!("Unknown command `{command}`. Type `help`.")),
        }
    }
}

fn usage(command: &str) -> CliError {
    let text = COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, usage)| *usage)
        .unwrap_or(command);
    CliError::Input(format!("usage: {text}"))
}

fn suggest(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _)| (*name, strsim::levenshtein(input, name)))
        .filter(|(_, distance)| *distance <= 2)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}
