use std::{
    borrow::Cow,
    io::{self, BufRead},
    path::PathBuf,
    sync::Arc,
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;
use tracing::warn;

use crate::cli::commands::COMMANDS;
use crate::cli::{output, CliError};
use crate::config::ConfigManager;
use crate::core::SystemClock;
use crate::session::{AdminUser, AppShell};
use crate::storage::JsonStore;
use crate::utils::paths;

const SCRIPT_ENV: &str = "PLEDGE_LEDGER_CLI_SCRIPT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// State shared by every command in one shell run.
pub(crate) struct ShellContext {
    pub(crate) app: AppShell,
    pub(crate) base: PathBuf,
    pub(crate) running: bool,
}

impl ShellContext {
    fn new() -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let base = manager.base_dir().to_path_buf();
        let store = JsonStore::open(paths::ledger_file_in(&base))?;
        let admin = AdminUser::local(config.admin_username.clone());
        let mut app = AppShell::new(Arc::new(store), Arc::new(SystemClock), config);
        app.on_session_changed(Some(admin))?;
        Ok(Self {
            app,
            base,
            running: true,
        })
    }

    fn prompt(&self) -> String {
        match self.app.person.snapshot() {
            Some(ledger) => format!("pledge [{}]> ", ledger.person.name),
            None => "pledge> ".to_string(),
        }
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let scripted = std::env::var_os(SCRIPT_ENV).is_some();
    if scripted || std::env::var_os("NO_COLOR").is_some() {
        output::disable_color();
    }

    let mut context = ShellContext::new()?;
    if scripted {
        run_script(&mut context)
    } else {
        run_interactive(&mut context)
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new()));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output::info("Type `help` for the list of commands.");

    while context.running {
        match editor.readline(&context.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if handle_line(context, trimmed) == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if handle_line(context, &line) == LoopControl::Exit || !context.running {
            break;
        }
    }
    Ok(())
}

/// Runs one line; failures are reported inline and never end the shell.
fn handle_line(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return LoopControl::Continue;
        }
    };
    let Some((command, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match context.dispatch(&command.to_lowercase(), &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            LoopControl::Exit
        }
        Ok(LoopControl::Continue) => LoopControl::Continue,
        Err(err) => {
            report_error(&err);
            LoopControl::Continue
        }
    }
}

/// Store failures also go to the log; input mistakes only reach the screen.
fn report_error(err: &CliError) {
    if let CliError::Core(core) = err {
        if core.is_backend() {
            warn!(error = %core, "ledger store operation failed");
        }
    }
    output::error(err);
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = COMMANDS.iter().map(|(name, _)| name.to_string()).collect();
        commands.sort();
        Self { commands }
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        // Only the first word is a command name.
        if prefix.trim_start().contains(char::is_whitespace) {
            return Ok((pos, Vec::new()));
        }
        let start = prefix.len() - prefix.trim_start().len();
        let needle = prefix[start..].to_ascii_lowercase();
        let candidates = self
            .commands
            .iter()
            .filter(|name| name.starts_with(&needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}
