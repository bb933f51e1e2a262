use colored::Colorize;
use std::fmt;

/// Message categories used by the shell output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn styled(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => format!("{} {}", "[ok]".green().bold(), text),
        MessageKind::Warning => format!("{} {}", "[!]".yellow().bold(), text),
        MessageKind::Error => format!("{} {}", "[x]".red().bold(), text),
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Error, message));
}

pub fn section(message: impl fmt::Display) {
    println!("{}", styled(MessageKind::Section, message));
}

/// Disables colour for scripted runs and `NO_COLOR` environments.
pub fn disable_color() {
    colored::control::set_override(false);
}
