//! Turns view snapshots into downloadable documents.
//!
//! Every cell and summary line arrives pre-formatted; renderers only lay
//! strings out.

pub mod labels;
pub mod logo;
pub mod render;
pub mod table;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::LedgerError;
use crate::utils::paths::ensure_dir;

pub use labels::Labels;
pub use logo::{load_logo, FileLogo, LogoSource};
pub use render::{HtmlReportRenderer, ReportRenderer, TextReportRenderer};
pub use table::{Alignment, TextTable};

const PERSON_REPORT_PREFIX: &str = "reporte_misiones";
const GENERAL_REPORT_PREFIX: &str = "reporte_general_misiones";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything a renderer needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    #[serde(skip)]
    pub logo: Option<Vec<u8>>,
    pub summary_lines: Vec<String>,
    pub table: ReportTable,
    /// Extension-less file name derived from the report's subject.
    pub file_stem: String,
}

impl ReportDocument {
    pub fn with_logo(mut self, logo: Option<Vec<u8>>) -> Self {
        self.logo = logo;
        self
    }
}

/// Lowercases and replaces each whitespace run with `_`. Path separators are
/// replaced too so the stem cannot escape the export directory.
pub fn sanitize_stem(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        match ch {
            '/' | '\\' => out.push('_'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

pub fn person_report_stem(name: &str) -> String {
    format!("{PERSON_REPORT_PREFIX}_{}", sanitize_stem(name))
}

pub fn general_report_stem(period_key: &str) -> String {
    format!("{GENERAL_REPORT_PREFIX}_{}", sanitize_stem(period_key))
}

/// Renders `document` and writes it to `<dir>/<stem>.<ext>`.
pub fn write_report(
    document: &ReportDocument,
    renderer: &dyn ReportRenderer,
    dir: &Path,
) -> Result<PathBuf, LedgerError> {
    ensure_dir(dir)?;
    let bytes = renderer.render(document)?;
    let path = dir.join(format!("{}.{}", document.file_stem, renderer.extension()));
    std::fs::write(&path, bytes)?;
    info!(path = %path.display(), rows = document.table.rows.len(), "exported report");
    Ok(path)
}
