use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::currency::Formatter;
use crate::errors::LedgerError;
use crate::export::{render::DEFAULT_ROWS_PER_PAGE, FileLogo, Labels};
use crate::utils::paths::{self, ensure_dir};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub admin_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    pub rows_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-CR".into(),
            currency: "CRC".into(),
            admin_username: "admin".into(),
            logo_path: None,
            export_dir: None,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl Config {
    pub fn formatter(&self) -> Formatter {
        Formatter::new(&self.locale, &self.currency)
    }

    pub fn labels(&self) -> &'static Labels {
        Labels::for_locale(&self.formatter().locale)
    }

    pub fn logo(&self) -> Option<FileLogo> {
        self.logo_path.clone().map(FileLogo::new)
    }

    /// Where exports land: the configured directory, else `<base>/exports`.
    pub fn export_dir_in(&self, base: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| paths::exports_dir_in(base))
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page.max(1)
    }

    /// Changes one setting from shell input. `-` or a blank value clears the
    /// optional paths.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        let optional_path = || (!value.is_empty() && value != "-").then(|| PathBuf::from(value));
        match key {
            "locale" => self.locale = required(key, value)?,
            "currency" => self.currency = required(key, value)?.to_uppercase(),
            "admin_username" => self.admin_username = required(key, value)?,
            "logo_path" | "logo" => self.logo_path = optional_path(),
            "export_dir" => self.export_dir = optional_path(),
            "rows_per_page" => {
                self.rows_per_page = value
                    .parse::<usize>()
                    .ok()
                    .filter(|rows| *rows > 0)
                    .ok_or_else(|| {
                        LedgerError::validation("rows_per_page must be a positive whole number")
                    })?
            }
            other => {
                return Err(LedgerError::validation(format!(
                    "unknown setting `{other}`"
                )))
            }
        }
        Ok(())
    }
}

fn required(key: &str, value: &str) -> Result<String, LedgerError> {
    if value.is_empty() {
        Err(LedgerError::validation(format!("{key} cannot be blank")))
    } else {
        Ok(value.to_string())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    /// Loads the stored configuration; a missing file yields defaults.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(format!("json.{TMP_SUFFIX}"));
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
