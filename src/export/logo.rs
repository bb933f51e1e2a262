use std::{fs, path::PathBuf};

use tracing::warn;

use crate::errors::LedgerError;

/// Somewhere a report logo can be fetched from.
pub trait LogoSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, LedgerError>;
}

#[derive(Debug, Clone)]
pub struct FileLogo {
    pub path: PathBuf,
}

impl FileLogo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LogoSource for FileLogo {
    fn fetch(&self) -> Result<Vec<u8>, LedgerError> {
        let bytes = fs::read(&self.path).map_err(|err| {
            LedgerError::AssetLoad(format!("{}: {err}", self.path.display()))
        })?;
        if bytes.is_empty() {
            return Err(LedgerError::AssetLoad(format!(
                "{}: empty image",
                self.path.display()
            )));
        }
        Ok(bytes)
    }
}

/// Fetches the logo if one is configured. Failures are logged and yield
/// `None`; they never stop an export.
pub fn load_logo(source: Option<&dyn LogoSource>) -> Option<Vec<u8>> {
    match source?.fetch() {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(error = %err, "continuing export without logo");
            None
        }
    }
}
