use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::debug;
use uuid::Uuid;

use crate::core::{Clock, SystemClock};
use crate::domain::{Contribution, Period, Person, PersonDraft};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, PeopleOrder, CURRENT_SCHEMA_VERSION};
use crate::utils::paths;

use super::{poisoned, LedgerStore, Result};

const TMP_SUFFIX: &str = "tmp";

/// Single-file JSON document store.
///
/// Each write is applied to a copy of the ledger, flushed to disk, and only
/// then becomes visible to readers, so a failed write leaves no trace.
pub struct JsonStore {
    path: PathBuf,
    ledger: Mutex<Ledger>,
    clock: Arc<dyn Clock>,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    pub fn open_with_clock(path: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.into();
        let ledger = load_ledger_from_path(&path)?;
        debug!(path = %path.display(), people = ledger.people.len(), "opened json ledger store");
        Ok(Self {
            path,
            ledger: Mutex::new(ledger),
            clock,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&Ledger) -> T) -> Result<T> {
        let guard = self.ledger.lock().map_err(poisoned)?;
        Ok(f(&guard))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Ledger) -> Result<T>) -> Result<T> {
        let mut guard = self.ledger.lock().map_err(poisoned)?;
        let mut staged = guard.clone();
        let value = f(&mut staged)?;
        save_ledger_to_path(&staged, &self.path)?;
        *guard = staged;
        Ok(value)
    }
}

impl LedgerStore for JsonStore {
    fn list_people(&self, order: PeopleOrder) -> Result<Vec<Person>> {
        self.read(|ledger| ledger.people(order))
    }

    fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
        self.read(|ledger| ledger.person(id).cloned())
    }

    fn list_contributions(&self, person_id: Uuid) -> Result<Vec<Contribution>> {
        self.read(|ledger| ledger.history(person_id))
    }

    fn get_contribution(&self, person_id: Uuid, period: Period) -> Result<Option<Contribution>> {
        self.read(|ledger| ledger.contribution(person_id, period).cloned())
    }

    fn create_person(&self, draft: PersonDraft) -> Result<Person> {
        let now = self.clock.now();
        self.write(|ledger| Ok(ledger.add_person(draft, now)))
    }

    fn update_person(&self, id: Uuid, draft: PersonDraft) -> Result<Person> {
        let now = self.clock.now();
        self.write(|ledger| ledger.update_person(id, draft, now))
    }

    fn upsert_contribution(
        &self,
        person_id: Uuid,
        period: Period,
        amount: f64,
    ) -> Result<Contribution> {
        let now = self.clock.now();
        self.write(|ledger| ledger.upsert_contribution(person_id, period, amount, now))
    }
}

/// Reads a ledger document; a missing file is an empty ledger.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger> {
    if !path.exists() {
        return Ok(Ledger::new());
    }
    let data = fs::read_to_string(path)?;
    let ledger: Ledger = serde_json::from_str(&data)?;
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::backend(format!(
            "ledger `{}` was written by a newer schema version ({})",
            path.display(),
            ledger.schema_version
        )));
    }
    Ok(ledger)
}

/// Writes the ledger by staging to a sibling temp file and renaming it over
/// the target.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        paths::ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
