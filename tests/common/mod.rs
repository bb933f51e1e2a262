#![allow(dead_code)]

use std::{path::PathBuf, sync::Arc, sync::Mutex};

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use pledge_ledger::{
    core::{Clock, FixedClock},
    storage::{InMemoryStore, JsonStore},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// 17 October 2026, noon UTC.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap(),
    ))
}

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn memory_store() -> InMemoryStore {
    InMemoryStore::with_clock(fixed_clock())
}

/// JSON store in an isolated directory, returned with that directory.
pub fn json_store() -> (JsonStore, PathBuf) {
    let base = temp_base();
    let store = JsonStore::open_with_clock(base.join("ledger.json"), fixed_clock())
        .expect("open json store");
    (store, base)
}
