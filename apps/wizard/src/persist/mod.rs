//! Local snapshot persistence. The draft snapshot lives under one fixed
//! key; the store behind it is an injected trait so the engine can run
//! against a file, an in-memory slot, or a test fake. Agreement with the
//! backend record is only eventual — the in-memory draft is the source of
//! truth while the wizard is open.

pub mod debounce;

pub use debounce::Debouncer;

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use tracing::debug;

use crate::errors::WizardError;

/// Fixed storage key for the draft snapshot; the file store derives its
/// default file name from it.
pub const SNAPSHOT_KEY: &str = "profile_draft_v1";

/// Local snapshot of the nested draft.
pub trait SnapshotStore: Send + Sync {
    /// Returns the previously persisted draft, `None` when no snapshot
    /// exists yet.
    fn read(&self) -> Result<Option<Value>, WizardError>;

    fn write(&self, draft: &Value) -> Result<(), WizardError>;
}

/// JSON file on disk, the headless stand-in for browser local storage.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<Value>, WizardError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(WizardError::Snapshot(e)),
        }
    }

    fn write(&self, draft: &Value) -> Result<(), WizardError> {
        fs::write(&self.path, serde_json::to_vec(draft)?)?;
        debug!("Wrote draft snapshot to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and one-shot headless runs.
#[derive(Default)]
pub struct MemorySnapshotStore {
    slot: Mutex<Option<Value>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Result<Option<Value>, WizardError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn write(&self, draft: &Value) -> Result<(), WizardError> {
        *self.slot.lock().unwrap() = Some(draft.clone());
        Ok(())
    }
}
