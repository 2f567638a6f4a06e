//! DraftStore — owns the one in-memory draft per wizard session, reconciles
//! it from the backend and the local snapshot, and keeps both eventually
//! consistent with it through a debounced dual write.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::backend::ProfileBackend;
use crate::draft::{flatten, nest, Draft, Section};
use crate::errors::WizardError;
use crate::persist::{Debouncer, SnapshotStore};
use crate::scoring;

/// Default idle window before a mutation is persisted.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(1500);

/// Autosave indicator state. `Saving` means a write is scheduled or in
/// flight; it flips to `Saved` only when a backend write succeeds, so a
/// failed autosave simply leaves the indicator on `Saving`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Saved,
    Saving,
}

pub struct DraftStore {
    draft: Draft,
    backend: Arc<dyn ProfileBackend>,
    snapshot: Arc<dyn SnapshotStore>,
    autosave: Debouncer,
    debounce: Duration,
    save_state: Arc<watch::Sender<SaveState>>,
}

impl DraftStore {
    pub fn new(backend: Arc<dyn ProfileBackend>, snapshot: Arc<dyn SnapshotStore>) -> Self {
        Self::with_debounce(backend, snapshot, AUTOSAVE_DEBOUNCE)
    }

    pub fn with_debounce(
        backend: Arc<dyn ProfileBackend>,
        snapshot: Arc<dyn SnapshotStore>,
        debounce: Duration,
    ) -> Self {
        let (save_state, _) = watch::channel(SaveState::Saved);
        Self {
            draft: Draft::empty(),
            backend,
            snapshot,
            autosave: Debouncer::new(),
            debounce,
            save_state: Arc::new(save_state),
        }
    }

    /// Reconciles the in-memory draft: the canonical backend record first,
    /// then the local snapshot, then the all-empty default. Never fails —
    /// the wizard always has a draft to render.
    pub async fn load(&mut self) -> Draft {
        self.draft = match self.backend.fetch_profile().await {
            Ok(flat) => nest(&flat),
            Err(e) => {
                warn!("Profile fetch failed, falling back to local snapshot: {e}");
                match self.snapshot.read() {
                    Ok(Some(saved)) => Draft::from_nested(saved),
                    Ok(None) => Draft::empty(),
                    Err(e) => {
                        warn!("Snapshot read failed, starting from an empty draft: {e}");
                        Draft::empty()
                    }
                }
            }
        };
        self.draft.clone()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Completion score of the current in-memory draft.
    pub fn score(&self) -> u8 {
        scoring::score_draft(&self.draft)
    }

    /// Subscribes to the autosave indicator.
    pub fn save_state(&self) -> watch::Receiver<SaveState> {
        self.save_state.subscribe()
    }

    /// Single mutation entrypoint for scalar fields. Returns the updated
    /// draft and (re)schedules the debounced autosave.
    pub fn set_field(&mut self, section: Section, name: &str, value: Value) -> Draft {
        self.draft = self.draft.set_field(section, name, value);
        self.schedule_autosave();
        self.draft.clone()
    }

    /// Wholesale section replacement, used for the array-valued sections.
    pub fn set_section(&mut self, section: Section, value: Value) -> Draft {
        self.draft = self.draft.set_section(section, value);
        self.schedule_autosave();
        self.draft.clone()
    }

    /// Explicit "Save and Proceed": pushes just this step's section as a
    /// sub-object, e.g. `{"basic": {...}}`. Errors propagate so the caller
    /// can hold the wizard on the current step for an explicit retry.
    pub async fn save_step(&self, section: Section) -> Result<(), WizardError> {
        let key = section.key();
        let body = json!({ key: self.draft.section(section).clone() });
        self.backend.update_profile(&body).await
    }

    /// Finalizes the profile with the fully flattened record. The draft and
    /// snapshot are untouched either way, so a failed submit can be retried
    /// without data loss.
    pub async fn submit(&self) -> Result<(), WizardError> {
        let record = flatten(&self.draft);
        self.backend.submit_profile(&record).await?;
        info!("Profile submitted");
        Ok(())
    }

    /// Cancels any pending autosave. An autosave already in flight is left
    /// to finish; re-sending the same flat record is idempotent.
    pub fn shutdown(&mut self) {
        self.autosave.cancel();
    }

    fn schedule_autosave(&mut self) {
        self.save_state.send_replace(SaveState::Saving);
        let draft = self.draft.clone();
        let backend = Arc::clone(&self.backend);
        let snapshot = Arc::clone(&self.snapshot);
        let save_state = Arc::clone(&self.save_state);
        self.autosave.schedule(self.debounce, async move {
            if let Err(e) = snapshot.write(draft.as_value()) {
                warn!("Draft snapshot write failed: {e}");
            }
            let record = flatten(&draft);
            match backend.update_profile(&record).await {
                Ok(()) => {
                    save_state.send_replace(SaveState::Saved);
                }
                // No rollback, no retry loop: the next edit's debounce
                // cycle is the retry, and the indicator stays on `Saving`.
                Err(e) => warn!("Autosave failed: {e}"),
            }
        });
    }
}
