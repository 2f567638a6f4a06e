use thiserror::Error;

/// Engine-level error type.
///
/// Load-path failures are recovered inside `DraftStore::load` and never
/// reach callers; explicit step saves and the final submit propagate these
/// so the wizard can hold the user on the current step.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot store error: {0}")]
    Snapshot(#[from] std::io::Error),
}
