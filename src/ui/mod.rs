//! Outward-facing ports: status/result presentation and clipboard access.
//!
//! The session flow reports progress through these traits instead of
//! rendering anything itself, so hosts (a desktop shell, a TUI, a test)
//! decide how status lines and results are shown.

use crate::Result;

/// What a finished session hands to the host for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Human-readable label of the chosen style.
    pub style_label: String,
    /// Human-readable label of the chosen localization.
    pub localization_label: String,
    /// Pretty-printed style JSON embedding the live tile URL.
    pub style_json: String,
}

/// Presentation port for the session flow.
pub trait UiPort: Send + Sync {
    /// Transient progress line ("Fetching session token..."). An empty
    /// string clears it.
    fn show_status(&self, message: &str);

    /// Terminal failure display. The flow has already returned to setup
    /// when this is called.
    fn show_error(&self, message: &str);

    /// The session reached the live state.
    fn show_result(&self, summary: &SessionSummary);
}

/// Host clipboard access for the copy-style-JSON action.
pub trait ClipboardPort {
    fn copy(&self, text: &str) -> Result<()>;
}

/// UI that swallows everything. Suits headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullUi;

impl UiPort for NullUi {
    fn show_status(&self, _message: &str) {}
    fn show_error(&self, _message: &str) {}
    fn show_result(&self, _summary: &SessionSummary) {}
}
