use crate::session::{LocalizationSelection, SessionToken, StyleSelection};
use crate::view::widget::SharedWidget;
use std::sync::{Arc, Mutex};

/// Lifecycle of a map session. Every failure path returns to `Setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Setup,
    Negotiating,
    Initializing,
    Styling,
    Live,
}

impl SessionPhase {
    pub fn is_live(&self) -> bool {
        matches!(self, SessionPhase::Live)
    }
}

/// The single explicit session-state struct owned by the top-level flow and
/// shared (behind a mutex) with the view controller and attribution
/// refreshes. Invariant: at most one token and one widget exist at a time;
/// `teardown` always clears both.
pub struct SessionContext {
    pub phase: SessionPhase,
    pub api_key: Option<String>,
    pub token: Option<SessionToken>,
    pub widget: Option<SharedWidget>,
    pub style: Option<StyleSelection>,
    pub localization: Option<LocalizationSelection>,
}

pub type SharedContext = Arc<Mutex<SessionContext>>;

impl SessionContext {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Setup,
            api_key: None,
            token: None,
            widget: None,
            style: None,
            localization: None,
        }
    }

    pub fn shared() -> SharedContext {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Disposes the widget (if any), discards the token and selections, and
    /// returns to `Setup`. Outstanding attribution refreshes observe the
    /// cleared state and become no-ops.
    pub fn teardown(&mut self) {
        if let Some(widget) = self.widget.take() {
            widget.lock().unwrap().dispose();
            log::debug!("disposed map widget");
        }
        self.token = None;
        self.api_key = None;
        self.style = None;
        self.localization = None;
        self.phase = SessionPhase::Setup;
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_context_starts_in_setup() {
        let ctx = SessionContext::new();
        assert_eq!(ctx.phase, SessionPhase::Setup);
        assert!(ctx.token.is_none());
        assert!(ctx.widget.is_none());
    }

    #[test]
    fn test_teardown_clears_everything() {
        let mut ctx = SessionContext::new();
        ctx.phase = SessionPhase::Live;
        ctx.api_key = Some("key".to_string());
        ctx.token = Some(SessionToken::new("tok"));
        ctx.style = Some(StyleSelection::Roadmap);
        ctx.localization = Some(LocalizationSelection::Us);

        ctx.teardown();

        assert_eq!(ctx.phase, SessionPhase::Setup);
        assert!(ctx.api_key.is_none());
        assert!(ctx.token.is_none());
        assert!(ctx.style.is_none());
        assert!(ctx.localization.is_none());
    }
}
