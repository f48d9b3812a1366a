//! The map widget port.
//!
//! The core workflow never talks to a concrete rendering technology; it
//! drives anything that implements [`MapWidget`]. Style application is
//! two-phase: [`MapWidget::submit_style`] returns immediately, and the
//! widget signals completion through an [`WidgetEvent::Idle`] (or
//! [`WidgetEvent::Error`]) event.

use crate::core::geo::{LatLng, LatLngBounds};
use crate::style::{LogoAsset, StyleDocument};
use crate::Result;
use std::sync::{Arc, Mutex};

/// Events a widget can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    /// Initial style fully loaded.
    Load,
    /// All pending style/source loading has settled.
    Idle,
    /// Loading or restyling failed.
    Error,
    /// Pan finished.
    MoveEnd,
    /// Zoom finished.
    ZoomEnd,
}

/// Payload delivered to event handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetNotice {
    Load,
    Idle,
    Error(String),
    MoveEnd,
    ZoomEnd,
}

impl WidgetNotice {
    pub fn event(&self) -> WidgetEvent {
        match self {
            WidgetNotice::Load => WidgetEvent::Load,
            WidgetNotice::Idle => WidgetEvent::Idle,
            WidgetNotice::Error(_) => WidgetEvent::Error,
            WidgetNotice::MoveEnd => WidgetEvent::MoveEnd,
            WidgetNotice::ZoomEnd => WidgetEvent::ZoomEnd,
        }
    }
}

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

pub type EventHandler = Box<dyn FnMut(&WidgetNotice) + Send>;

/// Narrow port over an interactive map widget.
pub trait MapWidget: Send {
    /// Begin replacing the widget's style. Returns immediately; only a
    /// subsequent `Idle` event guarantees the new layers are rendered.
    fn submit_style(&mut self, style: StyleDocument) -> Result<()>;

    /// Register a listener. Prefer [`super::ScopedSubscription`] over
    /// calling this directly so listeners cannot leak.
    fn on(&mut self, event: WidgetEvent, handler: EventHandler) -> SubscriptionId;

    /// Remove a listener. Unknown ids are ignored.
    fn off(&mut self, id: SubscriptionId);

    /// Current viewport bounds, if the widget has rendered at least once.
    fn bounds(&self) -> Option<LatLngBounds>;

    fn zoom(&self) -> f64;

    fn is_style_loaded(&self) -> bool;

    fn attach_attribution_control(&mut self, text: &str);

    fn remove_attribution_control(&mut self);

    fn has_attribution_control(&self) -> bool;

    fn set_attribution_text(&mut self, text: &str);

    fn attribution_text(&self) -> Option<String>;

    fn set_logo(&mut self, asset: LogoAsset);

    /// Release the widget's resources. Further calls are no-ops.
    fn dispose(&mut self);
}

pub type SharedWidget = Arc<Mutex<dyn MapWidget>>;

/// Constructs widgets. Creation kicks off asynchronous style loading; the
/// widget reports the outcome through `Load` / `Error` events.
pub trait WidgetFactory: Send + Sync {
    fn create(&self, center: LatLng, zoom: f64, style: StyleDocument) -> Result<SharedWidget>;
}
