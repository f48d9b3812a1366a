//! Deterministic in-memory widget.
//!
//! `HeadlessWidget` implements the [`MapWidget`] port without any
//! rendering backend: styles load instantly and events fire synchronously.
//! It backs the crate's tests and is usable for headless runs of the
//! session flow.

use super::widget::{
    EventHandler, MapWidget, SharedWidget, SubscriptionId, WidgetEvent, WidgetFactory,
    WidgetNotice,
};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::style::{LogoAsset, StyleDocument};
use crate::{MapError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct HandlerEntry {
    id: SubscriptionId,
    event: WidgetEvent,
    handler: EventHandler,
}

pub struct HeadlessWidget {
    center: LatLng,
    zoom: f64,
    bounds: Option<LatLngBounds>,
    style: Option<StyleDocument>,
    style_loaded: bool,
    load_failure: Option<String>,
    submit_failure: Option<String>,
    handlers: Vec<HandlerEntry>,
    next_id: u64,
    attribution: Option<String>,
    logo: Option<LogoAsset>,
    disposed: bool,
}

impl HeadlessWidget {
    /// A widget whose initial style is already loaded. Late `Load`
    /// subscribers have the outcome replayed to them, so listeners never
    /// miss the settle.
    pub fn new(center: LatLng, zoom: f64, style: StyleDocument) -> Self {
        Self {
            center,
            zoom,
            bounds: None,
            style: Some(style),
            style_loaded: true,
            load_failure: None,
            submit_failure: None,
            handlers: Vec::new(),
            next_id: 0,
            attribution: None,
            logo: None,
            disposed: false,
        }
    }

    /// A widget whose initial load fails with the given message.
    pub fn failing(center: LatLng, zoom: f64, message: &str) -> Self {
        let mut widget = Self::new(center, zoom, StyleDocument::placeholder());
        widget.style = None;
        widget.style_loaded = false;
        widget.load_failure = Some(message.to_string());
        widget
    }

    /// Make the next `submit_style` report an error instead of idling.
    pub fn fail_next_submit(&mut self, message: &str) {
        self.submit_failure = Some(message.to_string());
    }

    pub fn set_viewport(&mut self, bounds: LatLngBounds, zoom: f64) {
        self.bounds = Some(bounds);
        self.zoom = zoom;
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn style(&self) -> Option<&StyleDocument> {
        self.style.as_ref()
    }

    pub fn logo(&self) -> Option<LogoAsset> {
        self.logo
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn handler_count(&self, event: WidgetEvent) -> usize {
        self.handlers.iter().filter(|h| h.event == event).count()
    }

    /// Deliver an event to every matching listener, in registration order.
    pub fn fire(&mut self, notice: WidgetNotice) {
        let mut current = std::mem::take(&mut self.handlers);
        for entry in current.iter_mut() {
            if entry.event == notice.event() {
                (entry.handler)(&notice);
            }
        }
        // Listeners registered from inside a handler land in self.handlers.
        let added = std::mem::take(&mut self.handlers);
        self.handlers = current;
        self.handlers.extend(added);
    }
}

impl MapWidget for HeadlessWidget {
    fn submit_style(&mut self, style: StyleDocument) -> Result<()> {
        if self.disposed {
            return Err(MapError::Render("widget is disposed".to_string()));
        }
        if let Some(message) = self.submit_failure.take() {
            self.fire(WidgetNotice::Error(message));
            return Ok(());
        }
        self.style = Some(style);
        self.style_loaded = true;
        self.fire(WidgetNotice::Idle);
        Ok(())
    }

    fn on(&mut self, event: WidgetEvent, mut handler: EventHandler) -> SubscriptionId {
        // Replay the load outcome so subscribers registered after the
        // instant load still observe it.
        match event {
            WidgetEvent::Load if self.style_loaded => handler(&WidgetNotice::Load),
            WidgetEvent::Error => {
                if let Some(message) = &self.load_failure {
                    handler(&WidgetNotice::Error(message.clone()));
                }
            }
            _ => {}
        }

        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push(HandlerEntry { id, event, handler });
        id
    }

    fn off(&mut self, id: SubscriptionId) {
        self.handlers.retain(|h| h.id != id);
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.bounds.clone()
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn attach_attribution_control(&mut self, text: &str) {
        self.attribution = Some(text.to_string());
    }

    fn remove_attribution_control(&mut self) {
        self.attribution = None;
    }

    fn has_attribution_control(&self) -> bool {
        self.attribution.is_some()
    }

    fn set_attribution_text(&mut self, text: &str) {
        if self.attribution.is_some() {
            self.attribution = Some(text.to_string());
        }
    }

    fn attribution_text(&self) -> Option<String> {
        self.attribution.clone()
    }

    fn set_logo(&mut self, asset: LogoAsset) {
        self.logo = Some(asset);
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.style = None;
        self.style_loaded = false;
        self.handlers.clear();
        self.attribution = None;
        self.logo = None;
    }
}

/// Factory producing [`HeadlessWidget`]s, with hooks for scripting the
/// initial viewport and load failures.
#[derive(Default)]
pub struct HeadlessFactory {
    fail_with: Option<String>,
    viewport: Option<(LatLngBounds, f64)>,
    created: AtomicUsize,
    last: Mutex<Option<Arc<Mutex<HeadlessWidget>>>>,
}

impl HeadlessFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every created widget fails its initial load with this message.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Install a viewport on every created widget.
    pub fn with_viewport(bounds: LatLngBounds, zoom: f64) -> Self {
        Self {
            viewport: Some((bounds, zoom)),
            ..Self::default()
        }
    }

    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// The most recently created widget, for inspection in tests.
    pub fn last(&self) -> Option<Arc<Mutex<HeadlessWidget>>> {
        self.last.lock().unwrap().clone()
    }
}

impl WidgetFactory for HeadlessFactory {
    fn create(&self, center: LatLng, zoom: f64, style: StyleDocument) -> Result<SharedWidget> {
        self.created.fetch_add(1, Ordering::SeqCst);
        let mut widget = match &self.fail_with {
            Some(message) => HeadlessWidget::failing(center, zoom, message),
            None => HeadlessWidget::new(center, zoom, style),
        };
        if let Some((bounds, viewport_zoom)) = &self.viewport {
            widget.set_viewport(bounds.clone(), *viewport_zoom);
        }
        let widget = Arc::new(Mutex::new(widget));
        *self.last.lock().unwrap() = Some(Arc::clone(&widget));
        Ok(widget)
    }
}
