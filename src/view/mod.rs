//! The map view: widget port, scoped event subscriptions, and the
//! controller that drives a widget through the session lifecycle.

pub mod attribution;
pub mod controller;
pub mod headless;
pub mod subscription;
pub mod widget;

pub use attribution::{AttributionOutcome, DEFAULT_ATTRIBUTION};
pub use controller::{refresh_attribution, MapViewController};
pub use headless::{HeadlessFactory, HeadlessWidget};
pub use subscription::{ScopedSubscription, SettleSignal};
pub use widget::{
    EventHandler, MapWidget, SharedWidget, SubscriptionId, WidgetEvent, WidgetFactory,
    WidgetNotice,
};
