//! Convenient re-exports for common usage.

pub use crate::app::{MapSession, DEFAULT_CENTER, DEFAULT_ZOOM};
pub use crate::core::context::{SessionContext, SessionPhase, SharedContext};
pub use crate::core::endpoints::{ProviderEndpoints, DEFAULT_BASE_URL};
pub use crate::core::geo::{LatLng, LatLngBounds};
pub use crate::session::{
    build_session_request, AsyncHttpClient, CreateSessionRequest, HttpResponse,
    LocalizationSelection, ReqwestClient, SessionNegotiator, SessionToken, StyleRule,
    StyleSelection,
};
pub use crate::style::{LogoAsset, StyleDocument, RASTER_LAYER_ID, RASTER_SOURCE_ID};
pub use crate::ui::{ClipboardPort, NullUi, SessionSummary, UiPort};
pub use crate::view::{
    refresh_attribution, AttributionOutcome, HeadlessFactory, HeadlessWidget, MapViewController,
    MapWidget, ScopedSubscription, SettleSignal, SharedWidget, SubscriptionId, WidgetEvent,
    WidgetFactory, WidgetNotice,
};
pub use crate::{Error, MapError, Result};

// Commonly used std types
pub use std::sync::{Arc, Mutex};
