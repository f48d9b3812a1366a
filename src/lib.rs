//! # tilesession
//!
//! Session-negotiated raster map viewing for tile providers that issue
//! short-lived session tokens.
//!
//! The library exchanges a user-supplied API key plus style/localization
//! choice for a session token, drives a map widget (reached through a
//! narrow port trait) with a raster style built from that token, and keeps
//! a legal-attribution overlay current as the viewport changes.

pub mod app;
pub mod core;
pub mod prelude;
pub mod runtime;
pub mod session;
pub mod style;
pub mod ui;
pub mod view;

// Re-export public API
pub use crate::core::{
    context::{SessionContext, SessionPhase, SharedContext},
    endpoints::ProviderEndpoints,
    geo::{LatLng, LatLngBounds},
};

pub use crate::session::{
    AsyncHttpClient, HttpResponse, LocalizationSelection, ReqwestClient, SessionNegotiator,
    SessionToken, StyleSelection,
};

pub use crate::style::{LogoAsset, StyleDocument};

pub use crate::view::{
    controller::MapViewController,
    headless::{HeadlessFactory, HeadlessWidget},
    widget::{MapWidget, SharedWidget, WidgetFactory},
};

pub use crate::ui::{ClipboardPort, SessionSummary, UiPort};

pub use crate::app::MapSession;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// Bad user-facing option or missing required input; never reaches the network.
    #[error("validation error: {0}")]
    Validation(String),

    /// Non-2xx or malformed success body from a provider endpoint.
    #[error("api error: {0}")]
    Api(String),

    /// Network-level failure before any HTTP status was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The widget failed to load or restyle.
    #[error("render error: {0}")]
    Render(String),

    /// Copy action unsupported or denied.
    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for MapError {
    fn from(err: reqwest::Error) -> Self {
        MapError::Transport(err.to_string())
    }
}

/// Error type alias for convenience
pub type Error = MapError;
