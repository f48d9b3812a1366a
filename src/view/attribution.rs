//! Viewport attribution fetching.
//!
//! The tile provider's viewport endpoint returns the copyright string that
//! must be displayed for the imagery currently on screen. Fetch failures
//! never abort the session; they degrade to a fallback text on the control.

use crate::session::AsyncHttpClient;
use serde::Deserialize;

/// Attribution shown before the first successful viewport fetch.
pub const DEFAULT_ATTRIBUTION: &str = "Map data © Google";

/// Text shown when the viewport request cannot be made or parsed.
pub const FETCH_ERROR_TEXT: &str = "Attribution Fetch Error";

pub fn http_error_text(status: u16) -> String {
    format!("Attribution Error ({status})")
}

#[derive(Debug, Deserialize)]
struct ViewportResponse {
    copyright: Option<String>,
}

/// Result of one viewport attribution fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributionOutcome {
    /// The provider returned a copyright string.
    Copyright(String),
    /// The response parsed but carried no copyright.
    Empty,
    /// The provider answered with a non-success status.
    HttpError(u16),
    /// The request never completed, or the body was unreadable.
    FetchError,
}

impl AttributionOutcome {
    /// What the attribution control should display for this outcome.
    pub fn display_text(&self) -> String {
        match self {
            AttributionOutcome::Copyright(text) => text.clone(),
            AttributionOutcome::Empty => String::new(),
            AttributionOutcome::HttpError(status) => http_error_text(*status),
            AttributionOutcome::FetchError => FETCH_ERROR_TEXT.to_string(),
        }
    }
}

/// Fetch the copyright for a viewport URL. Infallible by design: every
/// failure mode collapses into an [`AttributionOutcome`] the caller can
/// render.
pub async fn fetch_copyright<C: AsyncHttpClient + ?Sized>(
    http: &C,
    url: &str,
) -> AttributionOutcome {
    let response = match http.get(url).await {
        Ok(response) => response,
        Err(err) => {
            log::error!("attribution request failed: {}", err);
            return AttributionOutcome::FetchError;
        }
    };

    if !response.is_success() {
        log::warn!("attribution endpoint returned HTTP {}", response.status);
        return AttributionOutcome::HttpError(response.status);
    }

    let parsed: ViewportResponse = match response.json() {
        Ok(parsed) => parsed,
        Err(err) => {
            log::error!("attribution response unreadable: {}", err);
            return AttributionOutcome::FetchError;
        }
    };

    match parsed.copyright {
        Some(text) if !text.is_empty() => AttributionOutcome::Copyright(text),
        _ => {
            log::warn!("attribution response carried no copyright text");
            AttributionOutcome::Empty
        }
    }
}
