//! Session negotiation with the tile provider.
//!
//! One outbound request exchanges an API key plus style/localization choice
//! for a short-lived session token. Option validation happens before any
//! network call; the caller decides whether to prompt the user again on
//! failure (there are no retries here).

mod http;
mod negotiator;
mod options;
mod request;

pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient};
pub use negotiator::SessionNegotiator;
pub use options::{LocalizationSelection, StyleSelection};
pub use request::{build_session_request, CreateSessionRequest, StyleRule};

#[cfg(test)]
pub use http::tests::MockHttpClient;

use std::fmt;

/// Opaque credential issued by the tile provider, required to fetch tiles
/// and attribution for a bounded time window. Held only in memory and
/// discarded on teardown or error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
