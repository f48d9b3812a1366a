//! Exchanges an API key and option pair for a session token.

use super::http::AsyncHttpClient;
use super::options::{LocalizationSelection, StyleSelection};
use super::request::build_session_request;
use super::SessionToken;
use crate::core::endpoints::ProviderEndpoints;
use crate::{MapError, Result};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// Negotiates session tokens with the provider's session-creation endpoint.
///
/// Validation failures never reach the network; HTTP and body-shape
/// failures surface as [`MapError::Api`], transport failures as
/// [`MapError::Transport`]. No retries.
pub struct SessionNegotiator<C> {
    http: Arc<C>,
    endpoints: ProviderEndpoints,
}

impl<C: AsyncHttpClient> SessionNegotiator<C> {
    pub fn new(http: Arc<C>, endpoints: ProviderEndpoints) -> Self {
        Self { http, endpoints }
    }

    /// Creates a session from raw option strings, validating both against
    /// the fixed tables first.
    pub async fn create_session(
        &self,
        api_key: &str,
        style_option: &str,
        localization_option: &str,
    ) -> Result<SessionToken> {
        let style: StyleSelection = style_option.parse()?;
        let localization: LocalizationSelection = localization_option.parse()?;
        self.create_session_for(api_key, style, localization).await
    }

    /// Creates a session for already-validated selections.
    pub async fn create_session_for(
        &self,
        api_key: &str,
        style: StyleSelection,
        localization: LocalizationSelection,
    ) -> Result<SessionToken> {
        let body = build_session_request(style, localization);
        let payload = serde_json::to_string(&body)?;
        let url = self.endpoints.create_session_url(api_key);

        log::debug!(
            "creating session: style={} localization={}",
            style.as_option_str(),
            localization.as_option_str()
        );

        let response = self.http.post_json(&url, &payload).await?;

        if !response.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP error {}", response.status));
            log::warn!("session creation rejected: {}", message);
            return Err(MapError::Api(format!(
                "failed to get session token: {}",
                message
            )));
        }

        let parsed: CreateSessionResponse = response
            .json()
            .map_err(|_| MapError::Api("malformed response from session endpoint".to_string()))?;

        match parsed.session {
            Some(token) if !token.is_empty() => {
                log::info!("session token obtained");
                Ok(SessionToken::new(token))
            }
            _ => Err(MapError::Api(
                "response missing required 'session' field".to_string(),
            )),
        }
    }
}
