use crate::core::geo::LatLngBounds;
use crate::session::SessionToken;

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://tile.googleapis.com";

/// URL builder for the three provider endpoints: session creation, tile
/// fetching, and viewport attribution lookup. The base URL is configurable
/// so tests can point it at a local server.
#[derive(Debug, Clone)]
pub struct ProviderEndpoints {
    base_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProviderEndpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session-creation endpoint with the API key as a query credential.
    pub fn create_session_url(&self, api_key: &str) -> String {
        format!("{}/v1/createSession?key={}", self.base_url, api_key)
    }

    /// Tile URL template with literal `{z}/{x}/{y}` placeholders, ready to
    /// hand to a widget's raster source.
    pub fn tile_url_template(&self, token: &SessionToken, api_key: &str) -> String {
        format!(
            "{}/v1/2dtiles/{{z}}/{{x}}/{{y}}?session={}&key={}",
            self.base_url,
            token.as_str(),
            api_key
        )
    }

    /// Viewport attribution lookup for the given bounds and integer zoom.
    pub fn viewport_url(
        &self,
        token: &SessionToken,
        api_key: &str,
        zoom: i32,
        bounds: &LatLngBounds,
    ) -> String {
        format!(
            "{}/tile/v1/viewport?session={}&key={}&zoom={}&north={}&south={}&east={}&west={}",
            self.base_url,
            token.as_str(),
            api_key,
            zoom,
            bounds.north(),
            bounds.south(),
            bounds.east(),
            bounds.west()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> SessionToken {
        SessionToken::new("tok-123")
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let endpoints = ProviderEndpoints::new("https://example.com/");
        assert_eq!(endpoints.base_url(), "https://example.com");
    }

    #[test]
    fn test_create_session_url() {
        let endpoints = ProviderEndpoints::default();
        assert_eq!(
            endpoints.create_session_url("my-key"),
            "https://tile.googleapis.com/v1/createSession?key=my-key"
        );
    }

    #[test]
    fn test_tile_url_template_keeps_placeholders() {
        let endpoints = ProviderEndpoints::default();
        let url = endpoints.tile_url_template(&token(), "my-key");
        assert_eq!(
            url,
            "https://tile.googleapis.com/v1/2dtiles/{z}/{x}/{y}?session=tok-123&key=my-key"
        );
    }

    #[test]
    fn test_viewport_url() {
        let endpoints = ProviderEndpoints::default();
        let bounds = LatLngBounds::from_coords(40.0, -75.0, 41.0, -74.0);
        let url = endpoints.viewport_url(&token(), "my-key", 9, &bounds);
        assert_eq!(
            url,
            "https://tile.googleapis.com/tile/v1/viewport?session=tok-123&key=my-key&zoom=9&north=41&south=40&east=-74&west=-75"
        );
    }
}
