//! Top-level session flow.
//!
//! `MapSession` ties the negotiator, the view controller, and the host UI
//! together: one call takes an API key and option pair all the way from
//! setup to a live, attributed map, and any failure along the way tears
//! everything back down to setup.

use crate::core::context::{SessionContext, SessionPhase, SharedContext};
use crate::core::endpoints::ProviderEndpoints;
use crate::core::geo::LatLng;
use crate::session::{
    AsyncHttpClient, LocalizationSelection, SessionNegotiator, StyleSelection,
};
use crate::style::StyleDocument;
use crate::ui::{ClipboardPort, SessionSummary, UiPort};
use crate::view::controller::MapViewController;
use crate::view::widget::WidgetFactory;
use crate::{MapError, Result};
use std::sync::Arc;

/// Initial viewport before the user pans anywhere.
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.0,
    lng: -74.5,
};
pub const DEFAULT_ZOOM: f64 = 9.0;

pub struct MapSession<C: AsyncHttpClient + 'static, U: UiPort> {
    negotiator: SessionNegotiator<C>,
    view: MapViewController<C>,
    ui: U,
    context: SharedContext,
    endpoints: ProviderEndpoints,
}

impl<C: AsyncHttpClient + 'static, U: UiPort> MapSession<C, U> {
    pub fn new(
        http: Arc<C>,
        endpoints: ProviderEndpoints,
        factory: Arc<dyn WidgetFactory>,
        ui: U,
    ) -> Self {
        let context = SessionContext::shared();
        Self {
            negotiator: SessionNegotiator::new(Arc::clone(&http), endpoints.clone()),
            view: MapViewController::new(
                http,
                endpoints.clone(),
                factory,
                Arc::clone(&context),
            ),
            ui,
            context,
            endpoints,
        }
    }

    pub fn context(&self) -> SharedContext {
        Arc::clone(&self.context)
    }

    pub fn phase(&self) -> SessionPhase {
        self.context.lock().unwrap().phase
    }

    /// Run the whole setup-to-live flow. The exclusive borrow keeps flows
    /// sequential: a second call cannot start until this one finishes. On
    /// failure the error is shown through the UI, the session is torn down
    /// to setup, and the error is returned.
    pub async fn show_map(
        &mut self,
        api_key: &str,
        style_option: &str,
        localization_option: &str,
    ) -> Result<()> {
        let result = self
            .run_show_map(api_key, style_option, localization_option)
            .await;

        if let Err(err) = &result {
            log::error!("session flow failed: {}", err);
            self.ui.show_error(&err.to_string());
            self.teardown();
        }
        result
    }

    async fn run_show_map(
        &mut self,
        api_key: &str,
        style_option: &str,
        localization_option: &str,
    ) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(MapError::Validation("an API key is required".to_string()));
        }
        let style: StyleSelection = style_option.parse()?;
        let localization: LocalizationSelection = localization_option.parse()?;

        self.ui.show_status("Fetching session token...");
        self.set_phase(SessionPhase::Negotiating);
        let token = self
            .negotiator
            .create_session_for(api_key, style, localization)
            .await?;
        {
            let mut ctx = self.context.lock().unwrap();
            ctx.api_key = Some(api_key.to_string());
            ctx.token = Some(token.clone());
            ctx.style = Some(style);
            ctx.localization = Some(localization);
        }

        self.ui.show_status("Initializing map...");
        self.set_phase(SessionPhase::Initializing);
        self.view.initialize(DEFAULT_CENTER, DEFAULT_ZOOM).await?;

        self.ui.show_status("Applying map style...");
        self.set_phase(SessionPhase::Styling);
        self.view.apply_tile_style(api_key, &token, style).await?;
        self.view.attach_attribution()?;
        self.view.refresh().await;

        self.set_phase(SessionPhase::Live);
        let summary = self.summary()?;
        self.ui.show_result(&summary);
        self.ui.show_status("");
        log::info!("session live");
        Ok(())
    }

    /// Pretty-printed raster style JSON for the live session, with the real
    /// tile URL embedded.
    pub fn style_json(&self) -> Result<String> {
        let (token, api_key) = {
            let ctx = self.context.lock().unwrap();
            match (ctx.token.clone(), ctx.api_key.clone()) {
                (Some(token), Some(api_key)) => (token, api_key),
                _ => return Err(MapError::Validation("no live session".to_string())),
            }
        };
        let tiles = self.endpoints.tile_url_template(&token, &api_key);
        StyleDocument::raster(&tiles).to_pretty_json()
    }

    pub fn summary(&self) -> Result<SessionSummary> {
        let (style, localization) = {
            let ctx = self.context.lock().unwrap();
            match (ctx.style, ctx.localization) {
                (Some(style), Some(localization)) => (style, localization),
                _ => return Err(MapError::Validation("no live session".to_string())),
            }
        };
        Ok(SessionSummary {
            style_label: style.label().to_string(),
            localization_label: localization.label().to_string(),
            style_json: self.style_json()?,
        })
    }

    /// Copy the live style JSON through the host clipboard.
    pub fn copy_style_json(&self, clipboard: &dyn ClipboardPort) -> Result<()> {
        clipboard.copy(&self.style_json()?)
    }

    /// Abandon the live session and return to setup.
    pub fn return_to_setup(&mut self) {
        log::info!("returning to setup");
        self.teardown();
        self.ui.show_status("");
    }

    fn teardown(&mut self) {
        self.view.clear_subscriptions();
        self.context.lock().unwrap().teardown();
    }

    fn set_phase(&self, phase: SessionPhase) {
        self.context.lock().unwrap().phase = phase;
    }
}
