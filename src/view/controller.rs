//! Drives a map widget through the session lifecycle: placeholder
//! initialization, session-backed restyling, and viewport attribution
//! upkeep.

use super::attribution::{fetch_copyright, DEFAULT_ATTRIBUTION};
use super::subscription::{ScopedSubscription, SettleSignal};
use super::widget::{SharedWidget, WidgetEvent, WidgetFactory};
use crate::core::context::SharedContext;
use crate::core::endpoints::ProviderEndpoints;
use crate::core::geo::LatLng;
use crate::runtime;
use crate::session::{AsyncHttpClient, SessionToken, StyleSelection};
use crate::style::{LogoAsset, StyleDocument};
use crate::{MapError, Result};
use std::sync::Arc;

pub struct MapViewController<C: AsyncHttpClient + 'static> {
    http: Arc<C>,
    endpoints: ProviderEndpoints,
    factory: Arc<dyn WidgetFactory>,
    context: SharedContext,
    viewport_subs: Vec<ScopedSubscription>,
}

impl<C: AsyncHttpClient + 'static> MapViewController<C> {
    pub fn new(
        http: Arc<C>,
        endpoints: ProviderEndpoints,
        factory: Arc<dyn WidgetFactory>,
        context: SharedContext,
    ) -> Self {
        Self {
            http,
            endpoints,
            factory,
            context,
            viewport_subs: Vec::new(),
        }
    }

    /// Create a widget showing the placeholder style and wait for its first
    /// load to settle. Any previously held widget is disposed first, so the
    /// context never references two widgets at once.
    pub async fn initialize(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        self.clear_subscriptions();
        if let Some(previous) = self.context.lock().unwrap().widget.take() {
            previous.lock().unwrap().dispose();
            log::debug!("disposed previous widget before re-initialization");
        }

        let widget = self
            .factory
            .create(center, zoom, StyleDocument::placeholder())?;
        let settled = SettleSignal::listen(&widget, WidgetEvent::Load);
        self.context.lock().unwrap().widget = Some(Arc::clone(&widget));

        settled.settled().await?;
        log::info!("map widget initialized at {},{} z{}", center.lat, center.lng, zoom);
        Ok(())
    }

    /// Swap the widget onto session-backed raster tiles. Listens for the
    /// settle before submitting the style so an instantly-idle widget is
    /// still observed, then installs the attribution control and the logo
    /// variant matching the style.
    pub async fn apply_tile_style(
        &self,
        api_key: &str,
        token: &SessionToken,
        style: StyleSelection,
    ) -> Result<()> {
        let widget = self.current_widget()?;
        let tiles = self.endpoints.tile_url_template(token, api_key);
        let document = StyleDocument::raster(&tiles);

        let settled = SettleSignal::listen(&widget, WidgetEvent::Idle);
        widget.lock().unwrap().submit_style(document)?;
        settled.settled().await?;

        let mut w = widget.lock().unwrap();
        w.remove_attribution_control();
        w.attach_attribution_control(DEFAULT_ATTRIBUTION);
        w.set_logo(LogoAsset::for_style(style));
        log::info!("applied session tile style ({})", style.as_option_str());
        Ok(())
    }

    /// Subscribe attribution refreshes to viewport movement. Idempotent:
    /// calling again replaces the previous subscriptions instead of stacking
    /// duplicate listeners.
    pub fn attach_attribution(&mut self) -> Result<()> {
        self.clear_subscriptions();
        let widget = self.current_widget()?;

        for event in [WidgetEvent::MoveEnd, WidgetEvent::ZoomEnd] {
            let http = Arc::clone(&self.http);
            let endpoints = self.endpoints.clone();
            let context = Arc::clone(&self.context);
            let sub = ScopedSubscription::subscribe(
                &widget,
                event,
                Box::new(move |_notice| {
                    let http = Arc::clone(&http);
                    let endpoints = endpoints.clone();
                    let context = Arc::clone(&context);
                    runtime::spawn(async move {
                        refresh_attribution(http.as_ref(), &endpoints, &context).await;
                    });
                }),
            );
            self.viewport_subs.push(sub);
        }
        Ok(())
    }

    /// Refresh the attribution text for the current viewport immediately.
    pub async fn refresh(&self) {
        refresh_attribution(self.http.as_ref(), &self.endpoints, &self.context).await;
    }

    /// Drop the viewport listeners registered by `attach_attribution`.
    pub fn clear_subscriptions(&mut self) {
        self.viewport_subs.clear();
    }

    fn current_widget(&self) -> Result<SharedWidget> {
        self.context
            .lock()
            .unwrap()
            .widget
            .clone()
            .ok_or_else(|| MapError::Render("no widget to style".to_string()))
    }
}

/// One attribution refresh cycle: read the session and viewport, query the
/// provider, write the resulting text onto the widget's control. Every
/// precondition failure is a silent (logged) no-op so stale refreshes after
/// teardown cannot disturb a new session.
pub async fn refresh_attribution<C: AsyncHttpClient + ?Sized>(
    http: &C,
    endpoints: &ProviderEndpoints,
    context: &SharedContext,
) {
    let (widget, token, api_key) = {
        let ctx = context.lock().unwrap();
        match (ctx.widget.clone(), ctx.token.clone(), ctx.api_key.clone()) {
            (Some(widget), Some(token), Some(api_key)) => (widget, token, api_key),
            _ => {
                log::debug!("attribution refresh skipped: no active session");
                return;
            }
        }
    };

    let (bounds, zoom) = {
        let w = widget.lock().unwrap();
        if !w.is_style_loaded() || !w.has_attribution_control() {
            log::debug!("attribution refresh skipped: widget not ready");
            return;
        }
        (w.bounds(), w.zoom())
    };

    let bounds = match bounds {
        Some(bounds) => bounds,
        None => {
            log::warn!("attribution refresh skipped: widget reported no bounds");
            return;
        }
    };
    let zoom = zoom.floor();
    if bounds.is_degenerate() || !zoom.is_finite() {
        log::warn!("attribution refresh skipped: degenerate viewport");
        return;
    }

    let url = endpoints.viewport_url(&token, &api_key, zoom as i32, &bounds);
    let outcome = fetch_copyright(http, &url).await;

    // The session may have been torn down while the request was in flight.
    let widget = match context.lock().unwrap().widget.clone() {
        Some(widget) => widget,
        None => {
            log::debug!("attribution refresh dropped: session torn down mid-fetch");
            return;
        }
    };
    let mut w = widget.lock().unwrap();
    if w.has_attribution_control() {
        w.set_attribution_text(&outcome.display_text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::context::SessionContext;
    use crate::core::geo::LatLngBounds;
    use crate::session::MockHttpClient;
    use crate::view::headless::HeadlessFactory;
    use crate::view::widget::MapWidget;

    fn bounds() -> LatLngBounds {
        LatLngBounds::from_coords(40.0, -75.0, 41.0, -74.0)
    }

    fn controller(
        http: MockHttpClient,
        factory: HeadlessFactory,
    ) -> (MapViewController<MockHttpClient>, SharedContext, Arc<HeadlessFactory>) {
        let context = SessionContext::shared();
        let factory = Arc::new(factory);
        let controller = MapViewController::new(
            Arc::new(http),
            ProviderEndpoints::default(),
            Arc::clone(&factory) as Arc<dyn WidgetFactory>,
            Arc::clone(&context),
        );
        (controller, context, factory)
    }

    #[tokio::test]
    async fn test_initialize_stores_widget() {
        let (mut controller, context, factory) =
            controller(MockHttpClient::new(), HeadlessFactory::new());
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();

        assert!(context.lock().unwrap().widget.is_some());
        assert_eq!(factory.created_count(), 1);
    }

    #[tokio::test]
    async fn test_initialize_disposes_previous_widget() {
        let (mut controller, _context, factory) =
            controller(MockHttpClient::new(), HeadlessFactory::new());
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        let first = factory.last().unwrap();
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();

        assert!(first.lock().unwrap().is_disposed());
        assert_eq!(factory.created_count(), 2);
    }

    #[tokio::test]
    async fn test_initialize_surfaces_load_failure() {
        let (mut controller, _context, _factory) = controller(
            MockHttpClient::new(),
            HeadlessFactory::failing("style failed to load"),
        );
        match controller.initialize(LatLng::new(40.0, -74.5), 9.0).await {
            Err(MapError::Render(message)) => assert!(message.contains("style failed to load")),
            other => panic!("expected RenderError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_apply_tile_style_installs_tiles_control_and_logo() {
        let (mut controller, _context, factory) =
            controller(MockHttpClient::new(), HeadlessFactory::new());
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        controller
            .apply_tile_style("my-key", &SessionToken::new("tok-1"), StyleSelection::Dark)
            .await
            .unwrap();

        let widget = factory.last().unwrap();
        let w = widget.lock().unwrap();
        let urls = w.style().unwrap().tile_urls();
        assert_eq!(
            urls,
            vec!["https://tile.googleapis.com/v1/2dtiles/{z}/{x}/{y}?session=tok-1&key=my-key"]
        );
        assert_eq!(w.attribution_text().as_deref(), Some(DEFAULT_ATTRIBUTION));
        assert_eq!(w.logo(), Some(LogoAsset::DarkBackground));
    }

    #[tokio::test]
    async fn test_apply_tile_style_without_widget_fails() {
        let (controller, _context, _factory) =
            controller(MockHttpClient::new(), HeadlessFactory::new());
        assert!(controller
            .apply_tile_style("k", &SessionToken::new("t"), StyleSelection::Roadmap)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_attach_attribution_is_idempotent() {
        let (mut controller, _context, factory) = controller(
            MockHttpClient::new(),
            HeadlessFactory::with_viewport(bounds(), 9.0),
        );
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        controller.attach_attribution().unwrap();
        controller.attach_attribution().unwrap();

        let widget = factory.last().unwrap();
        let w = widget.lock().unwrap();
        assert_eq!(w.handler_count(WidgetEvent::MoveEnd), 1);
        assert_eq!(w.handler_count(WidgetEvent::ZoomEnd), 1);
    }

    fn live_context(context: &SharedContext) {
        let mut ctx = context.lock().unwrap();
        ctx.api_key = Some("my-key".to_string());
        ctx.token = Some(SessionToken::new("tok-1"));
    }

    #[tokio::test]
    async fn test_refresh_updates_attribution_text() {
        let http = MockHttpClient::with_response(200, r#"{"copyright": "© Imagery 2026"}"#);
        let (mut controller, context, factory) =
            controller(http, HeadlessFactory::with_viewport(bounds(), 9.4));
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        controller
            .apply_tile_style("my-key", &SessionToken::new("tok-1"), StyleSelection::Roadmap)
            .await
            .unwrap();
        live_context(&context);

        controller.refresh().await;

        let widget = factory.last().unwrap();
        assert_eq!(
            widget.lock().unwrap().attribution_text().as_deref(),
            Some("© Imagery 2026")
        );
    }

    #[tokio::test]
    async fn test_refresh_floors_fractional_zoom() {
        let http = MockHttpClient::with_response(200, r#"{"copyright": "ok"}"#);
        let http_ref = Arc::new(http);
        let (mut controller, context, _factory) = {
            let context = SessionContext::shared();
            let factory = Arc::new(HeadlessFactory::with_viewport(bounds(), 9.9));
            (
                MapViewController::new(
                    Arc::clone(&http_ref),
                    ProviderEndpoints::default(),
                    factory.clone() as Arc<dyn WidgetFactory>,
                    Arc::clone(&context),
                ),
                context,
                factory,
            )
        };
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        controller
            .apply_tile_style("my-key", &SessionToken::new("tok-1"), StyleSelection::Roadmap)
            .await
            .unwrap();
        live_context(&context);

        controller.refresh().await;

        let requests = http_ref.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.contains("zoom=9&"));
    }

    #[tokio::test]
    async fn test_refresh_skips_degenerate_bounds() {
        let degenerate = LatLngBounds::from_coords(0.0, -75.0, 41.0, -74.0);
        let http = MockHttpClient::with_response(200, r#"{"copyright": "ok"}"#);
        let http_ref = Arc::new(http);
        let context = SessionContext::shared();
        let factory = Arc::new(HeadlessFactory::with_viewport(degenerate, 9.0));
        let mut controller = MapViewController::new(
            Arc::clone(&http_ref),
            ProviderEndpoints::default(),
            factory.clone() as Arc<dyn WidgetFactory>,
            Arc::clone(&context),
        );
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        controller
            .apply_tile_style("my-key", &SessionToken::new("tok-1"), StyleSelection::Roadmap)
            .await
            .unwrap();
        live_context(&context);

        controller.refresh().await;
        assert_eq!(http_ref.request_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_after_teardown_is_a_no_op() {
        let http = MockHttpClient::with_response(200, r#"{"copyright": "ok"}"#);
        let http_ref = Arc::new(http);
        let context = SessionContext::shared();
        let factory = Arc::new(HeadlessFactory::with_viewport(bounds(), 9.0));
        let mut controller = MapViewController::new(
            Arc::clone(&http_ref),
            ProviderEndpoints::default(),
            factory.clone() as Arc<dyn WidgetFactory>,
            Arc::clone(&context),
        );
        controller
            .initialize(LatLng::new(40.0, -74.5), 9.0)
            .await
            .unwrap();
        context.lock().unwrap().teardown();

        controller.refresh().await;
        assert_eq!(http_ref.request_count(), 0);
    }
}
