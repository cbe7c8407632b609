use crate::config::Config;
use crate::endpoints::handlers::{click_handler, panel_handler, state_handler};
use crate::panel::SharedPanel;
use crate::query::builder::WmsSource;
use crate::query::orchestrator::{QueryOrchestrator, wire};
use crate::query::relay::HttpRelayClient;
use crate::render::TableRenderer;
use crate::traits::FeatureInfoSource;
use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub struct AppState {
    /// `None` when no layer is configured; clicks are then ignored.
    pub orchestrator: Option<QueryOrchestrator>,
    pub panel: SharedPanel,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: &Config, client: reqwest::Client) -> anyhow::Result<Self> {
        let panel = SharedPanel::new();
        let source = config
            .layer()?
            .map(|layer| Arc::new(WmsSource::from_config(&layer)) as Arc<dyn FeatureInfoSource>);
        let relay = Arc::new(HttpRelayClient::with_client(&config.relay()?, client)?);
        let orchestrator = wire(
            source,
            relay,
            Arc::new(panel.clone()),
            TableRenderer::new(config.columns),
        );
        Ok(Self {
            orchestrator,
            panel,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/click", get(click_handler))
        .route("/panel", get(panel_handler))
        .route("/state", get(state_handler))
        .with_state(state)
}

pub struct PanelServer {
    config: Config,
    state: AppState,
}

impl PanelServer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self { config, state })
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let layer = self
            .state
            .orchestrator
            .as_ref()
            .map(|o| o.layer_name().to_string());
        let app = router(Arc::new(self.state));
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, ?layer, "panel service listening");

        match layer {
            Some(layer) => println!(
                r#"
    🚀 FeatureYolo serving on {}

    🗺️ Querying layer {} at {} ({:?})
       through relay {}{}

    🖱️ Forward a click
       → http://{}/click?x={{x}}&y={{y}}&resolution={{res}}&projection=EPSG:3857

    📋 Live panel / state
       → http://{}/panel
       → http://{}/state
            "#,
                addr,
                layer,
                self.config.wms_base_url,
                self.config.wms_server_type,
                self.config.relay_origin,
                self.config.feature_info_endpoint,
                addr,
                addr,
                addr
            ),
            None => println!(
                "⚠️ No WMS layer configured, clicks are ignored.\n\n\
                Set --wms-base-url and --wms-layer (or WMS_BASE_URL / WMS_LAYER) \
                to enable feature info."
            ),
        }

        axum::serve(listener, app).await?;
        Ok(())
    }
}
