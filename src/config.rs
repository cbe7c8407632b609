use crate::render::ColumnStrategy;
use clap::{Args, ValueEnum};
use reqwest::Url;
use serde::Serialize;

pub const DEFAULT_WMS_BASE_URL: &str = "http://localhost:8080/geoserver/wms";
pub const DEFAULT_WMS_LAYER: &str = "topp:states";
pub const DEFAULT_RELAY_ORIGIN: &str = "http://127.0.0.1:5000";
pub const DEFAULT_FEATURE_INFO_ENDPOINT: &str = "/api/feature-info";

/// Flavour of the WMS server behind the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ServerType {
    Geoserver,
    Mapserver,
    Qgis,
    Carmenta,
}

/// The queryable layer. Its absence disables the feature.
#[derive(Debug, Clone)]
pub struct LayerConfig {
    pub base_url: Url,
    pub layer: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub origin: Url,
    pub feature_info_endpoint: String,
    /// Sent as the `Cookie` header, standing in for browser credentials.
    pub session_cookie: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct Config {
    /// WMS endpoint of the queryable layer; empty disables feature info
    #[arg(long, env = "WMS_BASE_URL", default_value = DEFAULT_WMS_BASE_URL)]
    pub wms_base_url: String,

    /// Layer name sent as LAYERS and QUERY_LAYERS; empty disables feature info
    #[arg(long, env = "WMS_LAYER", default_value = DEFAULT_WMS_LAYER)]
    pub wms_layer: String,

    #[arg(long, env = "WMS_SERVER_TYPE", value_enum, default_value = "geoserver")]
    pub wms_server_type: ServerType,

    /// Origin hosting the relay
    #[arg(long, env = "RELAY_ORIGIN", default_value = DEFAULT_RELAY_ORIGIN)]
    pub relay_origin: String,

    #[arg(long, env = "FEATURE_INFO_ENDPOINT", default_value = DEFAULT_FEATURE_INFO_ENDPOINT)]
    pub feature_info_endpoint: String,

    #[arg(long, env = "RELAY_SESSION_COOKIE")]
    pub session_cookie: Option<String>,

    /// How table columns are derived from the returned features
    #[arg(long, value_enum, default_value = "first")]
    pub columns: ColumnStrategy,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wms_base_url: DEFAULT_WMS_BASE_URL.to_string(),
            wms_layer: DEFAULT_WMS_LAYER.to_string(),
            wms_server_type: ServerType::Geoserver,
            relay_origin: DEFAULT_RELAY_ORIGIN.to_string(),
            feature_info_endpoint: DEFAULT_FEATURE_INFO_ENDPOINT.to_string(),
            session_cookie: None,
            columns: ColumnStrategy::First,
            port: 8000,
        }
    }
}

impl Config {
    /// `Ok(None)` when the layer is not configured.
    pub fn layer(&self) -> anyhow::Result<Option<LayerConfig>> {
        let base_url = self.wms_base_url.trim();
        let layer = self.wms_layer.trim();
        if base_url.is_empty() || layer.is_empty() {
            return Ok(None);
        }

        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid WMS base URL '{}': {}", base_url, e))?;
        Ok(Some(LayerConfig {
            base_url,
            layer: layer.to_string(),
        }))
    }

    pub fn relay(&self) -> anyhow::Result<RelayConfig> {
        let origin = Url::parse(self.relay_origin.trim())
            .map_err(|e| anyhow::anyhow!("Invalid relay origin '{}': {}", self.relay_origin, e))?;
        Ok(RelayConfig {
            origin,
            feature_info_endpoint: self.feature_info_endpoint.clone(),
            session_cookie: self.session_cookie.clone().filter(|c| !c.is_empty()),
        })
    }
}
