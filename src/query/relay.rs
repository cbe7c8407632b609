use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::models::RelayResponse;
use crate::traits::RelayClient;
use async_trait::async_trait;
use reqwest::{Url, header};
use tracing::debug;

/// Calls the relay over HTTP: `GET <endpoint>?url=<query>`.
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: Url,
    session_cookie: Option<String>,
}

impl HttpRelayClient {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: &RelayConfig, client: reqwest::Client) -> Result<Self, RelayError> {
        let endpoint = config
            .origin
            .join(&config.feature_info_endpoint)
            .map_err(|e| RelayError::Url(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            session_cookie: config.session_cookie.clone(),
        })
    }

    fn relay_url(&self, query_url: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", query_url);
        url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn fetch(&self, query_url: &str) -> Result<RelayResponse, RelayError> {
        let url = self.relay_url(query_url);
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(header::COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "relay answered");

        // A body that is not JSON is a transport failure even on error statuses
        let body = serde_json::from_slice(&bytes)?;

        Ok(RelayResponse {
            ok: status.is_success(),
            status: status.as_u16(),
            body,
        })
    }
}
