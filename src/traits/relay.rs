use crate::error::RelayError;
use crate::models::RelayResponse;
use async_trait::async_trait;

/// Same-origin relay forwarding a feature-info query to the remote map service.
#[async_trait]
pub trait RelayClient: Send + Sync {
    async fn fetch(&self, query_url: &str) -> Result<RelayResponse, RelayError>;
}
