//! Click handling: builds the query, calls the relay and drives the panel
//! through `Loading` into `Rendered` or `Failed`.
//!
//! Clicks may overlap. Every click takes the next sequence number and a
//! relay answer is only shown when no newer click was issued in the
//! meantime, so the panel always ends up reflecting the latest click.

use super::builder::RequestBuilder;
use super::classify::classify;
use crate::error::QueryError;
use crate::models::{ClickEvent, ProxyPayload};
use crate::render::TableRenderer;
use crate::render::html::{GENERIC_FAILURE_MESSAGE, error_html, loading_html, no_query_html};
use crate::traits::{FeatureInfoSource, Panel, RelayClient};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum QueryState {
    Idle,
    Loading { sequence: u64 },
    Rendered { sequence: u64 },
    Failed { sequence: u64, message: String },
}

impl QueryState {
    pub fn sequence(&self) -> u64 {
        match self {
            QueryState::Idle => 0,
            QueryState::Loading { sequence }
            | QueryState::Rendered { sequence }
            | QueryState::Failed { sequence, .. } => *sequence,
        }
    }
}

/// What became of one click.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Rendered(ProxyPayload),
    Failed(QueryError),
    /// A newer click was issued before this one's answer arrived.
    Superseded,
}

pub struct QueryOrchestrator {
    builder: RequestBuilder,
    relay: Arc<dyn RelayClient>,
    panel: Arc<dyn Panel>,
    renderer: TableRenderer,
    latest: AtomicU64,
    state: Mutex<QueryState>,
}

impl QueryOrchestrator {
    pub fn new(
        source: Arc<dyn FeatureInfoSource>,
        relay: Arc<dyn RelayClient>,
        panel: Arc<dyn Panel>,
        renderer: TableRenderer,
    ) -> Self {
        Self {
            builder: RequestBuilder::new(source),
            relay,
            panel,
            renderer,
            latest: AtomicU64::new(0),
            state: Mutex::new(QueryState::Idle),
        }
    }

    pub fn state(&self) -> QueryState {
        match self.state.lock() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn layer_name(&self) -> &str {
        self.builder.layer_name()
    }

    pub async fn handle_click(&self, click: &ClickEvent) -> ClickOutcome {
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(request) = self.builder.build(click) else {
            debug!(sequence, ?click, "no feature-info query for click");
            self.transition(
                QueryState::Failed {
                    sequence,
                    message: QueryError::NoQuery.to_string(),
                },
                no_query_html(),
            );
            return ClickOutcome::Failed(QueryError::NoQuery);
        };

        self.transition(QueryState::Loading { sequence }, loading_html());
        info!(sequence, url = %request.url, "querying feature info");

        let result = self.relay.fetch(request.as_str()).await;

        if self.latest.load(Ordering::SeqCst) != sequence {
            debug!(sequence, "dropping stale feature-info answer");
            return ClickOutcome::Superseded;
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!(sequence, error = %err, "relay call failed");
                return self.fail(sequence, QueryError::from(err));
            }
        };

        if !response.ok {
            let message = response
                .error_message()
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string();
            warn!(sequence, status = response.status, %message, "relay rejected query");
            return self.fail(sequence, QueryError::Rejected(message));
        }

        let payload = classify(response.body);
        let html = self.renderer.render(&payload);
        self.transition(QueryState::Rendered { sequence }, html);
        ClickOutcome::Rendered(payload)
    }

    fn fail(&self, sequence: u64, error: QueryError) -> ClickOutcome {
        let message = error.to_string();
        self.transition(
            QueryState::Failed {
                sequence,
                message: message.clone(),
            },
            error_html(&message),
        );
        ClickOutcome::Failed(error)
    }

    /// One state change, one panel write.
    fn transition(&self, next: QueryState, html: String) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Checked under the lock so a stale writer cannot slip in after a newer one
        if next.sequence() != self.latest.load(Ordering::SeqCst) {
            return;
        }
        *state = next;
        self.panel.replace(html);
    }
}

/// Builds the orchestrator only when a layer is configured; without one,
/// clicks are ignored.
pub fn wire(
    source: Option<Arc<dyn FeatureInfoSource>>,
    relay: Arc<dyn RelayClient>,
    panel: Arc<dyn Panel>,
    renderer: TableRenderer,
) -> Option<QueryOrchestrator> {
    match source {
        Some(source) => Some(QueryOrchestrator::new(source, relay, panel, renderer)),
        None => {
            info!("no layer configured, feature info disabled");
            None
        }
    }
}
