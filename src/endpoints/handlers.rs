use super::server::AppState;
use crate::geometry::Projection;
use crate::models::ClickEvent;
use crate::query::orchestrator::QueryState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ClickParams {
    x: f64,
    y: f64,
    resolution: f64,
    projection: Option<String>,
}

#[derive(Serialize)]
struct StateResponse {
    enabled: bool,
    #[serde(flatten)]
    state: QueryState,
}

/// Runs one click and answers with whatever the panel shows afterwards.
pub async fn click_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ClickParams>,
) -> impl IntoResponse {
    let Some(orchestrator) = &state.orchestrator else {
        return StatusCode::NO_CONTENT.into_response();
    };

    let projection = match params.projection.as_deref() {
        Some(code) => match code.parse::<Projection>() {
            Ok(projection) => projection,
            Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
        },
        None => Projection::WebMercator,
    };

    let click = ClickEvent::new((params.x, params.y), params.resolution, projection);
    orchestrator.handle_click(&click).await;

    Html(state.panel.html()).into_response()
}

pub async fn panel_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Html(state.panel.html())
}

pub async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = match &state.orchestrator {
        Some(orchestrator) => StateResponse {
            enabled: true,
            state: orchestrator.state(),
        },
        None => StateResponse {
            enabled: false,
            state: QueryState::Idle,
        },
    };
    (StatusCode::OK, Json(response))
}
