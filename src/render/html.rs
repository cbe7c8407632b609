use super::escape::{escape_html, escape_value};
use crate::models::{Feature, ProxyPayload};
use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Write;

pub const NO_FEATURE_MESSAGE: &str = "No feature found. Try clicking directly on the WMS layer.";
pub const NO_PROPERTIES_MESSAGE: &str = "No properties in response.";
pub const NO_QUERY_MESSAGE: &str = "No feature-info query available for this location.";
pub const LOADING_MESSAGE: &str = "Loading…";
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// How the table's columns are derived from a feature collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
pub enum ColumnStrategy {
    /// Keys of the first feature only; later features are assumed to share them.
    #[default]
    First,
    /// Union of keys over all features, in order of first appearance.
    Union,
}

impl ColumnStrategy {
    pub fn columns(&self, features: &[Feature]) -> Vec<String> {
        match self {
            ColumnStrategy::First => features
                .first()
                .map(|f| f.properties.keys().cloned().collect())
                .unwrap_or_default(),
            ColumnStrategy::Union => {
                let mut columns: Vec<String> = Vec::new();
                for key in features.iter().flat_map(|f| f.properties.keys()) {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
                columns
            }
        }
    }
}

/// `<div class="muted">` line with already-safe text.
fn muted(html: &str) -> String {
    format!(r#"<div class="muted">{}</div>"#, html)
}

pub fn loading_html() -> String {
    muted(LOADING_MESSAGE)
}

pub fn no_query_html() -> String {
    muted(NO_QUERY_MESSAGE)
}

pub fn error_html(message: &str) -> String {
    muted(&format!("Error: {}", escape_html(message)))
}

fn pre(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}

/// Turns a classified relay payload into the panel's HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    pub columns: ColumnStrategy,
}

impl TableRenderer {
    pub fn new(columns: ColumnStrategy) -> Self {
        Self { columns }
    }

    pub fn render(&self, payload: &ProxyPayload) -> String {
        match payload {
            ProxyPayload::FeatureCollection { features } => self.render_features(features),
            ProxyPayload::RawText { raw, .. } => pre(raw),
            ProxyPayload::OpaqueJson(value) => {
                // Value's Serialize impl cannot fail
                let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
                pre(&pretty)
            }
        }
    }

    fn render_features(&self, features: &[Feature]) -> String {
        if features.is_empty() {
            return muted(NO_FEATURE_MESSAGE);
        }

        let keys = self.columns.columns(features);
        if keys.is_empty() {
            return muted(NO_PROPERTIES_MESSAGE);
        }

        let mut html = String::from(r#"<table class="table"><thead><tr>"#);
        for key in &keys {
            let _ = write!(html, "<th>{}</th>", escape_html(key));
        }
        html.push_str("</tr></thead><tbody>");

        for feature in features {
            html.push_str("<tr>");
            for key in &keys {
                let cell = feature.property(key).map(escape_value).unwrap_or_default();
                let _ = write!(html, "<td>{}</td>", cell);
            }
            html.push_str("</tr>");
        }

        html.push_str("</tbody></table>");
        html
    }
}
