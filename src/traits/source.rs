use crate::models::ClickEvent;
use reqwest::Url;

/// Extra parameters a caller fixes on every feature-info query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureInfoParams<'a> {
    pub info_format: &'a str,
    pub feature_count: u32,
}

/// A map layer able to describe what lies under a click.
pub trait FeatureInfoSource: Send + Sync {
    fn layer_name(&self) -> &str;

    /// `None` when the layer cannot be queried for this view state.
    fn feature_info_url(&self, click: &ClickEvent, params: FeatureInfoParams<'_>) -> Option<Url>;
}
