use reqwest::Url;

/// Response format requested from the feature-info capability.
pub const INFO_FORMAT: &str = "application/json";
/// Upper bound on features returned per click.
pub const FEATURE_COUNT: u32 = 10;

/// A fully formed WMS GetFeatureInfo query, built fresh for every click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureInfoRequest {
    pub url: Url,
}

impl FeatureInfoRequest {
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}
