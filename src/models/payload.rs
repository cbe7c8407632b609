use serde_json::{Map, Value};

/// What the relay answered with, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub ok: bool,
    pub status: u16,
    pub body: Value,
}

impl RelayResponse {
    /// The relay's `error` message for a rejected call, when it sent one.
    pub fn error_message(&self) -> Option<&str> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// The shapes a successful relay body can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyPayload {
    FeatureCollection { features: Vec<Feature> },
    RawText { raw: String, content_type: Option<String> },
    OpaqueJson(Value),
}
