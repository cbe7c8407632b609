use crate::models::{Feature, ProxyPayload};
use serde_json::Value;

/// Decides which shape a successful relay body has. First match wins:
/// a truthy `features` member, then a string `raw` member, then anything else.
pub fn classify(body: Value) -> ProxyPayload {
    let mut map = match body {
        Value::Object(map) => map,
        other => return ProxyPayload::OpaqueJson(other),
    };

    if map.get("features").is_some_and(is_truthy) {
        let features = map.remove("features").unwrap_or_default();
        return ProxyPayload::FeatureCollection {
            features: parse_features(features),
        };
    }

    match map.get("raw") {
        Some(Value::String(_)) => {
            let raw = match map.remove("raw") {
                Some(Value::String(raw)) => raw,
                _ => String::new(),
            };
            let content_type = map
                .get("content_type")
                .and_then(Value::as_str)
                .map(str::to_string);
            ProxyPayload::RawText { raw, content_type }
        }
        _ => ProxyPayload::OpaqueJson(Value::Object(map)),
    }
}

/// `null`, `false`, zero and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_features(features: Value) -> Vec<Feature> {
    let Value::Array(items) = features else {
        return Vec::new();
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(mut feature) => match feature.remove("properties") {
                Some(Value::Object(properties)) => Feature { properties },
                _ => Feature::default(),
            },
            _ => Feature::default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_features_win_over_raw() {
        let payload = classify(json!({"features": [], "raw": "ignored"}));
        assert_eq!(payload, ProxyPayload::FeatureCollection { features: vec![] });
    }

    #[test]
    fn test_feature_properties_keep_order() {
        let payload = classify(json!({"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": "states.1", "properties": {"z": 1, "a": 2}},
        ]}));
        let ProxyPayload::FeatureCollection { features } = payload else {
            panic!("expected a feature collection");
        };
        assert_eq!(features.len(), 1);
        let keys: Vec<&String> = features[0].properties.keys().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_non_array_features_is_an_empty_collection() {
        let payload = classify(json!({"features": "nope"}));
        assert_eq!(payload, ProxyPayload::FeatureCollection { features: vec![] });
    }

    #[test]
    fn test_null_features_falls_through() {
        let payload = classify(json!({"features": null, "raw": "text"}));
        assert_eq!(
            payload,
            ProxyPayload::RawText {
                raw: "text".to_string(),
                content_type: None
            }
        );
    }

    #[test]
    fn test_falsy_features_fall_through() {
        for features in [json!(false), json!(0), json!(0.0), json!("")] {
            let payload = classify(json!({"features": features.clone(), "raw": "x"}));
            assert_eq!(
                payload,
                ProxyPayload::RawText {
                    raw: "x".to_string(),
                    content_type: None
                },
                "features = {}",
                features
            );
        }

        let body = json!({"features": false, "b": 1});
        assert_eq!(classify(body.clone()), ProxyPayload::OpaqueJson(body));
    }

    #[test]
    fn test_truthy_non_array_features_is_an_empty_collection() {
        for features in [json!(true), json!(1), json!("x"), json!({})] {
            assert_eq!(
                classify(json!({"features": features, "raw": "x"})),
                ProxyPayload::FeatureCollection { features: vec![] }
            );
        }
    }

    #[test]
    fn test_raw_text_carries_content_type() {
        let payload = classify(json!({"raw": "<p>hi</p>", "content_type": "text/html"}));
        assert_eq!(
            payload,
            ProxyPayload::RawText {
                raw: "<p>hi</p>".to_string(),
                content_type: Some("text/html".to_string())
            }
        );
    }

    #[test]
    fn test_opaque_body_is_kept_whole() {
        let body = json!({"features": null, "b": 1, "a": 2});
        assert_eq!(classify(body.clone()), ProxyPayload::OpaqueJson(body));
    }

    #[test]
    fn test_non_string_raw_is_opaque() {
        let body = json!({"raw": 12});
        assert_eq!(classify(body.clone()), ProxyPayload::OpaqueJson(body));
    }

    #[test]
    fn test_non_object_bodies_are_opaque() {
        assert_eq!(classify(json!([1, 2])), ProxyPayload::OpaqueJson(json!([1, 2])));
        assert_eq!(classify(json!("text")), ProxyPayload::OpaqueJson(json!("text")));
    }

    #[test]
    fn test_features_without_properties_are_blank() {
        let payload = classify(json!({"features": [{"geometry": null}, 5]}));
        assert_eq!(
            payload,
            ProxyPayload::FeatureCollection {
                features: vec![Feature::default(), Feature::default()]
            }
        );
    }
}
