use super::escape::value_to_text;
use super::html::{ColumnStrategy, NO_FEATURE_MESSAGE, NO_PROPERTIES_MESSAGE};
use crate::models::ProxyPayload;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Plain-text rendering of a payload for the terminal. Nothing is escaped
/// here since the output never reaches a browser.
pub fn payload_to_terminal(payload: &ProxyPayload, columns: ColumnStrategy) -> String {
    match payload {
        ProxyPayload::FeatureCollection { features } => {
            if features.is_empty() {
                return NO_FEATURE_MESSAGE.to_string();
            }
            let keys = columns.columns(features);
            if keys.is_empty() {
                return NO_PROPERTIES_MESSAGE.to_string();
            }

            let mut table = Table::new();
            table
                .set_header(
                    keys.iter()
                        .map(|k| {
                            Cell::new(k)
                                .add_attribute(Attribute::Bold)
                                .set_alignment(CellAlignment::Center)
                        })
                        .collect::<Vec<_>>(),
                )
                .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

            for feature in features {
                table.add_row(
                    keys.iter()
                        .map(|k| Cell::new(feature.property(k).map(value_to_text).unwrap_or_default()))
                        .collect::<Vec<_>>(),
                );
            }
            table.to_string()
        }
        ProxyPayload::RawText { raw, content_type } => match content_type {
            Some(ct) => format!("({})\n{}", ct, raw),
            None => raw.clone(),
        },
        ProxyPayload::OpaqueJson(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    }
}
