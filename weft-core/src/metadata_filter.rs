use serde::{Deserialize, Serialize};

use crate::Value;

/// Structured filter over document metadata.
///
/// The serde encoding of this enum is the wire format the self-query
/// strategy asks a model to emit, e.g. `{"Eq": ["genre", "drama"]}` or
/// `{"All": [{"Eq": ["genre", "drama"]}, {"Range": {"key": "year", "min": 2000, "max": null}}]}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum MetadataFilter {
    Eq(String, Value),
    In(String, Vec<Value>),
    Range {
        key: String,
        min: Option<Value>,
        max: Option<Value>,
    },
    All(Vec<MetadataFilter>),
    Any(Vec<MetadataFilter>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_filter_round_trips_through_its_wire_shape() {
        let filter = MetadataFilter::Eq("genre".to_string(), json!("drama"));
        let encoded = serde_json::to_value(&filter).unwrap();
        assert_eq!(encoded, json!({"Eq": ["genre", "drama"]}));

        let decoded: MetadataFilter = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, filter);
    }

    #[test]
    fn composite_filter_parses_from_documented_wire_form() {
        let wire = json!({
            "All": [
                {"Eq": ["genre", "drama"]},
                {"Range": {"key": "year", "min": 2000, "max": null}}
            ]
        });
        let decoded: MetadataFilter = serde_json::from_value(wire).unwrap();
        assert_eq!(
            decoded,
            MetadataFilter::All(vec![
                MetadataFilter::Eq("genre".to_string(), json!("drama")),
                MetadataFilter::Range {
                    key: "year".to_string(),
                    min: Some(json!(2000)),
                    max: None,
                },
            ])
        );
    }
}
