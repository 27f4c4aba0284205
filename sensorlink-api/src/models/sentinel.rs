//! Serde adapter for text fields that may be absent.
//!
//! Absent values travel on the wire as `"-"`, which is what the sensor
//! dashboards render for a missing measurement.

use serde::{Deserialize, Deserializer, Serializer};

pub const SENTINEL: &str = "-";

pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_deref().unwrap_or(SENTINEL))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;

    Ok(value.filter(|text| text != SENTINEL))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Field {
        #[serde(default, with = "super")]
        value: Option<String>,
    }

    #[test]
    fn test_absent_is_written_as_sentinel() {
        let field = Field { value: None };

        assert_eq!(serde_json::to_value(&field).unwrap(), json!({ "value": "-" }));
    }

    #[test]
    fn test_sentinel_and_null_read_as_absent() {
        let from_sentinel: Field = serde_json::from_value(json!({ "value": "-" })).unwrap();
        let from_null: Field = serde_json::from_value(json!({ "value": null })).unwrap();
        let from_missing: Field = serde_json::from_value(json!({})).unwrap();

        assert_eq!(from_sentinel.value, None);
        assert_eq!(from_null.value, None);
        assert_eq!(from_missing.value, None);
    }

    #[test]
    fn test_present_value_is_kept() {
        let field: Field = serde_json::from_value(json!({ "value": "25.5" })).unwrap();

        assert_eq!(field.value.as_deref(), Some("25.5"));
    }
}
