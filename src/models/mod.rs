//! Backend wire shapes and their conversions into domain types.
//!
//! Responses from the backend are not consistent about field names or value
//! types, so every response model accepts the English and Spanish spellings
//! and tolerates numbers where strings are expected.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub mod account;
pub mod address;
pub mod auth;
pub mod config;
pub mod employee;
pub mod package;

/// Deserializes strings, numbers and booleans into a `String`; `null` or a
/// missing value becomes an empty string.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}

/// Like [`lenient_string`] but blank values become `None`.
pub(crate) fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = lenient_string(deserializer)?;
    let trimmed = text.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Accepts integer ids sent either as numbers or numeric strings.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_i64()
            .ok_or_else(|| serde::de::Error::custom("id is not an integer")),
        Some(Value::String(text)) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id `{text}`"))),
        Some(other) => Err(serde::de::Error::custom(format!("invalid id `{other}`"))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_string")]
        text: String,
        #[serde(default, deserialize_with = "lenient_optional_string")]
        optional: Option<String>,
        #[serde(default, deserialize_with = "lenient_i64")]
        id: i64,
    }

    #[test]
    fn lenient_fields_accept_mixed_types() {
        let probe: Probe =
            serde_json::from_str(r#"{"text": 12, "optional": "  ", "id": "7"}"#).unwrap();
        assert_eq!(probe.text, "12");
        assert_eq!(probe.optional, None);
        assert_eq!(probe.id, 7);

        let probe: Probe = serde_json::from_str(r#"{"text": null, "id": 3}"#).unwrap();
        assert_eq!(probe.text, "");
        assert_eq!(probe.id, 3);
    }

    #[test]
    fn lenient_id_rejects_garbage() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": "abc"}"#).is_err());
    }
}
