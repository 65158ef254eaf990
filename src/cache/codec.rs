//! Flat string-map codec for hash-style cache entries.
//!
//! The key-value store's hash shape holds strings only. Encoding flattens a
//! record into string fields; decoding rebuilds types per field with a
//! best-effort heuristic: integer parse, then float parse, then bool
//! literal, then plain string. The heuristic is deliberately lossy (a
//! string field that looks numeric comes back as a number) and is kept
//! as-is for compatibility with entries written by existing deployments;
//! every string-typed record field opts into [`string_or_number`] or
//! [`opt_string_or_number`] to accept the retyped reconstruction back.
//!
//! Whole records and lists are stored as JSON blobs instead and never pass
//! through this codec; only the incrementally-updated `User` entry does.

use std::collections::HashMap;

use anyhow::{Context, bail};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Flatten a record into hash fields.
///
/// `None` fields are skipped entirely (they stay absent in the hash), bools
/// become `"true"`/`"false"`, numbers their decimal text. Nested values are
/// rejected; cached entities are flat.
pub fn encode_hash<T: Serialize>(record: &T) -> anyhow::Result<Vec<(String, String)>> {
    let value = serde_json::to_value(record).context("record is not serializable")?;
    let Value::Object(object) = value else {
        bail!("hash encoding requires a struct record");
    };

    let mut fields = Vec::with_capacity(object.len());
    for (name, value) in object {
        match value {
            Value::Null => {}
            Value::Bool(b) => fields.push((name, b.to_string())),
            Value::Number(n) => fields.push((name, n.to_string())),
            Value::String(s) => fields.push((name, s)),
            Value::Array(_) | Value::Object(_) => {
                bail!("field '{name}' is nested; hash entries must be flat")
            }
        }
    }
    Ok(fields)
}

/// Rebuild a record from hash fields via the type heuristic.
pub fn decode_hash<T: DeserializeOwned>(fields: &HashMap<String, String>) -> anyhow::Result<T> {
    let mut object = Map::with_capacity(fields.len());
    for (name, raw) in fields {
        object.insert(name.clone(), coerce(raw));
    }
    serde_json::from_value(Value::Object(object)).context("hash entry does not match record shape")
}

/// Best-effort typing of a raw hash field: int, then float, then bool,
/// then string.
fn coerce(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

/// Deserializer for `Option<String>` fields that the decode heuristic may
/// have retyped (a study group named "2024" comes back as a number, a
/// last name of "True" lowercased upstream as a bool).
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string, number or bool, got {other}"
        ))),
    }
}

/// Like [`opt_string_or_number`], for required `String` fields.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string, number or bool, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn sample_user() -> User {
        User {
            id: 1,
            telegram_id: 123456,
            username: "alice".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            full_name: Some("Alice Smith".to_string()),
            is_student: Some(true),
            group: Some("ИКБО-01-21".to_string()),
            last_active: Some(1_700_000_000),
        }
    }

    #[test]
    fn coerce_tries_int_then_float_then_bool_then_string() {
        assert_eq!(coerce("42"), Value::from(42));
        assert_eq!(coerce("-7"), Value::from(-7));
        assert_eq!(coerce("3.5"), Value::from(3.5));
        assert_eq!(coerce("true"), Value::Bool(true));
        assert_eq!(coerce("false"), Value::Bool(false));
        assert_eq!(coerce("alice"), Value::String("alice".to_string()));
        assert_eq!(coerce(""), Value::String(String::new()));
    }

    #[test]
    fn encode_skips_absent_fields() {
        let mut user = sample_user();
        user.last_name = None;
        user.group = None;

        let fields = encode_hash(&user).unwrap();
        assert!(fields.iter().all(|(name, _)| name != "last_name"));
        assert!(fields.iter().all(|(name, _)| name != "group"));
        assert!(fields.iter().any(|(name, v)| name == "is_student" && v == "true"));
        assert!(fields.iter().any(|(name, v)| name == "telegram_id" && v == "123456"));
    }

    #[test]
    fn hash_round_trip_preserves_user() {
        let user = sample_user();
        let fields: HashMap<String, String> = encode_hash(&user).unwrap().into_iter().collect();
        let decoded: User = decode_hash(&fields).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn numeric_looking_group_survives_round_trip() {
        let mut user = sample_user();
        user.group = Some("2024".to_string());

        let fields: HashMap<String, String> = encode_hash(&user).unwrap().into_iter().collect();
        // The heuristic types this field as an integer on the way back.
        assert_eq!(coerce(&fields["group"]), Value::from(2024));

        let decoded: User = decode_hash(&fields).unwrap();
        assert_eq!(decoded.group.as_deref(), Some("2024"));
    }

    #[test]
    fn retyped_name_fields_survive_round_trip() {
        let mut user = sample_user();
        user.username = "true".to_string();
        user.first_name = Some("2024".to_string());
        user.last_name = Some("false".to_string());
        user.full_name = Some("7.5".to_string());

        let fields: HashMap<String, String> = encode_hash(&user).unwrap().into_iter().collect();
        let decoded: User = decode_hash(&fields).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn decode_rejects_mismatched_shape() {
        let mut fields = HashMap::new();
        fields.insert("id".to_string(), "not-a-number".to_string());
        assert!(decode_hash::<User>(&fields).is_err());
    }
}
