use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar bound as a query parameter or decoded from a result row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Json(serde_json::Value),
    Null,
}

impl Value {
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::String(v) => Some(v.clone()),
            Value::Boolean(v) => Some(v.to_string()),
            Value::Date(v) => Some(v.to_string()),
            Value::Timestamp(v) => Some(v.format("%Y-%m-%d %H:%M:%S").to_string()),
            Value::Json(v) => v.as_str().map(|s| s.to_string()),
            Value::Null => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Int(v) => Some(*v != 0),
            Value::Float(v) => Some(*v != 0.0),
            Value::String(v) => match v.to_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Boolean(v) => Some(*v),
            Value::Json(v) => v.as_bool(),
            Value::Date(_) | Value::Timestamp(_) | Value::Null => None,
        }
    }

    /// JSON representation used when rows or parameters leave the process.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::String(v) => serde_json::Value::from(v.as_str()),
            Value::Boolean(v) => serde_json::Value::from(*v),
            Value::Date(_) | Value::Timestamp(_) => self
                .as_string()
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
            Value::Json(v) => v.clone(),
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// Renders the value as an SQL literal. Only used for inlined debug output;
/// queries sent to a database always bind values as parameters.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "'{v}'"),
            Value::Timestamp(v) => write!(f, "'{}'", v.format("%Y-%m-%d %H:%M:%S")),
            Value::Json(v) => write!(f, "'{}'", v.to_string().replace('\'', "''")),
            Value::Null => write!(f, "NULL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    pub name: String,
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_escapes_quotes() {
        let value = Value::String("O'Brien".to_string());
        assert_eq!(value.to_string(), "'O''Brien'");
    }

    #[test]
    fn test_display_temporal() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        assert_eq!(Value::Date(date).to_string(), "'2023-01-01'");

        let ts = date.and_hms_opt(23, 59, 59).unwrap();
        assert_eq!(Value::Timestamp(ts).to_string(), "'2023-01-01 23:59:59'");
    }

    #[test]
    fn test_as_bool_coercion() {
        assert_eq!(Value::String("TRUE".into()).as_bool(), Some(true));
        assert_eq!(Value::String("0".into()).as_bool(), Some(false));
        assert_eq!(Value::String("yes".into()).as_bool(), None);
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Int(7).to_json(), serde_json::json!(7));
        assert_eq!(Value::Null.to_json(), serde_json::Value::Null);
    }
}
