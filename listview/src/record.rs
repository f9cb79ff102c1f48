//! Dynamic entity record

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// Name of the identifier field every record must carry.
pub const ID_FIELD: &str = "id";

/// Separator between segments of a nested field path (`"company.name"`).
pub const PATH_SEPARATOR: char = '.';

/// Errors raised while turning raw JSON into records.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("record has no `id` field")]
    MissingId,
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A dynamic entity record.
///
/// Records hold their field values as a JSON object, which lets a single
/// list engine present journals, companies, banks or audit entries without
/// knowing their shape. The engine only ever reads records.
///
/// # Example
///
/// ```
/// use listview::record::Record;
///
/// let record = Record::new(7)
///     .set("code", "VT")
///     .set("company", serde_json::json!({ "name": "Contoso" }));
///
/// assert_eq!(record.id(), "7");
/// assert_eq!(record.get_path("company.name"), Some(&serde_json::json!("Contoso")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Creates a record holding only its identifier.
    pub fn new(id: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_FIELD.to_string(), id.into());
        Self { fields }
    }

    /// Builds a record from a JSON value.
    ///
    /// The value must be an object with a non-null `id` field.
    pub fn from_json(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(fields) => match fields.get(ID_FIELD) {
                None | Some(Value::Null) => Err(RecordError::MissingId),
                Some(_) => Ok(Self { fields }),
            },
            other => Err(RecordError::NotAnObject(kind_name(&other))),
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Returns the record identifier as a string key.
    ///
    /// Numeric ids are rendered in decimal so `7` and `"7"` select the same row.
    pub fn id(&self) -> String {
        match self.fields.get(ID_FIELD) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Returns the value of a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Walks a dot-separated path through nested objects.
    ///
    /// Numeric segments index into arrays (`"lines.0.amount"`). Returns `None`
    /// as soon as a segment is missing or the current value cannot be walked.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Returns `true` if the record contains the given top-level field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_json(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.fields)
    }
}

/// Parses a JSON array of records.
pub fn records_from_json(json: &str) -> Result<Vec<Record>, RecordError> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values.into_iter().map(Record::from_json).collect()
}

/// Formats a field value for display.
///
/// Returns `None` for values that should show the placeholder instead:
/// null, the empty string, and empty arrays or objects.
pub fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("Oui".to_string()),
        Value::Bool(false) => Some("Non".to_string()),
        // f64 Display drops the trailing ".0" and never uses exponents.
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f}"),
            _ => n.to_string(),
        }),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Object(map) if map.is_empty() => None,
        Value::Object(_) => Some(value.to_string()),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_numeric_and_string_ids_normalize() {
        assert_eq!(Record::new(42).id(), "42");
        assert_eq!(Record::new("JRN-01").id(), "JRN-01");
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        let err = Record::from_json(json!([1, 2])).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject("an array")));
    }

    #[test]
    fn test_from_json_requires_id() {
        let err = Record::from_json(json!({ "name": "x" })).unwrap_err();
        assert!(matches!(err, RecordError::MissingId));
        let err = Record::from_json(json!({ "id": null })).unwrap_err();
        assert!(matches!(err, RecordError::MissingId));
    }

    #[test]
    fn test_get_path_walks_objects_and_arrays() {
        let record = Record::new(1).set(
            "entry",
            json!({ "lines": [{ "amount": 10 }, { "amount": 25 }] }),
        );
        assert_eq!(record.get_path("entry.lines.1.amount"), Some(&json!(25)));
        assert_eq!(record.get_path("entry.lines.9.amount"), None);
        assert_eq!(record.get_path("entry.missing.amount"), None);
    }

    #[test]
    fn test_get_path_stops_at_scalars() {
        let record = Record::new(1).set("company", "Contoso");
        assert_eq!(record.get_path("company.name"), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!(null)), None);
        assert_eq!(display_value(&json!("")), None);
        assert_eq!(display_value(&json!([])), None);
        assert_eq!(display_value(&json!("EUR")), Some("EUR".to_string()));
        assert_eq!(display_value(&json!(12)), Some("12".to_string()));
        assert_eq!(display_value(&json!(1500.0)), Some("1500".to_string()));
        assert_eq!(display_value(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(
            display_value(&json!(1e20)),
            Some("100000000000000000000".to_string())
        );
        assert_eq!(display_value(&json!(-3.0)), Some("-3".to_string()));
        assert_eq!(display_value(&json!(true)), Some("Oui".to_string()));
        assert_eq!(display_value(&json!(["a", null, "b"])), Some("a, b".to_string()));
    }

    #[test]
    fn test_records_from_json() {
        let records = records_from_json(r#"[{"id": 1}, {"id": "b", "name": "Banque"}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id(), "b");

        assert!(records_from_json(r#"[{"name": "no id"}]"#).is_err());
        assert!(records_from_json("not json").is_err());
    }
}
