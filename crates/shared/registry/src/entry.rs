use config::{ConfigError, Map, Value, ValueKind};
use serde::de::DeserializeOwned;
use std::fmt::{self, Write as _};

/// Name of the discriminator field every entry must carry.
pub const TYPE_FIELD: &str = "type";

/// The raw sub-tree of one `inputs.<id>` or `outputs.<id>` entry.
///
/// Factories read it through the typed accessors below; every coercion failure
/// comes back as a [`ConfigError`] and is recorded against the entry id.
#[derive(Debug, Clone)]
pub struct EntryConfig {
    id: String,
    table: Map<String, Value>,
}

impl EntryConfig {
    pub fn new(id: impl Into<String>, table: Map<String, Value>) -> Self {
        Self { id: id.into(), table }
    }

    /// The mapping key of this entry.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `type` discriminator. `Ok(None)` when absent or empty.
    ///
    /// # Errors
    /// Returns the coercion error when `type` is present but not a string.
    pub fn type_name(&self) -> Result<Option<String>, ConfigError> {
        self.table.get(TYPE_FIELD).map_or(Ok(None), |value| {
            value.clone().into_string().map(|name| Some(name).filter(|n| !n.is_empty()))
        })
    }

    /// Reads a required string field.
    ///
    /// # Errors
    /// [`ConfigError::NotFound`] when absent, a type error when not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.table
            .get(key)
            .ok_or_else(|| ConfigError::NotFound(key.to_owned()))?
            .clone()
            .into_string()
    }

    /// Reads an optional field and deserializes it into `T`.
    ///
    /// # Errors
    /// Returns the deserialization error if the field exists but does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.table.get(key).map(|value| value.clone().try_deserialize::<T>()).transpose()
    }

    /// Deserializes the whole entry (including `type`) into `T`.
    ///
    /// # Errors
    /// Returns the deserialization error (missing fields, wrong types).
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        Value::from(self.table.clone()).try_deserialize::<T>()
    }
}

/// Renders as `{key = value, ...}` with sorted keys and quoted strings.
impl fmt::Display for EntryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        render_table(&self.table, &mut out)?;
        f.write_str(&out)
    }
}

fn render_table(table: &Map<String, Value>, out: &mut String) -> fmt::Result {
    let mut keys: Vec<&String> = table.keys().collect();
    keys.sort();

    out.push('{');
    for (index, key) in keys.into_iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write!(out, "{key} = ")?;
        if let Some(value) = table.get(key) {
            render_value(value, out)?;
        }
    }
    out.push('}');
    Ok(())
}

fn render_value(value: &Value, out: &mut String) -> fmt::Result {
    match &value.kind {
        ValueKind::Nil => out.push_str("null"),
        ValueKind::String(s) => write!(out, "{s:?}")?,
        ValueKind::Table(table) => render_table(table, out)?,
        ValueKind::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                render_value(item, out)?;
            }
            out.push(']');
        },
        _ => write!(out, "{value}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pairs: &[(&str, Value)]) -> EntryConfig {
        let table = pairs.iter().map(|(k, v)| ((*k).to_owned(), v.clone())).collect();
        EntryConfig::new("a", table)
    }

    #[test]
    fn type_name_treats_empty_as_missing() {
        assert_eq!(entry(&[]).type_name().unwrap(), None);
        assert_eq!(entry(&[("type", Value::from(""))]).type_name().unwrap(), None);
        assert_eq!(entry(&[("type", Value::from("file"))]).type_name().unwrap().as_deref(), Some("file"));
    }

    #[test]
    fn type_name_rejects_tables() {
        let nested: Map<String, Value> = Map::new();
        assert!(entry(&[("type", Value::from(nested))]).type_name().is_err());
    }

    #[test]
    fn renders_sorted_and_quoted() {
        let rendered = entry(&[("type", Value::from("")), ("path", Value::from("/x"))]).to_string();
        assert_eq!(rendered, r#"{path = "/x", type = ""}"#);
    }

    #[test]
    fn renders_nested_values() {
        let tags = vec![Value::from("a"), Value::from("b")];
        let rendered = entry(&[("tags", Value::from(tags))]).to_string();
        assert_eq!(rendered, r#"{tags = ["a", "b"]}"#);
    }

    #[test]
    fn get_string_reports_missing_fields() {
        let err = entry(&[]).get_string("path").unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(ref key) if key == "path"));
    }

    #[test]
    fn get_deserializes_optional_fields() {
        let e = entry(&[("interval", Value::from(250_i64))]);
        assert_eq!(e.get::<u64>("interval").unwrap(), Some(250));
        assert_eq!(e.get::<u64>("missing").unwrap(), None);
    }
}
