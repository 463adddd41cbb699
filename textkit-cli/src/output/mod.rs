//! Output formatting module

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// One result row: an excerpt, entity, date or statistic from one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Input file the record came from
    pub source: String,
    /// Where in the file, e.g. `page 2, tokens 14-31`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub text: String,
    /// Extra named values, such as a resolved date or a score
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            location: None,
            text: text.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the location label
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Add a named value
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Display form of a field value: strings unquoted, everything else as JSON
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single record
    fn format_record(&mut self, record: &Record) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new("a.txt", "the doctor")
            .at("page 1")
            .field("count", 2usize)
            .field("date", "2011-09-30");
        assert_eq!(record.location.as_deref(), Some("page 1"));
        assert_eq!(display_value(&record.fields["count"]), "2");
        assert_eq!(display_value(&record.fields["date"]), "2011-09-30");
    }

    #[test]
    fn test_record_json_skips_empty() {
        let json = serde_json::to_string(&Record::new("a.txt", "x")).unwrap();
        assert_eq!(json, r#"{"source":"a.txt","text":"x"}"#);
    }
}
