//! Core data models: field values, records, and the corpus snapshot.
//!
//! A [`Record`] is one row pulled from some source table, flattened into
//! an ordered list of named [`Field`]s and tagged with its provenance
//! (`source_database`, `source_table`, `source_description`). A [`Corpus`]
//! is the read-only snapshot of all records for one session.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single column value.
///
/// The variant set is closed; every value knows how to render itself to
/// the text used for matching.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Null,
}

impl FieldValue {
    /// Render the value as matching text. `Null` renders to `""`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Real(r) => write!(f, "{}", r),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(r: f64) -> Self {
        FieldValue::Real(r)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// A named column value within a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
}

/// One materialized row plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Column values in source order.
    pub fields: Vec<Field>,
    /// Database the row was read from.
    pub source_database: String,
    /// Table the row was read from.
    pub source_table: String,
    /// Free-form table description; may be empty.
    pub source_description: String,
}

impl Record {
    pub fn builder(database: &str, table: &str) -> RecordBuilder {
        RecordBuilder {
            record: Record {
                fields: Vec::new(),
                source_database: database.to_string(),
                source_table: table.to_string(),
                source_description: String::new(),
            },
        }
    }

    /// `database/table` identifying where this record came from.
    pub fn origin_key(&self) -> String {
        format!("{}/{}", self.source_database, self.source_table)
    }

    /// All non-null field values followed by the provenance values,
    /// joined with single spaces.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .filter(|f| !f.value.is_null())
            .map(|f| f.value.render())
            .collect();
        parts.push(self.source_database.clone());
        parts.push(self.source_table.clone());
        if !self.source_description.is_empty() {
            parts.push(self.source_description.clone());
        }
        parts.join(" ")
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

/// Fluent construction of [`Record`]s, mostly for tests and in-memory sources.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn description(mut self, description: &str) -> Self {
        self.record.source_description = description.to_string();
        self
    }

    pub fn field(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.record.fields.push(Field {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn text(self, name: &str, value: &str) -> Self {
        self.field(name, value)
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// A record paired with its cached, lower-cased `combined_text`.
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    pub record: Record,
    pub text: String,
}

/// Immutable snapshot of every record for a session.
///
/// Flattening and lower-casing happen once here, so repeated queries
/// never re-render field values.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        let entries = records
            .into_iter()
            .map(|record| {
                let text = record.combined_text().to_lowercase();
                CorpusEntry { record, text }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.entries.get(index).map(|e| &e.record)
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.entries.iter().map(|e| &e.record)
    }

    /// Distinct origin keys in first-seen order, with record counts.
    pub fn origins(&self) -> Vec<(String, usize)> {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for entry in &self.entries {
            let key = entry.record.origin_key();
            match index.get(&key) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(key.clone(), order.len());
                    order.push((key, 1));
                }
            }
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_variants() {
        assert_eq!(FieldValue::from("Jane").render(), "Jane");
        assert_eq!(FieldValue::Integer(42).render(), "42");
        assert_eq!(FieldValue::Real(2.5).render(), "2.5");
        assert_eq!(FieldValue::Null.render(), "");
        assert_eq!(FieldValue::from(None::<i64>), FieldValue::Null);
    }

    #[test]
    fn test_origin_key() {
        let r = Record::builder("hr", "staff").build();
        assert_eq!(r.origin_key(), "hr/staff");
    }

    #[test]
    fn test_combined_text_skips_nulls_and_appends_provenance() {
        let r = Record::builder("hr", "staff")
            .description("Staff list")
            .text("name", "John")
            .field("nickname", FieldValue::Null)
            .field("age", 41i64)
            .build();
        assert_eq!(r.combined_text(), "John 41 hr staff Staff list");
    }

    #[test]
    fn test_combined_text_without_description() {
        let r = Record::builder("db", "t").text("a", "x").build();
        assert_eq!(r.combined_text(), "x db t");
    }

    #[test]
    fn test_corpus_caches_lowercase_text() {
        let corpus = Corpus::new(vec![Record::builder("HR", "Staff")
            .text("name", "JOHN Smith")
            .build()]);
        assert_eq!(corpus.entries()[0].text, "john smith hr staff");
        assert_eq!(corpus.get(0).map(|r| r.origin_key()), Some("HR/Staff".to_string()));
    }

    #[test]
    fn test_origins_first_seen_order() {
        let corpus = Corpus::new(vec![
            Record::builder("b", "t").build(),
            Record::builder("a", "t").build(),
            Record::builder("b", "t").build(),
        ]);
        assert_eq!(
            corpus.origins(),
            vec![("b/t".to_string(), 2), ("a/t".to_string(), 1)]
        );
    }

    #[test]
    fn test_record_get() {
        let r = Record::builder("d", "t").field("id", 7i64).build();
        assert_eq!(r.get("id"), Some(&FieldValue::Integer(7)));
        assert_eq!(r.get("missing"), None);
    }
}
