//! Display formatting for ranked results.
//!
//! Turns a [`RankedResultSet`] into display-ready rows: similarities become
//! two-decimal percentages, grouped keyword sets become `", "`-joined text,
//! and row matches are resolved back to their record's fields. Order is
//! preserved exactly; nothing here affects ranking.

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::models::Corpus;
use crate::search::RankedResultSet;

/// Render a similarity in `[0, 1]` as a percentage, e.g. `0.5 -> "50.00%"`.
pub fn format_percent(similarity: f64) -> String {
    format!("{:.2}%", similarity * 100.0)
}

/// Display row for a grouped (per-origin) match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupedRow {
    pub keywords: String,
    pub origin: String,
    pub similarity: String,
}

/// A rendered column of a matched record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldCell {
    pub name: String,
    pub value: String,
}

/// Display row for a per-record match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub origin: String,
    pub description: String,
    pub fields: Vec<FieldCell>,
    pub similarity: String,
}

/// Display rows for either strategy, in ranked order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormattedResults {
    Grouped(Vec<GroupedRow>),
    Rows(Vec<RecordRow>),
}

impl FormattedResults {
    pub fn len(&self) -> usize {
        match self {
            FormattedResults::Grouped(r) => r.len(),
            FormattedResults::Rows(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plain-text table with left-aligned, width-fitted columns.
    pub fn render_table(&self) -> String {
        match self {
            FormattedResults::Grouped(rows) => render_columns(
                &["KEYWORDS", "ORIGIN", "SIMILARITY"],
                rows.iter()
                    .map(|r| vec![r.keywords.clone(), r.origin.clone(), r.similarity.clone()])
                    .collect(),
            ),
            FormattedResults::Rows(rows) => render_columns(
                &["ORIGIN", "SIMILARITY", "FIELDS"],
                rows.iter()
                    .map(|r| {
                        let fields = r
                            .fields
                            .iter()
                            .map(|c| format!("{}={}", c.name, c.value))
                            .collect::<Vec<_>>()
                            .join("; ");
                        vec![r.origin.clone(), r.similarity.clone(), fields]
                    })
                    .collect(),
            ),
        }
    }
}

/// Resolve ranked matches against the corpus they were produced from.
///
/// Fails if a row match points outside `corpus`, which only happens when
/// results are paired with a different corpus snapshot.
pub fn format_results(corpus: &Corpus, results: &RankedResultSet) -> Result<FormattedResults> {
    match results {
        RankedResultSet::Grouped(matches) => Ok(FormattedResults::Grouped(
            matches
                .iter()
                .map(|m| GroupedRow {
                    keywords: m.keywords.join(", "),
                    origin: m.origin_key.clone(),
                    similarity: format_percent(m.similarity),
                })
                .collect(),
        )),
        RankedResultSet::Rows(matches) => {
            let mut rows = Vec::with_capacity(matches.len());
            for m in matches {
                let record = corpus.get(m.record_index).ok_or_else(|| {
                    anyhow!(
                        "record index {} out of range for corpus of {}",
                        m.record_index,
                        corpus.len()
                    )
                })?;
                rows.push(RecordRow {
                    origin: record.origin_key(),
                    description: record.source_description.clone(),
                    fields: record
                        .fields
                        .iter()
                        .map(|f| FieldCell {
                            name: f.name.clone(),
                            value: f.value.render(),
                        })
                        .collect(),
                    similarity: format_percent(m.similarity),
                });
            }
            Ok(FormattedResults::Rows(rows))
        }
    }
}

fn render_columns(headings: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headings.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let last = headings.len() - 1;
    let line = |cells: Vec<&str>| -> String {
        let mut out = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i == last {
                out.push_str(cell);
            } else {
                out.push_str(cell);
                let pad = widths[i] - cell.chars().count() + 2;
                out.push_str(&" ".repeat(pad));
            }
        }
        out.trim_end().to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(line(headings.to_vec()));
    for row in &rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, Record};
    use crate::strategy::{GroupedMatch, RowMatch};

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(1.0), "100.00%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_percent(2.0 / 3.0), "66.67%");
    }

    #[test]
    fn test_grouped_rows_preserve_order() {
        let results = RankedResultSet::Grouped(vec![
            GroupedMatch {
                keywords: vec!["john".into(), "marketing".into()],
                origin_key: "hr/staff".into(),
                similarity: 0.75,
            },
            GroupedMatch {
                keywords: vec!["john".into()],
                origin_key: "alumni/graduates".into(),
                similarity: 0.25,
            },
        ]);
        let formatted = format_results(&Corpus::default(), &results).unwrap();
        assert_eq!(
            formatted,
            FormattedResults::Grouped(vec![
                GroupedRow {
                    keywords: "john, marketing".into(),
                    origin: "hr/staff".into(),
                    similarity: "75.00%".into(),
                },
                GroupedRow {
                    keywords: "john".into(),
                    origin: "alumni/graduates".into(),
                    similarity: "25.00%".into(),
                },
            ])
        );
    }

    #[test]
    fn test_record_rows_resolve_fields() {
        let corpus = Corpus::new(vec![Record::builder("hr", "staff")
            .description("Staff list")
            .text("name", "Jane")
            .field("age", FieldValue::Null)
            .build()]);
        let results = RankedResultSet::Rows(vec![RowMatch {
            record_index: 0,
            similarity: 1.0,
        }]);
        let formatted = format_results(&corpus, &results).unwrap();
        match formatted {
            FormattedResults::Rows(rows) => {
                assert_eq!(rows[0].origin, "hr/staff");
                assert_eq!(rows[0].description, "Staff list");
                assert_eq!(rows[0].fields[0].value, "Jane");
                assert_eq!(rows[0].fields[1].value, "");
                assert_eq!(rows[0].similarity, "100.00%");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        let results = RankedResultSet::Rows(vec![RowMatch {
            record_index: 3,
            similarity: 0.5,
        }]);
        assert!(format_results(&Corpus::default(), &results).is_err());
    }

    #[test]
    fn test_render_table_grouped() {
        let formatted = FormattedResults::Grouped(vec![GroupedRow {
            keywords: "john, marketing".into(),
            origin: "hr/staff".into(),
            similarity: "57.14%".into(),
        }]);
        let table = formatted.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "KEYWORDS         ORIGIN    SIMILARITY");
        assert_eq!(lines[1], "john, marketing  hr/staff  57.14%");
    }

    #[test]
    fn test_render_table_rows() {
        let formatted = FormattedResults::Rows(vec![RecordRow {
            origin: "hr/staff".into(),
            description: String::new(),
            fields: vec![
                FieldCell {
                    name: "name".into(),
                    value: "Jane".into(),
                },
                FieldCell {
                    name: "id".into(),
                    value: "7".into(),
                },
            ],
            similarity: "100.00%".into(),
        }]);
        let table = formatted.render_table();
        assert!(table.starts_with("ORIGIN    SIMILARITY  FIELDS"));
        assert!(table.ends_with("hr/staff  100.00%     name=Jane; id=7"));
    }
}
