use serde::Serialize;

use crate::models::{Record, COLUMNS};

/// Plain row/column dump of a record sequence, one cell per column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            columns: COLUMNS.iter().map(ToString::to_string).collect(),
            rows: records
                .iter()
                .map(|record| record.field_texts().into_iter().collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Records where `query` is a case-insensitive substring of any column's
/// display text, in their original order. An empty query matches everything.
pub fn search_records(query: &str, records: &[Record]) -> Vec<Record> {
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record
                .field_texts()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
