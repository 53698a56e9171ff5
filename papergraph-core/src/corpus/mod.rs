//! Tabular paper dataset
//!
//! Rows are kept verbatim and served back untouched in search responses.
//! The store indexes rows by paper identifier once at load; the only columns
//! the engine ever interprets are the identifier, issue date and URI, whose
//! names come from configuration.

use std::io;
use std::path::Path;

use indexmap::IndexMap;

use crate::config::DataSettings;
use crate::core::error::{PaperGraphError, Result};
use crate::core::{NodeId, PaperRecord};

/// Identifier-indexed view of the paper dataset
#[derive(Debug, Clone, Default)]
pub struct PaperStore {
    rows: IndexMap<NodeId, PaperRecord>,
    date_column: String,
    uri_column: String,
}

impl PaperStore {
    /// Create an empty store that knows its special columns
    pub fn new(settings: &DataSettings) -> Self {
        Self {
            rows: IndexMap::new(),
            date_column: settings.date_column.clone(),
            uri_column: settings.uri_column.clone(),
        }
    }

    /// Read the dataset from any CSV source
    pub fn from_csv_reader<R: io::Read>(reader: R, settings: &DataSettings) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        if !headers.iter().any(|h| h == settings.id_column) {
            return Err(PaperGraphError::Load {
                message: format!(
                    "papers file is missing the '{}' column",
                    settings.id_column
                ),
            });
        }

        let mut rows = IndexMap::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut fields = IndexMap::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                fields.insert(header.to_string(), value.to_string());
            }
            let id = NodeId::new(
                fields
                    .get(&settings.id_column)
                    .cloned()
                    .unwrap_or_default(),
            );
            rows.insert(id, PaperRecord { fields });
        }

        Ok(Self {
            rows,
            date_column: settings.date_column.clone(),
            uri_column: settings.uri_column.clone(),
        })
    }

    /// Read the dataset from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P, settings: &DataSettings) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file, settings)
    }

    /// Full row for a paper
    pub fn record(&self, id: &NodeId) -> Option<&PaperRecord> {
        self.rows.get(id)
    }

    /// Issue date of a paper, when the row and column exist
    pub fn issued_date(&self, id: &NodeId) -> Option<&str> {
        self.rows.get(id)?.get(&self.date_column)
    }

    /// URI of a paper, when the row and column exist
    pub fn uri(&self, id: &NodeId) -> Option<&str> {
        self.rows.get(id)?.get(&self.uri_column)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
id,dc.title[en_US],dc.date.issued[en_US],dc.identifier.uri[en_US]
17687/1,Grid storage,2018,http://papers/1
17687/2,Flow batteries,,http://papers/2
17687/3,Solar curtailment,2021,
";

    fn store() -> PaperStore {
        PaperStore::from_csv_reader(CSV.as_bytes(), &DataSettings::default()).unwrap()
    }

    #[test]
    fn test_rows_are_indexed_by_id() {
        let store = store();
        assert_eq!(store.len(), 3);

        let record = store.record(&"17687/2".into()).unwrap();
        assert_eq!(record.get("dc.title[en_US]"), Some("Flow batteries"));
        assert!(store.record(&"17687/9".into()).is_none());
    }

    #[test]
    fn test_special_columns_resolve() {
        let store = store();
        assert_eq!(store.issued_date(&"17687/1".into()), Some("2018"));
        assert_eq!(store.issued_date(&"17687/2".into()), Some(""));
        assert_eq!(store.uri(&"17687/1".into()), Some("http://papers/1"));
        assert_eq!(store.uri(&"17687/3".into()), Some(""));
        assert_eq!(store.uri(&"17687/9".into()), None);
    }

    #[test]
    fn test_rows_round_trip_verbatim() {
        let store = store();
        let record = store.record(&"17687/1".into()).unwrap();

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["id"], "17687/1");
        assert_eq!(json["dc.date.issued[en_US]"], "2018");
        assert_eq!(json["dc.identifier.uri[en_US]"], "http://papers/1");
    }

    #[test]
    fn test_missing_id_column_is_a_load_error() {
        let csv = "name,value\na,1\n";
        let error =
            PaperStore::from_csv_reader(csv.as_bytes(), &DataSettings::default()).unwrap_err();
        assert!(matches!(error, PaperGraphError::Load { .. }));
    }

    #[test]
    fn test_duplicate_ids_keep_the_last_row() {
        let csv = "id,v\np1,first\np1,second\n";
        let store =
            PaperStore::from_csv_reader(csv.as_bytes(), &DataSettings::default()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.record(&"p1".into()).unwrap().get("v"), Some("second"));
    }
}
