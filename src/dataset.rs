//! CSV loader for theme-park review records.

use anyhow::Result;
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, info, warn};

pub const BRANCH: &str = "Branch";
pub const REVIEWER_LOCATION: &str = "Reviewer_Location";
pub const RATING: &str = "Rating";
pub const YEAR_MONTH: &str = "Year_Month";

/// Label used when a grouping field is missing from a record.
pub const UNKNOWN: &str = "Unknown";

/// A single review row, keyed by column header in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    /// Builds a record from `(column, value)` pairs, keeping their order.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Value of `field`, or `""` when the column is absent.
    pub fn field(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Value of `field` for use as a group key, or `"Unknown"` when absent.
    pub fn group_key(&self, field: &str) -> &str {
        self.get(field).unwrap_or(UNKNOWN)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn branch(&self) -> &str {
        self.field(BRANCH)
    }

    pub fn reviewer_location(&self) -> &str {
        self.field(REVIEWER_LOCATION)
    }

    pub fn rating(&self) -> &str {
        self.field(RATING)
    }

    pub fn year_month(&self) -> &str {
        self.field(YEAR_MONTH)
    }
}

/// Ordered, immutable collection of review records.
///
/// Filtering keeps source order and never deduplicates. An empty dataset
/// returned by [`load`] means the source could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Reads a headered CSV file into a [`Dataset`].
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is not valid
/// UTF-8 CSV.
pub fn try_load(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        // Short rows simply lack the trailing columns.
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        records.push(Record { fields });
    }

    debug!(rows = records.len(), "CSV rows parsed");
    Ok(Dataset::new(records))
}

/// Loads the dataset at `path`, returning an empty dataset on any failure.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load(path: impl AsRef<Path>) -> Dataset {
    match try_load(path.as_ref()) {
        Ok(dataset) => {
            info!(rows = dataset.len(), "Dataset loaded");
            dataset
        }
        Err(e) => {
            warn!(error = %e, "Dataset load failed, continuing with empty dataset");
            Dataset::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dataset = load("does/not/exist.csv");
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_try_load_missing_file_errors() {
        assert!(try_load("does/not/exist.csv").is_err());
    }

    #[test]
    fn test_load_keeps_row_and_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "reviews.csv",
            "Review_ID,Rating,Year_Month,Reviewer_Location,Branch\n\
             1,4,2019-5,United Kingdom,Disneyland_Paris\n\
             2,5,2018-12,Australia,Disneyland_HongKong\n",
        );

        let dataset = load(&path);
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        let columns: Vec<_> = first.iter().map(|(k, _)| k).collect();
        assert_eq!(
            columns,
            ["Review_ID", "Rating", "Year_Month", "Reviewer_Location", "Branch"]
        );
        assert_eq!(first.branch(), "Disneyland_Paris");
        assert_eq!(dataset.records()[1].year_month(), "2018-12");
    }

    #[test]
    fn test_load_short_row_lacks_trailing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "short.csv",
            "Rating,Reviewer_Location,Branch\n3,Canada\n",
        );

        let dataset = load(&path);
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.get(BRANCH), None);
        assert_eq!(record.branch(), "");
        assert_eq!(record.group_key(BRANCH), UNKNOWN);
    }

    #[test]
    fn test_load_invalid_utf8_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, b"Branch,Rating\n\xFF\xFE,4\n").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_dataset_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Record>();
        assert_send_sync::<Dataset>();
    }

    #[test]
    fn test_record_field_defaults() {
        let record = Record::from_pairs([("Rating", "4")]);
        assert_eq!(record.rating(), "4");
        assert_eq!(record.reviewer_location(), "");
        assert_eq!(record.group_key(REVIEWER_LOCATION), "Unknown");
    }
}
