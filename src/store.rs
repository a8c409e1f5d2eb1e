//! Dataset Store
//!
//! The shipment record set is loaded once, validated as a whole, and never
//! mutated afterwards. Servers share it through [`SharedStore`], which swaps
//! the whole store on reload so in-flight queries keep their snapshot.

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::LoadError;
use crate::models::{CsvRecord, ShipmentRecord, REQUIRED_COLUMNS};

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    records: Vec<ShipmentRecord>,
    date_range: Option<(NaiveDate, NaiveDate)>,
}

impl DatasetStore {
    /// Build a store from already-normalized records.
    pub fn from_records(records: Vec<ShipmentRecord>) -> Self {
        let date_range = records
            .iter()
            .map(|r| r.truckout_date)
            .fold(None, |range: Option<(NaiveDate, NaiveDate)>, d| match range {
                None => Some((d, d)),
                Some((min, max)) => Some((min.min(d), max.max(d))),
            });

        Self { records, date_range }
    }

    /// Load the dataset CSV at `path`. Any bad row fails the whole load.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
        let store = Self::from_reader(file)?;

        info!(
            "Loaded {} shipment records from {:?} ({} regions)",
            store.len(),
            path,
            store.region_names().len()
        );
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(LoadError::MissingColumn(column));
            }
        }

        let mut records = Vec::new();
        for (i, row) in reader.deserialize::<CsvRecord>().enumerate() {
            let raw = row?;
            records.push(raw.to_record(i + 1)?);
        }

        Ok(Self::from_records(records))
    }

    pub fn all_records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    /// Earliest and latest truckout dates, `None` for an empty dataset.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date_range
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.date_range
            .map(|(min, max)| min <= date && date <= max)
            .unwrap_or(false)
    }

    pub fn region_names(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.destination_region.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read-only shared handle to the current store.
///
/// Readers take an `Arc` snapshot; [`SharedStore::replace`] swaps the
/// reference and never touches a store a query may still hold.
#[derive(Debug, Clone)]
pub struct SharedStore {
    current: Arc<RwLock<Arc<DatasetStore>>>,
}

impl SharedStore {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(store))),
        }
    }

    pub async fn snapshot(&self) -> Arc<DatasetStore> {
        self.current.read().await.clone()
    }

    /// Swap in a new store, returning the one it replaced.
    pub async fn replace(&self, store: DatasetStore) -> Arc<DatasetStore> {
        let mut guard = self.current.write().await;
        std::mem::replace(&mut *guard, Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_from_csv() {
        let csv = "\
Truckout date,Destination state,Quantity loaded,Product
2024-01-03 06:30:00,Lagos,45000,PMS
2024-01-01,Kano,33000,AGO
2024-01-02,Lagos,0,PMS
";
        let store = DatasetStore::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.date_range(), Some((date(2024, 1, 1), date(2024, 1, 3))));
        assert_eq!(store.all_records()[0].truckout_date, date(2024, 1, 3));
        assert_eq!(store.region_names().into_iter().collect::<Vec<_>>(), vec!["Kano", "Lagos"]);
        assert!(store.contains_date(date(2024, 1, 2)));
        assert!(!store.contains_date(date(2024, 1, 4)));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let csv = "Truckout date,Destination state\n2024-01-01,Lagos\n";
        let err = DatasetStore::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("Quantity loaded")));
    }

    #[test]
    fn test_non_numeric_quantity_is_fatal() {
        let csv = "\
Truckout date,Destination state,Quantity loaded
2024-01-01,Lagos,100
2024-01-02,Lagos,lots
";
        let err = DatasetStore::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidQuantity { row: 2, .. }));
    }

    #[test]
    fn test_padded_headers_are_trimmed() {
        let csv = " Truckout date , Destination state ,Quantity loaded  \n2024-01-01, Lagos ,100\n";
        let store = DatasetStore::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            store.all_records(),
            &[ShipmentRecord::new(date(2024, 1, 1), "Lagos", 100.0)]
        );
    }

    #[test]
    fn test_unparseable_date_is_fatal() {
        let csv = "\
Truckout date,Destination state,Quantity loaded
2024-01-01,Lagos,100
2024-13-45,Lagos,100
";
        let err = DatasetStore::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn test_empty_dataset_has_no_range() {
        let csv = "Truckout date,Destination state,Quantity loaded\n";
        let store = DatasetStore::from_reader(csv.as_bytes()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.date_range(), None);
        assert!(!store.contains_date(date(2024, 1, 1)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = DatasetStore::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[tokio::test]
    async fn test_replace_keeps_old_snapshot_intact() {
        let shared = SharedStore::new(DatasetStore::from_records(vec![ShipmentRecord::new(
            date(2024, 1, 1),
            "Lagos",
            10.0,
        )]));

        let before = shared.snapshot().await;
        shared.replace(DatasetStore::default()).await;

        assert_eq!(before.len(), 1);
        assert!(shared.snapshot().await.is_empty());
    }
}
