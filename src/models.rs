use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub const DATE_COLUMN: &str = "Truckout date";
pub const REGION_COLUMN: &str = "Destination state";
pub const QUANTITY_COLUMN: &str = "Quantity loaded";

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, REGION_COLUMN, QUANTITY_COLUMN];

/// Raw record from CSV ingestion
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CsvRecord {
    #[serde(rename = "Truckout date")]
    pub truckout_date: String,
    #[serde(rename = "Destination state")]
    pub destination_state: String,
    #[serde(rename = "Quantity loaded")]
    pub quantity_loaded: String,
}

/// One loaded shipment, normalized to calendar-date granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub truckout_date: NaiveDate,
    pub destination_region: String,
    pub quantity_loaded: f64,
}

impl ShipmentRecord {
    pub fn new(
        truckout_date: NaiveDate,
        destination_region: impl Into<String>,
        quantity_loaded: f64,
    ) -> Self {
        Self {
            truckout_date,
            destination_region: destination_region.into(),
            quantity_loaded,
        }
    }
}

/// Parse a truckout date, dropping any time-of-day component.
pub fn parse_truckout_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive())
}

impl CsvRecord {
    /// Validate and normalize a raw row. `row` is the 1-based data row number.
    pub fn to_record(&self, row: usize) -> Result<ShipmentRecord, LoadError> {
        let truckout_date =
            parse_truckout_date(&self.truckout_date).ok_or_else(|| LoadError::InvalidDate {
                row,
                value: self.truckout_date.clone(),
            })?;

        let region = self.destination_state.trim();
        if region.is_empty() {
            return Err(LoadError::EmptyRegion { row });
        }

        let quantity_loaded = self
            .quantity_loaded
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|q| q.is_finite() && *q >= 0.0)
            .ok_or_else(|| LoadError::InvalidQuantity {
                row,
                value: self.quantity_loaded.clone(),
            })?;

        Ok(ShipmentRecord::new(truckout_date, region, quantity_loaded))
    }
}
