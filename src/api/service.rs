//! Shared business logic for the growth API
//!
//! This service layer is used by the REST handlers and the report binary.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::geography::GeoBoundaries;
use crate::growth::{compute_growth, GrowthReport};
use crate::presentation::{to_chart_series, to_map_series, ChartSpec, MapSpec};
use crate::region_centers::RegionCentroids;
use crate::store::{DatasetStore, SharedStore};

// ============================================================================
// Data Structures
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub total_regions: usize,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl DatasetSummary {
    fn of(store: &DatasetStore) -> Self {
        let range = store.date_range();
        Self {
            total_records: store.len(),
            total_regions: store.region_names().len(),
            min_date: range.map(|(min, _)| min),
            max_date: range.map(|(_, max)| max),
        }
    }
}

/// Everything one reference-date query renders
#[derive(Debug, Clone, Serialize)]
pub struct GrowthDashboard {
    pub report: GrowthReport,
    pub chart: ChartSpec,
    pub map: MapSpec,
}

pub fn build_dashboard(
    store: &DatasetStore,
    reference_date: NaiveDate,
    geography: &GeoBoundaries,
    centroids: &RegionCentroids,
) -> GrowthDashboard {
    let report = compute_growth(store, reference_date);
    let chart = to_chart_series(
        reference_date,
        &report.daily,
        report.window_overall_average,
        report.comparison,
    );
    let map = to_map_series(&report.regions, centroids).check_boundaries(geography);

    GrowthDashboard { report, chart, map }
}

// ============================================================================
// Growth Service
// ============================================================================

pub struct GrowthService {
    store: SharedStore,
    data_path: Option<PathBuf>,
    geography: Arc<GeoBoundaries>,
    centroids: Arc<RegionCentroids>,
}

impl GrowthService {
    pub fn new(store: DatasetStore, geography: GeoBoundaries, centroids: RegionCentroids) -> Self {
        Self {
            store: SharedStore::new(store),
            data_path: None,
            geography: Arc::new(geography),
            centroids: Arc::new(centroids),
        }
    }

    /// Load dataset, boundaries and centroids from disk.
    pub fn load(data_path: &Path, geo_path: &Path, centroids_path: Option<&Path>) -> Result<Self> {
        let store = DatasetStore::from_path(data_path)
            .with_context(|| format!("loading dataset {:?}", data_path))?;
        let geography = GeoBoundaries::from_path(geo_path)
            .with_context(|| format!("loading geography {:?}", geo_path))?;
        let centroids = match centroids_path {
            Some(path) => RegionCentroids::nigeria_with_overrides(path)
                .with_context(|| format!("loading centroids {:?}", path))?,
            None => RegionCentroids::nigeria(),
        };

        let mut service = Self::new(store, geography, centroids);
        service.data_path = Some(data_path.to_path_buf());
        Ok(service)
    }

    pub async fn dataset_summary(&self) -> DatasetSummary {
        DatasetSummary::of(&*self.store.snapshot().await)
    }

    /// Growth dashboard for `date`, or for the latest dataset date when `None`.
    ///
    /// Returns `None` only when no date is given and the dataset is empty.
    pub async fn dashboard(&self, date: Option<NaiveDate>) -> Option<GrowthDashboard> {
        let store = self.store.snapshot().await;
        let reference_date = match date {
            Some(d) => d,
            None => store.date_range()?.1,
        };

        Some(build_dashboard(&store, reference_date, &self.geography, &self.centroids))
    }

    pub fn geography(&self) -> &GeoBoundaries {
        &self.geography
    }

    /// Re-read the dataset file and swap it in. On failure the current store stays.
    pub async fn reload(&self) -> Result<DatasetSummary> {
        let path = self
            .data_path
            .clone()
            .context("service was not loaded from a file; nothing to reload")?;

        let store = tokio::task::spawn_blocking(move || DatasetStore::from_path(&path)).await??;
        let summary = DatasetSummary::of(&store);
        self.store.replace(store).await;

        info!("Dataset reloaded: {} records", summary.total_records);
        Ok(summary)
    }
}
