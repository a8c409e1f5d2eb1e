//! Growth Metrics Engine
//!
//! A pure function of (store, reference date). The baseline window is the
//! half-open interval `[reference - 30 days, reference)`; the reference date
//! itself only supplies "today's" comparison values. Averages always divide
//! by [`WINDOW_DAYS`], so days without shipments count as zero.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::store::DatasetStore;

pub const WINDOW_DAYS: i64 = 30;

/// Percentage growth of a region against its window average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", content = "percent", rename_all = "snake_case")]
pub enum Growth {
    Defined(f64),
    /// Zero baseline, or a ratio too extreme to represent as a finite value.
    Undefined,
}

impl Growth {
    /// Never yields an infinite or NaN `Defined` value: a subnormal or
    /// overflowed baseline is `Undefined` just like a zero one.
    pub fn between(today: f64, average: f64) -> Self {
        if average == 0.0 {
            return Growth::Undefined;
        }
        let percent = (today - average) / average * 100.0;
        if percent.is_finite() {
            Growth::Defined(percent)
        } else {
            Growth::Undefined
        }
    }

    pub fn percent(&self) -> Option<f64> {
        match self {
            Growth::Defined(p) => Some(*p),
            Growth::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Growth::Defined(_))
    }
}

/// Today's global total relative to the 30-day global average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Above,
    Below,
    Equal,
}

impl Comparison {
    pub fn of(today: f64, baseline: f64) -> Self {
        if today > baseline {
            Comparison::Above
        } else if today < baseline {
            Comparison::Below
        } else {
            Comparison::Equal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub total_quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGrowth {
    pub region: String,
    pub window_total: f64,
    pub window_average: f64,
    pub today_quantity: f64,
    pub percent_growth: Growth,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub reference_date: NaiveDate,
    pub window_start: NaiveDate,
    /// False when the reference date lies outside the dataset's date range.
    pub in_range: bool,
    /// One entry per date with shipments in the window, ascending.
    pub daily: Vec<DailyAggregate>,
    pub window_total: f64,
    pub window_overall_average: f64,
    pub today_total: f64,
    pub comparison: Comparison,
    /// Regions with at least one shipment in the window, by name.
    pub regions: Vec<RegionGrowth>,
    /// Regions that shipped on the reference date but not in the window.
    pub new_regions: Vec<String>,
}

impl GrowthReport {
    fn empty(reference_date: NaiveDate, window_start: NaiveDate) -> Self {
        Self {
            reference_date,
            window_start,
            in_range: false,
            daily: Vec::new(),
            window_total: 0.0,
            window_overall_average: 0.0,
            today_total: 0.0,
            comparison: Comparison::Equal,
            regions: Vec::new(),
            new_regions: Vec::new(),
        }
    }

    pub fn undefined_regions(&self) -> impl Iterator<Item = &RegionGrowth> {
        self.regions.iter().filter(|r| !r.percent_growth.is_defined())
    }

    pub fn region(&self, name: &str) -> Option<&RegionGrowth> {
        self.regions.iter().find(|r| r.region == name)
    }
}

/// First day of the baseline window for `reference_date`.
pub fn window_start(reference_date: NaiveDate) -> NaiveDate {
    reference_date
        .checked_sub_signed(Duration::days(WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN)
}

pub fn compute_growth(store: &DatasetStore, reference_date: NaiveDate) -> GrowthReport {
    let window_start = window_start(reference_date);

    if !store.contains_date(reference_date) {
        debug!(
            "Reference date {} outside dataset range {:?}, returning empty report",
            reference_date,
            store.date_range()
        );
        return GrowthReport::empty(reference_date, window_start);
    }

    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut region_window: BTreeMap<&str, f64> = BTreeMap::new();
    let mut region_today: BTreeMap<&str, f64> = BTreeMap::new();
    let mut window_total = 0.0;
    let mut today_total = 0.0;

    for record in store.all_records() {
        let date = record.truckout_date;
        let region = record.destination_region.as_str();

        if window_start <= date && date < reference_date {
            *daily.entry(date).or_insert(0.0) += record.quantity_loaded;
            *region_window.entry(region).or_insert(0.0) += record.quantity_loaded;
            window_total += record.quantity_loaded;
        } else if date == reference_date {
            *region_today.entry(region).or_insert(0.0) += record.quantity_loaded;
            today_total += record.quantity_loaded;
        }
    }

    let window_days = WINDOW_DAYS as f64;
    let window_overall_average = window_total / window_days;

    let regions: Vec<RegionGrowth> = region_window
        .iter()
        .map(|(&region, &total)| {
            let window_average = total / window_days;
            let today_quantity = region_today.get(region).copied().unwrap_or(0.0);
            RegionGrowth {
                region: region.to_string(),
                window_total: total,
                window_average,
                today_quantity,
                percent_growth: Growth::between(today_quantity, window_average),
            }
        })
        .collect();

    let new_regions: Vec<String> = region_today
        .keys()
        .filter(|region| !region_window.contains_key(*region))
        .map(|region| region.to_string())
        .collect();

    let report = GrowthReport {
        reference_date,
        window_start,
        in_range: true,
        daily: daily
            .into_iter()
            .map(|(date, total_quantity)| DailyAggregate { date, total_quantity })
            .collect(),
        window_total,
        window_overall_average,
        today_total,
        comparison: Comparison::of(today_total, window_overall_average),
        regions,
        new_regions,
    };

    debug!(
        "Growth for {}: {} window days, {} regions ({} undefined), avg {:.1}, today {:.1}",
        reference_date,
        report.daily.len(),
        report.regions.len(),
        report.undefined_regions().count(),
        report.window_overall_average,
        report.today_total
    );

    report
}
