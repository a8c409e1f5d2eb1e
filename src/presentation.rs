//! Presentation Adapter
//!
//! Turns engine output into renderer-neutral chart and map specs. Nothing
//! here draws; clients receive these as JSON.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::geography::{GeoBoundaries, REGION_NAME_KEY};
use crate::growth::{Comparison, DailyAggregate, RegionGrowth};
use crate::region_centers::{Centroid, RegionCentroids};

pub const BAR_COLOR: &str = "royalblue";

// ============================================================================
// Chart
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineColor {
    Green,
    Red,
    Grey,
}

impl From<Comparison> for LineColor {
    fn from(comparison: Comparison) -> Self {
        match comparison {
            Comparison::Above => LineColor::Green,
            Comparison::Below => LineColor::Red,
            Comparison::Equal => LineColor::Grey,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: LineColor,
    pub annotation: String,
    pub annotation_position: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: &'static str,
    pub y_axis_title: &'static str,
    pub bar_color: &'static str,
    pub bars: Vec<Bar>,
    pub baseline: ReferenceLine,
}

pub fn to_chart_series(
    reference_date: NaiveDate,
    daily: &[DailyAggregate],
    window_overall_average: f64,
    comparison: Comparison,
) -> ChartSpec {
    let mut bars: Vec<Bar> = daily
        .iter()
        .map(|d| Bar {
            date: d.date,
            value: d.total_quantity,
        })
        .collect();
    bars.sort_by_key(|b| b.date);

    ChartSpec {
        title: format!("30-Day Trend leading to {}", reference_date),
        x_axis_title: "Days",
        y_axis_title: "Quantity loaded",
        bar_color: BAR_COLOR,
        bars,
        baseline: ReferenceLine {
            value: window_overall_average,
            color: comparison.into(),
            annotation: format!("30-Day Avg: {:.1}", window_overall_average),
            annotation_position: "top left",
        },
    }
}

// ============================================================================
// Color scale
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }

    fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const RED: Rgb = Rgb(255, 0, 0);
const LIGHT_GREY: Rgb = Rgb(211, 211, 211);
const GREEN: Rgb = Rgb(0, 128, 0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: &'static str,
}

/// Diverging red -> light grey -> green scale over `[-limit, +limit]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScale {
    /// `None` when no region has a defined growth value.
    pub domain: Option<[f64; 2]>,
    pub stops: Vec<ColorStop>,
}

impl ColorScale {
    pub fn symmetric(limit: Option<f64>) -> Self {
        Self {
            domain: limit.map(|l| [-l, l]),
            stops: vec![
                ColorStop { position: 0.0, color: "red" },
                ColorStop { position: 0.5, color: "lightgrey" },
                ColorStop { position: 1.0, color: "green" },
            ],
        }
    }

    pub fn limit(&self) -> Option<f64> {
        self.domain.map(|[_, hi]| hi)
    }

    /// Position of `value` on the scale, in `[0, 1]`.
    pub fn normalize(&self, value: f64) -> f64 {
        match self.limit() {
            Some(limit) if limit > 0.0 => ((value + limit) / (2.0 * limit)).clamp(0.0, 1.0),
            _ => 0.5,
        }
    }

    pub fn color_for(&self, value: f64) -> String {
        let t = self.normalize(value);
        let rgb = if t <= 0.5 {
            RED.lerp(LIGHT_GREY, t / 0.5)
        } else {
            LIGHT_GREY.lerp(GREEN, (t - 0.5) / 0.5)
        };
        rgb.hex()
    }
}

// ============================================================================
// Map
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRegion {
    pub region: String,
    pub percent_growth: f64,
    pub fill: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLabel {
    pub region: String,
    pub text: String,
    pub hover: String,
    pub position: Centroid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Centroid,
    pub lat_range: [f64; 2],
    pub lon_range: [f64; 2],
    pub fit_bounds: &'static str,
    pub feature_id_key: &'static str,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Centroid { lat: 9.082, lon: 8.675 },
            lat_range: [4.0, 14.0],
            lon_range: [2.0, 15.0],
            fit_bounds: "locations",
            feature_id_key: REGION_NAME_KEY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSpec {
    pub color_scale: ColorScale,
    /// Regions with defined growth, colored.
    pub regions: Vec<MapRegion>,
    pub labels: Vec<MapLabel>,
    /// Zero-baseline regions, left out of the colored layer.
    pub undefined_regions: Vec<String>,
    /// Plotted regions with no centroid entry (shape drawn, no label).
    pub unlabelled_regions: Vec<String>,
    /// Plotted regions with no matching boundary feature.
    pub unmatched_regions: Vec<String>,
    pub view: MapView,
}

impl MapSpec {
    /// Record plotted regions the boundary collection cannot draw.
    pub fn check_boundaries(mut self, boundaries: &GeoBoundaries) -> Self {
        self.unmatched_regions = self
            .regions
            .iter()
            .filter(|r| !boundaries.contains(&r.region))
            .map(|r| r.region.clone())
            .collect();

        for region in &self.unmatched_regions {
            warn!("Region '{}' has no boundary feature; it will not be drawn", region);
        }
        self
    }
}

pub fn growth_label(region: &str, percent: f64) -> String {
    format!("{} {:.1}%", region, percent)
}

pub fn to_map_series(region_growths: &[RegionGrowth], centroids: &RegionCentroids) -> MapSpec {
    let limit = region_growths
        .iter()
        .filter_map(|r| r.percent_growth.percent())
        .map(f64::abs)
        .fold(None, |max: Option<f64>, p| Some(max.map_or(p, |m| m.max(p))));
    let color_scale = ColorScale::symmetric(limit);

    let mut regions = Vec::new();
    let mut labels = Vec::new();
    let mut undefined_regions = Vec::new();
    let mut unlabelled_regions = Vec::new();

    for growth in region_growths {
        let Some(percent) = growth.percent_growth.percent() else {
            warn!("Growth undefined for '{}' (zero 30-day baseline)", growth.region);
            undefined_regions.push(growth.region.clone());
            continue;
        };

        regions.push(MapRegion {
            region: growth.region.clone(),
            percent_growth: percent,
            fill: color_scale.color_for(percent),
        });

        match centroids.get(&growth.region) {
            Some(position) => labels.push(MapLabel {
                region: growth.region.clone(),
                text: growth_label(&growth.region, percent),
                hover: format!("State: {}\nPercent: {:.1}%", growth.region, percent),
                position,
            }),
            None => {
                warn!("No centroid for region '{}'; label omitted", growth.region);
                unlabelled_regions.push(growth.region.clone());
            }
        }
    }

    MapSpec {
        color_scale,
        regions,
        labels,
        undefined_regions,
        unlabelled_regions,
        unmatched_regions: Vec::new(),
        view: MapView::default(),
    }
}
