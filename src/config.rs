//! Command-line configuration for the binaries

use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::api::GrowthService;

/// Input files shared by every entry point
#[derive(clap::Args, Debug, Clone)]
pub struct DataArgs {
    /// Shipment dataset CSV (Truckout date, Destination state, Quantity loaded)
    #[arg(long, default_value = "data/data.csv")]
    pub data: PathBuf,

    /// GeoJSON FeatureCollection of region boundaries
    #[arg(long, default_value = "data/ng.json")]
    pub geo: PathBuf,

    /// Optional JSON file of region centroids overriding the built-in table
    #[arg(long)]
    pub centroids: Option<PathBuf>,
}

impl DataArgs {
    /// Load everything up front. Any failure here is fatal.
    pub fn load_service(&self) -> anyhow::Result<GrowthService> {
        GrowthService::load(&self.data, &self.geo, self.centroids.as_deref())
    }
}

/// Growth dashboard REST server
#[derive(Parser, Debug)]
#[command(name = "api_server")]
#[command(about = "Serve rolling 30-day growth metrics over HTTP")]
pub struct ServerConfig {
    /// Port to listen on
    #[arg(long, default_value = "8080")]
    pub port: u16,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Print the growth report for a single reference date
#[derive(Parser, Debug)]
#[command(name = "downstream_growth")]
#[command(about = "Print 30-day growth metrics for one reference date")]
pub struct ReportConfig {
    /// Reference date (YYYY-MM-DD); defaults to the latest date in the dataset
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[command(flatten)]
    pub data: DataArgs,
}
