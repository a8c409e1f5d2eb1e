//! Growth report for a single reference date
//! Run: ./target/release/downstream_growth --date 2024-06-30

use anyhow::Result;
use clap::Parser;
use downstream_growth::config::ReportConfig;
use downstream_growth::growth::Growth;
use downstream_growth::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ReportConfig::parse();
    let service = config.data.load_service()?;
    let summary = service.dataset_summary().await;

    info!(
        "Dataset: {} records, {} regions, {:?} to {:?}",
        summary.total_records, summary.total_regions, summary.min_date, summary.max_date
    );

    let Some(dashboard) = service.dashboard(config.date).await else {
        anyhow::bail!("dataset is empty; pass --date explicitly");
    };
    let report = &dashboard.report;

    println!("\n{}", "=".repeat(60));
    println!("   DOWNSTREAM GROWTH MONITOR: {}", report.reference_date);
    println!("{}\n", "=".repeat(60));

    if !report.in_range {
        println!("  Reference date is outside the dataset range; nothing to report.");
        return Ok(());
    }

    println!("30-DAY WINDOW {} .. {}", report.window_start, report.reference_date);
    println!("{}", "-".repeat(40));
    for day in &report.daily {
        println!("  {}  {:>14.1}", day.date, day.total_quantity);
    }
    println!("  {}", dashboard.chart.baseline.annotation);
    println!(
        "  Today: {:.1} ({:?}, line {:?})",
        report.today_total, report.comparison, dashboard.chart.baseline.color
    );

    println!("\nREGIONAL GROWTH");
    println!("{}", "-".repeat(40));
    for region in &report.regions {
        match region.percent_growth {
            Growth::Defined(p) => println!(
                "  {:26} {:>8.1}%  (avg {:.1}, today {:.1})",
                region.region, p, region.window_average, region.today_quantity
            ),
            Growth::Undefined => println!("  {:26} {:>9}  (no baseline)", region.region, "n/a"),
        }
    }

    if let Some(limit) = dashboard.map.color_scale.limit() {
        println!("\n  Color scale: [-{:.1}%, +{:.1}%]", limit, limit);
    }
    if !report.new_regions.is_empty() {
        println!("  Shipped today with no 30-day history: {}", report.new_regions.join(", "));
    }
    if !dashboard.map.unlabelled_regions.is_empty() {
        println!("  Missing centroids: {}", dashboard.map.unlabelled_regions.join(", "));
    }
    if !dashboard.map.unmatched_regions.is_empty() {
        println!("  Missing boundaries: {}", dashboard.map.unmatched_regions.join(", "));
    }

    Ok(())
}
