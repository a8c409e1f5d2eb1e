//! Synthetic data generator for the downstream growth dataset
//!
//! Writes truck-out records (date with time of day, destination state,
//! quantity loaded) across every Nigerian state, with weekday seasonality
//! and a slow upward trend.
//!
//! Usage:
//!   cargo run --release --bin generate_synthetic -- [OPTIONS]
//!
//! Options:
//!   --days <N>           Number of days to generate (default: 120)
//!   --end-date <DATE>    Last truck-out date (default: 2024-06-30)
//!   --rows-per-day <N>   Mean truck-outs per day (default: 40)
//!   --seed <N>           Random seed for reproducibility (optional)
//!   --output <PATH>      Output CSV path (default: data/data.csv)

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use clap::Parser;
use csv::WriterBuilder;
use downstream_growth::models::CsvRecord;
use downstream_growth::region_centers::STATE_CENTERS;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::error::Error;
use std::path::PathBuf;

/// Synthetic data generator for the shipment dataset
#[derive(Parser, Debug)]
#[command(name = "generate_synthetic")]
#[command(about = "Generate synthetic truck-out data for the growth monitor")]
struct Args {
    /// Number of days to generate
    #[arg(long, default_value = "120")]
    days: i64,

    /// Last truck-out date
    #[arg(long, default_value = "2024-06-30")]
    end_date: NaiveDate,

    /// Mean number of truck-outs per day
    #[arg(long, default_value = "40")]
    rows_per_day: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output CSV path
    #[arg(long, default_value = "data/data.csv")]
    output: PathBuf,
}

/// Standard tanker compartments in litres
const TRUCK_SIZES: [f64; 4] = [33_000.0, 40_000.0, 45_000.0, 60_000.0];

/// Busier destinations get picked more often
fn state_weight(state: &str) -> u32 {
    match state {
        "Lagos" => 12,
        "Federal Capital Territory" | "Rivers" | "Kano" => 6,
        "Oyo" | "Ogun" | "Kaduna" | "Delta" | "Anambra" => 3,
        _ => 1,
    }
}

fn weekday_factor(date: NaiveDate) -> f64 {
    match date.weekday() {
        Weekday::Sat => 0.6,
        Weekday::Sun => 0.3,
        _ => 1.0,
    }
}

fn random_time(rng: &mut impl Rng) -> NaiveTime {
    NaiveTime::from_hms_opt(rng.gen_range(5..22), rng.gen_range(0..60), rng.gen_range(0..60))
        .unwrap_or_default()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Synthetic Data Generator");
    println!("{}", "-".repeat(60));
    println!("Output:        {}", args.output.display());
    println!("Days:          {}", args.days);
    println!("End date:      {}", args.end_date);
    println!("Rows per day:  {}", args.rows_per_day);
    if let Some(seed) = args.seed {
        println!("Random seed:   {}", seed);
    }
    println!();

    // Initialize RNG
    let mut rng: StdRng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    // Sorted so a fixed seed reproduces the same file
    let mut states: Vec<&str> = STATE_CENTERS.keys().copied().collect();
    states.sort_unstable();
    let weights: Vec<u32> = states.iter().map(|s| state_weight(s)).collect();
    let picker = rand::distributions::WeightedIndex::new(&weights)?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(&args.output)?;

    let start = args.end_date - Duration::days(args.days.max(1) - 1);
    let mut total_written = 0usize;

    for offset in 0..args.days.max(1) {
        let date = start + Duration::days(offset);
        let trend = 1.0 + offset as f64 / (args.days.max(1) as f64) * 0.2;
        let mean = args.rows_per_day as f64 * weekday_factor(date) * trend;
        let count = (mean * rng.gen_range(0.7..1.3)).round() as usize;

        for _ in 0..count {
            let state = states[picker.sample(&mut rng)];
            let size = TRUCK_SIZES[rng.gen_range(0..TRUCK_SIZES.len())];
            // Loaded volume is rarely the exact compartment size
            let quantity = (size * rng.gen_range(0.97..1.0)).round();

            let loaded_at = date.and_time(random_time(&mut rng));
            writer.serialize(CsvRecord {
                truckout_date: loaded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                destination_state: state.to_string(),
                quantity_loaded: format!("{}", quantity),
            })?;
            total_written += 1;
        }
    }

    writer.flush()?;

    println!("Generation complete");
    println!("{}", "-".repeat(60));
    println!("Records written: {:>8}", total_written);
    println!("Date range:      {} .. {}", start, args.end_date);
    println!("Output file:     {}", args.output.display());

    Ok(())
}
