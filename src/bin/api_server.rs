//! REST API Server for the downstream growth dashboard
//!
//! Usage:
//!   ./target/release/api_server [options]
//!
//! Options:
//!   --port PORT         Port to listen on (default: 8080)
//!   --data PATH         Shipment dataset CSV (default: data/data.csv)
//!   --geo PATH          Region boundary GeoJSON (default: data/ng.json)
//!   --centroids PATH    Region centroid overrides (JSON)
//!
//! REST endpoints:
//!   GET  /api/v1/health               - Health check
//!   GET  /api/v1/dataset              - Record count and date range
//!   GET  /api/v1/growth?date=D        - Chart, map and growth report for date D
//!   GET  /api/v1/geography            - Region boundary GeoJSON
//!   POST /api/v1/dataset/reload       - Reload the dataset file

use anyhow::Result;
use clap::Parser;
use downstream_growth::{api, config::ServerConfig, logging};
use std::net::SocketAddr;
use std::sync::Arc;

fn print_banner(port: u16) {
    println!("============================================================");
    println!("         DOWNSTREAM GROWTH MONITOR API SERVER");
    println!("============================================================");
    println!();
    println!("  Port:     {}", port);
    println!("  REST:     http://localhost:{}/api/v1/", port);
    println!();
    println!("REST Endpoints:");
    println!("  GET  /api/v1/health             Health check");
    println!("  GET  /api/v1/dataset            Dataset summary");
    println!("  GET  /api/v1/growth?date=D      Growth dashboard");
    println!("  GET  /api/v1/geography          Region boundaries");
    println!("  POST /api/v1/dataset/reload     Reload dataset");
    println!();
    println!("============================================================");
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ServerConfig::parse();

    // Startup loads are fatal on error
    let service = Arc::new(config.data.load_service()?);

    print_banner(config.port);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    let app = api::router(service);
    tracing::info!("Starting REST server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
