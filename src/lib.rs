//! Rolling 30-day growth metrics for downstream shipment data
//!
//! A read-only [`store::DatasetStore`] feeds the pure
//! [`growth::compute_growth`] engine, whose output the
//! [`presentation`] adapter turns into chart and choropleth map specs.

pub mod api;
pub mod config;
pub mod error;
pub mod geography;
pub mod growth;
pub mod logging;
pub mod models;
pub mod presentation;
pub mod region_centers;
pub mod store;
