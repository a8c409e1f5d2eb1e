//! Region boundary polygons (GeoJSON FeatureCollection)
//!
//! Only the presentation layer reads this. Features are keyed by their
//! `properties.name`, which must match the dataset's destination regions.

use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::info;

use crate::error::LoadError;

pub const REGION_NAME_KEY: &str = "properties.name";

#[derive(Debug, Clone)]
pub struct GeoBoundaries {
    collection: Value,
    names: BTreeSet<String>,
}

impl GeoBoundaries {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let collection: Value =
            serde_json::from_str(&raw).map_err(|e| LoadError::InvalidGeography(e.to_string()))?;
        let boundaries = Self::from_value(collection)?;

        info!("Loaded {} region boundaries from {:?}", boundaries.names.len(), path);
        Ok(boundaries)
    }

    pub fn from_value(collection: Value) -> Result<Self, LoadError> {
        if collection.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(LoadError::InvalidGeography(
                "top-level object is not a FeatureCollection".to_string(),
            ));
        }

        let features = collection
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| LoadError::InvalidGeography("missing 'features' array".to_string()))?;

        let mut names = BTreeSet::new();
        for (i, feature) in features.iter().enumerate() {
            let name = feature
                .pointer("/properties/name")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    LoadError::InvalidGeography(format!("feature {} has no {}", i, REGION_NAME_KEY))
                })?;
            names.insert(name.to_string());
        }

        Ok(Self { collection, names })
    }

    pub fn contains(&self, region: &str) -> bool {
        self.names.contains(region)
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// The raw FeatureCollection, for clients that draw the shapes.
    pub fn as_json(&self) -> &Value {
        &self.collection
    }
}
