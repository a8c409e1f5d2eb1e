//! Region centroid lookup for map label placement
//! Maps Nigerian state names to the (latitude, longitude) of their centers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::LoadError;

/// State centers: name -> (lat, lon)
pub static STATE_CENTERS: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // South West
    m.insert("Lagos", (6.5244, 3.3792));
    m.insert("Ogun", (6.9980, 3.4737));
    m.insert("Oyo", (8.1574, 3.6147));
    m.insert("Osun", (7.5629, 4.5200));
    m.insert("Ondo", (6.9149, 5.1478));
    m.insert("Ekiti", (7.7190, 5.3110));

    // South South
    m.insert("Edo", (6.6342, 5.9304));
    m.insert("Delta", (5.7040, 5.9339));
    m.insert("Bayelsa", (4.7719, 6.0699));
    m.insert("Rivers", (4.8396, 6.9112));
    m.insert("Akwa Ibom", (5.0077, 7.8497));
    m.insert("Cross River", (5.8702, 8.5988));

    // South East
    m.insert("Anambra", (6.2209, 6.9370));
    m.insert("Imo", (5.5720, 7.0588));
    m.insert("Abia", (5.4527, 7.5248));
    m.insert("Enugu", (6.5364, 7.4356));
    m.insert("Ebonyi", (6.2649, 8.0137));

    // North Central
    m.insert("Kwara", (8.9669, 4.3874));
    m.insert("Kogi", (7.7337, 6.6906));
    m.insert("Niger", (9.9309, 5.5983));
    m.insert("Federal Capital Territory", (8.8941, 7.1860));
    m.insert("Nasarawa", (8.4998, 8.1997));
    m.insert("Benue", (7.3369, 8.7404));
    m.insert("Plateau", (9.2182, 9.5179));

    // North West
    m.insert("Sokoto", (13.0533, 5.3223));
    m.insert("Kebbi", (11.4942, 4.2333));
    m.insert("Zamfara", (12.1222, 6.2236));
    m.insert("Katsina", (12.3797, 7.6306));
    m.insert("Kaduna", (10.3764, 7.7095));
    m.insert("Kano", (11.7471, 8.5247));
    m.insert("Jigawa", (12.2280, 9.5616));

    // North East
    m.insert("Bauchi", (10.3158, 9.8442));
    m.insert("Gombe", (10.3638, 11.1928));
    m.insert("Yobe", (12.2939, 11.4390));
    m.insert("Borno", (11.8846, 13.1520));
    m.insert("Adamawa", (9.3265, 12.3984));
    m.insert("Taraba", (7.9994, 10.7740));

    m
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub lat: f64,
    pub lon: f64,
}

/// Name -> centroid mapping. A missing name is `None`, never a (0, 0) point.
#[derive(Debug, Clone, Default)]
pub struct RegionCentroids {
    entries: HashMap<String, Centroid>,
}

impl RegionCentroids {
    /// The built-in table of the 36 states and the FCT.
    pub fn nigeria() -> Self {
        let entries = STATE_CENTERS
            .iter()
            .map(|(name, &(lat, lon))| (name.to_string(), Centroid { lat, lon }))
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, Centroid)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Built-in table with entries from a `{"Name": {"lat": .., "lon": ..}}` file on top.
    pub fn nigeria_with_overrides(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let overrides: HashMap<String, Centroid> =
            serde_json::from_str(&raw).map_err(|e| LoadError::InvalidCentroids(e.to_string()))?;

        let out_of_range =
            |c: &Centroid| !(-90.0..=90.0).contains(&c.lat) || !(-180.0..=180.0).contains(&c.lon);
        if let Some((name, _)) = overrides.iter().find(|(_, c)| out_of_range(c)) {
            return Err(LoadError::InvalidCentroids(format!(
                "coordinates out of range for '{}'",
                name
            )));
        }

        let mut lookup = Self::nigeria();
        lookup.entries.extend(overrides);
        Ok(lookup)
    }

    pub fn get(&self, region: &str) -> Option<Centroid> {
        self.entries.get(region).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_covers_all_states() {
        let centers = RegionCentroids::nigeria();
        assert_eq!(centers.len(), 37);
        assert_eq!(centers.get("Lagos"), Some(Centroid { lat: 6.5244, lon: 3.3792 }));
        assert!(centers.get("Federal Capital Territory").is_some());
    }

    #[test]
    fn test_unknown_region_is_none() {
        let centers = RegionCentroids::nigeria();
        assert_eq!(centers.get("Atlantis"), None);
        assert_eq!(centers.get("lagos"), None);
    }

    #[test]
    fn test_zero_centroid_is_still_found() {
        let centers = RegionCentroids::from_entries([(
            "Null Island".to_string(),
            Centroid { lat: 0.0, lon: 0.0 },
        )]);
        assert_eq!(centers.get("Null Island"), Some(Centroid { lat: 0.0, lon: 0.0 }));
    }

    #[test]
    fn test_missing_override_file_is_fatal() {
        assert!(RegionCentroids::nigeria_with_overrides("does/not/exist.json").is_err());
    }

    #[test]
    fn test_override_file_replaces_and_adds_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centroids.json");
        std::fs::write(
            &path,
            r#"{ "Lagos": { "lat": 6.45, "lon": 3.39 }, "Ikeja": { "lat": 6.60, "lon": 3.35 } }"#,
        )
        .unwrap();

        let centers = RegionCentroids::nigeria_with_overrides(&path).unwrap();

        assert_eq!(centers.len(), 38);
        assert_eq!(centers.get("Lagos"), Some(Centroid { lat: 6.45, lon: 3.39 }));
        assert_eq!(centers.get("Ikeja"), Some(Centroid { lat: 6.60, lon: 3.35 }));
        assert_eq!(centers.get("Kano"), RegionCentroids::nigeria().get("Kano"));
    }

    #[test]
    fn test_out_of_range_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("centroids.json");
        std::fs::write(&path, r#"{ "Lagos": { "lat": 96.5, "lon": 3.38 } }"#).unwrap();

        assert!(matches!(
            RegionCentroids::nigeria_with_overrides(&path),
            Err(LoadError::InvalidCentroids(_))
        ));
    }
}
