use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::constants::*;
use crate::config::const_funcs::{calc_grid_point_count, calc_grid_steps};
use crate::config::site_type::SiteTypeMode;
use crate::data::poi::BoundingBox;
use crate::error::EngineError;
use crate::models::turbine::ResourceModel;

/// Relative importance of the three composite criteria
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub wind: f64,
    pub grid: f64,
    pub environmental: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            wind: DEFAULT_WIND_WEIGHT,
            grid: DEFAULT_GRID_WEIGHT,
            environmental: DEFAULT_ENVIRONMENTAL_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    pub n_clusters: usize,
    pub seed: u64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            n_clusters: DEFAULT_CLUSTER_COUNT,
            seed: DEFAULT_CLUSTER_SEED,
            max_iterations: KMEANS_MAX_ITERATIONS,
            tolerance: KMEANS_TOLERANCE,
        }
    }
}

/// Onshore/offshore classification backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClassifierConfig {
    /// Coastline banding heuristic, no network access
    Heuristic,
    /// Overpass water-feature lookup with heuristic fallback
    Remote { endpoint: String, timeout_secs: u64 },
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig::Heuristic
    }
}

impl ClassifierConfig {
    pub fn remote_default() -> Self {
        ClassifierConfig::Remote {
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_CLASSIFIER_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub bounds: BoundingBox,
    pub grid_resolution: f64,              // degrees
    pub min_wind_speed: f64,               // m/s
    pub max_grid_distance: f64,            // km
    pub weights: Weights,
    pub site_type_mode: SiteTypeMode,
    pub hub_height_m: Option<f64>,         // extrapolate reference wind to this height when set
    pub resource: ResourceModel,
    pub clustering: ClusteringConfig,
    pub classifier: ClassifierConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::new(REGION_MIN_LAT, REGION_MAX_LAT, REGION_MIN_LON, REGION_MAX_LON),
            grid_resolution: DEFAULT_GRID_RESOLUTION,
            min_wind_speed: DEFAULT_MIN_WIND_SPEED,
            max_grid_distance: DEFAULT_MAX_GRID_DISTANCE,
            weights: Weights::default(),
            site_type_mode: SiteTypeMode::default(),
            hub_height_m: None,
            resource: ResourceModel::default(),
            clustering: ClusteringConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Reads a JSON config; fields left out keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let invalid = |msg: String| -> Result<(), EngineError> { Err(EngineError::InvalidConfig(msg)) };

        if !(self.grid_resolution.is_finite() && self.grid_resolution > 0.0) {
            return invalid(format!("grid resolution must be positive, got {}", self.grid_resolution));
        }
        if !self.bounds.is_well_formed() {
            return invalid(format!("malformed bounding box {:?}", self.bounds));
        }
        let b = &self.bounds;
        let point_count = calc_grid_steps(b.min_lat, b.max_lat, self.grid_resolution)
            .zip(calc_grid_steps(b.min_lon, b.max_lon, self.grid_resolution))
            .and_then(|(lat_steps, lon_steps)| calc_grid_point_count(lat_steps, lon_steps));
        if point_count.is_none() {
            return invalid(format!(
                "grid resolution {} gives more than {} candidate points",
                self.grid_resolution, MAX_GRID_POINTS
            ));
        }
        if self.min_wind_speed.is_nan() || self.max_grid_distance.is_nan() {
            return invalid("feasibility thresholds must be numbers".to_string());
        }
        if self.clustering.n_clusters == 0 {
            return invalid("at least one cluster is required".to_string());
        }
        if self.clustering.max_iterations == 0 {
            return invalid("k-means needs at least one iteration".to_string());
        }
        if !(self.clustering.tolerance >= 0.0) {
            return invalid(format!("k-means tolerance must be non-negative, got {}", self.clustering.tolerance));
        }
        if !self.resource.turbine.is_valid() {
            return invalid(format!("inconsistent turbine power curve {:?}", self.resource.turbine));
        }
        let z0 = self.resource.roughness_length;
        if !(z0 > 0.0 && self.resource.reference_height > z0) {
            return invalid(format!(
                "reference height {} m must exceed roughness length {} m",
                self.resource.reference_height, z0
            ));
        }
        if let Some(hub) = self.hub_height_m {
            if !(hub > z0) {
                return invalid(format!("hub height {} m must exceed roughness length {} m", hub, z0));
            }
        }
        if let ClassifierConfig::Remote { timeout_secs, .. } = &self.classifier {
            if *timeout_secs == 0 {
                return invalid("remote classifier requires a non-zero timeout".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_resolution_and_clusters() {
        let config = ScanConfig { grid_resolution: 0.0, ..ScanConfig::default() };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = ScanConfig::default();
        config.clustering.n_clusters = 0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let config = ScanConfig { classifier: ClassifierConfig::Remote {
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
            timeout_secs: 0,
        }, ..ScanConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_resolution_too_fine_for_bounds() {
        let config = ScanConfig { grid_resolution: 1e-9, ..ScanConfig::default() };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let config = ScanConfig { grid_resolution: 0.01, ..ScanConfig::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "grid_resolution": 0.25, "site_type_mode": "AutoDetect",
                        "weights": { "wind": 1.0, "grid": 0.0, "environmental": 0.0 } }"#;
        let config: ScanConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid_resolution, 0.25);
        assert_eq!(config.site_type_mode, SiteTypeMode::AutoDetect);
        assert_eq!(config.weights.wind, 1.0);
        assert_eq!(config.min_wind_speed, DEFAULT_MIN_WIND_SPEED);
        assert_eq!(config.classifier, ClassifierConfig::Heuristic);
    }
}
