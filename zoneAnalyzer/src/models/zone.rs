use serde::{Deserialize, Serialize};
use crate::config::site_type::{SiteType, ZoneCategory};
use crate::data::poi::{GridPoint, POI};

/// Per-criterion scores for one candidate, all in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreSet {
    pub wind_score: f64,
    pub capacity_factor_score: f64,
    pub actual_capacity_factor: f64,
    pub variability_score: f64,
    pub wind_composite_score: f64,
    pub grid_score: f64,
    pub environmental_score: f64,
    pub composite_score: f64,
}

impl ScoreSet {
    /// (name, value) pairs in reporting order
    pub fn named_scores(&self) -> [(&'static str, f64); 8] {
        [
            ("wind_score", self.wind_score),
            ("capacity_factor_score", self.capacity_factor_score),
            ("actual_capacity_factor", self.actual_capacity_factor),
            ("variability_score", self.variability_score),
            ("wind_composite_score", self.wind_composite_score),
            ("grid_score", self.grid_score),
            ("environmental_score", self.environmental_score),
            ("composite_score", self.composite_score),
        ]
    }
}

/// A candidate site that passed every feasibility constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub point: GridPoint,
    pub scores: ScoreSet,
    pub wind_speed_mps: f64,
    pub grid_distance_km: f64,
    pub grid_cost_eur: f64,
    pub turbine_capacity_factor: f64,
    pub site_type: SiteType,
    pub zone_category: ZoneCategory,
    pub cluster_id: Option<usize>,
}

impl POI for Zone {
    fn get_point(&self) -> &GridPoint {
        &self.point
    }

    fn get_id(&self) -> &str {
        &self.id
    }
}

/// Summary of one development area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub cluster_id: usize,
    pub member_count: usize,
    pub centroid: GridPoint,
    pub mean_composite_score: f64,
    pub mean_wind_speed: f64,
    pub mean_grid_distance: f64,
}

/// Everything a scan hands back to the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanResult {
    pub zones: Vec<Zone>,
    pub clusters: Vec<Cluster>,
    pub points_evaluated: usize,
}
