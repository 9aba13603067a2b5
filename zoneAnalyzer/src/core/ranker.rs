use crate::config::scan_config::Weights;
use crate::config::site_type::{SiteType, SiteTypeMode, ZoneCategory};
use crate::core::scoring::CandidateAssessment;
use crate::data::poi::GridPoint;
use crate::models::zone::Zone;

/// Weights rescaled to sum to one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedWeights {
    pub wind: f64,
    pub grid: f64,
    pub environmental: f64,
}

impl NormalizedWeights {
    /// Negative weights count as zero. A zero or non-finite total falls back
    /// to the default 0.5 / 0.3 / 0.2 split.
    pub fn from_weights(weights: &Weights) -> Self {
        let clean = |w: f64| if w.is_finite() { w.max(0.0) } else { 0.0 };
        let (wind, grid, environmental) = (clean(weights.wind), clean(weights.grid), clean(weights.environmental));
        let total = wind + grid + environmental;

        if !(total > 0.0) || !total.is_finite() {
            let defaults = Weights::default();
            return Self::from_weights(&defaults);
        }

        Self {
            wind: wind / total,
            grid: grid / total,
            environmental: environmental / total,
        }
    }
}

/// Combines sub-scores, filters infeasible candidates and labels the rest
#[derive(Debug, Clone)]
pub struct CompositeRanker {
    weights: NormalizedWeights,
    min_wind_speed: f64,
    max_grid_distance: f64,
    mode: SiteTypeMode,
}

impl CompositeRanker {
    pub fn new(weights: &Weights, min_wind_speed: f64, max_grid_distance: f64, mode: SiteTypeMode) -> Self {
        Self {
            weights: NormalizedWeights::from_weights(weights),
            min_wind_speed,
            max_grid_distance,
            mode,
        }
    }

    pub fn composite_score(&self, wind_composite: f64, grid_score: f64, environmental_score: f64) -> f64 {
        let w = &self.weights;
        (w.wind * wind_composite + w.grid * grid_score + w.environmental * environmental_score).clamp(0.0, 1.0)
    }

    pub fn is_feasible(&self, wind_speed: f64, grid_distance_km: f64) -> bool {
        wind_speed >= self.min_wind_speed && grid_distance_km <= self.max_grid_distance
    }

    /// An explicit mode only admits sites classified as that type
    pub fn admits_site_type(&self, classified: SiteType) -> bool {
        match self.mode.requested_type() {
            Some(requested) => requested == classified,
            None => true,
        }
    }

    /// Turns an assessment into a Zone, or `None` when a constraint rejects it.
    pub fn rank(&self, id: String, point: GridPoint, site_type: SiteType, assessment: &CandidateAssessment) -> Option<Zone> {
        if !self.is_feasible(assessment.wind_speed_mps, assessment.grid_distance_km) {
            return None;
        }
        if !self.admits_site_type(site_type) {
            return None;
        }

        let mut scores = assessment.scores;
        scores.composite_score = self.composite_score(
            scores.wind_composite_score,
            scores.grid_score,
            scores.environmental_score,
        );

        Some(Zone {
            id,
            point,
            scores,
            wind_speed_mps: assessment.wind_speed_mps,
            grid_distance_km: assessment.grid_distance_km,
            grid_cost_eur: assessment.grid_cost_eur,
            turbine_capacity_factor: assessment.turbine_capacity_factor,
            site_type,
            zone_category: ZoneCategory::categorize(
                scores.composite_score,
                assessment.wind_speed_mps,
                assessment.grid_distance_km,
            ),
            cluster_id: None,
        })
    }
}
