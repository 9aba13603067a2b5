// Per-criterion scoring for a single candidate point
use crate::config::constants::*;
use crate::config::const_funcs::{
    calc_empirical_capacity_factor, calc_grid_connection_cost, calc_grid_curve,
    calc_spacing_curve, sanitize_speed,
};
use crate::config::site_type::SiteType;
use crate::data::poi::GridPoint;
use crate::data::providers::{
    ExistingInstallationsProvider, GridInfrastructureProvider, WindResourceProvider,
};
use crate::error::EngineError;
use crate::models::turbine::ResourceModel;
use crate::models::zone::ScoreSet;

/// Logistic wind score between the viability floor and saturation speed
pub fn wind_score(wind_speed: f64) -> f64 {
    let v = sanitize_speed(wind_speed);
    if v < WIND_SCORE_MIN_SPEED {
        0.0
    } else if v >= WIND_SCORE_MAX_SPEED {
        1.0
    } else {
        1.0 / (1.0 + (-WIND_SCORE_STEEPNESS * (v - WIND_SCORE_MIDPOINT)).exp())
    }
}

pub fn capacity_factor_score(wind_speed: f64) -> f64 {
    (calc_empirical_capacity_factor(wind_speed) / CF_SCORE_CEILING).clamp(0.0, 1.0)
}

pub fn actual_capacity_factor(wind_speed: f64) -> f64 {
    calc_empirical_capacity_factor(wind_speed).clamp(0.0, 1.0)
}

/// Steadier wind scores higher. A measured standard deviation is scored by
/// its coefficient of variation; without one the speed buckets stand in.
pub fn variability_score(wind_speed: f64, wind_std: Option<f64>) -> f64 {
    let v = sanitize_speed(wind_speed);

    if let Some(std) = wind_std.filter(|s| s.is_finite() && *s >= 0.0) {
        if v > 0.0 {
            return (1.0 - std / v).clamp(0.0, 1.0);
        }
    }

    if v < VARIABILITY_LOW_SPEED {
        VARIABILITY_LOW_SCORE
    } else if v < VARIABILITY_MID_SPEED {
        VARIABILITY_MID_SCORE
    } else if v < VARIABILITY_HIGH_SPEED {
        VARIABILITY_HIGH_SCORE
    } else {
        VARIABILITY_VERY_HIGH_SCORE
    }
}

pub fn wind_composite_score(wind_score: f64, variability_score: f64) -> f64 {
    (WIND_SCORE_BLEND * wind_score + VARIABILITY_SCORE_BLEND * variability_score).clamp(0.0, 1.0)
}

pub fn grid_score(distance_km: f64, site_type: SiteType) -> f64 {
    calc_grid_curve(distance_km, site_type.grid_thresholds())
}

/// `None` means there are no existing installations anywhere
pub fn environmental_score(nearest_installation_km: Option<f64>, site_type: SiteType) -> f64 {
    match nearest_installation_km {
        Some(distance) => calc_spacing_curve(distance, site_type.spacing_thresholds()),
        None => SPACING_SCORE_CLEAR,
    }
}

/// Everything measured about a candidate before ranking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateAssessment {
    pub wind_speed_mps: f64,
    /// All fields filled except `composite_score`
    pub scores: ScoreSet,
    pub grid_distance_km: f64,
    pub grid_cost_eur: f64,
    pub turbine_capacity_factor: f64,
}

/// Scores candidates against the scan's data providers
pub struct ScoringEngine<'a> {
    wind: &'a dyn WindResourceProvider,
    grid: &'a dyn GridInfrastructureProvider,
    installations: &'a dyn ExistingInstallationsProvider,
    resource: &'a ResourceModel,
    hub_height_m: Option<f64>,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(
        wind: &'a dyn WindResourceProvider,
        grid: &'a dyn GridInfrastructureProvider,
        installations: &'a dyn ExistingInstallationsProvider,
        resource: &'a ResourceModel,
        hub_height_m: Option<f64>,
    ) -> Self {
        Self { wind, grid, installations, resource, hub_height_m }
    }

    /// Wind speed used for scoring: the nearest sample, extrapolated to hub
    /// height when one is configured. Also returns the sample's std-dev.
    pub fn wind_at(&self, point: &GridPoint) -> Result<(f64, Option<f64>), EngineError> {
        let sample = self.wind.nearest_sample(point).ok_or_else(|| {
            EngineError::DataUnavailable("wind resource dataset is empty".to_string())
        })?;

        match self.hub_height_m {
            Some(hub) => {
                let speed = self.resource.extrapolate_to_hub_height(sample.wind_speed, hub);
                // Std-dev scales with the same log-law factor as the mean
                let std = sample.wind_std.map(|s| self.resource.extrapolate_to_hub_height(s, hub));
                Ok((speed, std))
            }
            None => Ok((sanitize_speed(sample.wind_speed), sample.wind_std)),
        }
    }

    /// Distance (km) the grid score is computed from: nearest substation or
    /// line onshore, nearest substation (shore connection) offshore.
    pub fn grid_score_distance_km(&self, point: &GridPoint, site_type: SiteType) -> f64 {
        let substation = self.grid.nearest_substation_km(point);
        let line = self.grid.nearest_line_km(point);

        let distance = match site_type {
            SiteType::Onshore => match (substation, line) {
                (Some(s), Some(l)) => Some(s.min(l)),
                (s, l) => s.or(l),
            },
            SiteType::Offshore => substation.or(line),
        };
        distance.unwrap_or(f64::INFINITY)
    }

    /// Distance (km) to the nearest substation, which the grid constraint,
    /// the zone category and the connection cost are measured against.
    /// Falls back to the nearest line when no substations are loaded.
    pub fn connection_distance_km(&self, point: &GridPoint) -> f64 {
        self.grid
            .nearest_substation_km(point)
            .or_else(|| self.grid.nearest_line_km(point))
            .unwrap_or(f64::INFINITY)
    }

    pub fn assess(&self, point: &GridPoint, site_type: SiteType) -> Result<CandidateAssessment, EngineError> {
        let (wind_speed, wind_std) = self.wind_at(point)?;

        let wind = wind_score(wind_speed);
        let variability = variability_score(wind_speed, wind_std);
        let scoring_distance = self.grid_score_distance_km(point, site_type);
        let connection_distance = self.connection_distance_km(point);

        let turbine_cf = self
            .resource
            .estimate_capacity_factor(self.wind.hourly_series(point), wind_speed);

        let scores = ScoreSet {
            wind_score: wind,
            capacity_factor_score: capacity_factor_score(wind_speed),
            actual_capacity_factor: actual_capacity_factor(wind_speed),
            variability_score: variability,
            wind_composite_score: wind_composite_score(wind, variability),
            grid_score: grid_score(scoring_distance, site_type),
            environmental_score: environmental_score(
                self.installations.nearest_installation_km(point),
                site_type,
            ),
            composite_score: 0.0,
        };

        Ok(CandidateAssessment {
            wind_speed_mps: wind_speed,
            scores,
            grid_distance_km: connection_distance,
            grid_cost_eur: calc_grid_connection_cost(connection_distance),
            turbine_capacity_factor: turbine_cf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::providers::{GridInfrastructure, InstallationRegistry, WindDataset, WindSample};
    use crate::models::infrastructure::{Installation, Substation, TransmissionLine};

    #[test]
    fn test_wind_score_reference_values() {
        assert_eq!(wind_score(5.9), 0.0);
        assert_eq!(wind_score(10.0), 1.0);
        assert!((wind_score(8.0) - 0.5).abs() < 1e-12);
        assert_eq!(wind_score(-2.0), 0.0);
        assert_eq!(wind_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_wind_score_monotonic() {
        let mut previous = 0.0;
        for step in 0..=300 {
            let score = wind_score(step as f64 * 0.05);
            assert!(score >= previous);
            assert!((0.0..=1.0).contains(&score));
            previous = score;
        }
    }

    #[test]
    fn test_capacity_factor_scores() {
        let cf = 0.005 * 8.0f64.powf(2.5);
        assert!((actual_capacity_factor(8.0) - cf).abs() < 1e-12);
        assert!((capacity_factor_score(8.0) - cf / 0.5).abs() < 1e-12);
        assert_eq!(capacity_factor_score(20.0), 1.0);
        assert_eq!(actual_capacity_factor(0.0), 0.0);
    }

    #[test]
    fn test_variability_buckets() {
        assert_eq!(variability_score(6.5, None), 0.9);
        assert_eq!(variability_score(7.0, None), 0.7);
        assert_eq!(variability_score(9.0, None), 0.5);
        assert_eq!(variability_score(10.0, None), 0.3);
    }

    #[test]
    fn test_variability_prefers_measured_spread() {
        assert!((variability_score(8.0, Some(2.0)) - 0.75).abs() < 1e-12);
        assert_eq!(variability_score(8.0, Some(12.0)), 0.0);
        // Unusable spread falls back to the bucket
        assert_eq!(variability_score(8.0, Some(f64::NAN)), 0.7);
    }

    #[test]
    fn test_environmental_score_without_installations() {
        assert_eq!(environmental_score(None, SiteType::Onshore), 1.0);
        assert_eq!(environmental_score(None, SiteType::Offshore), 1.0);
        assert_eq!(environmental_score(Some(4.0), SiteType::Offshore), 0.1);
        assert!((environmental_score(Some(4.0), SiteType::Onshore) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_offshore_grid_thresholds_are_wider() {
        assert_eq!(grid_score(10.0, SiteType::Offshore), 1.0);
        assert!(grid_score(10.0, SiteType::Onshore) < 1.0);
    }

    fn engine_fixture() -> (WindDataset, GridInfrastructure, InstallationRegistry, ResourceModel) {
        let wind = WindDataset::new(vec![WindSample::new(53.0, -8.0, 9.0)]);
        let grid = GridInfrastructure::new(
            vec![Substation::new("S1".to_string(), GridPoint::new(53.2, -8.0))],
            vec![TransmissionLine::new(
                "L1".to_string(),
                vec![GridPoint::new(52.0, -8.1), GridPoint::new(54.0, -8.1)],
            )],
        );
        let installations = InstallationRegistry::new(vec![Installation::new(
            "Farm".to_string(),
            GridPoint::new(53.0, -7.9),
            40.0,
        )]);
        (wind, grid, installations, ResourceModel::default())
    }

    #[test]
    fn test_line_only_feeds_onshore_grid_score() {
        let (wind, grid, installations, resource) = engine_fixture();
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, None);
        let point = GridPoint::new(53.0, -8.0);

        assert!((engine.grid_score_distance_km(&point, SiteType::Onshore) - 11.1).abs() < 1e-6);
        assert!((engine.grid_score_distance_km(&point, SiteType::Offshore) - 22.2).abs() < 1e-6);

        let onshore = engine.assess(&point, SiteType::Onshore).unwrap();
        assert_eq!(onshore.scores.grid_score, grid_score(11.1, SiteType::Onshore));
        // Constraint distance and cost both go to the substation
        assert!((onshore.grid_distance_km - 22.2).abs() < 1e-6);
        assert!((onshore.grid_cost_eur - (250_000.0 + 25_000.0 * 22.2)).abs() < 1e-3);
        assert_eq!(onshore.wind_speed_mps, 9.0);
        for (name, value) in onshore.scores.named_scores() {
            assert!((0.0..=1.0).contains(&value), "{} = {}", name, value);
        }

        let offshore = engine.assess(&point, SiteType::Offshore).unwrap();
        assert!((offshore.grid_distance_km - 22.2).abs() < 1e-6);
    }

    #[test]
    fn test_connection_distance_falls_back_to_lines() {
        let wind = WindDataset::new(vec![WindSample::new(53.0, -8.0, 9.0)]);
        let grid = GridInfrastructure::new(
            Vec::new(),
            vec![TransmissionLine::new(
                "L1".to_string(),
                vec![GridPoint::new(52.0, -8.1), GridPoint::new(54.0, -8.1)],
            )],
        );
        let installations = InstallationRegistry::default();
        let resource = ResourceModel::default();
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, None);
        assert!((engine.connection_distance_km(&GridPoint::new(53.0, -8.0)) - 11.1).abs() < 1e-6);
    }

    #[test]
    fn test_assess_prefers_hourly_series_capacity_factor() {
        let (wind, grid, installations, resource) = engine_fixture();
        let series = vec![10.0, 12.0, 2.0, 7.5];
        let wind = wind.with_hourly_series(GridPoint::new(53.0, -8.0), series.clone());
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, None);

        let assessment = engine.assess(&GridPoint::new(53.0, -8.0), SiteType::Onshore).unwrap();
        assert_eq!(assessment.turbine_capacity_factor, resource.capacity_factor_from_series(&series));
        assert_ne!(assessment.turbine_capacity_factor, resource.empirical_capacity_factor(9.0));
    }

    #[test]
    fn test_assess_without_series_uses_empirical_capacity_factor() {
        let (wind, grid, installations, resource) = engine_fixture();
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, None);
        let assessment = engine.assess(&GridPoint::new(53.0, -8.0), SiteType::Onshore).unwrap();
        assert_eq!(assessment.turbine_capacity_factor, resource.empirical_capacity_factor(9.0));
    }

    #[test]
    fn test_assess_extrapolates_to_hub_height() {
        let (wind, grid, installations, resource) = engine_fixture();
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, Some(100.0));
        let assessment = engine.assess(&GridPoint::new(53.0, -8.0), SiteType::Onshore).unwrap();
        assert_eq!(assessment.wind_speed_mps, resource.extrapolate_to_hub_height(9.0, 100.0));
        assert!(assessment.wind_speed_mps > 9.0);
    }

    #[test]
    fn test_assess_fails_on_empty_wind_dataset() {
        let (_, grid, installations, resource) = engine_fixture();
        let wind = WindDataset::default();
        let engine = ScoringEngine::new(&wind, &grid, &installations, &resource, None);
        let result = engine.assess(&GridPoint::new(53.0, -8.0), SiteType::Onshore);
        assert!(matches!(result, Err(EngineError::DataUnavailable(_))));
    }
}
