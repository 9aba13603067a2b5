use std::collections::BTreeMap;

use tracing::warn;

use crate::config::site_type::ZoneCategory;
use crate::models::zone::{ScanResult, Zone};

/// Observed range of one score column
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoringValidation {
    pub score_ranges: Vec<ScoreRange>,
    /// Every score of every zone lies in [0, 1]
    pub all_normalized: bool,
    pub category_counts: BTreeMap<ZoneCategory, usize>,
}

/// Checks score ranges and tallies categories over the accepted zones.
pub fn validate_scoring_system(zones: &[Zone]) -> ScoringValidation {
    let mut validation = ScoringValidation { all_normalized: true, ..ScoringValidation::default() };

    for zone in zones {
        for (index, (name, value)) in zone.scores.named_scores().into_iter().enumerate() {
            match validation.score_ranges.get_mut(index) {
                Some(range) => {
                    range.min = range.min.min(value);
                    range.max = range.max.max(value);
                }
                None => validation.score_ranges.push(ScoreRange { name, min: value, max: value }),
            }
            if !(0.0..=1.0).contains(&value) {
                validation.all_normalized = false;
            }
        }
        *validation.category_counts.entry(zone.zone_category).or_insert(0) += 1;
    }

    if !validation.all_normalized {
        warn!("Scores outside [0, 1] found in scan output");
    }
    validation
}

pub fn print_summary(result: &ScanResult, validation: &ScoringValidation) {
    println!("\nWind Zone Scan Summary");
    println!("----------------------------------------");
    println!("Points evaluated: {}", result.points_evaluated);
    println!("Zones found: {}", result.zones.len());

    if result.zones.is_empty() {
        println!("No location met the wind speed and grid distance constraints.");
        println!("----------------------------------------");
        return;
    }

    println!("Score ranges:");
    for range in &validation.score_ranges {
        println!("  {:<24} {:.3} - {:.3}", range.name, range.min, range.max);
    }
    println!(
        "Normalization: {}",
        if validation.all_normalized { "all scores within 0-1" } else { "scores OUTSIDE 0-1" }
    );

    println!("Zone distribution:");
    for category in ZoneCategory::ALL {
        let count = validation.category_counts.get(&category).copied().unwrap_or(0);
        println!("  {:<10} {}", category.display_name(), count);
    }

    if let Some(best) = result.zones.iter().max_by(|a, b| {
        a.scores.composite_score.total_cmp(&b.scores.composite_score)
    }) {
        println!(
            "Best zone: {} at ({:.3}, {:.3}) composite {:.3}, {:.1} m/s, {:.1} km to grid, €{:.0} connection",
            best.id,
            best.point.latitude,
            best.point.longitude,
            best.scores.composite_score,
            best.wind_speed_mps,
            best.grid_distance_km,
            best.grid_cost_eur
        );
    }

    println!("\nDevelopment areas:");
    println!("  {:>3} {:>7} {:>9} {:>9} {:>9} {:>8} {:>9}", "id", "zones", "lat", "lon", "score", "wind", "grid km");
    for cluster in &result.clusters {
        println!(
            "  {:>3} {:>7} {:>9.3} {:>9.3} {:>9.3} {:>8.2} {:>9.1}",
            cluster.cluster_id,
            cluster.member_count,
            cluster.centroid.latitude,
            cluster.centroid.longitude,
            cluster.mean_composite_score,
            cluster.mean_wind_speed,
            cluster.mean_grid_distance
        );
    }
    println!("----------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::site_type::SiteType;
    use crate::data::poi::GridPoint;
    use crate::models::zone::ScoreSet;

    fn zone(composite: f64, category: ZoneCategory) -> Zone {
        Zone {
            id: "z".to_string(),
            point: GridPoint::new(53.0, -8.0),
            scores: ScoreSet { composite_score: composite, wind_score: 0.5, ..ScoreSet::default() },
            wind_speed_mps: 8.0,
            grid_distance_km: 12.0,
            grid_cost_eur: 550_000.0,
            turbine_capacity_factor: 0.3,
            site_type: SiteType::Onshore,
            zone_category: category,
            cluster_id: None,
        }
    }

    #[test]
    fn test_ranges_and_distribution() {
        let zones = vec![
            zone(0.85, ZoneCategory::Excellent),
            zone(0.5, ZoneCategory::Moderate),
            zone(0.55, ZoneCategory::Moderate),
        ];
        let validation = validate_scoring_system(&zones);

        assert!(validation.all_normalized);
        let composite = validation.score_ranges.iter().find(|r| r.name == "composite_score").unwrap();
        assert_eq!((composite.min, composite.max), (0.5, 0.85));
        assert_eq!(validation.category_counts.get(&ZoneCategory::Moderate), Some(&2));
        assert_eq!(validation.category_counts.get(&ZoneCategory::Good), None);
    }

    #[test]
    fn test_out_of_range_score_is_flagged() {
        let validation = validate_scoring_system(&[zone(1.2, ZoneCategory::Excellent)]);
        assert!(!validation.all_normalized);
    }

    #[test]
    fn test_empty_zone_list() {
        let validation = validate_scoring_system(&[]);
        assert!(validation.score_ranges.is_empty());
        assert!(validation.all_normalized);
        assert!(validation.category_counts.is_empty());
    }
}
