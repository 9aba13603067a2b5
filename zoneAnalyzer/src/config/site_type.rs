// Site Type module - contains SiteType, SiteTypeMode and ZoneCategory enums
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::constants::{
    EXCELLENT_THRESHOLDS, GOOD_THRESHOLDS, MODERATE_THRESHOLDS,
    OFFSHORE_GRID_THRESHOLDS, OFFSHORE_SPACING_THRESHOLDS,
    ONSHORE_GRID_THRESHOLDS, ONSHORE_SPACING_THRESHOLDS,
};

/// Classified placement of a candidate site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    Onshore,
    Offshore,
}

impl SiteType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SiteType::Onshore => "Onshore",
            SiteType::Offshore => "Offshore",
        }
    }

    /// Distance thresholds (km) for the grid connectivity curve
    pub fn grid_thresholds(&self) -> [f64; 3] {
        match self {
            SiteType::Onshore => ONSHORE_GRID_THRESHOLDS,
            SiteType::Offshore => OFFSHORE_GRID_THRESHOLDS,
        }
    }

    /// Distance thresholds (km) for spacing from existing installations
    pub fn spacing_thresholds(&self) -> [f64; 3] {
        match self {
            SiteType::Onshore => ONSHORE_SPACING_THRESHOLDS,
            SiteType::Offshore => OFFSHORE_SPACING_THRESHOLDS,
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which site types a scan evaluates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteTypeMode {
    Onshore,
    Offshore,
    AutoDetect,
}

impl SiteTypeMode {
    /// The fixed site type requested, or `None` when each point is classified
    pub fn requested_type(&self) -> Option<SiteType> {
        match self {
            SiteTypeMode::Onshore => Some(SiteType::Onshore),
            SiteTypeMode::Offshore => Some(SiteType::Offshore),
            SiteTypeMode::AutoDetect => None,
        }
    }
}

impl Default for SiteTypeMode {
    fn default() -> Self {
        SiteTypeMode::Onshore
    }
}

impl FromStr for SiteTypeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "onshore" => Ok(SiteTypeMode::Onshore),
            "offshore" => Ok(SiteTypeMode::Offshore),
            "autodetect" | "auto" => Ok(SiteTypeMode::AutoDetect),
            other => Err(format!("unknown site type mode: {}", other)),
        }
    }
}

/// Development suitability label, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoneCategory {
    Excellent,
    Good,
    Moderate,
    Marginal,
}

impl ZoneCategory {
    pub const ALL: [ZoneCategory; 4] = [
        ZoneCategory::Excellent,
        ZoneCategory::Good,
        ZoneCategory::Moderate,
        ZoneCategory::Marginal,
    ];

    /// First matching tier wins; anything that clears no tier is Marginal.
    pub fn categorize(composite_score: f64, wind_speed: f64, grid_distance_km: f64) -> Self {
        let meets = |(min_score, min_wind, max_grid): (f64, f64, f64)| {
            composite_score >= min_score && wind_speed >= min_wind && grid_distance_km <= max_grid
        };

        if meets(EXCELLENT_THRESHOLDS) {
            ZoneCategory::Excellent
        } else if meets(GOOD_THRESHOLDS) {
            ZoneCategory::Good
        } else if meets(MODERATE_THRESHOLDS) {
            ZoneCategory::Moderate
        } else {
            ZoneCategory::Marginal
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ZoneCategory::Excellent => "Excellent",
            ZoneCategory::Good => "Good",
            ZoneCategory::Moderate => "Moderate",
            ZoneCategory::Marginal => "Marginal",
        }
    }
}

impl fmt::Display for ZoneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_priority_order() {
        assert_eq!(ZoneCategory::categorize(0.9, 9.0, 10.0), ZoneCategory::Excellent);
        // Misses Excellent only on grid distance
        assert_eq!(ZoneCategory::categorize(0.9, 9.0, 20.0), ZoneCategory::Good);
        assert_eq!(ZoneCategory::categorize(0.5, 7.0, 30.0), ZoneCategory::Moderate);
        assert_eq!(ZoneCategory::categorize(0.44, 12.0, 1.0), ZoneCategory::Marginal);
        assert_eq!(ZoneCategory::categorize(0.9, 6.0, 1.0), ZoneCategory::Marginal);
    }

    #[test]
    fn test_categorize_is_monotonic() {
        let composites = [0.3, 0.45, 0.5, 0.65, 0.7, 0.8, 0.95];
        let winds = [6.0, 6.5, 7.5, 8.0, 8.5, 11.0];
        let grids = [40.0, 35.0, 25.0, 20.0, 15.0, 2.0];

        for (ci, &c) in composites.iter().enumerate() {
            for (wi, &w) in winds.iter().enumerate() {
                for (gi, &g) in grids.iter().enumerate() {
                    let base = ZoneCategory::categorize(c, w, g);
                    // Improving any single input never yields a worse category
                    if let Some(&better_c) = composites.get(ci + 1) {
                        assert!(ZoneCategory::categorize(better_c, w, g) <= base);
                    }
                    if let Some(&better_w) = winds.get(wi + 1) {
                        assert!(ZoneCategory::categorize(c, better_w, g) <= base);
                    }
                    if let Some(&better_g) = grids.get(gi + 1) {
                        assert!(ZoneCategory::categorize(c, w, better_g) <= base);
                    }
                }
            }
        }
    }

    #[test]
    fn test_site_type_mode_from_str() {
        assert_eq!("Auto-Detect".parse::<SiteTypeMode>(), Ok(SiteTypeMode::AutoDetect));
        assert_eq!("offshore".parse::<SiteTypeMode>(), Ok(SiteTypeMode::Offshore));
        assert!("lake".parse::<SiteTypeMode>().is_err());
    }
}
