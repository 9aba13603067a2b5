// Onshore/offshore classification.
//
// The coastline heuristic is the default and needs no network. The remote
// classifier asks a water-feature service about a small box around each point
// and drops back to the heuristic whenever the service cannot answer.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::constants::*;
use crate::config::scan_config::ClassifierConfig;
use crate::config::site_type::SiteType;
use crate::data::poi::{BoundingBox, GridPoint};

pub trait SiteClassifier {
    fn name(&self) -> &'static str;
    fn classify(&self, point: &GridPoint) -> SiteType;
}

/// Coastline-calibrated banding for Ireland and its territorial waters
#[derive(Debug, Clone, Copy, Default)]
pub struct CoastlineHeuristic;

impl SiteClassifier for CoastlineHeuristic {
    fn name(&self) -> &'static str {
        "coastline-heuristic"
    }

    fn classify(&self, point: &GridPoint) -> SiteType {
        let (lat, lon) = (point.latitude, point.longitude);

        let inside_region = (REGION_MIN_LAT..=REGION_MAX_LAT).contains(&lat) &&
            (REGION_MIN_LON..=REGION_MAX_LON).contains(&lon);
        if !inside_region {
            return SiteType::Offshore;
        }

        // Exposed west coast, sheltered east coast, latitude proxy in between
        let (south, north) = if lon < WEST_BAND_LON {
            WEST_ONSHORE_LAT
        } else if lon > EAST_BAND_LON {
            EAST_ONSHORE_LAT
        } else {
            CENTRAL_ONSHORE_LAT
        };

        if lat < south || lat > north {
            SiteType::Offshore
        } else {
            SiteType::Onshore
        }
    }
}

/// Answer from a water-feature service
#[derive(Debug, Clone, PartialEq)]
pub enum WaterLookup {
    Water,
    NoWater,
    /// The service could not answer (timeout, transport error, bad status)
    Unavailable(String),
}

pub trait WaterFeatureService {
    fn lookup_water(&self, bbox: &BoundingBox) -> WaterLookup;
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<serde_json::Value>,
}

/// Overpass API client querying water bodies and waterways
pub struct OverpassService {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl fmt::Debug for OverpassService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverpassService")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl OverpassService {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client, endpoint: endpoint.to_string() })
    }

    fn water_query(bbox: &BoundingBox) -> String {
        let area = format!("{},{},{},{}", bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon);
        format!(
            "[out:json][timeout:25];\n(\n  way[\"natural\"=\"water\"]({area});\n  way[\"waterway\"]({area});\n  \
             relation[\"natural\"=\"water\"]({area});\n  relation[\"waterway\"]({area});\n);\nout geom;",
            area = area
        )
    }
}

impl WaterFeatureService for OverpassService {
    fn lookup_water(&self, bbox: &BoundingBox) -> WaterLookup {
        let query = Self::water_query(bbox);
        let response = match self.client.get(&self.endpoint).query(&[("data", query)]).send() {
            Ok(response) => response,
            Err(e) => return WaterLookup::Unavailable(e.to_string()),
        };

        if !response.status().is_success() {
            return WaterLookup::Unavailable(format!("status {}", response.status()));
        }

        match response.json::<OverpassResponse>() {
            Ok(body) if !body.elements.is_empty() => WaterLookup::Water,
            Ok(_) => WaterLookup::NoWater,
            Err(e) => WaterLookup::Unavailable(e.to_string()),
        }
    }
}

/// Remote lookup with heuristic fallback. Holds answers for one scan only.
pub struct RemoteClassifier<S: WaterFeatureService> {
    service: S,
    fallback: CoastlineHeuristic,
    cache: RefCell<HashMap<(i64, i64), SiteType>>,
    fallback_count: Cell<usize>,
}

impl<S: WaterFeatureService> RemoteClassifier<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            fallback: CoastlineHeuristic,
            cache: RefCell::new(HashMap::new()),
            fallback_count: Cell::new(0),
        }
    }

    /// Number of points answered by the heuristic because the service could not
    pub fn fallback_count(&self) -> usize {
        self.fallback_count.get()
    }

    fn cache_key(point: &GridPoint) -> (i64, i64) {
        ((point.latitude * 1e6).round() as i64, (point.longitude * 1e6).round() as i64)
    }
}

impl<S: WaterFeatureService> SiteClassifier for RemoteClassifier<S> {
    fn name(&self) -> &'static str {
        "remote-water-lookup"
    }

    fn classify(&self, point: &GridPoint) -> SiteType {
        let key = Self::cache_key(point);
        if let Some(site_type) = self.cache.borrow().get(&key) {
            return *site_type;
        }

        let bbox = BoundingBox::around(point, WATER_LOOKUP_BUFFER);
        let site_type = match self.service.lookup_water(&bbox) {
            WaterLookup::Water => SiteType::Offshore,
            WaterLookup::NoWater => SiteType::Onshore,
            WaterLookup::Unavailable(reason) => {
                debug!(
                    "Classification unavailable at ({:.3}, {:.3}): {}; using coastline heuristic",
                    point.latitude, point.longitude, reason
                );
                self.fallback_count.set(self.fallback_count.get() + 1);
                self.fallback.classify(point)
            }
        };

        self.cache.borrow_mut().insert(key, site_type);
        site_type
    }
}

/// Builds the classifier for one scan from configuration.
pub fn build_classifier(config: &ClassifierConfig) -> Box<dyn SiteClassifier> {
    match config {
        ClassifierConfig::Heuristic => Box::new(CoastlineHeuristic),
        ClassifierConfig::Remote { endpoint, timeout_secs } => {
            match OverpassService::new(endpoint, Duration::from_secs(*timeout_secs)) {
                Ok(service) => Box::new(RemoteClassifier::new(service)),
                Err(e) => {
                    warn!("Could not build water-feature client ({}); using coastline heuristic", e);
                    Box::new(CoastlineHeuristic)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedService(WaterLookup, Cell<usize>);

    impl WaterFeatureService for FixedService {
        fn lookup_water(&self, _bbox: &BoundingBox) -> WaterLookup {
            self.1.set(self.1.get() + 1);
            self.0.clone()
        }
    }

    #[test]
    fn test_heuristic_bands() {
        let heuristic = CoastlineHeuristic;
        // Midlands
        assert_eq!(heuristic.classify(&GridPoint::new(53.0, -8.0)), SiteType::Onshore);
        // Outside the region box
        assert_eq!(heuristic.classify(&GridPoint::new(50.5, -8.0)), SiteType::Offshore);
        assert_eq!(heuristic.classify(&GridPoint::new(53.0, -4.5)), SiteType::Offshore);
        // West band is onshore only between 52.5 and 54.5
        assert_eq!(heuristic.classify(&GridPoint::new(53.5, -9.5)), SiteType::Onshore);
        assert_eq!(heuristic.classify(&GridPoint::new(52.2, -9.5)), SiteType::Offshore);
        // East band reaches further south
        assert_eq!(heuristic.classify(&GridPoint::new(51.7, -6.0)), SiteType::Onshore);
        assert_eq!(heuristic.classify(&GridPoint::new(51.3, -6.0)), SiteType::Offshore);
        // Central band south edge
        assert_eq!(heuristic.classify(&GridPoint::new(51.8, -7.5)), SiteType::Offshore);
    }

    #[test]
    fn test_remote_answers_are_used() {
        let classifier = RemoteClassifier::new(FixedService(WaterLookup::Water, Cell::new(0)));
        assert_eq!(classifier.classify(&GridPoint::new(53.0, -8.0)), SiteType::Offshore);
        assert_eq!(classifier.fallback_count(), 0);

        let classifier = RemoteClassifier::new(FixedService(WaterLookup::NoWater, Cell::new(0)));
        assert_eq!(classifier.classify(&GridPoint::new(50.0, -8.0)), SiteType::Onshore);
    }

    #[test]
    fn test_unavailable_falls_back_to_heuristic() {
        let classifier = RemoteClassifier::new(FixedService(
            WaterLookup::Unavailable("timed out".to_string()),
            Cell::new(0),
        ));
        let inland = GridPoint::new(53.0, -8.0);
        let at_sea = GridPoint::new(50.5, -8.0);
        assert_eq!(classifier.classify(&inland), CoastlineHeuristic.classify(&inland));
        assert_eq!(classifier.classify(&at_sea), CoastlineHeuristic.classify(&at_sea));
        assert_eq!(classifier.fallback_count(), 2);
    }

    #[test]
    fn test_answers_are_cached_per_classifier() {
        let classifier = RemoteClassifier::new(FixedService(WaterLookup::NoWater, Cell::new(0)));
        let point = GridPoint::new(53.0, -8.0);
        classifier.classify(&point);
        classifier.classify(&point);
        assert_eq!(classifier.service.1.get(), 1);
    }

    #[test]
    fn test_water_query_covers_requested_box() {
        let bbox = BoundingBox::around(&GridPoint::new(53.0, -8.0), 0.01);
        let query = OverpassService::water_query(&bbox);
        assert!(query.starts_with("[out:json]"));
        assert!(query.contains("way[\"natural\"=\"water\"]"));
        assert!(query.contains("relation[\"waterway\"]"));
    }

    #[test]
    fn test_build_classifier_defaults_to_heuristic() {
        let classifier = build_classifier(&ClassifierConfig::Heuristic);
        assert_eq!(classifier.name(), "coastline-heuristic");
    }
}
