// Full grid scan: classify, score, filter, rank and cluster every candidate.
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::config::constants::*;
use crate::config::scan_config::ScanConfig;
use crate::core::classifier::{build_classifier, SiteClassifier};
use crate::core::clustering::cluster_zones;
use crate::core::grid_builder::GridBuilder;
use crate::core::progress::{ProgressReporter, ProgressTracker};
use crate::core::ranker::CompositeRanker;
use crate::core::scoring::ScoringEngine;
use crate::data::providers::{
    ExistingInstallationsProvider, GridInfrastructureProvider, WindResourceProvider,
};
use crate::error::EngineError;
use crate::models::zone::ScanResult;
use crate::utils::logging::{self, OperationCategory, ScoringType};

/// The three datasets a scan reads from
#[derive(Clone, Copy)]
pub struct DataSources<'a> {
    pub wind: &'a dyn WindResourceProvider,
    pub grid: &'a dyn GridInfrastructureProvider,
    pub installations: &'a dyn ExistingInstallationsProvider,
}

impl<'a> DataSources<'a> {
    pub fn new(
        wind: &'a dyn WindResourceProvider,
        grid: &'a dyn GridInfrastructureProvider,
        installations: &'a dyn ExistingInstallationsProvider,
    ) -> Self {
        Self { wind, grid, installations }
    }
}

/// Scans `config.bounds` for wind development zones.
///
/// Builds the site classifier named by the config for this scan only, so any
/// lookup cache it keeps is dropped when the scan returns. Returns
/// `DataUnavailable` when there is no wind data or no grid infrastructure and
/// `Cancelled` when `cancel` is raised before the scan finishes.
pub fn calculate_optimal_zones(
    config: &ScanConfig,
    sources: DataSources<'_>,
    progress: Option<&mut dyn ProgressReporter>,
    cancel: Option<&AtomicBool>,
) -> Result<ScanResult, EngineError> {
    let classifier = {
        let _timing = logging::start_timing("build_classifier", OperationCategory::Classification);
        build_classifier(&config.classifier)
    };
    calculate_optimal_zones_with_classifier(config, sources, classifier.as_ref(), progress, cancel)
}

/// Same as [`calculate_optimal_zones`] with a caller-supplied classifier.
pub fn calculate_optimal_zones_with_classifier(
    config: &ScanConfig,
    sources: DataSources<'_>,
    classifier: &dyn SiteClassifier,
    progress: Option<&mut dyn ProgressReporter>,
    cancel: Option<&AtomicBool>,
) -> Result<ScanResult, EngineError> {
    let _timing = logging::start_timing("calculate_optimal_zones", OperationCategory::Scan);
    let mut tracker = ProgressTracker::new(progress);

    config.validate()?;
    if sources.wind.is_empty() {
        return Err(EngineError::DataUnavailable("wind resource dataset is empty".to_string()));
    }
    if !sources.grid.has_infrastructure() {
        return Err(EngineError::DataUnavailable(
            "no substations or transmission lines loaded".to_string(),
        ));
    }
    tracker.report(PROGRESS_INPUTS_CHECKED, "Input datasets checked");

    let grid = GridBuilder::new(config.bounds, config.grid_resolution, config.site_type_mode)?;
    let total = grid.len();
    info!(
        "Scanning {} candidate points at {}° resolution ({:?} mode, {} classifier)",
        total,
        config.grid_resolution,
        config.site_type_mode,
        classifier.name()
    );
    tracker.report(PROGRESS_GRID_BUILT, &format!("Analysis grid of {} points ready", total));

    let engine = ScoringEngine::new(
        sources.wind,
        sources.grid,
        sources.installations,
        &config.resource,
        config.hub_height_m,
    );
    let ranker = CompositeRanker::new(
        &config.weights,
        config.min_wind_speed,
        config.max_grid_distance,
        config.site_type_mode,
    );
    let requested_type = config.site_type_mode.requested_type();
    let report_interval = (total / PROGRESS_REPORT_DIVISIONS).max(1);

    let mut result = ScanResult::default();
    tracker.report(PROGRESS_SCAN_START, "Scanning candidate points");

    for (index, point) in grid.points().enumerate() {
        if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
            info!("Scan cancelled after {} of {} points", index, total);
            return Err(EngineError::Cancelled);
        }
        if index % report_interval == 0 {
            let fraction = PROGRESS_SCAN_START + PROGRESS_SCAN_SPAN * index as f64 / total as f64;
            tracker.report(fraction, &format!("Analyzing point {}/{}", index + 1, total));
        }
        result.points_evaluated += 1;

        // Auto-detect scores each point as whatever it is classified as. An
        // explicit mode scores as the requested type and only classifies
        // candidates that already clear the constraints.
        let (scored_as, assessment) = {
            let _timing = logging::start_timing(
                "assess_candidate",
                OperationCategory::Scoring { subcategory: ScoringType::Candidate },
            );
            let scored_as = match requested_type {
                Some(site_type) => site_type,
                None => classifier.classify(&point),
            };
            (scored_as, engine.assess(&point, scored_as)?)
        };

        if !ranker.is_feasible(assessment.wind_speed_mps, assessment.grid_distance_km) {
            continue;
        }

        let site_type = match requested_type {
            Some(_) => classifier.classify(&point),
            None => scored_as,
        };
        let zone_id = format!("Zone_{}_{}", site_type, index);
        let ranked = {
            let _timing = logging::start_timing(
                "rank_candidate",
                OperationCategory::Scoring { subcategory: ScoringType::Ranking },
            );
            ranker.rank(zone_id, point, site_type, &assessment)
        };
        if let Some(zone) = ranked {
            result.zones.push(zone);
        } else {
            debug!(
                "Dropping ({:.3}, {:.3}): classified {} during a {:?} scan",
                point.latitude, point.longitude, site_type, config.site_type_mode
            );
        }
    }

    tracker.report(
        PROGRESS_SCAN_START + PROGRESS_SCAN_SPAN,
        &format!("Found {} suitable locations", result.zones.len()),
    );
    info!("{} of {} points passed all constraints", result.zones.len(), total);

    tracker.report(PROGRESS_CLUSTERING, "Clustering zones into development areas");
    {
        let _timing = logging::start_timing("cluster_zones", OperationCategory::Clustering);
        result.clusters = cluster_zones(&mut result.zones, &config.clustering);
    }
    info!("Grouped zones into {} development areas", result.clusters.len());

    tracker.report(
        1.0,
        &format!("Complete! Found {} optimal zones", result.zones.len()),
    );
    Ok(result)
}
