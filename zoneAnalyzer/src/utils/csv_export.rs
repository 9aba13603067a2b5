use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::Writer;
use tracing::info;

use crate::error::EngineError;
use crate::models::zone::{Cluster, ScanResult, Zone};
use crate::utils::logging::{self, FileIOType, OperationCategory};

const ZONE_HEADER: [&str; 18] = [
    "zone_id",
    "latitude",
    "longitude",
    "site_type",
    "zone_category",
    "cluster_id",
    "wind_speed_mps",
    "grid_distance_km",
    "grid_cost_eur",
    "turbine_capacity_factor",
    "wind_score",
    "capacity_factor_score",
    "actual_capacity_factor",
    "variability_score",
    "wind_composite_score",
    "grid_score",
    "environmental_score",
    "composite_score",
];

const CLUSTER_HEADER: [&str; 7] = [
    "cluster_id",
    "member_count",
    "centroid_latitude",
    "centroid_longitude",
    "mean_composite_score",
    "mean_wind_speed",
    "mean_grid_distance",
];

/// Writes zones in the column order of `ZONE_HEADER`
pub fn write_zones<W: Write>(writer: W, zones: &[Zone]) -> Result<(), EngineError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(ZONE_HEADER)?;

    for zone in zones {
        let mut record = vec![
            zone.id.clone(),
            format!("{:.6}", zone.point.latitude),
            format!("{:.6}", zone.point.longitude),
            zone.site_type.to_string(),
            zone.zone_category.to_string(),
            zone.cluster_id.map(|id| id.to_string()).unwrap_or_default(),
            format!("{:.3}", zone.wind_speed_mps),
            format!("{:.3}", zone.grid_distance_km),
            format!("{:.0}", zone.grid_cost_eur),
            format!("{:.4}", zone.turbine_capacity_factor),
        ];
        record.extend(zone.scores.named_scores().iter().map(|(_, value)| format!("{:.4}", value)));
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

pub fn write_clusters<W: Write>(writer: W, clusters: &[Cluster]) -> Result<(), EngineError> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record(CLUSTER_HEADER)?;

    for cluster in clusters {
        csv.write_record(&[
            cluster.cluster_id.to_string(),
            cluster.member_count.to_string(),
            format!("{:.6}", cluster.centroid.latitude),
            format!("{:.6}", cluster.centroid.longitude),
            format!("{:.4}", cluster.mean_composite_score),
            format!("{:.3}", cluster.mean_wind_speed),
            format!("{:.3}", cluster.mean_grid_distance),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Writes scan output under one directory, files stamped with the export time
pub struct CsvExporter {
    output_dir: PathBuf,
    timestamp: String,
}

impl CsvExporter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, EngineError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;

        Ok(Self { output_dir, timestamp })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Writes `zones_<timestamp>.csv` and `clusters_<timestamp>.csv`
    pub fn export_scan_result(&self, result: &ScanResult) -> Result<(PathBuf, PathBuf), EngineError> {
        let _timing = logging::start_timing("export_scan_result",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let zones_path = self.output_dir.join(format!("zones_{}.csv", self.timestamp));
        write_zones(std::fs::File::create(&zones_path)?, &result.zones)?;

        let clusters_path = self.output_dir.join(format!("clusters_{}.csv", self.timestamp));
        write_clusters(std::fs::File::create(&clusters_path)?, &result.clusters)?;

        info!(
            "Exported {} zones and {} clusters to {}",
            result.zones.len(),
            result.clusters.len(),
            self.output_dir.display()
        );
        Ok((zones_path, clusters_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::site_type::{SiteType, ZoneCategory};
    use crate::data::poi::GridPoint;
    use crate::models::zone::ScoreSet;

    #[test]
    fn test_zone_rows_match_header() {
        let zone = Zone {
            id: "Zone_Onshore_0".to_string(),
            point: GridPoint::new(53.0, -8.0),
            scores: ScoreSet { composite_score: 0.8825, ..ScoreSet::default() },
            wind_speed_mps: 9.0,
            grid_distance_km: 1.11,
            grid_cost_eur: 277_750.0,
            turbine_capacity_factor: 0.42,
            site_type: SiteType::Onshore,
            zone_category: ZoneCategory::Excellent,
            cluster_id: Some(0),
        };

        let mut buffer = Vec::new();
        write_zones(&mut buffer, &[zone]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(',').count(), ZONE_HEADER.len());
        assert_eq!(lines[1].split(',').count(), ZONE_HEADER.len());
        assert!(lines[1].starts_with("Zone_Onshore_0,53.000000,-8.000000,"));
        assert!(lines[1].ends_with(",0.8825"));
    }

    #[test]
    fn test_cluster_rows() {
        let cluster = Cluster {
            cluster_id: 3,
            member_count: 12,
            centroid: GridPoint::new(53.25, -7.875),
            mean_composite_score: 0.7,
            mean_wind_speed: 8.5,
            mean_grid_distance: 14.0,
        };
        let mut buffer = Vec::new();
        write_clusters(&mut buffer, &[cluster]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().nth(1), Some("3,12,53.250000,-7.875000,0.7000,8.500,14.000"));
    }
}
