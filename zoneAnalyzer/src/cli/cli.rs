use clap::Parser;

use crate::config::site_type::SiteTypeMode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scan a region for wind development zones", long_about = None)]
pub struct Args {
    #[arg(long, help = "Wind resource CSV (latitude, longitude, wind speed[, std-dev])")]
    wind: String,

    #[arg(long, help = "Hourly wind speed CSV (latitude, longitude, wind speed; one row per hour)")]
    hourly_wind: Option<String>,

    #[arg(long, help = "Substation CSV (latitude, longitude[, id])")]
    substations: String,

    #[arg(long, help = "Transmission line vertices CSV (line_id, latitude, longitude)")]
    lines: Option<String>,

    #[arg(long, help = "Existing wind installations CSV (name, latitude, longitude, capacity_mw)")]
    installations: Option<String>,

    #[arg(short, long, help = "JSON scan configuration; flags below override it")]
    config: Option<String>,

    #[arg(short, long, help = "Grid resolution in degrees")]
    resolution: Option<f64>,

    #[arg(long, help = "Minimum wind speed (m/s)")]
    min_wind_speed: Option<f64>,

    #[arg(long, help = "Maximum distance to grid (km)")]
    max_grid_distance: Option<f64>,

    #[arg(short, long, help = "onshore, offshore or auto-detect")]
    site_type: Option<SiteTypeMode>,

    #[arg(short = 'k', long, help = "Number of development areas")]
    clusters: Option<usize>,

    #[arg(long, help = "Random seed for k-means initialization")]
    seed: Option<u64>,

    #[arg(long, help = "Hub height (m) to extrapolate reference wind speeds to")]
    hub_height: Option<f64>,

    #[arg(long, default_value_t = false, help = "Classify sites with the Overpass water-feature service")]
    remote_classifier: bool,

    #[arg(long, help = "Timeout (s) for each remote classification request")]
    classifier_timeout: Option<u64>,

    #[arg(short, long, help = "Directory for zones/clusters CSV export")]
    output_dir: Option<String>,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

impl Args {
    pub fn wind(&self) -> &str {
        &self.wind
    }

    pub fn hourly_wind(&self) -> Option<&str> {
        self.hourly_wind.as_deref()
    }

    pub fn substations(&self) -> &str {
        &self.substations
    }

    pub fn lines(&self) -> Option<&str> {
        self.lines.as_deref()
    }

    pub fn installations(&self) -> Option<&str> {
        self.installations.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn resolution(&self) -> Option<f64> {
        self.resolution
    }

    pub fn min_wind_speed(&self) -> Option<f64> {
        self.min_wind_speed
    }

    pub fn max_grid_distance(&self) -> Option<f64> {
        self.max_grid_distance
    }

    pub fn site_type(&self) -> Option<SiteTypeMode> {
        self.site_type
    }

    pub fn clusters(&self) -> Option<usize> {
        self.clusters
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn hub_height(&self) -> Option<f64> {
        self.hub_height
    }

    pub fn remote_classifier(&self) -> bool {
        self.remote_classifier
    }

    pub fn classifier_timeout(&self) -> Option<u64> {
        self.classifier_timeout
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_invocation() {
        let args = Args::try_parse_from(["eirwind", "--wind", "w.csv", "--substations", "s.csv"]).unwrap();
        assert_eq!(args.wind(), "w.csv");
        assert_eq!(args.lines(), None);
        assert_eq!(args.hourly_wind(), None);
        assert!(!args.remote_classifier());
        assert_eq!(args.site_type(), None);
    }

    #[test]
    fn test_site_type_parsing() {
        let args = Args::try_parse_from([
            "eirwind", "--wind", "w.csv", "--substations", "s.csv", "--site-type", "auto-detect", "-k", "4",
        ]).unwrap();
        assert_eq!(args.site_type(), Some(SiteTypeMode::AutoDetect));
        assert_eq!(args.clusters(), Some(4));

        let bad = Args::try_parse_from(["eirwind", "--wind", "w.csv", "--substations", "s.csv", "--site-type", "moon"]);
        assert!(bad.is_err());
    }
}
