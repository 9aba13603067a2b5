use anyhow::{anyhow, Context, Result};
use clap::Parser;

use eirwind::analysis::reporting::{print_summary, validate_scoring_system};
use eirwind::cli::cli::Args;
use eirwind::cli::progress_bar::ScanProgressBar;
use eirwind::config::scan_config::{ClassifierConfig, ScanConfig};
use eirwind::core::scan::{calculate_optimal_zones, DataSources};
use eirwind::data::loaders;
use eirwind::data::providers::InstallationRegistry;
use eirwind::utils::csv_export::CsvExporter;
use eirwind::utils::logging::{self, FileIOType, OperationCategory};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    println!("EirWind Zone Analyzer");
    println!("Debug logging: {}, timing: {}",
             if args.debug_logging() { "enabled" } else { "disabled" },
             if args.enable_timing() { "enabled" } else { "disabled" });

    let config = build_config(&args)?;

    let wind = match args.hourly_wind() {
        Some(hourly) => loaders::load_wind_with_hourly_series(args.wind(), hourly)
            .with_context(|| format!("loading wind resource from {} and {}", args.wind(), hourly))?,
        None => loaders::load_wind_samples(args.wind())
            .with_context(|| format!("loading wind resource from {}", args.wind()))?,
    };
    let grid = loaders::load_grid_infrastructure(args.substations(), args.lines())
        .with_context(|| format!("loading grid infrastructure from {}", args.substations()))?;
    let installations = match args.installations() {
        Some(path) => loaders::load_installations(path)
            .with_context(|| format!("loading existing installations from {}", path))?,
        None => InstallationRegistry::default(),
    };

    let sources = DataSources::new(&wind, &grid, &installations);
    let mut progress = ScanProgressBar::new();
    let result = calculate_optimal_zones(&config, sources, Some(&mut progress), None);
    progress.finish();
    let result = result.context("zone scan failed")?;

    let validation = validate_scoring_system(&result.zones);
    print_summary(&result, &validation);

    if let Some(output_dir) = args.output_dir() {
        let exporter = CsvExporter::new(output_dir)
            .with_context(|| format!("creating output directory {}", output_dir))?;
        let (zones_path, clusters_path) = exporter.export_scan_result(&result)?;
        println!("Zones written to {}", zones_path.display());
        println!("Clusters written to {}", clusters_path.display());
    }

    logging::print_timing_report();
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied
fn build_config(args: &Args) -> Result<ScanConfig> {
    let _timing = logging::start_timing("build_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

    let mut config = match args.config() {
        Some(path) => ScanConfig::from_json_file(path)
            .with_context(|| format!("reading scan configuration {}", path))?,
        None => ScanConfig::default(),
    };

    if let Some(resolution) = args.resolution() {
        config.grid_resolution = resolution;
    }
    if let Some(min_wind_speed) = args.min_wind_speed() {
        config.min_wind_speed = min_wind_speed;
    }
    if let Some(max_grid_distance) = args.max_grid_distance() {
        config.max_grid_distance = max_grid_distance;
    }
    if let Some(mode) = args.site_type() {
        config.site_type_mode = mode;
    }
    if let Some(clusters) = args.clusters() {
        config.clustering.n_clusters = clusters;
    }
    if let Some(seed) = args.seed() {
        config.clustering.seed = seed;
    }
    if let Some(hub_height) = args.hub_height() {
        config.hub_height_m = Some(hub_height);
    }
    if args.remote_classifier() {
        config.classifier = ClassifierConfig::remote_default();
    }
    if let (Some(timeout), ClassifierConfig::Remote { timeout_secs, .. }) =
        (args.classifier_timeout(), &mut config.classifier)
    {
        *timeout_secs = timeout;
    }

    config.validate().context("invalid scan configuration")?;
    Ok(config)
}
