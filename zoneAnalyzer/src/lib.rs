// Module declarations for the zone analyzer

// Scan pipeline
pub mod core {
    pub mod grid_builder;
    pub mod classifier;
    pub mod scoring;
    pub mod ranker;
    pub mod clustering;
    pub mod progress;
    pub mod scan;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod const_funcs;
    pub mod scan_config;
    pub mod site_type;
}

// Model definitions
pub mod models {
    pub mod infrastructure;
    pub mod turbine;
    pub mod zone;
}

// Data providers and loaders
pub mod data {
    pub mod poi;
    pub mod providers;
    pub mod loaders;
}

// Summaries of scan output
pub mod analysis {
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
    pub mod progress_bar;
}

pub mod error;

// Re-export commonly used items
pub use crate::core::scan::{calculate_optimal_zones, DataSources};
pub use crate::config::scan_config::ScanConfig;
pub use crate::error::EngineError;
pub use crate::models::zone::{Cluster, ScanResult, Zone};
