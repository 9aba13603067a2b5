// Region Constants (Ireland, including territorial waters)
pub const REGION_MIN_LAT: f64 = 51.0;
pub const REGION_MAX_LAT: f64 = 55.5;
pub const REGION_MIN_LON: f64 = -11.0;
pub const REGION_MAX_LON: f64 = -5.0;

// Grid Constants
pub const DEFAULT_GRID_RESOLUTION: f64 = 0.1;        // degrees
pub const OFFSHORE_GRID_MARGIN: f64 = 0.1;           // degrees trimmed from each bound in offshore mode
pub const GRID_STEP_EPSILON: f64 = 1e-9;             // guards the exclusive upper bound against rounding
pub const MAX_GRID_POINTS: usize = 25_000_000;       // candidates a single scan may evaluate

// Distance Constants
pub const KM_PER_DEGREE: f64 = 111.0;

// Feasibility Defaults
pub const DEFAULT_MIN_WIND_SPEED: f64 = 6.0;         // m/s
pub const DEFAULT_MAX_GRID_DISTANCE: f64 = 50.0;     // km

// Composite Weights (used when supplied weights sum to zero)
pub const DEFAULT_WIND_WEIGHT: f64 = 0.5;
pub const DEFAULT_GRID_WEIGHT: f64 = 0.3;
pub const DEFAULT_ENVIRONMENTAL_WEIGHT: f64 = 0.2;

// Wind Composite Blend (fixed)
pub const WIND_SCORE_BLEND: f64 = 0.7;
pub const VARIABILITY_SCORE_BLEND: f64 = 0.3;

// Wind Score Curve
pub const WIND_SCORE_MIN_SPEED: f64 = 6.0;           // below this the site is not viable
pub const WIND_SCORE_MAX_SPEED: f64 = 10.0;          // at or above this the score saturates
pub const WIND_SCORE_MIDPOINT: f64 = 8.0;
pub const WIND_SCORE_STEEPNESS: f64 = 2.0;

// Empirical Capacity Factor (CF ≈ 0.005 · v^2.5)
pub const EMPIRICAL_CF_COEFFICIENT: f64 = 0.005;
pub const EMPIRICAL_CF_EXPONENT: f64 = 2.5;
pub const CF_SCORE_CEILING: f64 = 0.5;

// Variability Proxy Buckets
pub const VARIABILITY_LOW_SPEED: f64 = 7.0;
pub const VARIABILITY_MID_SPEED: f64 = 8.5;
pub const VARIABILITY_HIGH_SPEED: f64 = 10.0;
pub const VARIABILITY_LOW_SCORE: f64 = 0.9;
pub const VARIABILITY_MID_SCORE: f64 = 0.7;
pub const VARIABILITY_HIGH_SCORE: f64 = 0.5;
pub const VARIABILITY_VERY_HIGH_SCORE: f64 = 0.3;

// Grid Score Thresholds (km)
pub const ONSHORE_GRID_THRESHOLDS: [f64; 3] = [5.0, 15.0, 30.0];
pub const OFFSHORE_GRID_THRESHOLDS: [f64; 3] = [10.0, 20.0, 40.0];
pub const GRID_SCORE_NEAR: f64 = 1.0;
pub const GRID_SCORE_MID: f64 = 0.7;
pub const GRID_SCORE_FAR: f64 = 0.3;
pub const GRID_SCORE_DECAY_KM: f64 = 20.0;

// Environmental Score Thresholds (km to nearest existing installation)
pub const ONSHORE_SPACING_THRESHOLDS: [f64; 3] = [3.0, 8.0, 15.0];
pub const OFFSHORE_SPACING_THRESHOLDS: [f64; 3] = [5.0, 15.0, 30.0];
pub const SPACING_SCORE_TOO_CLOSE: f64 = 0.1;
pub const SPACING_SCORE_CLOSE: f64 = 0.6;
pub const SPACING_SCORE_MODERATE: f64 = 0.9;
pub const SPACING_SCORE_CLEAR: f64 = 1.0;

// Grid Connection Cost
pub const GRID_CONNECTION_BASE_COST: f64 = 250_000.0;   // €250k
pub const GRID_CONNECTION_COST_PER_KM: f64 = 25_000.0;  // €25k per km

// Zone Category Thresholds: (min composite, min wind m/s, max grid km)
pub const EXCELLENT_THRESHOLDS: (f64, f64, f64) = (0.8, 8.5, 15.0);
pub const GOOD_THRESHOLDS: (f64, f64, f64) = (0.65, 7.5, 25.0);
pub const MODERATE_THRESHOLDS: (f64, f64, f64) = (0.45, 6.5, 35.0);

// Turbine Power Curve (generic 3 MW class)
pub const TURBINE_CUT_IN_SPEED: f64 = 3.0;
pub const TURBINE_RATED_SPEED: f64 = 12.0;
pub const TURBINE_CUT_OUT_SPEED: f64 = 25.0;
pub const TURBINE_RATED_POWER: f64 = 3_000_000.0;     // W
pub const MAX_CAPACITY_FACTOR: f64 = 0.55;

// Wind Profile
pub const DEFAULT_ROUGHNESS_LENGTH: f64 = 0.03;       // m, grassland
pub const DEFAULT_REFERENCE_HEIGHT: f64 = 10.0;       // m, reanalysis 10 m wind

// Site Classification Heuristic
pub const WEST_BAND_LON: f64 = -8.5;
pub const EAST_BAND_LON: f64 = -6.5;
pub const WEST_ONSHORE_LAT: (f64, f64) = (52.5, 54.5);
pub const EAST_ONSHORE_LAT: (f64, f64) = (51.5, 55.0);
pub const CENTRAL_ONSHORE_LAT: (f64, f64) = (52.0, 55.0);

// Remote Classification
pub const WATER_LOOKUP_BUFFER: f64 = 0.01;            // degrees, roughly 1 km
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "http://overpass-api.de/api/interpreter";

// Clustering
pub const DEFAULT_CLUSTER_COUNT: usize = 10;
pub const DEFAULT_CLUSTER_SEED: u64 = 42;
pub const KMEANS_MAX_ITERATIONS: usize = 100;
pub const KMEANS_TOLERANCE: f64 = 1e-4;

// Progress Schedule
pub const PROGRESS_INPUTS_CHECKED: f64 = 0.05;
pub const PROGRESS_GRID_BUILT: f64 = 0.20;
pub const PROGRESS_SCAN_START: f64 = 0.25;
pub const PROGRESS_SCAN_SPAN: f64 = 0.60;
pub const PROGRESS_CLUSTERING: f64 = 0.90;
pub const PROGRESS_REPORT_DIVISIONS: usize = 20;      // report roughly every 5% of points
