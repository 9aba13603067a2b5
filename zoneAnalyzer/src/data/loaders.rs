use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::{info, warn};

use super::poi::GridPoint;
use super::providers::{GridInfrastructure, InstallationRegistry, WindDataset, WindSample};
use crate::config::const_funcs::normalize_longitude;
use crate::error::EngineError;
use crate::models::infrastructure::{Installation, Substation, TransmissionLine};
use crate::utils::logging::{self, FileIOType, OperationCategory};

// Accepted header names, most specific first
pub const LATITUDE_COLUMNS: &[&str] = &["latitude", "lat"];
pub const LONGITUDE_COLUMNS: &[&str] = &["longitude", "lon", "lng"];
pub const WIND_SPEED_COLUMNS: &[&str] = &["wind_speed_10m", "wind_speed", "ws10", "speed"];
pub const WIND_STD_COLUMNS: &[&str] = &["wind_std_10m", "wind_std", "std"];
pub const CAPACITY_COLUMNS: &[&str] = &["capacity_mw", "capacity", "cap_mw"];
pub const NAME_COLUMNS: &[&str] = &["name", "site_name"];
pub const SUBSTATION_ID_COLUMNS: &[&str] = &["substation_id", "id", "name"];
pub const LINE_ID_COLUMNS: &[&str] = &["line_id", "id"];

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    candidates.iter().find_map(|candidate| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(candidate))
    })
}

fn require_column(headers: &StringRecord, candidates: &[&str], source: &str) -> Result<usize, EngineError> {
    find_column(headers, candidates).ok_or_else(|| EngineError::MissingColumn {
        file: source.to_string(),
        expected: candidates.iter().map(|c| c.to_string()).collect(),
    })
}

fn parse_number(record: &StringRecord, column: usize) -> Option<f64> {
    record
        .get(column)
        .and_then(|field| field.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn parse_text(record: &StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|c| record.get(c))
        .map(|field| field.trim())
        .filter(|field| !field.is_empty())
        .map(|field| field.to_string())
}

// Resolved once per file so rows only index into the record
struct CoordinateColumns {
    latitude: usize,
    longitude: usize,
}

impl CoordinateColumns {
    fn resolve(headers: &StringRecord, source: &str) -> Result<Self, EngineError> {
        Ok(Self {
            latitude: require_column(headers, LATITUDE_COLUMNS, source)?,
            longitude: require_column(headers, LONGITUDE_COLUMNS, source)?,
        })
    }

    fn point(&self, record: &StringRecord) -> Option<GridPoint> {
        let latitude = parse_number(record, self.latitude)?;
        let longitude = parse_number(record, self.longitude)?;
        Some(GridPoint::new(latitude, normalize_longitude(longitude)))
    }
}

fn read_file(path: &str) -> Result<String, EngineError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

/// Wind samples with an optional std-dev column
pub fn read_wind_samples<R: Read>(reader: R, source: &str) -> Result<WindDataset, EngineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let coords = CoordinateColumns::resolve(&headers, source)?;
    let speed_column = require_column(&headers, WIND_SPEED_COLUMNS, source)?;
    let std_column = find_column(&headers, WIND_STD_COLUMNS);

    let mut samples = Vec::new();
    let mut skipped = 0;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let (point, speed) = match (coords.point(&record), parse_number(&record, speed_column)) {
            (Some(point), Some(speed)) => (point, speed),
            _ => {
                skipped += 1;
                warn!("{}: skipping row {} without coordinates or wind speed", source, row + 1);
                continue;
            }
        };

        let mut sample = WindSample::new(point.latitude, point.longitude, speed);
        if let Some(std) = std_column.and_then(|c| parse_number(&record, c)) {
            sample = sample.with_std(std);
        }
        samples.push(sample);
    }

    info!("Loaded {} wind samples from {} ({} skipped)", samples.len(), source, skipped);
    Ok(WindDataset::new(samples))
}

/// Hourly wind speeds, one row per hour (`latitude, longitude, wind_speed`).
/// Rows at the same coordinates form one series in file order.
pub fn read_hourly_series<R: Read>(reader: R, source: &str) -> Result<Vec<(GridPoint, Vec<f64>)>, EngineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let coords = CoordinateColumns::resolve(&headers, source)?;
    let speed_column = require_column(&headers, WIND_SPEED_COLUMNS, source)?;

    let mut series: Vec<(GridPoint, Vec<f64>)> = Vec::new();
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut skipped = 0;
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let (Some(point), Some(speed)) = (coords.point(&record), parse_number(&record, speed_column)) else {
            skipped += 1;
            warn!("{}: skipping hourly row {} without coordinates or wind speed", source, row + 1);
            continue;
        };
        let key = (point.latitude.to_bits(), point.longitude.to_bits());
        let slot = *index.entry(key).or_insert_with(|| {
            series.push((point, Vec::new()));
            series.len() - 1
        });
        series[slot].1.push(speed);
    }

    info!(
        "Loaded hourly series for {} points from {} ({} rows skipped)",
        series.len(),
        source,
        skipped
    );
    Ok(series)
}

pub fn read_substations<R: Read>(reader: R, source: &str) -> Result<Vec<Substation>, EngineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let coords = CoordinateColumns::resolve(&headers, source)?;
    let id_column = find_column(&headers, SUBSTATION_ID_COLUMNS);

    let mut substations = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let Some(point) = coords.point(&record) else {
            warn!("{}: skipping substation row {} without coordinates", source, row + 1);
            continue;
        };
        let id = parse_text(&record, id_column).unwrap_or_else(|| format!("Substation_{}", row));
        substations.push(Substation::new(id, point));
    }

    info!("Loaded {} substations from {}", substations.len(), source);
    Ok(substations)
}

/// One row per vertex (`line_id, latitude, longitude`); vertices keep file order.
pub fn read_transmission_lines<R: Read>(reader: R, source: &str) -> Result<Vec<TransmissionLine>, EngineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let coords = CoordinateColumns::resolve(&headers, source)?;
    let id_column = require_column(&headers, LINE_ID_COLUMNS, source)?;

    let mut order: Vec<String> = Vec::new();
    let mut vertices: HashMap<String, Vec<GridPoint>> = HashMap::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let (Some(id), Some(point)) = (parse_text(&record, Some(id_column)), coords.point(&record)) else {
            warn!("{}: skipping line vertex row {} without id or coordinates", source, row + 1);
            continue;
        };
        vertices
            .entry(id.clone())
            .or_insert_with(|| {
                order.push(id);
                Vec::new()
            })
            .push(point);
    }

    let lines: Vec<TransmissionLine> = order
        .into_iter()
        .filter_map(|id| vertices.remove(&id).map(|points| TransmissionLine::new(id, points)))
        .collect();

    info!("Loaded {} transmission lines from {}", lines.len(), source);
    Ok(lines)
}

pub fn read_installations<R: Read>(reader: R, source: &str) -> Result<InstallationRegistry, EngineError> {
    let mut reader = csv_reader(reader);
    let headers = reader.headers()?.clone();
    let coords = CoordinateColumns::resolve(&headers, source)?;
    let capacity_column = require_column(&headers, CAPACITY_COLUMNS, source)?;
    let name_column = find_column(&headers, NAME_COLUMNS);

    let mut installations = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let (Some(point), Some(capacity)) = (coords.point(&record), parse_number(&record, capacity_column)) else {
            warn!("{}: skipping installation row {} without coordinates or capacity", source, row + 1);
            continue;
        };
        let name = parse_text(&record, name_column).unwrap_or_else(|| format!("Installation_{}", row));
        installations.push(Installation::new(name, point, capacity));
    }

    let registry = InstallationRegistry::new(installations);
    info!(
        "Loaded {} existing installations ({:.1} MW) from {}",
        registry.len(),
        registry.total_capacity_mw(),
        source
    );
    Ok(registry)
}

pub fn load_wind_samples(csv_path: &str) -> Result<WindDataset, EngineError> {
    let _timing = logging::start_timing("load_wind_samples",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });
    let contents = read_file(csv_path)?;
    read_wind_samples(contents.as_bytes(), csv_path)
}

/// Wind samples with hourly series attached from a second file
pub fn load_wind_with_hourly_series(csv_path: &str, hourly_path: &str) -> Result<WindDataset, EngineError> {
    let dataset = load_wind_samples(csv_path)?;
    let _timing = logging::start_timing("load_hourly_series",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });
    let contents = read_file(hourly_path)?;
    let series = read_hourly_series(contents.as_bytes(), hourly_path)?;
    Ok(dataset.with_hourly_table(series))
}

/// Substations and (optionally) transmission lines as one provider
pub fn load_grid_infrastructure(substations_path: &str, lines_path: Option<&str>) -> Result<GridInfrastructure, EngineError> {
    let _timing = logging::start_timing("load_grid_infrastructure",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });
    let substations = read_substations(read_file(substations_path)?.as_bytes(), substations_path)?;
    let lines = match lines_path {
        Some(path) => read_transmission_lines(read_file(path)?.as_bytes(), path)?,
        None => Vec::new(),
    };
    Ok(GridInfrastructure::new(substations, lines))
}

pub fn load_installations(csv_path: &str) -> Result<InstallationRegistry, EngineError> {
    let _timing = logging::start_timing("load_installations",
        OperationCategory::FileIO { subcategory: FileIOType::DataLoad });
    let contents = read_file(csv_path)?;
    read_installations(contents.as_bytes(), csv_path)
}
