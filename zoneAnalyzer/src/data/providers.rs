// Read-only data collaborators consulted by the scan.
//
// Providers answer nearest-distance queries only; the scan never sees bulk
// geometry and never writes to a provider.

use serde::{Deserialize, Serialize};
use crate::data::poi::{GridPoint, POI};
use crate::config::const_funcs::degrees_to_km;
use crate::models::infrastructure::{Installation, Substation, TransmissionLine};

/// Wind resource record at the reference measurement height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    pub latitude: f64,
    pub longitude: f64,
    pub wind_speed: f64,
    /// Standard deviation of wind speed when the dataset carries one
    pub wind_std: Option<f64>,
}

impl WindSample {
    pub fn new(latitude: f64, longitude: f64, wind_speed: f64) -> Self {
        Self { latitude, longitude, wind_speed, wind_std: None }
    }

    pub fn with_std(mut self, wind_std: f64) -> Self {
        self.wind_std = Some(wind_std);
        self
    }

    pub fn point(&self) -> GridPoint {
        GridPoint::new(self.latitude, self.longitude)
    }
}

pub trait WindResourceProvider {
    fn is_empty(&self) -> bool;

    /// Nearest sample by Euclidean lat/lon distance; first minimum wins.
    fn nearest_sample(&self, point: &GridPoint) -> Option<WindSample>;

    /// Hourly wind speed series (m/s) at the point, when available
    fn hourly_series(&self, _point: &GridPoint) -> Option<&[f64]> {
        None
    }
}

pub trait GridInfrastructureProvider {
    fn has_infrastructure(&self) -> bool;
    fn nearest_substation_km(&self, point: &GridPoint) -> Option<f64>;
    fn nearest_line_km(&self, point: &GridPoint) -> Option<f64>;
}

pub trait ExistingInstallationsProvider {
    /// `None` when there are no installations at all
    fn nearest_installation_km(&self, point: &GridPoint) -> Option<f64>;
}

fn nearest_poi_km<'a, P: POI + 'a>(items: impl Iterator<Item = &'a P>, point: &GridPoint) -> Option<f64> {
    items
        .map(|item| item.get_point().distance_km_to(point))
        .reduce(f64::min)
}

/// In-memory wind resource table
#[derive(Debug, Clone, Default)]
pub struct WindDataset {
    samples: Vec<WindSample>,
    hourly: Vec<(GridPoint, Vec<f64>)>,
}

impl WindDataset {
    pub fn new(samples: Vec<WindSample>) -> Self {
        Self { samples, hourly: Vec::new() }
    }

    /// Attaches an hourly series; lookups match the nearest attached point.
    pub fn with_hourly_series(mut self, point: GridPoint, series: Vec<f64>) -> Self {
        self.hourly.push((point, series));
        self
    }

    /// Attaches every series in `series`, keeping their order.
    pub fn with_hourly_table(mut self, series: Vec<(GridPoint, Vec<f64>)>) -> Self {
        self.hourly.extend(series);
        self
    }

    pub fn hourly_series_count(&self) -> usize {
        self.hourly.len()
    }

    pub fn samples(&self) -> &[WindSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }
}

impl WindResourceProvider for WindDataset {
    fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn nearest_sample(&self, point: &GridPoint) -> Option<WindSample> {
        let mut best: Option<(f64, &WindSample)> = None;
        for sample in &self.samples {
            let distance = sample.point().degree_distance_to(point);
            // Strict comparison keeps the first record on ties
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, sample));
            }
        }
        best.map(|(_, sample)| *sample)
    }

    fn hourly_series(&self, point: &GridPoint) -> Option<&[f64]> {
        let mut best: Option<(f64, &[f64])> = None;
        for (series_point, series) in &self.hourly {
            let distance = series_point.degree_distance_to(point);
            if best.map_or(true, |(best_distance, _)| distance < best_distance) {
                best = Some((distance, series.as_slice()));
            }
        }
        best.map(|(_, series)| series)
    }
}

/// In-memory substations and transmission lines
#[derive(Debug, Clone, Default)]
pub struct GridInfrastructure {
    substations: Vec<Substation>,
    lines: Vec<TransmissionLine>,
}

impl GridInfrastructure {
    pub fn new(substations: Vec<Substation>, lines: Vec<TransmissionLine>) -> Self {
        Self { substations, lines }
    }

    pub fn substation_count(&self) -> usize {
        self.substations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

impl GridInfrastructureProvider for GridInfrastructure {
    fn has_infrastructure(&self) -> bool {
        !self.substations.is_empty() || self.lines.iter().any(|line| !line.vertices.is_empty())
    }

    fn nearest_substation_km(&self, point: &GridPoint) -> Option<f64> {
        nearest_poi_km(self.substations.iter(), point)
    }

    fn nearest_line_km(&self, point: &GridPoint) -> Option<f64> {
        self.lines
            .iter()
            .filter_map(|line| line.degree_distance_to(point))
            .reduce(f64::min)
            .map(degrees_to_km)
    }
}

/// In-memory registry of operating wind farms
#[derive(Debug, Clone, Default)]
pub struct InstallationRegistry {
    installations: Vec<Installation>,
}

impl InstallationRegistry {
    pub fn new(installations: Vec<Installation>) -> Self {
        Self { installations }
    }

    pub fn len(&self) -> usize {
        self.installations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installations.is_empty()
    }

    pub fn total_capacity_mw(&self) -> f64 {
        self.installations.iter().map(|i| i.capacity_mw).sum()
    }
}

impl ExistingInstallationsProvider for InstallationRegistry {
    fn nearest_installation_km(&self, point: &GridPoint) -> Option<f64> {
        nearest_poi_km(self.installations.iter(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_sample_prefers_first_on_tie() {
        let dataset = WindDataset::new(vec![
            WindSample::new(53.0, -8.1, 7.0),
            WindSample::new(53.0, -7.9, 9.0),
        ]);
        let sample = dataset.nearest_sample(&GridPoint::new(53.0, -8.0)).unwrap();
        assert_eq!(sample.wind_speed, 7.0);
    }

    #[test]
    fn test_nearest_sample_on_empty_dataset() {
        let dataset = WindDataset::default();
        assert!(dataset.is_empty());
        assert!(dataset.nearest_sample(&GridPoint::new(53.0, -8.0)).is_none());
    }

    #[test]
    fn test_hourly_series_matches_nearest_attached_point() {
        let dataset = WindDataset::new(vec![WindSample::new(53.0, -8.0, 9.0)])
            .with_hourly_series(GridPoint::new(53.0, -8.0), vec![8.0, 9.0])
            .with_hourly_series(GridPoint::new(54.0, -8.0), vec![12.0]);
        assert_eq!(dataset.hourly_series_count(), 2);
        assert_eq!(dataset.hourly_series(&GridPoint::new(53.2, -8.0)), Some(&[8.0, 9.0][..]));
        assert_eq!(dataset.hourly_series(&GridPoint::new(53.9, -8.0)), Some(&[12.0][..]));
        assert_eq!(WindDataset::default().hourly_series(&GridPoint::new(53.0, -8.0)), None);
    }

    #[test]
    fn test_grid_infrastructure_distances() {
        let grid = GridInfrastructure::new(
            vec![Substation::new("S1".to_string(), GridPoint::new(53.1, -8.0))],
            vec![TransmissionLine::new(
                "L1".to_string(),
                vec![GridPoint::new(52.0, -8.05), GridPoint::new(54.0, -8.05)],
            )],
        );
        let point = GridPoint::new(53.0, -8.0);
        assert!((grid.nearest_substation_km(&point).unwrap() - 11.1).abs() < 1e-6);
        assert!((grid.nearest_line_km(&point).unwrap() - 5.55).abs() < 1e-6);
        assert!(grid.has_infrastructure());
        assert!(!GridInfrastructure::default().has_infrastructure());
    }

    #[test]
    fn test_no_installations_reports_none() {
        let registry = InstallationRegistry::default();
        assert!(registry.nearest_installation_km(&GridPoint::new(53.0, -8.0)).is_none());
    }
}
