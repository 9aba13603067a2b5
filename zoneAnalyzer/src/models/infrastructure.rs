use serde::{Deserialize, Serialize};
use crate::data::poi::{GridPoint, POI};

/// Transmission substation (110 kV and above)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substation {
    pub id: String,
    pub point: GridPoint,
}

impl Substation {
    pub fn new(id: String, point: GridPoint) -> Self {
        Self { id, point }
    }
}

impl POI for Substation {
    fn get_point(&self) -> &GridPoint {
        &self.point
    }

    fn get_id(&self) -> &str {
        &self.id
    }
}

/// Overhead line as an ordered polyline of vertices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmissionLine {
    pub id: String,
    pub vertices: Vec<GridPoint>,
}

impl TransmissionLine {
    pub fn new(id: String, vertices: Vec<GridPoint>) -> Self {
        Self { id, vertices }
    }

    /// Degree-space distance from `point` to the closest part of the line.
    /// `None` for a line without vertices.
    pub fn degree_distance_to(&self, point: &GridPoint) -> Option<f64> {
        match self.vertices.as_slice() {
            [] => None,
            [only] => Some(point.degree_distance_to(only)),
            vertices => vertices
                .windows(2)
                .map(|pair| point.degree_distance_to_segment(&pair[0], &pair[1]))
                .reduce(f64::min),
        }
    }
}

/// An operating wind farm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Installation {
    pub name: String,
    pub point: GridPoint,
    pub capacity_mw: f64,
}

impl Installation {
    pub fn new(name: String, point: GridPoint, capacity_mw: f64) -> Self {
        Self { name, point, capacity_mw }
    }
}

impl POI for Installation {
    fn get_point(&self) -> &GridPoint {
        &self.point
    }

    fn get_id(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_distance_takes_closest_segment() {
        let line = TransmissionLine::new(
            "L1".to_string(),
            vec![
                GridPoint::new(53.0, -9.0),
                GridPoint::new(53.0, -8.0),
                GridPoint::new(54.0, -8.0),
            ],
        );
        let point = GridPoint::new(53.5, -7.9);
        let distance = line.degree_distance_to(&point).unwrap();
        assert!((distance - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_empty_line_has_no_distance() {
        let line = TransmissionLine::new("empty".to_string(), Vec::new());
        assert!(line.degree_distance_to(&GridPoint::new(53.0, -8.0)).is_none());
    }
}
