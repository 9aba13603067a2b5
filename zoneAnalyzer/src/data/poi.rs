use serde::{Deserialize, Serialize};
use crate::config::const_funcs::degrees_to_km;

/// A latitude/longitude position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GridPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Planar distance in degree space, treating longitude as x and latitude as y
    pub fn degree_distance_to(&self, other: &GridPoint) -> f64 {
        let dx = self.longitude - other.longitude;
        let dy = self.latitude - other.latitude;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn distance_km_to(&self, other: &GridPoint) -> f64 {
        degrees_to_km(self.degree_distance_to(other))
    }

    /// Degree-space distance to the segment `a`–`b`
    pub fn degree_distance_to_segment(&self, a: &GridPoint, b: &GridPoint) -> f64 {
        let (px, py) = (self.longitude, self.latitude);
        let (ax, ay) = (a.longitude, a.latitude);
        let (bx, by) = (b.longitude, b.latitude);

        let (abx, aby) = (bx - ax, by - ay);
        let length_sq = abx * abx + aby * aby;
        if length_sq == 0.0 {
            return self.degree_distance_to(a);
        }

        let t = (((px - ax) * abx + (py - ay) * aby) / length_sq).clamp(0.0, 1.0);
        let closest = GridPoint::new(ay + t * aby, ax + t * abx);
        self.degree_distance_to(&closest)
    }
}

/// Axis-aligned lat/lon rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self { min_lat, max_lat, min_lon, max_lon }
    }

    /// Square box of half-width `buffer` degrees around a point
    pub fn around(point: &GridPoint, buffer: f64) -> Self {
        Self::new(
            point.latitude - buffer,
            point.latitude + buffer,
            point.longitude - buffer,
            point.longitude + buffer,
        )
    }

    /// Shrinks every side inward by `margin` degrees
    pub fn shrink(&self, margin: f64) -> Self {
        Self::new(
            self.min_lat + margin,
            self.max_lat - margin,
            self.min_lon + margin,
            self.max_lon - margin,
        )
    }

    pub fn contains(&self, point: &GridPoint) -> bool {
        point.latitude >= self.min_lat && point.latitude <= self.max_lat &&
        point.longitude >= self.min_lon && point.longitude <= self.max_lon
    }

    pub fn is_well_formed(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lon, self.max_lon].iter().all(|v| v.is_finite()) &&
        self.min_lat <= self.max_lat &&
        self.min_lon <= self.max_lon
    }
}

pub trait POI {
    fn get_point(&self) -> &GridPoint;
    fn get_id(&self) -> &str;
}
