use crate::config::const_funcs::{calc_grid_point_count, calc_grid_steps};
use crate::config::constants::{MAX_GRID_POINTS, OFFSHORE_GRID_MARGIN};
use crate::config::site_type::SiteTypeMode;
use crate::data::poi::{BoundingBox, GridPoint};
use crate::error::EngineError;

/// Candidate grid over a bounding box.
///
/// Points run row by row (latitude outer, longitude inner) from the lower
/// bounds with a fixed step, upper bounds excluded. Positions come from
/// integer step counts so no rounding error accumulates across a row.
/// The point count never exceeds `MAX_GRID_POINTS`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridBuilder {
    bounds: BoundingBox,
    resolution: f64,
    lat_steps: usize,
    lon_steps: usize,
}

impl GridBuilder {
    /// Fails with `InvalidConfig` when the grid would exceed `MAX_GRID_POINTS`.
    pub fn new(bounds: BoundingBox, resolution: f64, mode: SiteTypeMode) -> Result<Self, EngineError> {
        let bounds = match mode {
            SiteTypeMode::Offshore => bounds.shrink(OFFSHORE_GRID_MARGIN),
            SiteTypeMode::Onshore | SiteTypeMode::AutoDetect => bounds,
        };

        let too_large = || {
            EngineError::InvalidConfig(format!(
                "resolution {} over {:?} exceeds {} grid points",
                resolution, bounds, MAX_GRID_POINTS
            ))
        };
        let lat_steps = calc_grid_steps(bounds.min_lat, bounds.max_lat, resolution).ok_or_else(too_large)?;
        let lon_steps = calc_grid_steps(bounds.min_lon, bounds.max_lon, resolution).ok_or_else(too_large)?;
        calc_grid_point_count(lat_steps, lon_steps).ok_or_else(too_large)?;

        Ok(Self { bounds, resolution, lat_steps, lon_steps })
    }

    /// Bounds actually covered after any offshore margin
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn len(&self) -> usize {
        self.lat_steps * self.lon_steps
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh pass over the grid; may be called any number of times.
    pub fn points(&self) -> GridPoints<'_> {
        GridPoints { grid: self, next: 0 }
    }

    fn point_at(&self, index: usize) -> GridPoint {
        let lat_index = index / self.lon_steps;
        let lon_index = index % self.lon_steps;
        GridPoint::new(
            self.bounds.min_lat + lat_index as f64 * self.resolution,
            self.bounds.min_lon + lon_index as f64 * self.resolution,
        )
    }
}

impl<'a> IntoIterator for &'a GridBuilder {
    type Item = GridPoint;
    type IntoIter = GridPoints<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

pub struct GridPoints<'a> {
    grid: &'a GridBuilder,
    next: usize,
}

impl<'a> Iterator for GridPoints<'a> {
    type Item = GridPoint;

    fn next(&mut self) -> Option<GridPoint> {
        if self.next >= self.grid.len() {
            return None;
        }
        let point = self.grid.point_at(self.next);
        self.next += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for GridPoints<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> BoundingBox {
        BoundingBox::new(51.0, 55.5, -11.0, -5.0)
    }

    #[test]
    fn test_counts_match_half_open_range() {
        let grid = GridBuilder::new(region(), 0.1, SiteTypeMode::Onshore).unwrap();
        // 45 latitude rows by 60 longitude columns
        assert_eq!(grid.len(), 45 * 60);
        assert_eq!(grid.points().count(), grid.len());
    }

    #[test]
    fn test_points_stay_inside_bounds() {
        let bbox = BoundingBox::new(52.13, 53.71, -9.4, -7.05);
        for resolution in [0.07, 0.1, 0.25, 0.3] {
            let grid = GridBuilder::new(bbox, resolution, SiteTypeMode::AutoDetect).unwrap();
            assert!(!grid.is_empty());
            for point in &grid {
                assert!(bbox.contains(&point), "{:?} outside {:?}", point, bbox);
                assert!(point.latitude < bbox.max_lat);
                assert!(point.longitude < bbox.max_lon);
            }
        }
    }

    #[test]
    fn test_first_point_is_lower_bound_and_steps_are_exact() {
        let grid = GridBuilder::new(region(), 0.1, SiteTypeMode::Onshore).unwrap();
        let points: Vec<GridPoint> = grid.points().collect();
        assert_eq!(points[0], GridPoint::new(51.0, -11.0));
        // Last column of the first row comes from one multiplication, not 59 additions
        assert_eq!(points[59].longitude, -11.0 + 59.0 * 0.1);
        assert_eq!(points[60].latitude, 51.0 + 0.1);
    }

    #[test]
    fn test_restartable() {
        let grid = GridBuilder::new(region(), 0.5, SiteTypeMode::Onshore).unwrap();
        let first: Vec<GridPoint> = grid.points().collect();
        let second: Vec<GridPoint> = grid.points().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_offshore_mode_shrinks_bounds() {
        let grid = GridBuilder::new(region(), 0.1, SiteTypeMode::Offshore).unwrap();
        let bounds = *grid.bounds();
        assert!((bounds.min_lat - 51.1).abs() < 1e-12);
        assert!((bounds.max_lon + 5.1).abs() < 1e-12);
        for point in grid.points() {
            assert!(point.latitude >= bounds.min_lat && point.latitude < bounds.max_lat);
            assert!(point.longitude >= bounds.min_lon && point.longitude < bounds.max_lon);
        }
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let result = GridBuilder::new(region(), 1e-9, SiteTypeMode::Onshore);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));

        // Each axis alone is within bounds, the product is not
        let wide = BoundingBox::new(-80.0, 80.0, -179.0, 179.0);
        let result = GridBuilder::new(wide, 0.01, SiteTypeMode::Onshore);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_degenerate_box_is_empty() {
        let bbox = BoundingBox::new(53.0, 53.0, -8.0, -7.0);
        let grid = GridBuilder::new(bbox, 0.1, SiteTypeMode::Onshore).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.points().next(), None);
    }
}
