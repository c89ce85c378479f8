//! # Spatial Index for Radius Queries
//!
//! Uniform hash grid over a fixed point set. Built once, then answers
//! "all points within `r` of `q`" queries by scanning only the cells that
//! overlap the query ball.
//!
//! ## Example
//!
//! ```rust
//! use trimesh::spatial::PointGrid;
//! use glam::DVec3;
//!
//! let points = [DVec3::ZERO, DVec3::new(0.5, 0.0, 0.0), DVec3::new(3.0, 0.0, 0.0)];
//! let grid = PointGrid::new(&points, 1.0);
//! assert_eq!(grid.within(DVec3::ZERO, 0.5), vec![0, 1]);
//! ```

use config::constants::MIN_GRID_CELL;
use glam::DVec3;
use std::collections::HashMap;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from 3D position.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }
}

/// Hash grid over a borrowed point set.
///
/// The cell edge is the radius the grid was built for, so a query at that
/// radius touches at most 27 cells. Other radii are answered correctly,
/// just with more or fewer cells scanned.
#[derive(Debug)]
pub struct PointGrid<'a> {
    /// Indexed points
    points: &'a [DVec3],
    /// Hash grid: cell -> point indices
    grid: HashMap<CellCoord, Vec<usize>>,
    /// Cell edge length
    cell_size: f64,
}

impl<'a> PointGrid<'a> {
    /// Builds the grid for queries of roughly `radius`.
    pub fn new(points: &'a [DVec3], radius: f64) -> Self {
        let cell_size = if radius.is_finite() {
            radius.max(MIN_GRID_CELL)
        } else {
            MIN_GRID_CELL
        };

        let mut grid: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            grid.entry(CellCoord::from_position(*p, cell_size))
                .or_default()
                .push(i);
        }

        Self {
            points,
            grid,
            cell_size,
        }
    }

    /// Returns the indices of all points within `radius` of `query`,
    /// boundary included, in ascending order.
    pub fn within(&self, query: DVec3, radius: f64) -> Vec<usize> {
        let radius = radius.max(0.0);
        let radius_sq = radius * radius;

        let cell_min = CellCoord::from_position(query - DVec3::splat(radius), self.cell_size);
        let cell_max = CellCoord::from_position(query + DVec3::splat(radius), self.cell_size);
        let span = |lo: i64, hi: i64| (hi.saturating_sub(lo) as u128).saturating_add(1);
        let cells_to_scan = span(cell_min.x, cell_max.x)
            .saturating_mul(span(cell_min.y, cell_max.y))
            .saturating_mul(span(cell_min.z, cell_max.z));

        let mut result = Vec::new();
        if cells_to_scan > self.grid.len() as u128 {
            // Ball covers more cells than are occupied: walk the occupied ones
            for indices in self.grid.values() {
                self.collect_within(indices, query, radius_sq, &mut result);
            }
        } else {
            for cx in cell_min.x..=cell_max.x {
                for cy in cell_min.y..=cell_max.y {
                    for cz in cell_min.z..=cell_max.z {
                        let cell = CellCoord { x: cx, y: cy, z: cz };
                        if let Some(indices) = self.grid.get(&cell) {
                            self.collect_within(indices, query, radius_sq, &mut result);
                        }
                    }
                }
            }
        }

        result.sort_unstable();
        result
    }

    fn collect_within(
        &self,
        indices: &[usize],
        query: DVec3,
        radius_sq: f64,
        result: &mut Vec<usize>,
    ) {
        result.extend(
            indices
                .iter()
                .copied()
                .filter(|&i| self.points[i].distance_squared(query) <= radius_sq),
        );
    }

    /// Returns the number of indexed points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no points are indexed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.grid.len()
    }

    /// Returns the cell size used for hashing.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(points: &[DVec3], query: DVec3, radius: f64) -> Vec<usize> {
        (0..points.len())
            .filter(|&i| points[i].distance(query) <= radius)
            .collect()
    }

    fn lattice() -> Vec<DVec3> {
        let mut points = Vec::new();
        for x in 0..6 {
            for y in 0..6 {
                for z in 0..3 {
                    points.push(DVec3::new(x as f64 * 0.3, y as f64 * 0.3, z as f64 * 0.3));
                }
            }
        }
        points
    }

    #[test]
    fn test_grid_creation() {
        let points = lattice();
        let grid = PointGrid::new(&points, 0.5);
        assert_eq!(grid.len(), points.len());
        assert!(grid.cell_count() > 0);
        assert_eq!(grid.cell_size(), 0.5);
    }

    #[test]
    fn test_within_matches_brute_force() {
        let points = lattice();
        let grid = PointGrid::new(&points, 0.5);
        for query in [DVec3::ZERO, DVec3::new(0.75, 0.6, 0.3), DVec3::splat(10.0)] {
            for radius in [0.0, 0.3, 0.5, 1.7, 100.0] {
                assert_eq!(
                    grid.within(query, radius),
                    brute_force(&points, query, radius),
                    "query {query:?} radius {radius}"
                );
            }
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let points = [DVec3::ZERO, DVec3::new(0.25, 0.0, 0.0)];
        let grid = PointGrid::new(&points, 0.25);
        assert_eq!(grid.within(DVec3::ZERO, 0.25), vec![0, 1]);
    }

    #[test]
    fn test_zero_radius_finds_coincident_points() {
        let points = [DVec3::ONE, DVec3::ZERO, DVec3::ONE];
        let grid = PointGrid::new(&points, 0.0);
        assert_eq!(grid.cell_size(), MIN_GRID_CELL);
        assert_eq!(grid.within(DVec3::ONE, 0.0), vec![0, 2]);
    }

    #[test]
    fn test_empty_grid() {
        let grid = PointGrid::new(&[], 1.0);
        assert!(grid.is_empty());
        assert!(grid.within(DVec3::ZERO, 1.0).is_empty());
    }
}
