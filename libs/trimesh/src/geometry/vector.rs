//! # Vector Helpers
//!
//! Unit-vector normalization with an explicit rejection policy: a vector
//! too short to carry a direction is an error, never a NaN.

use crate::error::{MeshError, MeshResult};
use config::constants::EPSILON;
use glam::DVec3;

/// Divides a vector by its Euclidean length.
///
/// Fails with [`MeshError::DegenerateGeometry`] when the length is not
/// finite or is at most [`EPSILON`].
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::unitize;
/// use glam::DVec3;
///
/// let v = unitize(DVec3::new(3.0, 4.0, 0.0)).unwrap();
/// assert!((v.length() - 1.0).abs() < 1e-12);
/// assert!(unitize(DVec3::ZERO).is_err());
/// ```
pub fn unitize(v: DVec3) -> MeshResult<DVec3> {
    let length = v.length();
    if !length.is_finite() || length <= EPSILON {
        return Err(MeshError::degenerate(format!(
            "cannot unitize vector {v:?} of length {length}"
        )));
    }
    Ok(v / length)
}

/// Unitizes every row. Fails on the first degenerate row.
pub fn unitize_rows(rows: &[DVec3]) -> MeshResult<Vec<DVec3>> {
    rows.iter().map(|v| unitize(*v)).collect()
}
