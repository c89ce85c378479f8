//! # Point Cloud Analysis
//!
//! Principal directions of point sets and angular ordering around an axis.
//! Eigen decomposition is delegated to nalgebra's `SymmetricEigen`.

use super::plane::PlaneFrame;
use super::vector::unitize;
use crate::error::{MeshError, MeshResult};
use glam::DVec3;
use nalgebra::{Matrix3, SymmetricEigen};

/// Approximate dominant direction of a point cloud.
///
/// Returns the unit eigenvector of `PᵀP` with the largest eigenvalue, where
/// `P` has one row per point. Points are not centered, so the direction is
/// measured from the coordinate origin. The sign is arbitrary.
///
/// # Errors
///
/// [`MeshError::PreconditionFailure`] for an empty point set.
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::major_axis;
/// use glam::DVec3;
///
/// let points: Vec<DVec3> = (-5..=5).map(|i| DVec3::new(i as f64, 0.01 * i as f64, 0.0)).collect();
/// let axis = major_axis(&points).unwrap();
/// assert!(axis.x.abs() > 0.99);
/// ```
pub fn major_axis(points: &[DVec3]) -> MeshResult<DVec3> {
    extreme_eigenvector(points, Extreme::Largest)
}

/// Best-fit plane normal of a point set.
///
/// Returns the right-singular vector of `P` with the smallest singular value,
/// i.e. the eigenvector of `PᵀP` with the smallest eigenvalue. Like
/// [`major_axis`] the points are used as given; center them first for a
/// plane that does not pass through the origin.
///
/// # Errors
///
/// [`MeshError::PreconditionFailure`] for an empty point set.
pub fn surface_normal(points: &[DVec3]) -> MeshResult<DVec3> {
    extreme_eigenvector(points, Extreme::Smallest)
}

/// Sorts points by angle around an axis.
///
/// Each point is projected onto the two in-plane axes of
/// [`PlaneFrame`] `(origin, normal)` and ordered by `atan2(pr0, pr1)`,
/// ascending. When `origin` is `None` the centroid is used; when `normal`
/// is `None` it is the [`surface_normal`] of the points centered on that
/// origin. Points with equal angles keep their input order.
///
/// # Errors
///
/// [`MeshError::PreconditionFailure`] for an empty point set,
/// [`MeshError::DegenerateGeometry`] for a zero-length normal.
pub fn radial_sort(
    points: &[DVec3],
    origin: Option<DVec3>,
    normal: Option<DVec3>,
) -> MeshResult<Vec<DVec3>> {
    if points.is_empty() {
        return Err(MeshError::precondition("cannot radially sort an empty point set"));
    }
    let origin = origin.unwrap_or_else(|| centroid(points));
    let normal = match normal {
        Some(normal) => normal,
        None => {
            let centered: Vec<DVec3> = points.iter().map(|p| *p - origin).collect();
            surface_normal(&centered)?
        }
    };

    let frame = PlaneFrame::new(origin, normal)?;
    let mut keyed: Vec<(f64, DVec3)> = points
        .iter()
        .map(|&p| {
            let projected = frame.project(p);
            (projected.x.atan2(projected.y), p)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

/// Arithmetic mean of the points. The caller guarantees a non-empty slice.
fn centroid(points: &[DVec3]) -> DVec3 {
    points.iter().copied().sum::<DVec3>() / points.len() as f64
}

#[derive(Debug, Clone, Copy)]
enum Extreme {
    Largest,
    Smallest,
}

fn extreme_eigenvector(points: &[DVec3], extreme: Extreme) -> MeshResult<DVec3> {
    if points.is_empty() {
        return Err(MeshError::precondition("point set is empty"));
    }

    let mut gram = Matrix3::<f64>::zeros();
    for p in points {
        let row = nalgebra::Vector3::new(p.x, p.y, p.z);
        gram += row * row.transpose();
    }

    let eigen = SymmetricEigen::new(gram);
    let values = eigen.eigenvalues;
    let by_value = |a: &usize, b: &usize| values[*a].total_cmp(&values[*b]);
    let index = match extreme {
        Extreme::Largest => (0..3).max_by(by_value),
        Extreme::Smallest => (0..3).min_by(by_value),
    }
    .unwrap_or(0);

    let column = eigen.eigenvectors.column(index);
    unitize(DVec3::new(column[0], column[1], column[2]))
}
