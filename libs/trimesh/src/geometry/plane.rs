//! # Plane Queries
//!
//! Plane-line intersection, point-plane distances and the deterministic
//! 2D frame used to flatten points lying in a plane.
//!
//! A plane is given as an `(origin, normal)` pair: `{x : (x - origin)·normal = 0}`.
//! The normal does not need to be unit length.

use super::vector::unitize;
use crate::error::{MeshError, MeshResult};
use config::constants::EPSILON;
use glam::{DVec2, DVec3};

/// Minimum length of the seed vector after removing its normal component.
/// Shorter seeds are nearly parallel to the normal and fall back to a world axis.
const MIN_SEED_REJECTION: f64 = 1e-3;

// =============================================================================
// INTERSECTION
// =============================================================================

/// Intersects the infinite line through `p0` and `p1` with a plane.
///
/// With `dir = unitize(p1 - p0)` the line is `p0 + t * dir` and
/// `t = n·(origin - p0) / (n·dir)`.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] when the normal or the line has zero
/// length, or when the line is parallel to the plane.
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::plane_line_intersection;
/// use glam::DVec3;
///
/// let hit = plane_line_intersection(
///     DVec3::ZERO,
///     DVec3::Z,
///     DVec3::new(1.0, 1.0, -1.0),
///     DVec3::new(1.0, 1.0, 3.0),
/// )
/// .unwrap();
/// assert!(hit.z.abs() < 1e-12);
/// ```
pub fn plane_line_intersection(
    origin: DVec3,
    normal: DVec3,
    p0: DVec3,
    p1: DVec3,
) -> MeshResult<DVec3> {
    let normal = unitize(normal)?;
    intersect_unit(origin, normal, p0, p1)
}

/// Batched [`plane_line_intersection`], one result per endpoint pair.
pub fn plane_line_intersections(
    origin: DVec3,
    normal: DVec3,
    lines: &[[DVec3; 2]],
) -> MeshResult<Vec<DVec3>> {
    let normal = unitize(normal)?;
    lines
        .iter()
        .map(|&[p0, p1]| intersect_unit(origin, normal, p0, p1))
        .collect()
}

/// Intersection against a plane whose normal is already unit length.
fn intersect_unit(
    origin: DVec3,
    unit_normal: DVec3,
    p0: DVec3,
    p1: DVec3,
) -> MeshResult<DVec3> {
    let dir = unitize(p1 - p0)?;
    let denom = unit_normal.dot(dir);
    if denom.abs() <= EPSILON {
        return Err(MeshError::degenerate(format!(
            "line through {p0:?} and {p1:?} is parallel to the plane"
        )));
    }
    let t = unit_normal.dot(origin - p0) / denom;
    Ok(p0 + dir * t)
}

// =============================================================================
// DISTANCE
// =============================================================================

/// Signed distance of each point to the plane, positive on the normal side.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] for a zero-length normal.
pub fn point_plane_signed_distance(
    origin: DVec3,
    normal: DVec3,
    points: &[DVec3],
) -> MeshResult<Vec<f64>> {
    let normal = unitize(normal)?;
    Ok(points.iter().map(|p| (*p - origin).dot(normal)).collect())
}

/// Unsigned distance of each point to the plane.
pub fn point_plane_distance(
    origin: DVec3,
    normal: DVec3,
    points: &[DVec3],
) -> MeshResult<Vec<f64>> {
    let mut distances = point_plane_signed_distance(origin, normal, points)?;
    for d in &mut distances {
        *d = d.abs();
    }
    Ok(distances)
}

// =============================================================================
// PLANE FRAME
// =============================================================================

/// An orthonormal 2D coordinate frame embedded in a plane.
///
/// The in-plane axes are a pure function of the normal:
///
/// 1. `n = unitize(normal)`
/// 2. seed `s = (n.z, n.x, n.y)`; `axis0 = unitize(s - (s·n) n)`
/// 3. if the seed is nearly parallel to `n`, the world axis with the
///    smallest `|n_i|` (first on ties) is used as seed instead
/// 4. `axis1 = n × axis0`
///
/// For a `+Z` normal the frame axes are `+X` and `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFrame {
    /// Point of the plane mapped to the 2D origin
    pub origin: DVec3,
    /// Unit plane normal
    pub normal: DVec3,
    /// First in-plane axis (2D x)
    pub axis0: DVec3,
    /// Second in-plane axis (2D y)
    pub axis1: DVec3,
}

impl PlaneFrame {
    /// Builds the frame for a plane.
    ///
    /// # Errors
    ///
    /// [`MeshError::DegenerateGeometry`] for a zero-length normal.
    pub fn new(origin: DVec3, normal: DVec3) -> MeshResult<Self> {
        let normal = unitize(normal)?;

        let seed = DVec3::new(normal.z, normal.x, normal.y);
        let rejected = reject(seed, normal);
        let axis0 = if rejected.length() >= MIN_SEED_REJECTION {
            unitize(rejected)?
        } else {
            unitize(reject(least_aligned_axis(normal), normal))?
        };
        let axis1 = normal.cross(axis0);

        Ok(Self {
            origin,
            normal,
            axis0,
            axis1,
        })
    }

    /// Projects a point into frame coordinates.
    #[inline]
    pub fn project(&self, point: DVec3) -> DVec2 {
        let v = point - self.origin;
        DVec2::new(v.dot(self.axis0), v.dot(self.axis1))
    }

    /// Maps frame coordinates back onto the plane.
    #[inline]
    pub fn lift(&self, point: DVec2) -> DVec3 {
        self.origin + self.axis0 * point.x + self.axis1 * point.y
    }
}

/// Projects points onto the plane's 2D frame (see [`PlaneFrame`]).
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::points_to_plane;
/// use glam::{DVec2, DVec3};
///
/// let flat = points_to_plane(&[DVec3::new(2.0, 3.0, 7.0)], DVec3::ZERO, DVec3::Z).unwrap();
/// assert_eq!(flat, vec![DVec2::new(2.0, 3.0)]);
/// ```
pub fn points_to_plane(
    points: &[DVec3],
    origin: DVec3,
    normal: DVec3,
) -> MeshResult<Vec<DVec2>> {
    let frame = PlaneFrame::new(origin, normal)?;
    Ok(points.iter().map(|p| frame.project(*p)).collect())
}

/// Removes the component of `v` along the unit vector `n`.
#[inline]
fn reject(v: DVec3, n: DVec3) -> DVec3 {
    v - n * v.dot(n)
}

fn least_aligned_axis(n: DVec3) -> DVec3 {
    let a = n.abs();
    if a.x <= a.y && a.x <= a.z {
        DVec3::X
    } else if a.y <= a.z {
        DVec3::Y
    } else {
        DVec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_intersection_on_oblique_plane() {
        let origin = DVec3::new(1.0, 1.0, 1.0);
        let normal = DVec3::new(1.0, 1.0, 1.0);
        let hit =
            plane_line_intersection(origin, normal, DVec3::ZERO, DVec3::new(4.0, 4.0, 4.0))
                .unwrap();
        assert_relative_eq!(hit.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hit.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hit.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersection_extends_past_segment() {
        // Infinite line, not segment: both endpoints above the plane
        let hit = plane_line_intersection(
            DVec3::ZERO,
            DVec3::Z,
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(hit.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersection_parallel_line_is_degenerate() {
        let result = plane_line_intersection(
            DVec3::ZERO,
            DVec3::Z,
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
        );
        assert!(matches!(result, Err(MeshError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_intersections_batched() {
        let lines = [
            [DVec3::new(0.0, 0.0, -1.0), DVec3::new(0.0, 0.0, 1.0)],
            [DVec3::new(1.0, 0.0, -1.0), DVec3::new(1.0, 0.0, 3.0)],
        ];
        let hits = plane_line_intersections(DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0), &lines)
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits[1].x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hits[1].z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_signed_distance_scales_by_normal_length() {
        let d = point_plane_signed_distance(
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 10.0),
            &[DVec3::new(5.0, 5.0, 3.0), DVec3::ZERO],
        )
        .unwrap();
        assert_relative_eq!(d[0], 2.0);
        assert_relative_eq!(d[1], -1.0);

        let unsigned =
            point_plane_distance(DVec3::new(0.0, 0.0, 1.0), DVec3::Z, &[DVec3::ZERO]).unwrap();
        assert_relative_eq!(unsigned[0], 1.0);
    }

    #[test]
    fn test_frame_for_z_normal_is_xy() {
        let frame = PlaneFrame::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(frame.axis0, DVec3::X);
        assert_eq!(frame.axis1, DVec3::Y);
    }

    #[test]
    fn test_frame_is_orthonormal_and_reproducible() {
        for normal in [
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(-2.0, 0.5, 0.25),
        ] {
            let a = PlaneFrame::new(DVec3::ZERO, normal).unwrap();
            let b = PlaneFrame::new(DVec3::ONE, normal).unwrap();
            assert_eq!(a.axis0, b.axis0);
            assert_eq!(a.axis1, b.axis1);
            assert_relative_eq!(a.axis0.length(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(a.axis1.length(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(a.axis0.dot(a.normal), 0.0, epsilon = 1e-12);
            assert_relative_eq!(a.axis1.dot(a.normal), 0.0, epsilon = 1e-12);
            assert_relative_eq!(a.axis0.dot(a.axis1), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_project_then_lift() {
        let frame = PlaneFrame::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.3, -0.4, 0.8)).unwrap();
        let on_plane = frame.lift(DVec2::new(2.5, -1.0));
        let back = frame.project(on_plane);
        assert_relative_eq!(back.x, 2.5, epsilon = 1e-12);
        assert_relative_eq!(back.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_normal_rejected() {
        assert!(points_to_plane(&[DVec3::X], DVec3::ZERO, DVec3::ZERO).is_err());
        assert!(point_plane_signed_distance(DVec3::ZERO, DVec3::ZERO, &[DVec3::X]).is_err());
    }
}
