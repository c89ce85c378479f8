//! # QuickHull Algorithm
//!
//! 3D convex hull computation using the QuickHull algorithm.
//! Based on the original algorithm by Barber, Dobkin, and Huhdanpaa.
//!
//! ## Algorithm Steps
//!
//! 1. Find 6 extreme points (min/max on each axis)
//! 2. Build initial tetrahedron from 4 non-coplanar points
//! 3. Assign remaining points to faces they're outside of
//! 4. For each face with outside points:
//!    a. Find farthest point
//!    b. Find horizon edges (boundary of visible faces)
//!    c. Create new faces from horizon to farthest point
//!    d. Reassign outside points to new faces
//! 5. Repeat until no faces have outside points

use crate::error::{MeshError, MeshResult};
use config::constants::HULL_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// Computes the convex hull of a set of 3D points.
///
/// Returns triangles as index triples into `points`. Points inside the
/// hull, on its faces, or duplicating a hull vertex are not referenced.
/// Triangles wind counter-clockwise seen from outside.
///
/// # Errors
///
/// [`MeshError::DegenerateGeometry`] when fewer than 4 points are given or
/// all points are collinear or coplanar.
///
/// # Example
///
/// ```rust
/// use trimesh::ops::hull::quickhull;
/// use glam::DVec3;
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::splat(0.1)];
/// let faces = quickhull(&points).unwrap();
/// assert_eq!(faces.len(), 4);
/// assert!(faces.iter().flatten().all(|&i| i != 4));
/// ```
pub fn quickhull(points: &[DVec3]) -> MeshResult<Vec<[u32; 3]>> {
    if points.len() < 4 {
        return Err(MeshError::degenerate(format!(
            "convex hull requires at least 4 points, got {}",
            points.len()
        )));
    }

    let tolerance = HULL_EPSILON * extent(points).max(1.0);
    let faces = build_initial_simplex(points, tolerance)?;
    let faces = quickhull_iterate(faces, points, tolerance);

    Ok(faces
        .iter()
        .map(|f| f.vertices.map(|v| v as u32))
        .collect())
}

/// A face of the convex hull (triangle).
#[derive(Debug, Clone)]
struct HullFace {
    /// Indices of the three vertices
    vertices: [usize; 3],
    /// Outward-pointing unit normal
    normal: DVec3,
    /// Distance from origin along normal
    distance: f64,
    /// Points outside this face (indices into points array)
    outside_points: Vec<usize>,
}

impl HullFace {
    /// Creates a face from three vertex indices, normal by the right-hand rule.
    fn new(v0: usize, v1: usize, v2: usize, points: &[DVec3]) -> Self {
        let p0 = points[v0];
        let normal = (points[v1] - p0)
            .cross(points[v2] - p0)
            .try_normalize()
            .unwrap_or(DVec3::ZERO);

        Self {
            vertices: [v0, v1, v2],
            normal,
            distance: normal.dot(p0),
            outside_points: Vec::new(),
        }
    }

    /// Returns the signed distance from a point to this face's plane.
    fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.distance
    }

    /// Returns true if the point is outside (in front of) this face.
    fn is_outside(&self, point: DVec3, tolerance: f64) -> bool {
        self.signed_distance(point) > tolerance
    }

    /// Finds the farthest outside point.
    fn farthest_point(&self, points: &[DVec3]) -> Option<usize> {
        self.outside_points
            .iter()
            .copied()
            .max_by(|&a, &b| {
                self.signed_distance(points[a])
                    .total_cmp(&self.signed_distance(points[b]))
            })
    }
}

/// Largest coordinate span of the point set.
fn extent(points: &[DVec3]) -> f64 {
    let (min, max) = points
        .iter()
        .fold((points[0], points[0]), |(min, max), p| (min.min(*p), max.max(*p)));
    (max - min).max_element()
}

/// Builds the initial tetrahedron from extreme points and assigns every
/// other point to the first face it is outside of.
fn build_initial_simplex(points: &[DVec3], tolerance: f64) -> MeshResult<Vec<HullFace>> {
    // Find extreme points on each axis
    let mut min_x = 0;
    let mut max_x = 0;
    let mut min_y = 0;
    let mut max_y = 0;
    let mut min_z = 0;
    let mut max_z = 0;

    for (i, p) in points.iter().enumerate() {
        if p.x < points[min_x].x { min_x = i; }
        if p.x > points[max_x].x { max_x = i; }
        if p.y < points[min_y].y { min_y = i; }
        if p.y > points[max_y].y { max_y = i; }
        if p.z < points[min_z].z { min_z = i; }
        if p.z > points[max_z].z { max_z = i; }
    }

    // Find two points with maximum distance
    let extremes = [min_x, max_x, min_y, max_y, min_z, max_z];
    let (p0, p1) = find_farthest_pair(&extremes, points);
    if points[p0].distance(points[p1]) <= tolerance {
        return Err(MeshError::degenerate("all hull input points coincide"));
    }

    // Find third point farthest from line p0-p1
    let p2 = find_farthest_from_line(p0, p1, points, tolerance)?;

    // Find fourth point farthest from plane p0-p1-p2
    let p3 = find_farthest_from_plane(p0, p1, p2, points, tolerance)?;

    // Create initial tetrahedron faces (ensure outward normals)
    let interior = (points[p0] + points[p1] + points[p2] + points[p3]) / 4.0;
    let mut faces = vec![
        create_face_outward(p0, p1, p2, interior, points),
        create_face_outward(p0, p2, p3, interior, points),
        create_face_outward(p0, p3, p1, interior, points),
        create_face_outward(p1, p3, p2, interior, points),
    ];

    let used = [p0, p1, p2, p3];
    for idx in (0..points.len()).filter(|i| !used.contains(i)) {
        assign_outside(&mut faces, idx, points, tolerance);
    }

    Ok(faces)
}

/// Finds the pair of points with maximum distance.
fn find_farthest_pair(indices: &[usize], points: &[DVec3]) -> (usize, usize) {
    let mut max_dist = 0.0;
    let mut best = (indices[0], indices[1]);

    for (i, &a) in indices.iter().enumerate() {
        for &b in indices.iter().skip(i + 1) {
            let dist = (points[a] - points[b]).length_squared();
            if dist > max_dist {
                max_dist = dist;
                best = (a, b);
            }
        }
    }
    best
}

/// Finds the point farthest from a line.
fn find_farthest_from_line(
    p0: usize,
    p1: usize,
    points: &[DVec3],
    tolerance: f64,
) -> MeshResult<usize> {
    let line_dir = (points[p1] - points[p0]).normalize();
    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 {
            continue;
        }
        let v = *p - points[p0];
        let dist = (v - v.dot(line_dir) * line_dir).length();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("all hull input points are collinear"))
}

/// Finds the point farthest from a plane.
fn find_farthest_from_plane(
    p0: usize,
    p1: usize,
    p2: usize,
    points: &[DVec3],
    tolerance: f64,
) -> MeshResult<usize> {
    let normal = (points[p1] - points[p0])
        .cross(points[p2] - points[p0])
        .normalize();

    let mut max_dist = tolerance;
    let mut best = None;

    for (i, p) in points.iter().enumerate() {
        if i == p0 || i == p1 || i == p2 {
            continue;
        }
        let dist = normal.dot(*p - points[p0]).abs();
        if dist > max_dist {
            max_dist = dist;
            best = Some(i);
        }
    }

    best.ok_or_else(|| MeshError::degenerate("all hull input points are coplanar"))
}

/// Creates a face whose normal points away from `interior`.
fn create_face_outward(
    v0: usize,
    v1: usize,
    v2: usize,
    interior: DVec3,
    points: &[DVec3],
) -> HullFace {
    let face = HullFace::new(v0, v1, v2, points);
    if face.signed_distance(interior) > 0.0 {
        HullFace::new(v0, v2, v1, points)
    } else {
        face
    }
}

/// Adds the point to the outside set of the first face it is outside of.
/// Points outside no face are inside the current hull and are dropped.
fn assign_outside(faces: &mut [HullFace], idx: usize, points: &[DVec3], tolerance: f64) {
    if let Some(face) = faces
        .iter_mut()
        .find(|f| f.is_outside(points[idx], tolerance))
    {
        face.outside_points.push(idx);
    }
}

/// Main QuickHull iteration.
///
/// The centroid of the initial tetrahedron stays strictly inside the hull
/// as it grows, so it orients every new face.
fn quickhull_iterate(mut faces: Vec<HullFace>, points: &[DVec3], tolerance: f64) -> Vec<HullFace> {
    let interior = {
        let mut sum = DVec3::ZERO;
        for face in &faces {
            for &v in &face.vertices {
                sum += points[v];
            }
        }
        sum / (3 * faces.len()) as f64
    };

    // Each pass adds one point to the hull
    let max_iterations = points.len();
    for _ in 0..max_iterations {
        // Find a face with outside points
        let Some(face_idx) = faces.iter().position(|f| !f.outside_points.is_empty()) else {
            break;
        };

        // Find farthest point from this face
        let Some(farthest) = faces[face_idx].farthest_point(points) else {
            break;
        };
        let apex = points[farthest];

        // Find all faces visible from this point
        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_outside(apex, tolerance))
            .map(|(i, _)| i)
            .collect();

        // Find horizon edges (edges of visible faces not shared with other visible faces)
        let horizon = find_horizon_edges(&faces, &visible);

        // Collect outside points from visible faces
        let mut reassign: Vec<usize> = Vec::new();
        for &idx in &visible {
            reassign.extend(&faces[idx].outside_points);
        }
        reassign.retain(|&p| p != farthest);

        // Remove visible faces (in reverse order to preserve indices)
        for &idx in visible.iter().rev() {
            faces.swap_remove(idx);
        }

        // Create new faces from horizon edges to farthest point
        let first_new = faces.len();
        for (e0, e1) in horizon {
            faces.push(create_face_outward(e0, e1, farthest, interior, points));
        }

        // Reassign outside points to new faces
        for idx in reassign {
            assign_outside(&mut faces[first_new..], idx, points, tolerance);
        }
    }

    faces
}

/// Finds horizon edges from visible faces.
fn find_horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut edge_count: HashMap<(usize, usize), usize> = HashMap::new();

    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            *edge_count.entry(key).or_insert(0) += 1;
        }
    }

    // Horizon edges appear exactly once among visible faces
    let mut horizon = Vec::new();
    for &idx in visible {
        let v = faces[idx].vertices;
        for (a, b) in [(v[0], v[1]), (v[1], v[2]), (v[2], v[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if edge_count.get(&key) == Some(&1) {
                // Preserve winding order
                horizon.push((a, b));
            }
        }
    }

    horizon
}
