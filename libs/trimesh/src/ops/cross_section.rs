//! # Plane Cross-Sections
//!
//! Slices the mesh surface with a plane and returns the resulting line
//! segments, one per face crossing the plane.
//!
//! ## Algorithm
//!
//! 1. Signed distance of every vertex to the plane, computed once
//! 2. An edge is hit when exactly one endpoint is strictly above the plane;
//!    a vertex on the plane counts as below, so edges lying in the plane
//!    are never hit
//! 3. Hit edges are intersected once per distinct edge
//! 4. A face has zero or two hit edges; two make a segment
//! 5. Segments shorter than the tolerance (a face touching the plane at a
//!    single vertex) are dropped
//!
//! Segments are not stitched into polylines.

use crate::error::{MeshError, MeshResult};
use crate::geometry::PlaneFrame;
use crate::mesh::Mesh;
use glam::{DVec2, DVec3};
use std::collections::HashMap;
use tracing::debug;

/// Segments cut from a mesh by a plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossSection {
    /// A point on the cutting plane
    pub origin: DVec3,
    /// Unit normal of the cutting plane
    pub normal: DVec3,
    /// Segment endpoints in world coordinates
    pub segments: Vec<[DVec3; 2]>,
    frame: PlaneFrame,
}

impl CrossSection {
    /// Segments in the plane's 2D frame (see [`PlaneFrame`]).
    pub fn to_planar(&self) -> Vec<[DVec2; 2]> {
        self.segments
            .iter()
            .map(|[a, b]| [self.frame.project(*a), self.frame.project(*b)])
            .collect()
    }

    /// The plane's 2D frame.
    pub fn frame(&self) -> &PlaneFrame {
        &self.frame
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the plane misses the mesh.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of the segment lengths.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|[a, b]| a.distance(*b)).sum()
    }
}

impl Mesh {
    /// Cuts the mesh with the plane through `origin` with `normal`.
    ///
    /// Derives the edge list if it is not current, which is why this takes
    /// `&mut self`; the geometry is not modified.
    ///
    /// # Errors
    ///
    /// - [`MeshError::PreconditionFailure`] for a mesh without faces or with
    ///   a dangling face index
    /// - [`MeshError::DegenerateGeometry`] for a zero-length normal
    ///
    /// # Example
    ///
    /// ```rust
    /// use trimesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::from_parts(
    ///     vec![DVec3::new(0.0, 0.0, -1.0), DVec3::new(1.0, 0.0, 1.0), DVec3::new(-1.0, 0.0, 1.0)],
    ///     vec![[0, 1, 2]],
    /// );
    /// let section = mesh.cross_section(DVec3::ZERO, DVec3::Z, 1e-9).unwrap();
    /// assert_eq!(section.len(), 1);
    /// assert!((section.total_length() - 1.0).abs() < 1e-12);
    /// ```
    pub fn cross_section(
        &mut self,
        origin: DVec3,
        normal: DVec3,
        tolerance: f64,
    ) -> MeshResult<CrossSection> {
        if self.faces.is_empty() {
            return Err(MeshError::precondition(
                "cannot compute cross section of empty mesh",
            ));
        }
        self.validate_references()?;
        let frame = PlaneFrame::new(origin, normal)?;
        let normal = frame.normal;

        let (edges, vertices) = self.edges_with_vertices();
        let distances: Vec<f64> = vertices.iter().map(|v| (*v - origin).dot(normal)).collect();
        let is_hit = |edge: &[u32; 2]| {
            let d0 = distances[edge[0] as usize];
            let d1 = distances[edge[1] as usize];
            !((d0 > 0.0) ^ (d1 <= 0.0))
        };

        let mut intersections: HashMap<[u32; 2], DVec3> = HashMap::new();
        let mut segments = Vec::new();
        let mut hit_sides = 0usize;

        for sides in edges.chunks_exact(3) {
            let mut points = [DVec3::ZERO; 2];
            let mut hits = 0;
            for edge in sides.iter().filter(|e| is_hit(e)) {
                let point = *intersections.entry(*edge).or_insert_with(|| {
                    let [i, j] = *edge;
                    let d0 = distances[i as usize];
                    let d1 = distances[j as usize];
                    let p0 = vertices[i as usize];
                    let p1 = vertices[j as usize];
                    // d0 and d1 lie on opposite sides, so d0 - d1 is nonzero
                    p0 + (p1 - p0) * (d0 / (d0 - d1))
                });
                if hits < 2 {
                    points[hits] = point;
                }
                hits += 1;
            }
            hit_sides += hits;

            if hits == 2 && points[0].distance(points[1]) > tolerance {
                segments.push(points);
            }
        }

        debug!(
            hit_edges = intersections.len(),
            hit_sides,
            segments = segments.len(),
            "computed cross section"
        );

        Ok(CrossSection {
            origin,
            normal,
            segments,
            frame,
        })
    }

    /// [`Mesh::cross_section`] with the segments projected into the
    /// plane's 2D frame.
    pub fn cross_section_planar(
        &mut self,
        origin: DVec3,
        normal: DVec3,
        tolerance: f64,
    ) -> MeshResult<Vec<[DVec2; 2]>> {
        Ok(self.cross_section(origin, normal, tolerance)?.to_planar())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::unit_cube;
    use approx::assert_relative_eq;
    use config::constants::CROSS_SECTION_TOLERANCE;

    #[test]
    fn test_cube_resting_on_plane_gives_square_outline() {
        let mut cube = unit_cube(DVec3::ZERO);
        let section = cube
            .cross_section(DVec3::ZERO, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();

        assert_eq!(section.len(), 4);
        for [a, b] in &section.segments {
            assert_eq!(a.z, 0.0);
            assert_eq!(b.z, 0.0);
            assert_relative_eq!(a.distance(*b), 1.0, epsilon = 1e-12);
        }
        assert_relative_eq!(section.total_length(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cube_centred_on_plane() {
        let mut cube = unit_cube(DVec3::splat(-0.5));
        let section = cube
            .cross_section(DVec3::ZERO, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();

        // Two triangles per side face, each cut once
        assert_eq!(section.len(), 8);
        for [a, b] in &section.segments {
            assert_relative_eq!(a.z, 0.0, epsilon = 1e-12);
            assert_relative_eq!(b.z, 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(section.total_length(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertices_on_plane_count_as_below() {
        // Same contact face, approached from either side of the plane
        let mut above = unit_cube(DVec3::ZERO);
        let mut below = unit_cube(DVec3::new(0.0, 0.0, -1.0));

        let from_above = above
            .cross_section(DVec3::ZERO, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();
        let from_below = below
            .cross_section(DVec3::ZERO, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();

        assert_eq!(from_above.len(), 4);
        assert!(from_below.is_empty());
    }

    #[test]
    fn test_plane_missing_mesh() {
        let mut cube = unit_cube(DVec3::ZERO);
        let section = cube
            .cross_section(DVec3::new(0.0, 0.0, 3.0), DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();
        assert!(section.is_empty());
    }

    #[test]
    fn test_shared_edges_intersect_to_same_point() {
        let mut cube = unit_cube(DVec3::splat(-0.5));
        let normal = DVec3::new(0.2, 0.3, 1.0);
        let section = cube
            .cross_section(DVec3::new(0.0, 0.0, 0.1), normal, CROSS_SECTION_TOLERANCE)
            .unwrap();

        // Closed surface: every endpoint is shared by exactly two segments
        let mut counts: HashMap<[u64; 3], usize> = HashMap::new();
        for p in section.segments.iter().flatten() {
            *counts.entry([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()]).or_default() += 1;
        }
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_planar_projection() {
        let mut cube = unit_cube(DVec3::ZERO);
        let origin = DVec3::new(0.0, 0.0, 0.5);
        let planar = cube
            .cross_section_planar(origin, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap();
        assert_eq!(planar.len(), 8);
        for [a, b] in planar {
            // Frame for +Z is (X, Y) centred on the origin
            for p in [a, b] {
                assert!((-1e-12..=1.0 + 1e-12).contains(&p.x));
                assert!((-1e-12..=1.0 + 1e-12).contains(&p.y));
            }
        }
    }

    #[test]
    fn test_section_reuses_and_derives_edges() {
        let mut cube = unit_cube(DVec3::ZERO);
        assert!(cube.edges().is_none());
        cube.cross_section(DVec3::ZERO, DVec3::X, CROSS_SECTION_TOLERANCE)
            .unwrap();
        assert_eq!(cube.edges().map(<[_]>::len), Some(36));
    }

    #[test]
    fn test_empty_mesh_rejected() {
        let mut mesh = Mesh::new();
        let err = mesh
            .cross_section(DVec3::ZERO, DVec3::Z, CROSS_SECTION_TOLERANCE)
            .unwrap_err();
        assert_eq!(
            err,
            MeshError::precondition("cannot compute cross section of empty mesh")
        );
    }

    #[test]
    fn test_zero_normal_rejected() {
        let mut cube = unit_cube(DVec3::ZERO);
        let err = cube
            .cross_section(DVec3::ZERO, DVec3::ZERO, CROSS_SECTION_TOLERANCE)
            .unwrap_err();
        assert!(matches!(err, MeshError::DegenerateGeometry { .. }));
    }
}
