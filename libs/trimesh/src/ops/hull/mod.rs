//! # Convex Hull
//!
//! QuickHull algorithm for computing 3D convex hulls, and the assembly of
//! a hull mesh from a mesh's vertices.
//!
//! ## Algorithm Overview
//!
//! QuickHull is a divide-and-conquer algorithm:
//! 1. Find extreme points to form initial simplex (tetrahedron)
//! 2. For each face, find the farthest point outside
//! 3. Create new faces from that point to the horizon edges
//! 4. Repeat until no points remain outside
//!
//! ## Assembly
//!
//! [`Mesh::convex_hull`] copies the vertices into a new mesh without
//! faces, merges near-duplicates, triangulates the hull over the merged
//! vertices and drops every vertex the hull does not use.

mod quickhull;

#[cfg(test)]
mod tests;

pub use quickhull::quickhull;

use crate::error::MeshResult;
use crate::mesh::Mesh;
use tracing::info;

impl Mesh {
    /// Computes the convex hull of the mesh's vertices.
    ///
    /// Vertices within `merge_radius` of each other are merged first
    /// (see [`Mesh::merge_vertices`]). The input mesh is not modified.
    ///
    /// # Errors
    ///
    /// [`crate::MeshError::DegenerateGeometry`] when the merged vertices are
    /// fewer than 4 or all coplanar.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trimesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mesh = Mesh::from_parts(
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::splat(0.2)],
    ///     Vec::new(),
    /// );
    /// let hull = mesh.convex_hull(1e-3).unwrap();
    /// assert_eq!(hull.vertex_count(), 4);
    /// assert_eq!(hull.face_count(), 4);
    /// ```
    pub fn convex_hull(&self, merge_radius: f64) -> MeshResult<Mesh> {
        let mut hull = Mesh::from_parts(self.vertices.clone(), Vec::new());
        hull.merge_vertices(merge_radius)?;

        let faces = quickhull(&hull.vertices)?;
        hull.set_faces(faces);
        hull.remove_unreferenced()?;

        info!(
            input_vertices = self.vertices.len(),
            hull_vertices = hull.vertex_count(),
            hull_faces = hull.face_count(),
            "assembled convex hull"
        );
        Ok(hull)
    }
}
