//! # Topology Maintenance
//!
//! Operations that rewrite the vertex array and keep every face index
//! pointing at the right vertex afterwards.

use super::remap::Remap;
use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;
use crate::spatial::PointGrid;
use std::collections::HashMap;
use tracing::debug;

const UNASSIGNED: u32 = u32::MAX;

impl Mesh {
    /// Merges vertices closer than `tolerance` (inclusive).
    ///
    /// Vertices are visited in index order. Each unvisited vertex starts a
    /// cluster made of every still-unvisited vertex within `tolerance` of
    /// it, and the cluster becomes one output vertex at the position of the
    /// vertex that started it. Output vertices appear in visit order.
    ///
    /// Faces are rewritten through the returned [`Remap::Dense`] map, and
    /// per-vertex attributes take the entry of the cluster's first vertex.
    /// Faces are neither removed nor reordered, even when they collapse.
    ///
    /// # Errors
    ///
    /// [`MeshError::PreconditionFailure`] for a dangling face index or a
    /// negative or non-finite tolerance.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trimesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::from_parts(
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1e-9, 0.0)],
    ///     vec![[0, 1, 2], [3, 2, 1]],
    /// );
    /// mesh.merge_vertices(1e-7).unwrap();
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.faces()[1], [1, 2, 1]);
    /// ```
    pub fn merge_vertices(&mut self, tolerance: f64) -> MeshResult<Remap> {
        self.validate_references()?;
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(MeshError::precondition(format!(
                "merge tolerance must be finite and non-negative, got {tolerance}"
            )));
        }

        let before = self.vertices.len();
        let mut map = vec![UNASSIGNED; before];
        let mut representatives: Vec<usize> = Vec::new();
        {
            let grid = PointGrid::new(&self.vertices, tolerance);
            for i in 0..before {
                if map[i] != UNASSIGNED {
                    continue;
                }
                let cluster = representatives.len() as u32;
                representatives.push(i);
                for j in grid.within(self.vertices[i], tolerance) {
                    // Already clustered neighbours keep their first assignment
                    if map[j] == UNASSIGNED {
                        map[j] = cluster;
                    }
                }
            }
        }

        let remap = Remap::Dense(map);
        remap.apply(&mut self.faces);
        self.keep_vertices(&representatives);

        debug!(
            before,
            after = self.vertices.len(),
            tolerance,
            "merged vertices"
        );
        Ok(remap)
    }

    /// Drops vertices that no face references.
    ///
    /// Surviving vertices keep their relative order and are renumbered
    /// contiguously from zero. Running it twice is the same as running it
    /// once.
    ///
    /// # Errors
    ///
    /// [`MeshError::PreconditionFailure`] for a dangling face index.
    pub fn remove_unreferenced(&mut self) -> MeshResult<Remap> {
        self.validate_references()?;

        let mut referenced: Vec<u32> = self.faces.iter().flatten().copied().collect();
        referenced.sort_unstable();
        referenced.dedup();

        let map: HashMap<u32, u32> = referenced
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new as u32))
            .collect();
        let remap = Remap::Sparse(map);
        remap.apply(&mut self.faces);

        let before = self.vertices.len();
        let kept: Vec<usize> = referenced.iter().map(|&i| i as usize).collect();
        self.keep_vertices(&kept);

        debug!(
            removed = before - self.vertices.len(),
            remaining = self.vertices.len(),
            "removed unreferenced vertices"
        );
        Ok(remap)
    }

    /// Replaces the vertex array (and every per-vertex attribute) with the
    /// entries at `indices`, in that order. Faces must already be remapped.
    fn keep_vertices(&mut self, indices: &[usize]) {
        self.vertices = select(&self.vertices, indices);
        self.normal_vertex = self.normal_vertex.as_deref().map(|n| select(n, indices));
        self.color_vertex = self.color_vertex.as_deref().map(|c| select(c, indices));
        self.edges = None;
    }
}

fn select<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}
