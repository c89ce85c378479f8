//! Shared fixtures for unit tests.

use crate::mesh::Mesh;
use glam::DVec3;
use std::collections::HashSet;

/// Axis-aligned unit cube with its minimum corner at `min`.
///
/// Vertex `i` sits at `min + (i & 1, (i >> 1) & 1, (i >> 2) & 1)`. The
/// twelve faces wind counter-clockwise seen from outside.
pub(crate) fn unit_cube(min: DVec3) -> Mesh {
    let vertices = (0..8)
        .map(|i| min + DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
        .collect();
    let faces = vec![
        [0, 2, 3],
        [0, 3, 1],
        [4, 5, 7],
        [4, 7, 6],
        [0, 1, 5],
        [0, 5, 4],
        [2, 6, 7],
        [2, 7, 3],
        [0, 4, 6],
        [0, 6, 2],
        [1, 3, 7],
        [1, 7, 5],
    ];
    Mesh::from_parts(vertices, faces)
}

/// True when no directed edge is used twice, i.e. every pair of faces
/// sharing an edge traverses it in opposite directions.
pub(crate) fn is_consistently_wound(faces: &[[u32; 3]]) -> bool {
    let mut directed = HashSet::new();
    faces.iter().all(|&[a, b, c]| {
        directed.insert((a, b)) && directed.insert((b, c)) && directed.insert((c, a))
    })
}
