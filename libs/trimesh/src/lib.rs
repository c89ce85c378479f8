//! # Trimesh
//!
//! In-memory triangle mesh with topology maintenance and geometric queries.
//!
//! ## Architecture
//!
//! ```text
//! geometry (vectors, planes) → Mesh → ops (topology, normals, orient,
//!                                         cross_section, hull)
//!                          spatial ↗
//! ```
//!
//! Every operation that rewrites the vertex array also rewrites the face
//! indices, so faces never reference a missing vertex. The edge list is
//! derived lazily from the faces and discarded whenever they change.
//!
//! ## Usage
//!
//! ```rust
//! use trimesh::Mesh;
//! use glam::DVec3;
//!
//! let mut mesh = Mesh::from_parts(
//!     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X, DVec3::new(5.0, 5.0, 5.0)],
//!     vec![[0, 1, 2], [2, 3, 0]],
//! );
//! mesh.merge_vertices(config::constants::MERGE_TOLERANCE).unwrap();
//! mesh.remove_unreferenced().unwrap();
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.faces(), &[[0, 1, 2], [2, 1, 0]]);
//! ```

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod spatial;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{MeshError, MeshResult};
pub use mesh::Mesh;
pub use ops::{CrossSection, Remap};
pub use spatial::PointGrid;
