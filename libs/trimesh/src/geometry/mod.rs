//! # Geometry Primitives
//!
//! Stateless vector and plane helpers shared by the mesh operations.
//!
//! - `vector` - unit-vector normalization
//! - `plane` - plane-line intersection, distances, plane frames
//! - `analysis` - major axis, surface normal, radial sort
//! - `rows` - rounded-string row deduplication

mod analysis;
mod plane;
mod rows;
mod vector;

pub use analysis::{major_axis, radial_sort, surface_normal};
pub use plane::{
    plane_line_intersection, plane_line_intersections, point_plane_distance,
    point_plane_signed_distance, points_to_plane, PlaneFrame,
};
pub use rows::{row_key, unique_rows, unique_rows_first};
pub use vector::{unitize, unitize_rows};
