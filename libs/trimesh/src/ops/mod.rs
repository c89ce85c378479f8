//! # Mesh Operations
//!
//! Operations on meshes. Most are inherent methods on [`crate::Mesh`]
//! defined next to their helpers:
//!
//! - `topology` - vertex merging and unreferenced vertex removal
//! - `normals` - face normal derivation
//! - `orient` - face adjacency and winding repair
//! - `cross_section` - plane cross-sections
//! - `hull` - QuickHull and hull assembly

pub mod cross_section;
pub mod hull;
pub mod normals;
pub mod orient;
pub mod remap;
pub mod topology;

pub use cross_section::CrossSection;
pub use hull::quickhull;
pub use remap::Remap;
