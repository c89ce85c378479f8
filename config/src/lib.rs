//! # Config Crate
//!
//! Centralized configuration constants for the trimesh crates.
//! Every tolerance, default radius and file-format size lives here so the
//! geometry kernel and the I/O layer agree on the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, MERGE_TOLERANCE};
//!
//! // Lengths at or below EPSILON are treated as zero
//! let length: f64 = 1e-13;
//! assert!(length <= EPSILON);
//!
//! // Vertices closer than MERGE_TOLERANCE collapse into one
//! let gap = 5e-8;
//! assert!(gap <= MERGE_TOLERANCE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
