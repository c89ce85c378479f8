//! # Configuration Constants
//!
//! Centralized constants for mesh processing. All geometric tolerances,
//! default radii and binary format sizes are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Degeneracy thresholds for floating-point predicates
//! - **Topology**: Default radii for vertex merging
//! - **Cross-Section**: Slicing tolerances
//! - **Formats**: Binary STL layout and row-key formatting

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Threshold below which a length or dot product is treated as zero.
///
/// Used to reject zero-length vectors when unitizing and to detect lines
/// that run parallel to a plane.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn is_degenerate(length: f64) -> bool {
///     !length.is_finite() || length <= EPSILON
/// }
///
/// assert!(is_degenerate(0.0));
/// assert!(!is_degenerate(1e-6));
/// ```
pub const EPSILON: f64 = 1e-12;

/// Tolerance used by QuickHull to decide whether a point lies outside a face.
///
/// Scaled by the largest coordinate span of the input (when above 1).
/// Points closer to a face plane than the scaled value are considered on
/// the hull surface and do not spawn new faces.
pub const HULL_EPSILON: f64 = 1e-10;

// =============================================================================
// TOPOLOGY CONSTANTS
// =============================================================================

/// Default radius for merging coincident vertices.
///
/// Vertices whose Euclidean distance is at most this value collapse into
/// the first one visited.
///
/// # Example
///
/// ```rust
/// use config::constants::MERGE_TOLERANCE;
///
/// fn vertices_should_merge(a: [f64; 3], b: [f64; 3]) -> bool {
///     let d: f64 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum();
///     d.sqrt() <= MERGE_TOLERANCE
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [0.0, 0.0, 1e-8]));
/// ```
pub const MERGE_TOLERANCE: f64 = 1e-7;

/// Default merge radius applied before computing a convex hull.
///
/// Hull algorithms are unstable on nearly coincident input, so points are
/// merged more aggressively than in ordinary cleanup.
pub const HULL_MERGE_RADIUS: f64 = 1e-3;

/// Smallest cell edge used by the point hash grid.
///
/// A zero merge radius would otherwise produce zero-sized cells.
pub const MIN_GRID_CELL: f64 = 1e-9;

// =============================================================================
// CROSS-SECTION CONSTANTS
// =============================================================================

/// Default tolerance for plane cross-sections.
///
/// Segments whose two endpoints are at most this far apart are discarded; they
/// come from faces that only touch the plane at a vertex.
pub const CROSS_SECTION_TOLERANCE: f64 = 1e-9;

// =============================================================================
// FORMAT CONSTANTS
// =============================================================================

/// Number of decimal digits used when hashing rows for duplicate detection.
///
/// # Example
///
/// ```rust
/// use config::constants::ROW_KEY_DIGITS;
///
/// let key = format!("{:.*}", ROW_KEY_DIGITS, 1.0_f64 / 3.0);
/// assert_eq!(key, "0.333333");
/// ```
pub const ROW_KEY_DIGITS: usize = 6;

/// Size of the binary STL header in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one binary STL triangle record in bytes.
///
/// 12 bytes normal, 36 bytes vertices, 2 bytes attribute.
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Number of leading bytes inspected when deciding between ASCII and binary STL.
pub const STL_SNIFF_SIZE: usize = 1024;
