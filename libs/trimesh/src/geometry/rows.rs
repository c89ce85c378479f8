//! # Row Deduplication
//!
//! Exact-after-rounding duplicate detection: rows are compared by a string
//! key built from each coordinate printed with a fixed number of decimals.
//! Two rows that differ only past that precision are the same row.

use std::collections::{HashMap, HashSet};

/// Builds the comparison key of a row.
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::row_key;
///
/// assert_eq!(row_key(&[1.0, 2.5], 3), "1.000,2.500");
/// ```
pub fn row_key(row: &[f64], digits: usize) -> String {
    row.iter()
        .map(|v| format!("{v:.digits$}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Duplicate-detection mask.
///
/// `true` means the row's key occurs exactly once. Every member of a
/// duplicate group is marked `false`, including its first occurrence; use
/// [`unique_rows_first`] for a keep-first mask.
///
/// # Example
///
/// ```rust
/// use trimesh::geometry::unique_rows;
///
/// let rows = [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// assert_eq!(unique_rows(&rows, 6), vec![false, false, true]);
/// ```
pub fn unique_rows<R: AsRef<[f64]>>(rows: &[R], digits: usize) -> Vec<bool> {
    let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(rows.len());
    let mut unique = vec![true; rows.len()];

    for (index, row) in rows.iter().enumerate() {
        let key = row_key(row.as_ref(), digits);
        match first_seen.get(&key) {
            Some(&first) => {
                unique[index] = false;
                unique[first] = false;
            }
            None => {
                first_seen.insert(key, index);
            }
        }
    }

    unique
}

/// Keep-first mask: `true` for the first occurrence of every key.
pub fn unique_rows_first<R: AsRef<[f64]>>(rows: &[R], digits: usize) -> Vec<bool> {
    let mut seen: HashSet<String> = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| seen.insert(row_key(row.as_ref(), digits)))
        .collect()
}
