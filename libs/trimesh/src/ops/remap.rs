//! # Vertex Index Remapping
//!
//! Old-to-new vertex index maps produced by topology operations and applied
//! to every face index in place.

use std::collections::HashMap;

/// Mapping from old vertex indices to new ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remap {
    /// Every old index has a target: `new = map[old]`.
    Dense(Vec<u32>),
    /// Only some old indices have a target; the rest are left unchanged.
    Sparse(HashMap<u32, u32>),
}

impl Remap {
    /// Returns the new index for `old`, if the map has one.
    pub fn get(&self, old: u32) -> Option<u32> {
        match self {
            Self::Dense(map) => map.get(old as usize).copied(),
            Self::Sparse(map) => map.get(&old).copied(),
        }
    }

    /// Rewrites every face index in place.
    ///
    /// Indices without a target keep their value.
    pub fn apply(&self, faces: &mut [[u32; 3]]) {
        for face in faces.iter_mut() {
            for index in face.iter_mut() {
                if let Some(new) = self.get(*index) {
                    *index = new;
                }
            }
        }
    }

    /// Number of old indices with a target.
    pub fn len(&self) -> usize {
        match self {
            Self::Dense(map) => map.len(),
            Self::Sparse(map) => map.len(),
        }
    }

    /// Returns true if no index has a target.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
