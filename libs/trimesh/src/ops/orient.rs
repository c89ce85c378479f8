//! # Face Adjacency and Winding Repair
//!
//! The face graph (faces sharing an edge are neighbours) and a
//! breadth-first pass that makes the winding of every connected component
//! agree with its lowest-index face.

use crate::error::MeshResult;
use crate::mesh::{sorted_pair, Mesh};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

impl Mesh {
    /// Maps every sorted edge to the faces that use it, in face order.
    pub fn edge_faces(&self) -> HashMap<[u32; 2], Vec<usize>> {
        let mut map: HashMap<[u32; 2], Vec<usize>> = HashMap::with_capacity(self.faces.len() * 2);
        for (face_index, &[a, b, c]) in self.faces.iter().enumerate() {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                let faces = map.entry(sorted_pair(i, j)).or_default();
                // A face using the same edge twice is listed once
                if faces.last() != Some(&face_index) {
                    faces.push(face_index);
                }
            }
        }
        map
    }

    /// Neighbouring faces of every face, ascending and without repeats.
    pub fn face_adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.faces.len()];
        for faces in self.edge_faces().values() {
            for &f in faces {
                adjacency[f].extend(faces.iter().copied().filter(|&g| g != f));
            }
        }
        for neighbours in &mut adjacency {
            neighbours.sort_unstable();
            neighbours.dedup();
        }
        adjacency
    }

    /// Makes face winding consistent across shared edges.
    ///
    /// Each connected component keeps the winding of its lowest-index face.
    /// Visiting outward from it, a neighbour that runs through a shared edge
    /// in the same direction as the current face is flipped by swapping its
    /// last two indices; its stored face normal, if any, is negated. On an
    /// edge shared by more than two faces every neighbour is oriented
    /// against the current face.
    ///
    /// Returns the number of flipped faces.
    ///
    /// # Errors
    ///
    /// [`crate::MeshError::PreconditionFailure`] for a dangling face index.
    pub fn fix_normals(&mut self) -> MeshResult<usize> {
        self.validate_references()?;

        let edge_faces = self.edge_faces();
        let mut visited = vec![false; self.faces.len()];
        let mut queue = VecDeque::new();
        let mut flipped = 0;
        let mut components = 0;

        for seed in 0..self.faces.len() {
            if visited[seed] {
                continue;
            }
            components += 1;
            visited[seed] = true;
            queue.push_back(seed);

            while let Some(current) = queue.pop_front() {
                let [a, b, c] = self.faces[current];
                for (i, j) in [(a, b), (b, c), (c, a)] {
                    let Some(neighbours) = edge_faces.get(&sorted_pair(i, j)) else {
                        continue;
                    };
                    for &next in neighbours {
                        if visited[next] {
                            continue;
                        }
                        visited[next] = true;
                        if traverses(self.faces[next], i, j) {
                            self.flip_face(next);
                            flipped += 1;
                        }
                        queue.push_back(next);
                    }
                }
            }
        }

        self.edges = None;
        debug!(flipped, components, "fixed face winding");
        Ok(flipped)
    }

    fn flip_face(&mut self, index: usize) {
        self.faces[index].swap(1, 2);
        if let Some(normal) = self.normal_face.as_mut().and_then(|n| n.get_mut(index)) {
            *normal = -*normal;
        }
    }
}

/// True when the face has the directed side `i -> j`.
fn traverses(face: [u32; 3], i: u32, j: u32) -> bool {
    let [a, b, c] = face;
    [(a, b), (b, c), (c, a)].contains(&(i, j))
}
