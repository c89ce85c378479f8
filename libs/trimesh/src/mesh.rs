//! # Mesh Data Structure
//!
//! Core mesh representation: vertex positions, triangle index triples,
//! optional per-face and per-vertex attributes, and a lazily derived edge list.

use crate::error::{MeshError, MeshResult};
use config::constants::EPSILON;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices and faces.
///
/// Faces reference vertices by index. Every operation that rewrites the
/// vertex array also rewrites the face indices, so the two always agree.
///
/// The edge list is derived from the faces and is never kept eagerly in
/// sync: any change to the faces discards it, and [`Mesh::generate_edges`]
/// rebuilds it on demand.
///
/// # Example
///
/// ```rust
/// use trimesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face([0, 1, 2]);
/// assert_eq!(mesh.generate_edges().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions
    pub(crate) vertices: Vec<DVec3>,
    /// Triangle indices in winding order
    pub(crate) faces: Vec<[u32; 3]>,
    /// Sorted vertex pairs, three per face, derived from `faces`
    #[serde(skip)]
    pub(crate) edges: Option<Vec<[u32; 2]>>,
    /// One normal per face, derived or loaded
    pub(crate) normal_face: Option<Vec<DVec3>>,
    /// One normal per vertex, loaded only
    pub(crate) normal_vertex: Option<Vec<DVec3>>,
    /// Opaque per-face attribute (the binary STL attribute word)
    pub(crate) color_face: Option<Vec<u16>>,
    /// Opaque per-vertex RGBA color
    pub(crate) color_vertex: Option<Vec<[f32; 4]>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            ..Self::default()
        }
    }

    /// Creates a mesh from vertex positions and face triples.
    ///
    /// References are not checked here; topology operations report
    /// out-of-range indices when they run.
    pub fn from_parts(vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::default()
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    ///
    /// Vertex-indexed attributes would be one entry short and are dropped.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normal_vertex = None;
        self.color_vertex = None;
        index
    }

    /// Adds a face by vertex indices.
    ///
    /// Discards the derived edge list and the face-indexed attributes.
    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
        self.edges = None;
        self.normal_face = None;
        self.color_face = None;
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns mutable vertex positions.
    ///
    /// Moving vertices keeps every reference valid; the face list is untouched.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [DVec3] {
        &mut self.vertices
    }

    /// Returns the face index triples.
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the face at the given index.
    #[inline]
    pub fn face(&self, index: usize) -> [u32; 3] {
        self.faces[index]
    }

    /// Returns the three corner positions of a face.
    #[inline]
    pub fn face_positions(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.faces[index];
        [self.vertex(a), self.vertex(b), self.vertex(c)]
    }

    /// Replaces the faces.
    ///
    /// Face-indexed attributes no longer line up with the new faces and are
    /// dropped together with the derived edges.
    pub fn set_faces(&mut self, faces: Vec<[u32; 3]>) {
        self.faces = faces;
        self.edges = None;
        self.normal_face = None;
        self.color_face = None;
    }

    // =========================================================================
    // ATTRIBUTES
    // =========================================================================

    /// Returns the face normals, if derived or loaded.
    pub fn normal_face(&self) -> Option<&[DVec3]> {
        self.normal_face.as_deref()
    }

    /// Sets face normals. Fails unless there is exactly one per face.
    pub fn set_normal_face(&mut self, normals: Vec<DVec3>) -> MeshResult<()> {
        check_len("face normals", normals.len(), self.faces.len())?;
        self.normal_face = Some(normals);
        Ok(())
    }

    /// Returns the vertex normals, if loaded.
    pub fn normal_vertex(&self) -> Option<&[DVec3]> {
        self.normal_vertex.as_deref()
    }

    /// Sets vertex normals. Fails unless there is exactly one per vertex.
    pub fn set_normal_vertex(&mut self, normals: Vec<DVec3>) -> MeshResult<()> {
        check_len("vertex normals", normals.len(), self.vertices.len())?;
        self.normal_vertex = Some(normals);
        Ok(())
    }

    /// Returns the per-face attribute words.
    pub fn color_face(&self) -> Option<&[u16]> {
        self.color_face.as_deref()
    }

    /// Sets per-face attribute words. Fails unless there is exactly one per face.
    pub fn set_color_face(&mut self, colors: Vec<u16>) -> MeshResult<()> {
        check_len("face colors", colors.len(), self.faces.len())?;
        self.color_face = Some(colors);
        Ok(())
    }

    /// Returns the per-vertex colors.
    pub fn color_vertex(&self) -> Option<&[[f32; 4]]> {
        self.color_vertex.as_deref()
    }

    /// Sets per-vertex colors. Fails unless there is exactly one per vertex.
    pub fn set_color_vertex(&mut self, colors: Vec<[f32; 4]>) -> MeshResult<()> {
        check_len("vertex colors", colors.len(), self.vertices.len())?;
        self.color_vertex = Some(colors);
        Ok(())
    }

    // =========================================================================
    // EDGES
    // =========================================================================

    /// Returns the derived edges if they are current.
    pub fn edges(&self) -> Option<&[[u32; 2]]> {
        self.edges.as_deref()
    }

    /// Rebuilds the edge list from the faces and returns it.
    ///
    /// Face `f` owns entries `3f`, `3f + 1` and `3f + 2`: its sides
    /// `(a, b)`, `(b, c)` and `(c, a)`, each with the smaller index first.
    pub fn generate_edges(&mut self) -> &[[u32; 2]] {
        self.edges.insert(face_edges(&self.faces))
    }

    /// Returns the current edge list, deriving it first if it was discarded,
    /// together with the vertices it indexes.
    pub(crate) fn edges_with_vertices(&mut self) -> (&[[u32; 2]], &[DVec3]) {
        let faces = &self.faces;
        let edges = self.edges.get_or_insert_with(|| face_edges(faces));
        (edges, &self.vertices)
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Checks that every face index refers to an existing vertex.
    pub fn validate_references(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        for (face_index, face) in self.faces.iter().enumerate() {
            if let Some(&bad) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::precondition(format!(
                    "face {face_index} references vertex {bad} but mesh has {vertex_count} vertices"
                )));
            }
        }
        Ok(())
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns `(min, max)` corners, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices[1..]
                .iter()
                .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v))),
        )
    }

    // =========================================================================
    // TRANSFORMS
    // =========================================================================

    /// Transforms all vertices by a 4x4 matrix.
    ///
    /// Normals go through the inverse transpose and keep their original length.
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }

        let normal_matrix = matrix.inverse().transpose();
        for normals in [&mut self.normal_face, &mut self.normal_vertex]
            .into_iter()
            .flatten()
        {
            for n in normals.iter_mut() {
                let length = n.length();
                let transformed = normal_matrix.transform_vector3(*n);
                let transformed_length = transformed.length();
                if transformed_length > EPSILON {
                    *n = transformed * (length / transformed_length);
                }
            }
        }
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }
}

/// Derives the sorted edge list of a face list, three entries per face.
pub fn face_edges(faces: &[[u32; 3]]) -> Vec<[u32; 2]> {
    let mut edges = Vec::with_capacity(faces.len() * 3);
    for &[a, b, c] in faces {
        for (i, j) in [(a, b), (b, c), (c, a)] {
            edges.push(sorted_pair(i, j));
        }
    }
    edges
}

/// Orders a vertex pair so that shared edges compare equal in either winding.
#[inline]
pub(crate) fn sorted_pair(i: u32, j: u32) -> [u32; 2] {
    if i <= j {
        [i, j]
    } else {
        [j, i]
    }
}

fn check_len(what: &str, got: usize, expected: usize) -> MeshResult<()> {
    if got == expected {
        Ok(())
    } else {
        Err(MeshError::precondition(format!(
            "expected {expected} {what}, got {got}"
        )))
    }
}
