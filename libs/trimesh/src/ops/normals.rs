//! # Face Normals
//!
//! Per-face normals from the vertex positions and the face winding.

use crate::error::MeshResult;
use crate::geometry::unitize_rows;
use crate::mesh::Mesh;
use glam::DVec3;

impl Mesh {
    /// Derives one normal per face and stores it as the face normals.
    ///
    /// For a face `(a, b, c)` the normal is `(v[a] - v[b]) × (v[c] - v[b])`.
    /// It is not unitized: its length is twice the triangle area, and its
    /// sign follows the winding.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trimesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mut mesh = Mesh::from_parts(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![[0, 1, 2]]);
    /// mesh.generate_normals();
    /// assert_eq!(mesh.normal_face().unwrap()[0], DVec3::new(0.0, 0.0, -1.0));
    /// ```
    pub fn generate_normals(&mut self) {
        self.normal_face = Some(self.derived_face_normals());
    }

    /// Like [`Mesh::generate_normals`], optionally making the winding
    /// consistent first with [`Mesh::fix_normals`].
    pub fn generate_normals_with(&mut self, fix_direction: bool) -> MeshResult<()> {
        if fix_direction {
            self.fix_normals()?;
        }
        self.generate_normals();
        Ok(())
    }

    /// Unit-length face normals.
    ///
    /// Uses the stored face normals when present, derived ones otherwise.
    ///
    /// # Errors
    ///
    /// [`crate::MeshError::DegenerateGeometry`] if any face has zero area
    /// (or a stored zero normal).
    pub fn unit_face_normals(&self) -> MeshResult<Vec<DVec3>> {
        match &self.normal_face {
            Some(normals) => unitize_rows(normals),
            None => unitize_rows(&self.derived_face_normals()),
        }
    }

    fn derived_face_normals(&self) -> Vec<DVec3> {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let vb = self.vertex(b);
                (self.vertex(a) - vb).cross(self.vertex(c) - vb)
            })
            .collect()
    }
}
