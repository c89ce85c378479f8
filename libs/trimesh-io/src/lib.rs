//! Mesh file I/O for trimesh.
//!
//! This crate provides loading and saving of triangle meshes in common formats:
//!
//! - **STL** (Stereolithography) - Binary and ASCII
//! - **OBJ** (Wavefront) - ASCII only
//!
//! # Format Detection
//!
//! The format is picked from the lower-cased file extension:
//!
//! ```no_run
//! use trimesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from .stl extension
//! let mesh = load_mesh("model.stl").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "model.obj").unwrap();
//! ```
//!
//! In-memory sources go through [`load_mesh_from`] with an explicit
//! extension:
//!
//! ```rust
//! use trimesh_io::load_mesh_from;
//!
//! let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let mesh = load_mesh_from(obj.as_bytes(), "obj").unwrap();
//! assert_eq!(mesh.face_count(), 1);
//! ```

mod error;
mod obj;
mod stl;

pub use error::{IoError, IoResult};
pub use obj::{read_obj, write_obj};
pub use stl::{read_stl, read_stl_ascii, read_stl_binary, write_stl_ascii, write_stl_binary};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;
use trimesh::Mesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography) format.
    /// Read as binary or ASCII, written as binary.
    Stl,
    /// OBJ (Wavefront) format.
    Obj,
}

impl MeshFormat {
    /// Detect format from an extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedFormat`] for any extension other than `stl`
    /// or `obj`.
    pub fn from_extension(extension: &str) -> IoResult<Self> {
        match extension.to_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "obj" => Ok(Self::Obj),
            _ => Err(IoError::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Detect format from a path's extension.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedFormat`] for a missing or unknown extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    let file = File::open(path)?;
    let mesh = load_format(BufReader::new(file), format)?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "loaded mesh"
    );
    Ok(mesh)
}

/// Load a mesh from a reader in the format named by `extension`.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the reader fails, or
/// the content is invalid for the format.
pub fn load_mesh_from<R: Read>(reader: R, extension: &str) -> IoResult<Mesh> {
    let format = MeshFormat::from_extension(extension)?;
    load_format(BufReader::new(reader), format)
}

fn load_format<R: Read>(reader: BufReader<R>, format: MeshFormat) -> IoResult<Mesh> {
    match format {
        MeshFormat::Stl => read_stl(reader),
        MeshFormat::Obj => read_obj(reader),
    }
}

/// Save a mesh to a file, detecting format from extension.
///
/// STL files are written in binary.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &Mesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    let file = File::create(path)?;
    save_format(mesh, BufWriter::new(file), format)?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "saved mesh"
    );
    Ok(())
}

/// Write a mesh to a writer in the format named by `extension`.
///
/// # Errors
///
/// Returns an error if the extension is unsupported or the writer fails.
pub fn save_mesh_to<W: Write>(mesh: &Mesh, writer: W, extension: &str) -> IoResult<()> {
    save_format(mesh, writer, MeshFormat::from_extension(extension)?)
}

fn save_format<W: Write>(mesh: &Mesh, writer: W, format: MeshFormat) -> IoResult<()> {
    match format {
        MeshFormat::Stl => write_stl_binary(mesh, writer),
        MeshFormat::Obj => write_obj(mesh, writer),
    }
}
