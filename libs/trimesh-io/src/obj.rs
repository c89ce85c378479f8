//! Wavefront OBJ file format support.
//!
//! Reads the geometry records of an OBJ file:
//!
//! ```text
//! v  x y z        – vertex position (extra values such as w are ignored)
//! vn x y z        – vertex normal
//! f  i j k ...    – polygon; each corner is `i`, `i/t`, `i//n` or `i/t/n`
//! ```
//!
//! Indices are 1-based; negative indices count back from the latest vertex.
//! Texture and normal sub-indices are discarded. Polygons with more than
//! three corners are fan-triangulated. Normals are kept as vertex normals
//! when there is exactly one per vertex. Face normals are derived after
//! loading.

use std::io::{BufRead, Write};

use glam::DVec3;
use tracing::{debug, warn};
use trimesh::Mesh;

use crate::error::{IoError, IoResult};

/// Records that carry no geometry and are skipped without comment.
const IGNORED_RECORDS: &[&str] = &["vt", "vp", "g", "o", "s", "l", "usemtl", "mtllib"];

/// Read an OBJ mesh.
///
/// # Errors
///
/// [`IoError::FormatMismatch`] with the line number for a malformed record,
/// [`IoError::Mesh`] when a face references a vertex that does not exist.
pub fn read_obj<R: BufRead>(reader: R) -> IoResult<Mesh> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let mut normals: Vec<DVec3> = Vec::new();
    let mut faces: Vec<[u32; 3]> = Vec::new();
    let mut corners: Vec<u32> = Vec::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        let content = line.split('#').next().unwrap_or_default();
        let mut parts = content.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword {
            "v" => vertices.push(parse_coords(&mut parts, line_number)?),
            "vn" => normals.push(parse_coords(&mut parts, line_number)?),
            "f" => {
                corners.clear();
                for token in parts {
                    corners.push(parse_corner(token, vertices.len(), line_number)?);
                }
                if corners.len() < 3 {
                    return Err(IoError::at_line(
                        line_number,
                        format!("face has {} corners, expected at least 3", corners.len()),
                    ));
                }
                for k in 1..corners.len() - 1 {
                    faces.push([corners[0], corners[k], corners[k + 1]]);
                }
            }
            other if IGNORED_RECORDS.contains(&other) => {}
            other => {
                warn!(line = line_number, record = other, "skipping unknown OBJ record");
                skipped += 1;
            }
        }
    }

    let mut mesh = Mesh::from_parts(vertices, faces);
    mesh.validate_references()?;

    if !normals.is_empty() {
        if normals.len() == mesh.vertex_count() {
            mesh.set_normal_vertex(normals)?;
        } else {
            warn!(
                normals = normals.len(),
                vertices = mesh.vertex_count(),
                "dropping OBJ normals that do not match the vertex count"
            );
        }
    }
    mesh.generate_normals();

    debug!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        skipped,
        "read OBJ"
    );
    Ok(mesh)
}

/// Parse three coordinates; further values on the line are ignored.
fn parse_coords<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_number: usize,
) -> IoResult<DVec3> {
    let mut coords = [0.0; 3];
    for coord in &mut coords {
        let token = parts
            .next()
            .ok_or_else(|| IoError::at_line(line_number, "expected 3 coordinates"))?;
        *coord = token
            .parse()
            .map_err(|e| IoError::at_line(line_number, format!("invalid number `{token}`: {e}")))?;
    }
    Ok(DVec3::from_array(coords))
}

/// Resolve the position index of a face corner to a 0-based vertex index.
fn parse_corner(token: &str, vertex_count: usize, line_number: usize) -> IoResult<u32> {
    let position = token.split('/').next().unwrap_or_default();
    let index: i64 = position
        .parse()
        .map_err(|e| IoError::at_line(line_number, format!("invalid index `{token}`: {e}")))?;

    let resolved = match index {
        0 => None,
        i if i > 0 => Some(i - 1),
        i => i64::try_from(vertex_count).ok().map(|n| n + i).filter(|r| *r >= 0),
    };
    resolved
        .and_then(|r| u32::try_from(r).ok())
        .ok_or_else(|| IoError::at_line(line_number, format!("index `{token}` is out of range")))
}

/// Write a mesh as OBJ.
///
/// Vertex normals are written when present and referenced with `i//i`.
///
/// # Errors
///
/// Returns an error if the writer fails or a face references a missing
/// vertex.
pub fn write_obj<W: Write>(mesh: &Mesh, mut writer: W) -> IoResult<()> {
    mesh.validate_references()?;

    writeln!(writer, "# written by trimesh-io")?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }

    let normals = mesh.normal_vertex();
    for n in normals.unwrap_or_default() {
        writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
    }

    for &[a, b, c] in mesh.faces() {
        let [a, b, c] = [a + 1, b + 1, c + 1];
        if normals.is_some() {
            writeln!(writer, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(writer, "f {a} {b} {c}")?;
        }
    }

    writer.flush()?;
    Ok(())
}
