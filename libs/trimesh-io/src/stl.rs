//! STL (Stereolithography) file format support.
//!
//! Supports both ASCII and binary STL formats.
//!
//! # Format Detection
//!
//! A file is read as ASCII when it starts with `solid` (after optional
//! whitespace) and its first [`STL_SNIFF_SIZE`] bytes are all text.
//! Everything else is read as binary; binary headers may legally start with
//! `solid` too, but the triangle records that follow are not text.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute word (kept as the face color)
//! end
//! ```
//!
//! # ASCII Format
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! Every triangle gets three vertices of its own; merge them afterwards
//! with [`trimesh::Mesh::merge_vertices`] for an indexed mesh.

use std::io::{Read, Write};

use config::constants::{STL_HEADER_SIZE, STL_SNIFF_SIZE, STL_TRIANGLE_SIZE};
use glam::DVec3;
use tracing::debug;
use trimesh::Mesh;

use crate::error::{IoError, IoResult};

/// Header text written by the binary writer, padded with spaces.
const HEADER_TEXT: &[u8] = b"binary STL written by trimesh-io";

/// Read an STL mesh, detecting ASCII or binary content.
///
/// # Errors
///
/// Returns an error if the reader fails or the content is not valid STL.
pub fn read_stl<R: Read>(mut reader: R) -> IoResult<Mesh> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if is_ascii_stl(&bytes) {
        // Solid and facet names may carry any 8-bit text; keywords and
        // numbers are plain ASCII either way
        read_stl_ascii(&String::from_utf8_lossy(&bytes))
    } else {
        read_stl_binary(&bytes)
    }
}

/// True if the content looks like ASCII STL.
fn is_ascii_stl(bytes: &[u8]) -> bool {
    let sniff = &bytes[..bytes.len().min(STL_SNIFF_SIZE)];
    let start = sniff
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(sniff.len());
    sniff[start..].starts_with(b"solid") && sniff.iter().all(|&b| is_text_byte(b))
}

/// Printable bytes, including every byte above 0x7f, plus the usual
/// control characters of text files (bell, backspace, tab, newline, form
/// feed, carriage return, escape).
fn is_text_byte(b: u8) -> bool {
    matches!(b, 0x20..=0xff | 7 | 8 | 9 | 10 | 12 | 13 | 27)
}

/// Parse a binary STL from its complete byte content.
///
/// # Errors
///
/// [`IoError::FormatMismatch`] when the file is shorter than the header,
/// [`IoError::TriangleCount`] when the number of complete triangle records
/// differs from the header count. A trailing partial record is ignored.
pub fn read_stl_binary(bytes: &[u8]) -> IoResult<Mesh> {
    if bytes.len() < STL_HEADER_SIZE + 4 {
        return Err(IoError::format_mismatch(format!(
            "binary STL needs at least {} bytes, got {}",
            STL_HEADER_SIZE + 4,
            bytes.len()
        )));
    }

    // Triangle count is stored after the 80-byte header
    let count = read_u32(&bytes[STL_HEADER_SIZE..]);
    let records = &bytes[STL_HEADER_SIZE + 4..];
    let available = records.len() / STL_TRIANGLE_SIZE;
    if available != count as usize {
        let got = u32::try_from(available).unwrap_or(u32::MAX);
        return Err(IoError::TriangleCount {
            expected: count,
            got,
        });
    }

    let count = count as usize;
    let mut vertices = Vec::with_capacity(count * 3);
    let mut faces = Vec::with_capacity(count);
    let mut normals = Vec::with_capacity(count);
    let mut attributes = Vec::with_capacity(count);

    for record in records.chunks_exact(STL_TRIANGLE_SIZE).take(count) {
        normals.push(read_vector(&record[0..12]));

        #[allow(clippy::cast_possible_truncation)]
        // Truncation: mesh indices are u32, meshes with >4B vertices are unsupported
        let base = vertices.len() as u32;
        vertices.push(read_vector(&record[12..24]));
        vertices.push(read_vector(&record[24..36]));
        vertices.push(read_vector(&record[36..48]));
        faces.push([base, base + 1, base + 2]);

        attributes.push(u16::from_le_bytes([record[48], record[49]]));
    }

    let mut mesh = Mesh::from_parts(vertices, faces);
    mesh.set_normal_face(normals)?;
    mesh.set_color_face(attributes)?;

    debug!(triangles = count, "read binary STL");
    Ok(mesh)
}

fn read_u32(buf: &[u8]) -> u32 {
    u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
}

/// Read a vector from 12 bytes (3 f32s).
fn read_vector(buf: &[u8]) -> DVec3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    DVec3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Parser position inside an ASCII STL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AsciiState {
    /// Between facets
    Solid,
    /// After `facet normal`, before `outer loop`
    Facet,
    /// Inside `outer loop`
    Loop,
    /// After `endloop`, before `endfacet`
    LoopClosed,
}

/// Parse an ASCII STL.
///
/// # Errors
///
/// [`IoError::FormatMismatch`] with the line number for an unknown or
/// misplaced keyword, a malformed number, or a facet without exactly
/// three vertices.
pub fn read_stl_ascii(text: &str) -> IoResult<Mesh> {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut normals = Vec::new();
    let mut state = AsciiState::Solid;
    let mut corners: Vec<DVec3> = Vec::with_capacity(3);

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match (keyword.to_ascii_lowercase().as_str(), state) {
            ("solid" | "endsolid", AsciiState::Solid) => {}
            ("facet", AsciiState::Solid) => {
                if !parts.next().is_some_and(|p| p.eq_ignore_ascii_case("normal")) {
                    return Err(IoError::at_line(line_number, "expected `facet normal`"));
                }
                normals.push(parse_vector(&mut parts, line_number)?);
                state = AsciiState::Facet;
            }
            ("outer", AsciiState::Facet) => {
                if !parts.next().is_some_and(|p| p.eq_ignore_ascii_case("loop")) {
                    return Err(IoError::at_line(line_number, "expected `outer loop`"));
                }
                corners.clear();
                state = AsciiState::Loop;
            }
            ("vertex", AsciiState::Loop) => {
                corners.push(parse_vector(&mut parts, line_number)?);
            }
            ("endloop", AsciiState::Loop) => {
                if corners.len() != 3 {
                    return Err(IoError::at_line(
                        line_number,
                        format!("facet has {} vertices, expected 3", corners.len()),
                    ));
                }
                state = AsciiState::LoopClosed;
            }
            ("endfacet", AsciiState::LoopClosed) => {
                #[allow(clippy::cast_possible_truncation)]
                // Truncation: mesh indices are u32, meshes with >4B vertices unsupported
                let base = vertices.len() as u32;
                vertices.append(&mut corners);
                faces.push([base, base + 1, base + 2]);
                state = AsciiState::Solid;
            }
            (other, _) => {
                return Err(IoError::at_line(
                    line_number,
                    format!("unexpected `{other}`"),
                ));
            }
        }
    }

    if state != AsciiState::Solid {
        return Err(IoError::format_mismatch("ASCII STL ends inside a facet"));
    }

    debug!(triangles = faces.len(), "read ASCII STL");
    let mut mesh = Mesh::from_parts(vertices, faces);
    mesh.set_normal_face(normals)?;
    Ok(mesh)
}

/// Parse exactly three floats from the remaining tokens.
fn parse_vector<'a>(
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
    if parts.next().is_some() {
        return Err(IoError::at_line(line_number, "expected 3 coordinates"));
    }
    Ok(DVec3::from_array(coords))
}

/// Unit normal written for face `index`.
///
/// Stored face normals are used when present; otherwise the normal follows
/// the right-hand rule over the face winding. Degenerate normals are zero.
fn output_normal(mesh: &Mesh, index: usize) -> DVec3 {
    let normal = match mesh.normal_face() {
        Some(normals) => normals[index],
        None => {
            let [a, b, c] = mesh.face_positions(index);
            (b - a).cross(c - a)
        }
    };
    normal.try_normalize().unwrap_or(DVec3::ZERO)
}

/// Write a mesh as binary STL.
///
/// # Errors
///
/// Returns an error if the writer fails or a face references a missing
/// vertex.
pub fn write_stl_binary<W: Write>(mesh: &Mesh, mut writer: W) -> IoResult<()> {
    mesh.validate_references()?;

    // Write 80-byte header (padded with spaces)
    let mut header = [b' '; STL_HEADER_SIZE];
    header[..HEADER_TEXT.len()].copy_from_slice(HEADER_TEXT);
    writer.write_all(&header)?;

    #[allow(clippy::cast_possible_truncation)]
    // Face count: mesh faces limited to u32 range by design
    let count = mesh.face_count() as u32;
    writer.write_all(&count.to_le_bytes())?;

    let mut record = [0u8; STL_TRIANGLE_SIZE];
    for index in 0..mesh.face_count() {
        let [a, b, c] = mesh.face_positions(index);
        write_vector(&mut record[0..12], output_normal(mesh, index));
        write_vector(&mut record[12..24], a);
        write_vector(&mut record[24..36], b);
        write_vector(&mut record[36..48], c);

        let attribute = mesh.color_face().map_or(0, |colors| colors[index]);
        record[48..50].copy_from_slice(&attribute.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a vector as 3 f32s in little-endian.
fn write_vector(buf: &mut [u8], v: DVec3) {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: f64 to f32 is intentional for STL format
    let coords = [v.x as f32, v.y as f32, v.z as f32];
    for (chunk, value) in buf.chunks_exact_mut(4).zip(coords) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
}

/// Write a mesh as ASCII STL.
///
/// # Errors
///
/// Returns an error if the writer fails or a face references a missing
/// vertex.
pub fn write_stl_ascii<W: Write>(mesh: &Mesh, mut writer: W) -> IoResult<()> {
    mesh.validate_references()?;

    writeln!(writer, "solid mesh")?;
    for index in 0..mesh.face_count() {
        let n = output_normal(mesh, index);
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in mesh.face_positions(index) {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid mesh")?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> Mesh {
        Mesh::from_parts(
            vec![DVec3::ZERO, DVec3::new(1.5, 0.0, 0.0), DVec3::new(0.0, 2.25, 0.0)],
            vec![[0, 1, 2]],
        )
    }

    const ASCII: &str = "solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test
";

    #[test]
    fn test_binary_roundtrip() {
        let mut bytes = Vec::new();
        write_stl_binary(&triangle(), &mut bytes).unwrap();
        assert_eq!(bytes.len(), STL_HEADER_SIZE + 4 + STL_TRIANGLE_SIZE);

        let mesh = read_stl(bytes.as_slice()).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertices(), triangle().vertices());
        assert_eq!(mesh.normal_face().unwrap()[0], DVec3::Z);
        assert_eq!(mesh.color_face().unwrap(), &[0]);
    }

    #[test]
    fn test_binary_keeps_attribute_word() {
        let mut mesh = triangle();
        mesh.set_color_face(vec![0x7c1f]).unwrap();
        let mut bytes = Vec::new();
        write_stl_binary(&mesh, &mut bytes).unwrap();

        let loaded = read_stl_binary(&bytes).unwrap();
        assert_eq!(loaded.color_face().unwrap(), &[0x7c1f]);
    }

    #[test]
    fn test_binary_header_starting_with_solid() {
        let mut bytes = Vec::new();
        write_stl_binary(&triangle(), &mut bytes).unwrap();
        bytes[..5].copy_from_slice(b"solid");

        let mesh = read_stl(bytes.as_slice()).unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_binary_truncated() {
        let mut bytes = Vec::new();
        write_stl_binary(&triangle(), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 1);

        let err = read_stl_binary(&bytes).unwrap_err();
        assert!(matches!(err, IoError::TriangleCount { expected: 1, got: 0 }));

        let err = read_stl_binary(&bytes[..40]).unwrap_err();
        assert!(matches!(err, IoError::FormatMismatch { .. }));
    }

    #[test]
    fn test_binary_extra_records() {
        let mut bytes = Vec::new();
        write_stl_binary(&triangle(), &mut bytes).unwrap();
        let record = bytes[STL_HEADER_SIZE + 4..].to_vec();
        bytes.extend_from_slice(&record);

        let err = read_stl_binary(&bytes).unwrap_err();
        assert!(matches!(err, IoError::TriangleCount { expected: 1, got: 2 }));

        // A partial record after the last triangle is not a triangle
        bytes.truncate(bytes.len() - 10);
        assert_eq!(read_stl_binary(&bytes).unwrap().face_count(), 1);
    }

    #[test]
    fn test_ascii_parsing() {
        let mesh = read_stl(ASCII.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);
        assert_eq!(mesh.vertex(1), DVec3::X);
        assert_eq!(mesh.normal_face().unwrap(), &[DVec3::Z]);
        assert!(mesh.color_face().is_none());
    }

    #[test]
    fn test_ascii_with_non_ascii_name() {
        let text = ASCII.replace("test", "modèle");
        let mesh = read_stl(text.as_bytes()).unwrap();
        assert_eq!(mesh.faces(), &[[0, 1, 2]]);

        // Latin-1 names are text too
        let latin1 = ASCII.replace("test", "mod\u{e8}le");
        let bytes: Vec<u8> = latin1.chars().map(|c| c as u8).collect();
        assert_eq!(read_stl(bytes.as_slice()).unwrap().face_count(), 1);
    }

    #[test]
    fn test_ascii_roundtrip() {
        let mut text = Vec::new();
        write_stl_ascii(&triangle(), &mut text).unwrap();
        let mesh = read_stl(text.as_slice()).unwrap();

        assert_eq!(mesh.face_count(), 1);
        assert_relative_eq!(mesh.vertex(2).y, 2.25);
        assert_relative_eq!(mesh.normal_face().unwrap()[0].z, 1.0);
    }

    #[test]
    fn test_ascii_malformed_number() {
        let text = ASCII.replace("vertex 1 0 0", "vertex 1 zero 0");
        let err = read_stl_ascii(&text).unwrap_err();
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn test_ascii_wrong_vertex_count() {
        let text = ASCII.replace("      vertex 0 1 0\n", "");
        let err = read_stl_ascii(&text).unwrap_err();
        assert!(err.to_string().contains("2 vertices"));
    }

    #[test]
    fn test_ascii_unterminated_facet() {
        let text = ASCII.replace("  endfacet\nendsolid test\n", "");
        assert!(matches!(
            read_stl_ascii(&text),
            Err(IoError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_written_normal_follows_right_hand_rule() {
        let mut bytes = Vec::new();
        let mut mesh = triangle();
        mesh.set_faces(vec![[0, 2, 1]]);
        write_stl_binary(&mesh, &mut bytes).unwrap();
        let loaded = read_stl_binary(&bytes).unwrap();
        assert_eq!(loaded.normal_face().unwrap()[0], DVec3::NEG_Z);
    }
}
