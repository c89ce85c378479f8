//! # Hull Tests
//!
//! Tests for QuickHull and hull assembly.

use super::*;
use crate::error::MeshError;
use crate::test_support::{is_consistently_wound, unit_cube};
use approx::assert_relative_eq;
use config::constants::HULL_MERGE_RADIUS;
use glam::DVec3;

fn cube_corners() -> Vec<DVec3> {
    unit_cube(DVec3::ZERO).vertices().to_vec()
}

/// Every face normal points away from `inside`.
fn faces_point_outward(points: &[DVec3], faces: &[[u32; 3]], inside: DVec3) -> bool {
    faces.iter().all(|&[a, b, c]| {
        let (a, b, c) = (points[a as usize], points[b as usize], points[c as usize]);
        (b - a).cross(c - a).dot(a - inside) > 0.0
    })
}

#[test]
fn test_quickhull_tetrahedron() {
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.5, 1.0, 0.0),
        DVec3::new(0.5, 0.5, 1.0),
    ];
    let faces = quickhull(&points).unwrap();

    assert_eq!(faces.len(), 4);
    assert!(faces_point_outward(&points, &faces, DVec3::new(0.5, 0.375, 0.25)));
}

#[test]
fn test_quickhull_cube_vertices() {
    let points = cube_corners();
    let faces = quickhull(&points).unwrap();

    // Cube has 12 triangles (6 faces * 2)
    assert_eq!(faces.len(), 12);
    assert!(is_consistently_wound(&faces));
    assert!(faces_point_outward(&points, &faces, DVec3::splat(0.5)));
}

#[test]
fn test_quickhull_ignores_interior_points() {
    let mut points = cube_corners();
    points.push(DVec3::splat(0.5));
    points.push(DVec3::new(0.2, 0.7, 0.4));

    let faces = quickhull(&points).unwrap();
    assert_eq!(faces.len(), 12);
    assert!(faces.iter().flatten().all(|&i| i < 8));
}

#[test]
fn test_quickhull_sphere_points() {
    // Fibonacci sphere: every point is a hull vertex, no four coplanar
    let n = 40;
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    let points: Vec<DVec3> = (0..n)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
            let r = (1.0 - z * z).sqrt();
            let theta = golden * i as f64;
            DVec3::new(r * theta.cos(), r * theta.sin(), z)
        })
        .collect();

    let faces = quickhull(&points).unwrap();

    // Closed triangulated sphere: F = 2V - 4
    assert_eq!(faces.len(), 2 * n - 4);
    assert!(is_consistently_wound(&faces));
    assert!(faces_point_outward(&points, &faces, DVec3::ZERO));
}

#[test]
fn test_quickhull_too_few_points() {
    let points = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    assert!(matches!(
        quickhull(&points),
        Err(MeshError::DegenerateGeometry { .. })
    ));
}

#[test]
fn test_quickhull_coplanar_points() {
    let points: Vec<DVec3> = (0..6)
        .map(|i| DVec3::new(i as f64, (i * i) as f64, 2.0))
        .collect();
    let err = quickhull(&points).unwrap_err();
    assert!(err.to_string().contains("coplanar"));
}

#[test]
fn test_quickhull_collinear_points() {
    let points: Vec<DVec3> = (0..5).map(|i| DVec3::splat(i as f64)).collect();
    let err = quickhull(&points).unwrap_err();
    assert!(err.to_string().contains("collinear"));
}

#[test]
fn test_convex_hull_of_cube_with_interior_point() {
    let mut mesh = unit_cube(DVec3::ZERO);
    mesh.add_vertex(DVec3::splat(0.5));

    let hull = mesh.convex_hull(HULL_MERGE_RADIUS).unwrap();

    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 12);
    assert!(hull.validate_references().is_ok());
    assert_eq!(mesh.vertex_count(), 9);
}

#[test]
fn test_convex_hull_merges_near_duplicates() {
    let mut mesh = unit_cube(DVec3::ZERO);
    for v in cube_corners() {
        mesh.add_vertex(v + DVec3::splat(1e-5));
    }

    let hull = mesh.convex_hull(HULL_MERGE_RADIUS).unwrap();
    assert_eq!(hull.vertex_count(), 8);
    assert_eq!(hull.face_count(), 12);
}

#[test]
fn test_convex_hull_preserves_bounding_box() {
    let mut mesh = unit_cube(DVec3::ZERO);
    mesh.transform(&glam::DMat4::from_scale(DVec3::new(10.0, 20.0, 30.0)));
    let (orig_min, orig_max) = mesh.bounding_box().unwrap();

    let hull = mesh.convex_hull(HULL_MERGE_RADIUS).unwrap();
    let (hull_min, hull_max) = hull.bounding_box().unwrap();

    assert_relative_eq!(orig_min.distance(hull_min), 0.0);
    assert_relative_eq!(orig_max.distance(hull_max), 0.0);
}

#[test]
fn test_convex_hull_of_flat_mesh_fails() {
    let mut mesh = unit_cube(DVec3::ZERO);
    mesh.transform(&glam::DMat4::from_scale(DVec3::new(1.0, 1.0, 0.0)));
    assert!(mesh.convex_hull(HULL_MERGE_RADIUS).is_err());
}
