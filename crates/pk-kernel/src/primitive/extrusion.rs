//! Linear extrusion of a 2D profile along Z

use glam::{DVec2, DVec3};

use super::TriMesh;
use super::triangulate::{signed_area, triangulate_polygon};

/// Distance below which consecutive profile points are merged
const MERGE_DISTANCE: f64 = 1e-9;

/// Extrude a simple polygon from z = 0 to z = `height`
///
/// The profile may be given in either orientation and may repeat its first
/// point at the end.
pub fn generate_extrusion(profile: &[DVec2], height: f64, center: bool) -> TriMesh {
    let mut points: Vec<DVec2> = Vec::with_capacity(profile.len());
    for &p in profile {
        if points.last().is_none_or(|last: &DVec2| last.distance(p) > MERGE_DISTANCE) {
            points.push(p);
        }
    }
    while points.len() > 1 && points[0].distance(points[points.len() - 1]) <= MERGE_DISTANCE {
        points.pop();
    }
    if points.len() < 3 {
        return TriMesh::default();
    }
    if signed_area(&points) < 0.0 {
        points.reverse();
    }

    let (z0, z1) = if center {
        (-height / 2.0, height / 2.0)
    } else {
        (0.0, height)
    };
    let (z0, z1) = (z0.min(z1), z0.max(z1));

    let n = points.len() as u32;
    let mut positions = Vec::with_capacity(points.len() * 2);
    positions.extend(points.iter().map(|p| DVec3::new(p.x, p.y, z0)));
    positions.extend(points.iter().map(|p| DVec3::new(p.x, p.y, z1)));

    let cap = triangulate_polygon(&points);
    let mut triangles = Vec::with_capacity(cap.len() * 2 + points.len() * 2);
    for &[a, b, c] in &cap {
        triangles.push([a, c, b]);
        triangles.push([a + n, b + n, c + n]);
    }
    for i in 0..n {
        let j = (i + 1) % n;
        triangles.push([i, j, j + n]);
        triangles.push([i, j + n, i + n]);
    }

    TriMesh {
        positions,
        triangles,
    }
}
