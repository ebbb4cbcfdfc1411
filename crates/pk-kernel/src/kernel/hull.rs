//! Convex hull of point clouds (via `chull`)

use std::collections::HashSet;

use chull::ConvexHullWrapper;
use glam::DVec3;

use super::traits::{CadError, CadResult};
use crate::constants::WELD_PRECISION;
use crate::primitive::TriMesh;

/// Convex hull of `points` as an outward-oriented triangle mesh
pub fn convex_hull(points: &[DVec3]) -> CadResult<TriMesh> {
    let mut seen = HashSet::new();
    let unique: Vec<Vec<f64>> = points
        .iter()
        .filter(|p| seen.insert(weld_key(**p)))
        .map(|p| vec![p.x, p.y, p.z])
        .collect();

    if unique.len() < 4 {
        return Err(CadError::HullFailed(format!(
            "need at least 4 distinct points, got {}",
            unique.len()
        )));
    }

    let hull = ConvexHullWrapper::try_new(&unique, None)
        .map_err(|_| CadError::HullFailed("degenerate point set".into()))?;
    let (vertices, indices) = hull.vertices_indices();

    let positions: Vec<DVec3> = vertices
        .iter()
        .map(|v| DVec3::new(v[0], v[1], v[2]))
        .collect();
    if positions.is_empty() {
        return Err(CadError::HullFailed("empty hull".into()));
    }
    let centroid = positions.iter().copied().sum::<DVec3>() / positions.len() as f64;

    let triangles = indices
        .chunks_exact(3)
        .map(|t| {
            let [a, b, c] = [t[0] as u32, t[1] as u32, t[2] as u32];
            let (pa, pb, pc) = (positions[t[0]], positions[t[1]], positions[t[2]]);
            let normal = (pb - pa).cross(pc - pa);
            if normal.dot(pa - centroid) < 0.0 {
                [a, c, b]
            } else {
                [a, b, c]
            }
        })
        .collect();

    Ok(TriMesh {
        positions,
        triangles,
    })
}

pub(crate) fn weld_key(p: DVec3) -> [i64; 3] {
    [
        (p.x * WELD_PRECISION).round() as i64,
        (p.y * WELD_PRECISION).round() as i64,
        (p.z * WELD_PRECISION).round() as i64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::primitive::generate_cuboid;

    #[test]
    fn test_hull_of_cube_corners() {
        let corners = generate_cuboid(DVec3::new(1.0, 2.0, 3.0), false).positions;
        let hull = convex_hull(&corners).unwrap();
        assert_relative_eq!(hull.volume(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hull_ignores_interior_points() {
        let mut points = generate_cuboid(DVec3::ONE, false).positions;
        points.push(DVec3::splat(0.5));
        let hull = convex_hull(&points).unwrap();
        assert_relative_eq!(hull.volume(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_hull_of_too_few_points() {
        let err = convex_hull(&[DVec3::ZERO, DVec3::X, DVec3::ZERO]).unwrap_err();
        assert!(matches!(err, CadError::HullFailed(_)));
    }
}
