//! Cube-like polyhedra from eight arbitrary corners

use glam::DVec3;
use pk_kernel::{Polyhedron, Solid};

/// Face table shared by every polycube
///
/// Corners 0..3 are the bottom face and 4..7 the top face, both listed
/// counter-clockwise seen from above, with corner `i + 4` above corner `i`.
pub struct PolycubeFaces;

impl PolycubeFaces {
    /// Quads wound clockwise seen from outside
    pub const ALL: [[u32; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 7, 6, 5],
        [0, 4, 5, 1],
        [1, 5, 6, 2],
        [2, 6, 7, 3],
        [3, 7, 4, 0],
    ];

    pub fn to_vec() -> Vec<Vec<u32>> {
        Self::ALL.iter().map(|f| f.to_vec()).collect()
    }
}

pub fn polycube(corners: [DVec3; 8]) -> Solid {
    Solid::polyhedron(Polyhedron::new(corners.to_vec(), PolycubeFaces::to_vec()))
}

pub fn polycube_between(bottom: [DVec3; 4], top: [DVec3; 4]) -> Solid {
    let mut corners = [DVec3::ZERO; 8];
    corners[..4].copy_from_slice(&bottom);
    corners[4..].copy_from_slice(&top);
    polycube(corners)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frustum() -> Polyhedron {
        let bottom = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
            DVec3::new(4.0, 4.0, 0.0),
            DVec3::new(0.0, 4.0, 0.0),
        ];
        let top = [
            DVec3::new(1.0, 1.0, 3.0),
            DVec3::new(3.0, 1.0, 3.0),
            DVec3::new(3.0, 3.0, 3.0),
            DVec3::new(1.0, 3.0, 3.0),
        ];
        let Solid::Polyhedron(p) = polycube_between(bottom, top) else {
            panic!("expected polyhedron");
        };
        (*p).clone()
    }

    #[test]
    fn test_polycube_is_watertight() {
        let report = frustum().edge_report();
        assert!(report.is_watertight(), "{}", report);
        assert_eq!(report.edge_count, 12);
    }

    #[test]
    fn test_frustum_volume() {
        // h/3 * (A1 + A2 + sqrt(A1 * A2))
        assert_relative_eq!(frustum().signed_volume(), 16.0 + 4.0 + 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unit_cube_volume() {
        let corners = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(0.0, 1.0, 1.0),
        ];
        let Solid::Polyhedron(p) = polycube(corners) else {
            panic!("expected polyhedron");
        };
        assert_relative_eq!(p.signed_volume(), 1.0, epsilon = 1e-12);
    }
}
