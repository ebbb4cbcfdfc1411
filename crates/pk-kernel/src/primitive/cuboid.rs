//! Cuboid mesh generation

use glam::DVec3;

use super::TriMesh;

/// Generate a cuboid mesh
///
/// # Arguments
/// * `size` - extent along x, y and z
/// * `center` - centre the box on the origin instead of placing a corner there
///
/// # Returns
/// 8 shared vertices, 12 outward triangles
pub fn generate_cuboid(size: DVec3, center: bool) -> TriMesh {
    let offset = if center { -size * 0.5 } else { DVec3::ZERO };
    let lo = DVec3::ZERO.min(size) + offset;
    let hi = DVec3::ZERO.max(size) + offset;

    let positions = vec![
        DVec3::new(lo.x, lo.y, lo.z),
        DVec3::new(hi.x, lo.y, lo.z),
        DVec3::new(hi.x, hi.y, lo.z),
        DVec3::new(lo.x, hi.y, lo.z),
        DVec3::new(lo.x, lo.y, hi.z),
        DVec3::new(hi.x, lo.y, hi.z),
        DVec3::new(hi.x, hi.y, hi.z),
        DVec3::new(lo.x, hi.y, hi.z),
    ];

    let triangles = vec![
        // Bottom (-Z)
        [0, 3, 2],
        [0, 2, 1],
        // Top (+Z)
        [4, 5, 6],
        [4, 6, 7],
        // Front (-Y)
        [0, 1, 5],
        [0, 5, 4],
        // Back (+Y)
        [3, 7, 6],
        [3, 6, 2],
        // Left (-X)
        [0, 4, 7],
        [0, 7, 3],
        // Right (+X)
        [1, 2, 6],
        [1, 6, 5],
    ];

    TriMesh {
        positions,
        triangles,
    }
}
