//! Rounded boxes and fillet cutters

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::OVERLAP;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilletCubeParams {
    pub size: DVec3,
    /// Edge radius, clamped to half the smallest side
    pub radius: f64,
    /// Round only the four vertical edges
    pub vertical_only: bool,
    pub center: bool,
    pub resolution: u32,
}

impl Default for FilletCubeParams {
    fn default() -> Self {
        Self {
            size: DVec3::new(20.0, 20.0, 10.0),
            radius: 2.0,
            vertical_only: false,
            center: false,
            resolution: 32,
        }
    }
}

/// Box with rounded edges: hull of corner spheres, or of corner cylinders
/// when only the vertical edges are rounded
pub fn fillet_cube(params: &FilletCubeParams) -> Solid {
    let size = params.size.abs();
    let limit = if params.vertical_only {
        size.x.min(size.y)
    } else {
        size.min_element()
    };
    let r = params.radius.clamp(0.0, limit / 2.0);

    let body = if r <= 0.0 {
        Solid::cuboid(size)
    } else {
        let xs = [r, size.x - r];
        let ys = [r, size.y - r];
        let corners: Vec<Solid> = if params.vertical_only {
            xs.iter()
                .flat_map(|&x| ys.iter().map(move |&y| (x, y)))
                .map(|(x, y)| {
                    Solid::cylinder(size.z, r, params.resolution).translate(DVec3::new(x, y, 0.0))
                })
                .collect()
        } else {
            let zs = [r, size.z - r];
            xs.iter()
                .flat_map(|&x| ys.iter().map(move |&y| (x, y)))
                .flat_map(|(x, y)| zs.iter().map(move |&z| DVec3::new(x, y, z)))
                .map(|c| Solid::sphere(r, params.resolution).translate(c))
                .collect()
        };
        Solid::hull(corners)
    };

    if params.center {
        body.translate(-size / 2.0)
    } else {
        body
    }
}

/// Material to remove along an edge running up the Z axis
///
/// The body is assumed to occupy the +X/+Y quadrant; the cutter is the
/// square `radius × radius` minus a quarter round.
pub fn fillet_edge_cutter(length: f64, radius: f64, resolution: u32) -> Solid {
    let square = Solid::cuboid(DVec3::new(radius + OVERLAP, radius + OVERLAP, length + 2.0 * OVERLAP))
        .translate(DVec3::new(-OVERLAP, -OVERLAP, -OVERLAP));
    let round = Solid::cylinder(length + 4.0 * OVERLAP, radius, resolution)
        .translate(DVec3::new(radius, radius, -2.0 * OVERLAP));
    Solid::difference(square, vec![round])
}

/// Material to remove at a corner in the +X/+Y/+Z octant
pub fn fillet_corner_cutter(radius: f64, resolution: u32) -> Solid {
    let cube = Solid::cube(radius + OVERLAP).translate(DVec3::splat(-OVERLAP));
    let ball = Solid::sphere(radius, resolution).translate(DVec3::splat(radius));
    Solid::difference(cube, vec![ball])
}
