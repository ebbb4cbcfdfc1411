//! Cylinder and cone mesh generation (with end caps)

use std::f64::consts::TAU;

use glam::DVec3;

use super::TriMesh;
use crate::constants::MIN_SEGMENTS;

/// Radius below which a cylinder end collapses to an apex
const APEX_RADIUS: f64 = 1e-9;

/// Generate a cylinder (or truncated cone) along the Z axis
///
/// A zero radius at either end produces a single apex vertex there. Both
/// radii zero yields an empty mesh.
pub fn generate_cylinder(
    height: f64,
    radius_bottom: f64,
    radius_top: f64,
    segments: u32,
    center: bool,
) -> TriMesh {
    let segments = segments.max(MIN_SEGMENTS);
    let (z0, z1) = if center {
        (-height / 2.0, height / 2.0)
    } else {
        (0.0, height)
    };
    let (z0, z1) = (z0.min(z1), z0.max(z1));
    let bottom_apex = radius_bottom.abs() < APEX_RADIUS;
    let top_apex = radius_top.abs() < APEX_RADIUS;

    let mut mesh = TriMesh::default();
    if bottom_apex && top_apex {
        return mesh;
    }

    let ring = |positions: &mut Vec<DVec3>, radius: f64, z: f64| -> Vec<u32> {
        let start = positions.len() as u32;
        for i in 0..segments {
            let theta = i as f64 / segments as f64 * TAU;
            positions.push(DVec3::new(radius * theta.cos(), radius * theta.sin(), z));
        }
        (start..start + segments).collect()
    };

    let bottom: Vec<u32> = if bottom_apex {
        mesh.positions.push(DVec3::new(0.0, 0.0, z0));
        vec![0; segments as usize]
    } else {
        ring(&mut mesh.positions, radius_bottom.abs(), z0)
    };
    let top: Vec<u32> = if top_apex {
        let apex = mesh.positions.len() as u32;
        mesh.positions.push(DVec3::new(0.0, 0.0, z1));
        vec![apex; segments as usize]
    } else {
        ring(&mut mesh.positions, radius_top.abs(), z1)
    };

    let n = segments as usize;
    for i in 0..n {
        let j = (i + 1) % n;
        if !bottom_apex {
            mesh.triangles.push([bottom[i], bottom[j], top[j]]);
        }
        if !top_apex {
            mesh.triangles.push([bottom[i], top[j], top[i]]);
        }
    }

    // Fan caps from the first ring vertex
    if !bottom_apex {
        for i in 1..n - 1 {
            mesh.triangles.push([bottom[0], bottom[i + 1], bottom[i]]);
        }
    }
    if !top_apex {
        for i in 1..n - 1 {
            mesh.triangles.push([top[0], top[i], top[i + 1]]);
        }
    }

    mesh
}
