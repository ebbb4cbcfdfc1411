//! Sphere mesh generation (UV sphere)

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use super::TriMesh;
use crate::constants::MIN_SEGMENTS;

/// Generate a UV sphere centred on the origin
///
/// # Arguments
/// * `radius` - Sphere radius
/// * `segments` - Segments around the equator; `segments / 2` latitude bands
pub fn generate_sphere(radius: f64, segments: u32) -> TriMesh {
    let segments = segments.max(MIN_SEGMENTS) as usize;
    let bands = (segments / 2).max(2);
    let radius = radius.abs();

    let mut positions = Vec::with_capacity(2 + (bands - 1) * segments);
    positions.push(DVec3::new(0.0, 0.0, radius));
    for band in 1..bands {
        let theta = band as f64 / bands as f64 * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for lon in 0..segments {
            let phi = lon as f64 / segments as f64 * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();
            positions.push(DVec3::new(
                radius * sin_theta * cos_phi,
                radius * sin_theta * sin_phi,
                radius * cos_theta,
            ));
        }
    }
    let south = positions.len() as u32;
    positions.push(DVec3::new(0.0, 0.0, -radius));

    let ring = |band: usize, lon: usize| (1 + (band - 1) * segments + lon % segments) as u32;

    let mut triangles = Vec::with_capacity(2 * segments * (bands - 1));
    for lon in 0..segments {
        triangles.push([0, ring(1, lon), ring(1, lon + 1)]);
    }
    for band in 1..bands - 1 {
        for lon in 0..segments {
            let a = ring(band, lon);
            let b = ring(band + 1, lon);
            let c = ring(band + 1, lon + 1);
            let d = ring(band, lon + 1);
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }
    for lon in 0..segments {
        triangles.push([south, ring(bands - 1, lon + 1), ring(bands - 1, lon)]);
    }

    TriMesh {
        positions,
        triangles,
    }
}
