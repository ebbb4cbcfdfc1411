//! Breakaway support scaffolds
//!
//! A scaffold is a row of thin plates normal to X filling a box envelope.
//! Plates can be perforated to save material and tied together with
//! diagonal braces on the two long sides.

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::OVERLAP;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldParams {
    /// Envelope of the scaffold
    pub size: DVec3,
    pub plate_thickness: f64,
    /// Distance between plate starts along X
    pub plate_spacing: f64,
    pub perforation: Option<Perforation>,
    pub cross_bracing: bool,
    pub brace_thickness: f64,
    pub resolution: u32,
}

impl Default for ScaffoldParams {
    fn default() -> Self {
        Self {
            size: DVec3::new(20.0, 10.0, 10.0),
            plate_thickness: 0.6,
            plate_spacing: 3.0,
            perforation: None,
            cross_bracing: false,
            brace_thickness: 0.6,
            resolution: 16,
        }
    }
}

/// Grid of round holes punched through every plate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perforation {
    pub hole_diameter: f64,
    /// Centre distance between neighbouring holes
    pub hole_spacing: f64,
}

/// X offsets of every plate; the last plate stays inside the envelope
pub fn scaffold_plate_positions(params: &ScaffoldParams) -> Vec<f64> {
    let usable = (params.size.x - params.plate_thickness).max(0.0);
    let count = if params.plate_spacing > 0.0 {
        (usable / params.plate_spacing).floor() as usize + 1
    } else {
        1
    };
    (0..count).map(|i| i as f64 * params.plate_spacing).collect()
}

/// Hole centres along one plate axis, keeping a hole-diameter margin to the edges
fn hole_centres(extent: f64, perforation: &Perforation) -> Vec<f64> {
    if perforation.hole_spacing <= 0.0 {
        return Vec::new();
    }
    (1..)
        .map(|k| k as f64 * perforation.hole_spacing)
        .take_while(|c| c + perforation.hole_diameter <= extent)
        .collect()
}

pub fn support_scaffold(params: &ScaffoldParams) -> Solid {
    let size = params.size;
    let plates: Vec<Solid> = scaffold_plate_positions(params)
        .into_iter()
        .map(|x| {
            Solid::cuboid(DVec3::new(params.plate_thickness, size.y, size.z))
                .translate(DVec3::new(x, 0.0, 0.0))
        })
        .collect();

    let mut body = Solid::union(plates);

    if let Some(perforation) = &params.perforation {
        let radius = perforation.hole_diameter / 2.0;
        let zs = hole_centres(size.z, perforation);
        let holes: Vec<Solid> = hole_centres(size.y, perforation)
            .into_iter()
            .flat_map(|y| zs.iter().map(move |&z| (y, z)))
            .map(|(y, z)| {
                Solid::cylinder(size.x + 2.0 * OVERLAP, radius, params.resolution)
                    .rotate(DVec3::new(0.0, 90.0, 0.0))
                    .translate(DVec3::new(-OVERLAP, y, z))
            })
            .collect();
        body = Solid::difference(body, holes);
    }

    if params.cross_bracing {
        let braces: Vec<Solid> = [0.0, size.y - params.brace_thickness]
            .into_iter()
            .flat_map(|y| diagonal_braces(size, params.brace_thickness, y))
            .collect();
        let braces = Solid::intersection(vec![Solid::union(braces), Solid::cuboid(size)]);
        body = Solid::union(vec![body, braces]);
    }

    body
}

/// Two crossing bars spanning the XZ face at offset `y`
fn diagonal_braces(size: DVec3, thickness: f64, y: f64) -> [Solid; 2] {
    let length = (size.x * size.x + size.z * size.z).sqrt();
    let angle = size.z.atan2(size.x).to_degrees();
    let bar = || {
        Solid::cuboid(DVec3::new(length, thickness, thickness))
            .translate(DVec3::new(0.0, 0.0, -thickness / 2.0))
    };
    [
        bar()
            .rotate(DVec3::new(0.0, -angle, 0.0))
            .translate(DVec3::new(0.0, y, 0.0)),
        bar()
            .rotate(DVec3::new(0.0, angle, 0.0))
            .translate(DVec3::new(0.0, y, size.z)),
    ]
}
