//! Print-in-place hinges
//!
//! The hinge axis runs along X at height `knuckle_diameter / 2`, leaves lie
//! flat on z = 0. Leaf A sits on the -Y side and owns the even knuckles
//! plus the pin; leaf B sits on +Y and its knuckles are bored around the pin.

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::OVERLAP;
use crate::scaffold::{ScaffoldParams, support_scaffold};

/// Vertical gap left between a support scaffold and the part above it
const SUPPORT_GAP: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HingeParams {
    pub length: f64,
    pub knuckle_diameter: f64,
    pub pin_diameter: f64,
    /// Number of knuckles along the axis, at least 2
    pub knuckles: u32,
    /// Radial and axial play between the two leaves
    pub clearance: f64,
    pub leaf_width: f64,
    pub leaf_thickness: f64,
    pub resolution: u32,
}

impl Default for HingeParams {
    fn default() -> Self {
        Self {
            length: 30.0,
            knuckle_diameter: 6.0,
            pin_diameter: 3.0,
            knuckles: 5,
            clearance: 0.4,
            leaf_width: 12.0,
            leaf_thickness: 2.0,
            resolution: 48,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HingeParts {
    pub leaf_a: Solid,
    pub leaf_b: Solid,
}

impl HingeParts {
    pub fn assembled(&self) -> Solid {
        Solid::union(vec![self.leaf_a.clone(), self.leaf_b.clone()])
    }

    fn translate(self, offset: DVec3) -> Self {
        Self {
            leaf_a: self.leaf_a.translate(offset),
            leaf_b: self.leaf_b.translate(offset),
        }
    }
}

/// X ranges of the knuckles, separated by the axial clearance
fn knuckle_spans(params: &HingeParams) -> Vec<(f64, f64)> {
    let n = params.knuckles.max(2);
    let step = params.length / n as f64;
    let half_gap = params.clearance / 2.0;
    (0..n)
        .map(|i| {
            let start = i as f64 * step + if i > 0 { half_gap } else { 0.0 };
            let end = (i + 1) as f64 * step - if i + 1 < n { half_gap } else { 0.0 };
            (start, end)
        })
        .collect()
}

fn along_axis(length: f64, radius: f64, start: f64, axis_z: f64, resolution: u32) -> Solid {
    Solid::cylinder(length, radius, resolution)
        .rotate(DVec3::new(0.0, 90.0, 0.0))
        .translate(DVec3::new(start, 0.0, axis_z))
}

/// Knuckles, bridges and plate for one side; `side` is -1 for A, +1 for B
fn leaf(params: &HingeParams, spans: &[(f64, f64)], side: f64) -> Vec<Solid> {
    let kr = params.knuckle_diameter / 2.0;
    let offset = kr + params.clearance;
    let t = params.leaf_thickness;

    let plate_y = if side < 0.0 {
        -offset - params.leaf_width
    } else {
        offset
    };
    let bridge_y = if side < 0.0 { -offset - OVERLAP } else { 0.0 };

    let mut parts = vec![
        Solid::cuboid(DVec3::new(params.length, params.leaf_width, t))
            .translate(DVec3::new(0.0, plate_y, 0.0)),
    ];
    for &(start, end) in spans {
        parts.push(along_axis(end - start, kr, start, kr, params.resolution));
        parts.push(
            Solid::cuboid(DVec3::new(end - start, offset + OVERLAP, t))
                .translate(DVec3::new(start, bridge_y, 0.0)),
        );
    }
    parts
}

pub fn hinge(params: &HingeParams) -> HingeParts {
    let kr = params.knuckle_diameter / 2.0;
    let pin_r = params.pin_diameter / 2.0;
    let spans = knuckle_spans(params);
    let (a_spans, b_spans): (Vec<_>, Vec<_>) = spans
        .iter()
        .enumerate()
        .partition(|(i, _)| i % 2 == 0);
    let a_spans: Vec<(f64, f64)> = a_spans.into_iter().map(|(_, s)| *s).collect();
    let b_spans: Vec<(f64, f64)> = b_spans.into_iter().map(|(_, s)| *s).collect();

    let mut a = leaf(params, &a_spans, -1.0);
    a.push(along_axis(params.length, pin_r, 0.0, kr, params.resolution));
    let leaf_a = Solid::union(a);

    let bore = along_axis(
        params.length + 2.0 * OVERLAP,
        pin_r + params.clearance,
        -OVERLAP,
        kr,
        params.resolution,
    );
    let leaf_b = Solid::difference(Solid::union(leaf(params, &b_spans, 1.0)), vec![bore]);

    HingeParts { leaf_a, leaf_b }
}

/// Hinge raised onto a breakaway scaffold
#[derive(Debug, Clone, PartialEq)]
pub struct SupportedHinge {
    pub parts: HingeParts,
    pub support: Solid,
}

impl SupportedHinge {
    pub fn assembled(&self) -> Solid {
        Solid::union(vec![self.parts.assembled(), self.support.clone()])
    }
}

/// Lift the hinge by the scaffold height plus a small gap and place a
/// scaffold under the knuckle barrel
///
/// Only the height and plate settings of `scaffold` are used; its footprint
/// is replaced by the barrel footprint.
pub fn support_hinge(params: &HingeParams, scaffold: &ScaffoldParams) -> SupportedHinge {
    let kr = params.knuckle_diameter / 2.0;
    let height = scaffold.size.z;
    let lift = height + SUPPORT_GAP;

    let support = support_scaffold(&ScaffoldParams {
        size: DVec3::new(params.length, params.knuckle_diameter, height),
        ..*scaffold
    })
    .translate(DVec3::new(0.0, -kr, 0.0));

    SupportedHinge {
        parts: hinge(params).translate(DVec3::new(0.0, 0.0, lift)),
        support,
    }
}
