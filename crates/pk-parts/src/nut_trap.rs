//! Hex pockets for captive nuts
//!
//! Both shapes are cutters: subtract them from a body. The pocket opens on
//! z = 0 and the bolt hole continues up the Z axis.

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::fastener::{hex_prism, nut_thickness, wrench_width};
use crate::{AUTO, OVERLAP};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutTrapParams {
    /// Nominal bolt diameter (mm)
    pub diameter: f64,
    /// Flat-to-flat width of the nut ([`AUTO`] = standard for `diameter`)
    pub wrench_width: f64,
    /// Pocket depth ([`AUTO`] = nut thickness)
    pub depth: f64,
    /// Play added around the nut and the bolt
    pub clearance: f64,
    /// Length of the bolt hole, measured from the pocket face
    pub bolt_length: f64,
    pub resolution: u32,
}

impl Default for NutTrapParams {
    fn default() -> Self {
        Self {
            diameter: 3.0,
            wrench_width: AUTO,
            depth: AUTO,
            clearance: 0.2,
            bolt_length: 10.0,
            resolution: 32,
        }
    }
}

impl NutTrapParams {
    /// Flat-to-flat width of the pocket
    pub fn pocket_width(&self) -> f64 {
        wrench_width(self.diameter, self.wrench_width) + 2.0 * self.clearance
    }

    pub fn pocket_depth(&self) -> f64 {
        nut_thickness(self.diameter, self.depth) + self.clearance
    }
}

pub fn nut_trap(params: &NutTrapParams) -> Solid {
    let depth = params.pocket_depth();
    let pocket = hex_prism(params.pocket_width(), depth + OVERLAP, false, params.resolution)
        .translate(DVec3::new(0.0, 0.0, -OVERLAP));
    let bolt_radius = params.diameter / 2.0 + params.clearance;
    let bolt = Solid::cylinder(params.bolt_length + 2.0 * OVERLAP, bolt_radius, params.resolution)
        .translate(DVec3::new(0.0, 0.0, -OVERLAP));
    Solid::union(vec![pocket, bolt])
}

/// Pocket extended along +X by `slot_length` so the nut can slide in from
/// the side
pub fn nut_trap_slot(params: &NutTrapParams, slot_length: f64) -> Solid {
    let width = params.pocket_width();
    let depth = params.pocket_depth();
    let slot = Solid::cuboid(DVec3::new(slot_length, width, depth + OVERLAP))
        .translate(DVec3::new(0.0, -width / 2.0, -OVERLAP));
    Solid::union(vec![nut_trap(params), slot])
}
