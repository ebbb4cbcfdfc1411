//! Cantilever snap clasps
//!
//! The hook is a base plate with a flexible arm standing on it and a wedge
//! tip facing +Y. The catch is a plate with a slot for the arm; the tip
//! deflects through the slot and latches on the catch's upper face. Both
//! parts are returned in their latched position.

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::OVERLAP;
use crate::wedge::{WedgeParams, wedge};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaspParams {
    /// Arm width along X
    pub width: f64,
    /// Free length of the arm above the base
    pub arm_length: f64,
    pub arm_thickness: f64,
    /// How far the tip overhangs the arm
    pub hook_depth: f64,
    pub clearance: f64,
    /// Thickness of the hook base and of the catch plate
    pub base_thickness: f64,
}

impl Default for ClaspParams {
    fn default() -> Self {
        Self {
            width: 8.0,
            arm_length: 15.0,
            arm_thickness: 1.6,
            hook_depth: 1.0,
            clearance: 0.2,
            base_thickness: 2.0,
        }
    }
}

impl ClaspParams {
    /// Height of the sloped tip; half the arm at most
    fn tip_height(&self) -> f64 {
        (2.0 * self.hook_depth).min(self.arm_length / 2.0)
    }

    /// Height of the latching face above z = 0
    fn latch_height(&self) -> f64 {
        self.base_thickness + self.arm_length - self.tip_height()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaspParts {
    pub hook: Solid,
    pub catch: Solid,
}

impl ClaspParts {
    pub fn assembled(&self) -> Solid {
        Solid::union(vec![self.hook.clone(), self.catch.clone()])
    }
}

pub fn clasp(params: &ClaspParams) -> ClaspParts {
    if params.hook_depth <= params.clearance {
        warn!(
            "Clasp hook depth {} does not exceed clearance {}; it will not latch",
            params.hook_depth, params.clearance
        );
    }

    ClaspParts {
        hook: hook(params),
        catch: catch(params),
    }
}

fn hook(params: &ClaspParams) -> Solid {
    let reach = params.arm_thickness + params.hook_depth;
    let base = Solid::cuboid(DVec3::new(params.width, reach, params.base_thickness));
    let arm = Solid::cuboid(DVec3::new(
        params.width,
        params.arm_thickness,
        params.arm_length + OVERLAP,
    ))
    .translate(DVec3::new(0.0, 0.0, params.base_thickness - OVERLAP));
    let tip = wedge(&WedgeParams {
        length: params.width,
        run: params.hook_depth + OVERLAP,
        rise: params.tip_height(),
    })
    .translate(DVec3::new(
        0.0,
        params.arm_thickness - OVERLAP,
        params.latch_height(),
    ));
    Solid::union(vec![base, arm, tip])
}

fn catch(params: &ClaspParams) -> Solid {
    let c = params.clearance;
    let wall = params.base_thickness;
    let slot = DVec3::new(params.width + 2.0 * c, params.arm_thickness + 2.0 * c, 0.0);
    let outer = DVec3::new(
        slot.x + 2.0 * wall,
        slot.y + params.hook_depth + 2.0 * wall,
        wall,
    );
    let plate = Solid::cuboid(outer);
    let cut = Solid::cuboid(slot.with_z(wall + 2.0 * OVERLAP))
        .translate(DVec3::new(wall, wall, -OVERLAP));
    Solid::difference(plate, vec![cut]).translate(DVec3::new(
        -c - wall,
        -c - wall,
        params.latch_height() - wall,
    ))
}
