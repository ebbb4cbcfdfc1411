//! Threaded bore inserts
//!
//! A nut core is a thin cylinder wall with an internal thread carved out of
//! it. Fastener bodies are bored to the core's outer radius and fused with
//! it, so every nut-like part shares one thread implementation.

use glam::DVec3;
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::thread::{ThreadDiagnostic, ThreadParams, thread_segment};
use crate::{AUTO, OVERLAP};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutCoreParams {
    pub diameter: f64,
    pub pitch: f64,
    /// Axial length of the core (mm)
    pub length: f64,
    pub segments_per_turn: u32,
    /// Positive clearance for internal threads (mm)
    pub diameter_adjust: f64,
    pub thread_angle: f64,
    /// Screw-side truncation; exchanged with `fill` for the bore
    pub truncation: f64,
    /// Screw-side fill; exchanged with `truncation` for the bore
    pub fill: f64,
    /// Wall added to the bore diameter (mm)
    pub wall_margin: f64,
    pub chamfer_top: bool,
    pub chamfer_bottom: bool,
    pub resolution: u32,
}

impl Default for NutCoreParams {
    fn default() -> Self {
        Self {
            diameter: 8.0,
            pitch: 1.25,
            length: 6.4,
            segments_per_turn: 50,
            diameter_adjust: 0.1,
            thread_angle: 60.0,
            truncation: AUTO,
            fill: AUTO,
            wall_margin: 1.0,
            chamfer_top: false,
            chamfer_bottom: false,
            resolution: 64,
        }
    }
}

impl NutCoreParams {
    /// Thread carved out of the wall: complementary profile, no lead or
    /// chamfer, one extra pitch past each end face
    pub fn bore_thread(&self) -> ThreadParams {
        ThreadParams {
            diameter: self.diameter,
            pitch: self.pitch,
            length: self.length + 2.0 * self.pitch,
            segments_per_turn: self.segments_per_turn,
            diameter_adjust: self.diameter_adjust,
            thread_angle: self.thread_angle,
            truncation: self.truncation,
            fill: self.fill,
            lead_top: false,
            lead_bottom: false,
            chamfer_top: false,
            chamfer_bottom: false,
            resolution: self.resolution,
        }
        .complementary()
    }
}

/// Outer radius of the core wall
pub fn nut_core_outer_radius(params: &NutCoreParams) -> f64 {
    (params.diameter + params.diameter_adjust + params.wall_margin) / 2.0
}

/// Thin threaded cylinder wall spanning z = 0 .. `length`
pub fn nut_core(params: &NutCoreParams) -> Solid {
    if let Some(diagnostic) = ThreadDiagnostic::check_adjust(params.diameter_adjust, true) {
        warn!("Nut core: {}", diagnostic);
    }

    let thread = params.bore_thread();
    let profile = thread.profile();
    let wall = Solid::cylinder(params.length, nut_core_outer_radius(params), params.resolution);

    let mut bore =
        vec![thread_segment(&thread).translate(DVec3::new(0.0, 0.0, -params.pitch))];

    // Entry cones open from the crest radius at the face down to the core
    let mouth = profile.outer_radius + OVERLAP;
    let depth = (mouth - profile.core_radius).max(OVERLAP);
    if params.chamfer_bottom {
        bore.push(
            Solid::cone(depth + OVERLAP, mouth + OVERLAP, mouth - depth, params.resolution)
                .translate(DVec3::new(0.0, 0.0, -OVERLAP)),
        );
    }
    if params.chamfer_top {
        bore.push(
            Solid::cone(depth + OVERLAP, mouth - depth, mouth + OVERLAP, params.resolution)
                .translate(DVec3::new(0.0, 0.0, params.length - depth)),
        );
    }

    Solid::difference(wall, vec![Solid::union(bore)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_outer_radius() {
        let p = NutCoreParams::default();
        assert_relative_eq!(nut_core_outer_radius(&p), (8.0 + 0.1 + 1.0) / 2.0);
    }

    #[test]
    fn test_bore_thread_swaps_profile() {
        let p = NutCoreParams {
            truncation: 0.3,
            fill: 0.1,
            ..NutCoreParams::default()
        };
        let t = p.bore_thread();
        assert_relative_eq!(t.truncation, 0.1);
        assert_relative_eq!(t.fill, 0.3);
        assert_relative_eq!(t.length, p.length + 2.5);
        assert!(!t.lead_top && !t.lead_bottom && !t.chamfer_top && !t.chamfer_bottom);
    }

    #[test]
    fn test_wall_encloses_bore() {
        let p = NutCoreParams::default();
        let profile = p.bore_thread().profile();
        assert!(nut_core_outer_radius(&p) > profile.outer_radius);
    }

    #[test]
    fn test_bounds_match_wall() {
        let p = NutCoreParams {
            chamfer_top: true,
            chamfer_bottom: true,
            ..NutCoreParams::default()
        };
        let b = nut_core(&p).bounds().unwrap();
        assert_relative_eq!(b.min.z, 0.0);
        assert_relative_eq!(b.max.z, p.length);
        assert_relative_eq!(b.max.x, nut_core_outer_radius(&p));
    }
}
