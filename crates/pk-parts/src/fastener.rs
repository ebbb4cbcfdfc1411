//! Hex bolts, hex nuts and wing nuts
//!
//! Each assembler derives its secondary dimensions into a [`FastenerSpec`]
//! and then combines a body with one thread segment (bolts) or one nut
//! core (nuts). Sizes are not validated.

use glam::{DVec2, DVec3};
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::nut_core::{NutCoreParams, nut_core, nut_core_outer_radius};
use crate::thread::{ThreadDiagnostic, ThreadParams, thread_segment};
use crate::{AUTO, OVERLAP, resolve_auto};

/// Fraction of the across-flats width where hex chamfers begin
const HEX_CHAMFER_START: f64 = 0.95;

/// Across-flats width: `requested` if set, else banded by diameter
pub fn wrench_width(diameter: f64, requested: f64) -> f64 {
    let band = if diameter < 6.0 {
        2.5
    } else if diameter <= 8.0 {
        4.0
    } else if diameter < 10.0 {
        5.0
    } else {
        7.0
    };
    resolve_auto(requested, diameter + band)
}

/// Bolt head height: `requested` if set, else banded by diameter
pub fn head_thickness(diameter: f64, requested: f64) -> f64 {
    let auto = if diameter < 6.0 {
        0.7 * diameter + 0.5
    } else if diameter < 10.0 {
        0.65 * diameter
    } else {
        0.625 * diameter
    };
    resolve_auto(requested, auto)
}

/// Nut height: `requested` if set, else banded by diameter
pub fn nut_thickness(diameter: f64, requested: f64) -> f64 {
    let auto = if diameter < 6.0 {
        0.8 * diameter + 0.4
    } else {
        0.8 * diameter
    };
    resolve_auto(requested, auto)
}

/// Derived dimensions of one fastener
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastenerSpec {
    pub diameter: f64,
    pub pitch: f64,
    /// Across-flats width of the hex body
    pub wrench_width: f64,
    /// Head (bolt) or body (nut) height
    pub body_thickness: f64,
    /// Threaded length below the head
    pub thread_length: f64,
    /// Plain shank between head and thread
    pub barrel_length: f64,
}

impl FastenerSpec {
    pub fn for_bolt(params: &HexBoltParams) -> Self {
        let thread_length = resolve_auto(params.thread_length, params.length);
        Self {
            diameter: params.diameter,
            pitch: params.pitch,
            wrench_width: wrench_width(params.diameter, params.wrench_width),
            body_thickness: head_thickness(params.diameter, params.head_thickness),
            thread_length,
            barrel_length: (params.length - thread_length).max(0.0),
        }
    }

    pub fn for_nut(params: &HexNutParams) -> Self {
        let thickness = nut_thickness(params.diameter, params.thickness);
        Self {
            diameter: params.diameter,
            pitch: params.pitch,
            wrench_width: wrench_width(params.diameter, params.wrench_width),
            body_thickness: thickness,
            thread_length: thickness,
            barrel_length: 0.0,
        }
    }

    pub fn for_wing_nut(params: &WingNutParams) -> Self {
        let thickness = nut_thickness(params.diameter, params.thickness);
        Self {
            diameter: params.diameter,
            pitch: params.pitch,
            wrench_width: wrench_width(params.diameter, AUTO),
            body_thickness: thickness,
            thread_length: thickness,
            barrel_length: 0.0,
        }
    }

    /// Corner radius of the hex body
    pub fn hex_circumradius(&self) -> f64 {
        self.wrench_width / 3f64.sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexBoltParams {
    pub diameter: f64,
    pub pitch: f64,
    /// Length below the head (mm)
    pub length: f64,
    /// Threaded part of `length` ([`AUTO`] = all of it)
    pub thread_length: f64,
    pub head_thickness: f64,
    pub wrench_width: f64,
    pub segments_per_turn: u32,
    pub diameter_adjust: f64,
    pub thread_angle: f64,
    pub truncation: f64,
    pub fill: f64,
    pub chamfer_head: bool,
    pub resolution: u32,
}

impl Default for HexBoltParams {
    fn default() -> Self {
        Self {
            diameter: 8.0,
            pitch: 1.25,
            length: 20.0,
            thread_length: AUTO,
            head_thickness: AUTO,
            wrench_width: AUTO,
            segments_per_turn: 50,
            diameter_adjust: -0.1,
            thread_angle: 60.0,
            truncation: AUTO,
            fill: AUTO,
            chamfer_head: true,
            resolution: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexNutParams {
    pub diameter: f64,
    pub pitch: f64,
    pub thickness: f64,
    pub wrench_width: f64,
    pub segments_per_turn: u32,
    pub diameter_adjust: f64,
    pub thread_angle: f64,
    pub truncation: f64,
    pub fill: f64,
    pub wall_margin: f64,
    pub chamfer: bool,
    pub resolution: u32,
}

impl Default for HexNutParams {
    fn default() -> Self {
        Self {
            diameter: 8.0,
            pitch: 1.25,
            thickness: AUTO,
            wrench_width: AUTO,
            segments_per_turn: 50,
            diameter_adjust: 0.1,
            thread_angle: 60.0,
            truncation: AUTO,
            fill: AUTO,
            wall_margin: 1.0,
            chamfer: true,
            resolution: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WingNutParams {
    pub diameter: f64,
    pub pitch: f64,
    pub thickness: f64,
    /// Round hub diameter ([`AUTO`] = hex wrench width)
    pub hub_diameter: f64,
    /// Tip-to-tip width of both wings ([`AUTO`] = 4.5 × diameter)
    pub wing_span: f64,
    /// Wing height above the base ([`AUTO`] = 2 × thickness)
    pub wing_height: f64,
    /// Wing thickness ([`AUTO`] = 0.35 × diameter + 1)
    pub wing_thickness: f64,
    pub segments_per_turn: u32,
    pub diameter_adjust: f64,
    pub thread_angle: f64,
    pub truncation: f64,
    pub fill: f64,
    pub wall_margin: f64,
    pub resolution: u32,
}

impl Default for WingNutParams {
    fn default() -> Self {
        Self {
            diameter: 8.0,
            pitch: 1.25,
            thickness: AUTO,
            hub_diameter: AUTO,
            wing_span: AUTO,
            wing_height: AUTO,
            wing_thickness: AUTO,
            segments_per_turn: 50,
            diameter_adjust: 0.1,
            thread_angle: 60.0,
            truncation: AUTO,
            fill: AUTO,
            wall_margin: 1.0,
            resolution: 32,
        }
    }
}

impl HexBoltParams {
    /// Shank thread: lead-in at the free end, no chamfers
    pub fn thread_params(&self) -> ThreadParams {
        ThreadParams {
            diameter: self.diameter,
            pitch: self.pitch,
            length: FastenerSpec::for_bolt(self).thread_length,
            segments_per_turn: self.segments_per_turn,
            diameter_adjust: self.diameter_adjust,
            thread_angle: self.thread_angle,
            truncation: self.truncation,
            fill: self.fill,
            lead_top: true,
            lead_bottom: false,
            chamfer_top: false,
            chamfer_bottom: false,
            resolution: self.resolution,
        }
    }
}

impl HexNutParams {
    pub fn core_params(&self) -> NutCoreParams {
        NutCoreParams {
            diameter: self.diameter,
            pitch: self.pitch,
            length: FastenerSpec::for_nut(self).body_thickness,
            segments_per_turn: self.segments_per_turn,
            diameter_adjust: self.diameter_adjust,
            thread_angle: self.thread_angle,
            truncation: self.truncation,
            fill: self.fill,
            wall_margin: self.wall_margin,
            chamfer_top: true,
            chamfer_bottom: true,
            resolution: self.resolution,
        }
    }
}

impl WingNutParams {
    pub fn core_params(&self) -> NutCoreParams {
        NutCoreParams {
            diameter: self.diameter,
            pitch: self.pitch,
            length: FastenerSpec::for_wing_nut(self).body_thickness,
            segments_per_turn: self.segments_per_turn,
            diameter_adjust: self.diameter_adjust,
            thread_angle: self.thread_angle,
            truncation: self.truncation,
            fill: self.fill,
            wall_margin: self.wall_margin,
            chamfer_top: true,
            chamfer_bottom: true,
            resolution: self.resolution,
        }
    }
}

/// Extruded hexagon standing on z = 0, corners on the X axis
///
/// With `chamfer` set both ends are bevelled by two 45° cones starting just
/// inside the flats.
pub fn hex_prism(wrench_width: f64, height: f64, chamfer: bool, resolution: u32) -> Solid {
    let circumradius = wrench_width / 3f64.sqrt();
    let hexagon: Vec<DVec2> = (0..6)
        .map(|i| {
            let angle = (i as f64 * 60.0).to_radians();
            DVec2::new(angle.cos(), angle.sin()) * circumradius
        })
        .collect();
    let prism = Solid::extrude(hexagon, height);
    if !chamfer {
        return prism;
    }

    let start = HEX_CHAMFER_START * wrench_width / 2.0;
    Solid::intersection(vec![
        prism,
        Solid::cone(height, start, start + height, resolution),
        Solid::cone(height, start + height, start, resolution),
    ])
}

/// Hex-head bolt: head on z = 0 .. k, shank pointing up
pub fn hex_bolt(params: &HexBoltParams) -> Solid {
    if let Some(diagnostic) = ThreadDiagnostic::check_adjust(params.diameter_adjust, false) {
        warn!("Hex bolt: {}", diagnostic);
    }
    let spec = FastenerSpec::for_bolt(params);
    debug!("Hex bolt {:?}", spec);

    let mut parts = vec![hex_prism(
        spec.wrench_width,
        spec.body_thickness,
        params.chamfer_head,
        params.resolution,
    )];

    let shank_z = spec.body_thickness - OVERLAP;
    if spec.barrel_length > 0.0 {
        parts.push(
            Solid::cylinder(
                spec.barrel_length + OVERLAP,
                params.diameter / 2.0 + params.diameter_adjust,
                params.resolution,
            )
            .translate(DVec3::new(0.0, 0.0, shank_z)),
        );
    }

    parts.push(
        thread_segment(&params.thread_params())
            .translate(DVec3::new(0.0, 0.0, shank_z + spec.barrel_length)),
    );

    Solid::union(parts)
}

/// Hex nut on z = 0 .. thickness
pub fn hex_nut(params: &HexNutParams) -> Solid {
    let spec = FastenerSpec::for_nut(params);
    debug!("Hex nut {:?}", spec);

    let core = params.core_params();

    let body = hex_prism(
        spec.wrench_width,
        spec.body_thickness,
        params.chamfer,
        params.resolution,
    );
    let bore = plain_bore(nut_core_outer_radius(&core), spec.body_thickness, params.resolution);

    Solid::union(vec![Solid::difference(body, vec![bore]), nut_core(&core)])
}

/// Wing nut: round hub with two mirrored lobes, threaded through
pub fn wing_nut(params: &WingNutParams) -> Solid {
    Solid::union(vec![wing_nut_body(params), nut_core(&params.core_params())])
}

/// Hub and lobes with the plain bore cut, before the nut core is fused in
fn wing_nut_body(params: &WingNutParams) -> Solid {
    let spec = FastenerSpec::for_wing_nut(params);
    let thickness = spec.body_thickness;
    let hub_radius = wing_hub_radius(params);
    let span = resolve_auto(params.wing_span, 4.5 * params.diameter);
    let height = resolve_auto(params.wing_height, 2.0 * thickness);
    let lobe_radius = resolve_auto(params.wing_thickness, 0.35 * params.diameter + 1.0) / 2.0;
    debug!(
        "Wing nut {:?}: hub {:.2}, span {:.2}, height {:.2}",
        spec, hub_radius, span, height
    );

    let hub = Solid::cylinder(thickness, hub_radius, params.resolution);

    // Lobe outline in the XZ plane, traced by spheres and hulled
    let inner_x = hub_radius * 0.5;
    let outer_x = (span / 2.0 - lobe_radius).max(inner_x + lobe_radius);
    let low_z = lobe_radius;
    let top_z = (height - lobe_radius).max(low_z);
    let shoulder_z = (thickness * 0.5 + lobe_radius).min(top_z);
    let sphere = |x: f64, z: f64| {
        Solid::sphere(lobe_radius, params.resolution).translate(DVec3::new(x, 0.0, z))
    };
    let lobe = Solid::hull(vec![
        sphere(inner_x, low_z),
        sphere(inner_x, top_z),
        sphere(outer_x, top_z),
        sphere(outer_x - (top_z - shoulder_z) * 0.5, shoulder_z),
    ]);
    // Lobe spheres dip below the base; trim them flush
    let floor = Solid::cuboid(DVec3::new(span + 2.0, 2.0 * lobe_radius + 2.0, height + 2.0))
        .translate(DVec3::new(-span / 2.0 - 1.0, -lobe_radius - 1.0, 0.0));
    let lobes = Solid::intersection(vec![
        Solid::union(vec![lobe.clone(), lobe.mirror(DVec3::X)]),
        floor,
    ]);

    let bore = plain_bore(
        nut_core_outer_radius(&params.core_params()),
        height.max(thickness),
        params.resolution,
    );
    Solid::difference(Solid::union(vec![hub, lobes]), vec![bore])
}

fn wing_hub_radius(params: &WingNutParams) -> f64 {
    let spec = FastenerSpec::for_wing_nut(params);
    resolve_auto(params.hub_diameter, spec.wrench_width) / 2.0
}

/// Plain hole slightly narrower than a nut core so the two fuse
fn plain_bore(core_radius: f64, height: f64, resolution: u32) -> Solid {
    Solid::cylinder(height + 2.0 * OVERLAP, core_radius - OVERLAP, resolution)
        .translate(DVec3::new(0.0, 0.0, -OVERLAP))
}
