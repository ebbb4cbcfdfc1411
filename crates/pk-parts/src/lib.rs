//! Parametric part generators for partkit
//!
//! Every generator is a pure function from a parameter struct to a
//! [`Solid`](pk_kernel::Solid). Numeric options that can be derived from
//! other parameters accept [`AUTO`].
//!
//! - [`thread`]: helical thread segments
//! - [`nut_core`]: threaded bore inserts
//! - [`fastener`]: hex bolts, hex nuts and wing nuts
//! - [`fillet`], [`scaffold`], [`hinge`], [`clasp`], [`wedge`],
//!   [`polycube`], [`nut_trap`]: printable helper shapes

pub mod clasp;
pub mod fastener;
pub mod fillet;
pub mod hinge;
pub mod nut_core;
pub mod nut_trap;
pub mod polycube;
pub mod scaffold;
pub mod thread;
pub mod wedge;

pub use clasp::{ClaspParams, ClaspParts, clasp};
pub use fastener::{
    FastenerSpec, HexBoltParams, HexNutParams, WingNutParams, head_thickness, hex_bolt, hex_nut,
    hex_prism, nut_thickness, wing_nut, wrench_width,
};
pub use fillet::{FilletCubeParams, fillet_corner_cutter, fillet_cube, fillet_edge_cutter};
pub use hinge::{HingeParams, HingeParts, SupportedHinge, hinge, support_hinge};
pub use nut_core::{NutCoreParams, nut_core, nut_core_outer_radius};
pub use nut_trap::{NutTrapParams, nut_trap, nut_trap_slot};
pub use polycube::{PolycubeFaces, polycube, polycube_between};
pub use scaffold::{Perforation, ScaffoldParams, scaffold_plate_positions, support_scaffold};
pub use thread::{
    HelixSlice, ThreadDiagnostic, ThreadMesh, ThreadParams, ThreadProfile, effective_radius,
    generate_thread, thread_segment,
};
pub use wedge::{EdgeAxis, EdgeSpec, WedgeParams, WedgeTrimParams, wedge, wedge_trim};

/// Sentinel for numeric options derived from other parameters
pub const AUTO: f64 = -1.0;

/// Overlap added where separately built bodies are fused (mm)
pub const OVERLAP: f64 = 0.01;

/// Resolve an [`AUTO`] option; any negative value selects `fallback`
pub fn resolve_auto(value: f64, fallback: f64) -> f64 {
    if value < 0.0 { fallback } else { value }
}
