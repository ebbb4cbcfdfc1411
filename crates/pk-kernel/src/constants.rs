//! Global constants for pk-kernel

/// Default number of segments for cylinder tessellation
pub const CYLINDER_SEGMENTS: u32 = 32;

/// Default number of segments around a sphere
pub const SPHERE_SEGMENTS: u32 = 24;

/// Smallest segment count accepted by round primitives
pub const MIN_SEGMENTS: u32 = 3;

/// Plane side tolerance for BSP classification (mm)
pub const BSP_EPSILON: f64 = 1e-5;

/// Cross product length below which a triangle is treated as degenerate
pub const DEGENERATE_AREA: f64 = 1e-12;

/// Vertex welding precision (multiply by this, then round to int)
pub const WELD_PRECISION: f64 = 1e5;
