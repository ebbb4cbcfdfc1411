//! Helical thread generation
//!
//! A thread is swept as a sequence of [`HelixSlice`] trapezoids, one per
//! angular step, stitched into a single closed polyhedron. The slices climb
//! one pitch per turn; adjacent turns are kept [`PITCH_SPACE`] apart so the
//! spiral never touches itself, and the inner face sits [`HEIGHT_SPACE`]
//! inside the root so lead-recessed slices keep a non-zero depth.
//!
//! [`thread_segment`] adds the filler core and optional end chamfers on top
//! of the raw polyhedron from [`generate_thread`].

use std::fmt;

use glam::DVec3;
use pk_kernel::{Polyhedron, Solid};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{AUTO, resolve_auto};

/// Axial gap kept between adjacent turns (mm)
pub const PITCH_SPACE: f64 = 0.002;
/// Radial sink of the inner thread face below the root (mm)
pub const HEIGHT_SPACE: f64 = 0.001;
/// Smallest radial overlap between the filler core and the thread root (mm)
pub const MIN_FILL: f64 = 0.01;
/// Angular span over which a lead thread ramps to full depth (degrees)
pub const LEAD_DEGREES: f64 = 120.0;

/// Absorbs float noise in the step count so exact multiples do not round up
const STEP_EPSILON: f64 = 1e-9;
/// Chamfers shallower than this are skipped (mm)
const MIN_CHAMFER: f64 = 0.01;

/// Parameters of one thread segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadParams {
    /// Nominal major diameter (mm)
    pub diameter: f64,
    /// Axial distance per turn (mm)
    pub pitch: f64,
    /// Axial length to cover (mm)
    pub length: f64,
    /// Angular steps per full turn
    pub segments_per_turn: u32,
    /// Signed clearance: negative for screws, positive for nuts (mm)
    pub diameter_adjust: f64,
    /// Included flank angle (degrees)
    pub thread_angle: f64,
    /// Material removed from the crest (mm, [`AUTO`] = h/4)
    pub truncation: f64,
    /// Material added to the root (mm, [`AUTO`] = h/8)
    pub fill: f64,
    pub lead_top: bool,
    pub lead_bottom: bool,
    pub chamfer_top: bool,
    pub chamfer_bottom: bool,
    /// Segments for the filler core and chamfer cones
    pub resolution: u32,
}

impl Default for ThreadParams {
    fn default() -> Self {
        Self {
            diameter: 8.0,
            pitch: 1.25,
            length: 10.0,
            segments_per_turn: 50,
            diameter_adjust: -0.1,
            thread_angle: 60.0,
            truncation: AUTO,
            fill: AUTO,
            lead_top: false,
            lead_bottom: false,
            chamfer_top: false,
            chamfer_bottom: false,
            resolution: 64,
        }
    }
}

impl ThreadParams {
    /// Screw thread with default profile options
    pub fn screw(diameter: f64, pitch: f64, length: f64) -> Self {
        Self {
            diameter,
            pitch,
            length,
            ..Self::default()
        }
    }

    /// Radial height of the fundamental triangle
    pub fn thread_height(&self) -> f64 {
        (self.thread_angle.to_radians() / 2.0).cos() * self.pitch
    }

    pub fn resolved_truncation(&self) -> f64 {
        resolve_auto(self.truncation, self.thread_height() / 4.0)
    }

    pub fn resolved_fill(&self) -> f64 {
        resolve_auto(self.fill, self.thread_height() / 8.0)
    }

    /// Copy with truncation and fill resolved and exchanged (internal thread profile)
    pub fn complementary(&self) -> Self {
        Self {
            truncation: self.resolved_fill(),
            fill: self.resolved_truncation(),
            ..*self
        }
    }

    pub fn profile(&self) -> ThreadProfile {
        let height = self.thread_height();
        let truncation = self.resolved_truncation();
        let fill = self.resolved_fill();
        let depth = height - truncation - fill;
        let outer_radius = self.diameter / 2.0 + self.diameter_adjust;
        let inner_radius = outer_radius - depth;
        ThreadProfile {
            pitch: self.pitch,
            height,
            inner_radius,
            outer_radius,
            core_radius: inner_radius + fill.max(MIN_FILL),
            flank_tan: (self.thread_angle.to_radians() / 2.0).tan(),
        }
    }

    /// Angular steps `n`; slices run from 0 to `n` inclusive
    pub fn step_count(&self) -> usize {
        let steps = (self.length - self.pitch) * self.segments_per_turn as f64 / self.pitch;
        if !steps.is_finite() || steps <= 0.0 {
            return 0;
        }
        (steps - STEP_EPSILON).ceil().max(0.0) as usize
    }

    /// Angular step in degrees
    pub fn degree_step(&self) -> f64 {
        360.0 / self.segments_per_turn.max(1) as f64
    }

    /// Axial rise per angular step
    pub fn step_up(&self) -> f64 {
        self.pitch / self.segments_per_turn.max(1) as f64
    }

    /// Slices over which a lead thread ramps to full depth (at least one)
    pub fn end_segment_count(&self) -> usize {
        ((LEAD_DEGREES / self.degree_step() + STEP_EPSILON).floor() as usize).max(1)
    }

    /// Implausible parameter combinations; never changes generated geometry
    pub fn diagnose(&self) -> Vec<ThreadDiagnostic> {
        let mut out = Vec::new();
        if !(self.pitch > 0.0) {
            out.push(ThreadDiagnostic::NonPositivePitch(self.pitch));
        }
        if self.length <= self.pitch {
            out.push(ThreadDiagnostic::TooShort {
                length: self.length,
                pitch: self.pitch,
            });
        }
        if self.segments_per_turn < 3 {
            out.push(ThreadDiagnostic::TooFewSegments(self.segments_per_turn));
        }
        let (truncation, fill, height) = (
            self.resolved_truncation(),
            self.resolved_fill(),
            self.thread_height(),
        );
        if truncation + fill >= height {
            out.push(ThreadDiagnostic::ProfileCollapsed {
                truncation,
                fill,
                height,
            });
        }
        out
    }
}

/// Implausible thread parameters, reported through `tracing`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThreadDiagnostic {
    NonPositivePitch(f64),
    TooShort { length: f64, pitch: f64 },
    TooFewSegments(u32),
    ProfileCollapsed { truncation: f64, fill: f64, height: f64 },
    /// Clearance sign does not match the screw (negative) / nut (positive) convention
    AdjustSign { adjust: f64, internal: bool },
}

impl ThreadDiagnostic {
    pub fn check_adjust(adjust: f64, internal: bool) -> Option<Self> {
        let wrong = if internal { adjust < 0.0 } else { adjust > 0.0 };
        wrong.then_some(ThreadDiagnostic::AdjustSign { adjust, internal })
    }
}

impl fmt::Display for ThreadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositivePitch(p) => write!(f, "pitch {p} is not positive"),
            Self::TooShort { length, pitch } => {
                write!(f, "length {length} does not exceed pitch {pitch}")
            }
            Self::TooFewSegments(s) => write!(f, "{s} segments per turn is below 3"),
            Self::ProfileCollapsed {
                truncation,
                fill,
                height,
            } => write!(
                f,
                "truncation {truncation} + fill {fill} reaches thread height {height:.4}"
            ),
            Self::AdjustSign { adjust, internal } => write!(
                f,
                "diameter adjust {adjust} on an {} thread",
                if *internal { "internal" } else { "external" }
            ),
        }
    }
}

/// Radial cross-section of a thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadProfile {
    pub pitch: f64,
    /// Radial height of the fundamental triangle
    pub height: f64,
    /// Root radius `r`; the triangle's base
    pub inner_radius: f64,
    /// Crest radius after truncation and fill
    pub outer_radius: f64,
    /// Radius of the solid filler core
    pub core_radius: f64,
    /// tan(angle / 2)
    pub flank_tan: f64,
}

impl ThreadProfile {
    /// Radius where the untruncated flanks meet
    pub fn apex_radius(&self) -> f64 {
        self.inner_radius + self.height
    }

    /// Radial depth of the thread ridge
    pub fn depth(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Widest half-width a ridge may take without touching the next turn
    pub fn max_half_width(&self) -> f64 {
        (self.pitch - PITCH_SPACE) / 2.0
    }

    /// Axial half-width of the ridge at `radius`
    pub fn half_width_at(&self, radius: f64) -> f64 {
        ((self.apex_radius() - radius) * self.flank_tan).clamp(0.0, self.max_half_width())
    }

    /// Axial half-width of solid material at `radius` (core or ridge), `None` beyond the crest
    pub fn material_half_width(&self, radius: f64) -> Option<f64> {
        if radius <= self.core_radius {
            Some(self.pitch / 2.0)
        } else if radius <= self.outer_radius {
            Some(self.half_width_at(radius))
        } else {
            None
        }
    }
}

/// One axial station of the thread cross-section
///
/// Points are stored as inner-upper, inner-lower, outer-upper, outer-lower,
/// which is also their order in the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixSlice {
    /// Rotation about Z (radians)
    pub angle: f64,
    /// Axial base of the pitch band this slice sits in
    pub base_z: f64,
    pub inner_upper: DVec3,
    pub inner_lower: DVec3,
    pub outer_upper: DVec3,
    pub outer_lower: DVec3,
}

impl HelixSlice {
    fn new(
        angle: f64,
        base_z: f64,
        center_z: f64,
        (inner_radius, inner_half): (f64, f64),
        (outer_radius, outer_half): (f64, f64),
    ) -> Self {
        let (sin, cos) = angle.sin_cos();
        let at = |radius: f64, z: f64| DVec3::new(radius * cos, radius * sin, z);
        Self {
            angle,
            base_z,
            inner_upper: at(inner_radius, center_z + inner_half),
            inner_lower: at(inner_radius, center_z - inner_half),
            outer_upper: at(outer_radius, center_z + outer_half),
            outer_lower: at(outer_radius, center_z - outer_half),
        }
    }

    pub fn points(&self) -> [DVec3; 4] {
        [
            self.inner_upper,
            self.inner_lower,
            self.outer_upper,
            self.outer_lower,
        ]
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_upper.truncate().length()
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_upper.truncate().length()
    }
}

/// Raw thread polyhedron plus the slices it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMesh {
    slices: Vec<HelixSlice>,
    polyhedron: Polyhedron,
    profile: ThreadProfile,
    step_count: usize,
    pitch: f64,
}

impl ThreadMesh {
    pub fn slices(&self) -> &[HelixSlice] {
        &self.slices
    }

    /// Angular steps `n` (one fewer than the slice count)
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn polyhedron(&self) -> &Polyhedron {
        &self.polyhedron
    }

    pub fn into_polyhedron(self) -> Polyhedron {
        self.polyhedron
    }

    pub fn profile(&self) -> &ThreadProfile {
        &self.profile
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Nominal axial span: from the first slice's base to one pitch above the last
    pub fn axial_extent(&self) -> Option<(f64, f64)> {
        let first = self.slices.first()?;
        let last = self.slices.last()?;
        Some((first.base_z, last.base_z + self.pitch))
    }
}

/// Outer radius of slice `slice`, recessed towards `base_radius` inside lead spans
pub fn effective_radius(slice: usize, base_radius: f64, params: &ThreadParams) -> f64 {
    let depth = params.profile().depth();
    base_radius + depth * lead_ramp(slice, params.step_count(), params)
}

/// Fraction of full thread depth at `slice` (0 at a lead end, 1 in the body)
fn lead_ramp(slice: usize, steps: usize, params: &ThreadParams) -> f64 {
    let span = params.end_segment_count() as f64;
    let mut ramp: f64 = 1.0;
    if params.lead_bottom {
        ramp = ramp.min(slice as f64 / span);
    }
    if params.lead_top {
        ramp = ramp.min(steps.saturating_sub(slice) as f64 / span);
    }
    ramp.clamp(0.0, 1.0)
}

/// Build the raw helical polyhedron
///
/// Returns an empty mesh (and logs a warning) when the length does not
/// exceed one pitch.
pub fn generate_thread(params: &ThreadParams) -> ThreadMesh {
    for diagnostic in params.diagnose() {
        warn!("Implausible thread parameters: {}", diagnostic);
    }

    let profile = params.profile();
    let steps = params.step_count();
    if steps == 0 {
        warn!(
            "Thread of length {} with pitch {} has no steps",
            params.length, params.pitch
        );
        return ThreadMesh {
            slices: Vec::new(),
            polyhedron: Polyhedron::default(),
            profile,
            step_count: 0,
            pitch: params.pitch,
        };
    }

    let degree_step = params.degree_step();
    let step_up = params.step_up();
    let inner_radius = profile.inner_radius - HEIGHT_SPACE;
    let inner_half = profile.half_width_at(inner_radius);

    let slices: Vec<HelixSlice> = (0..=steps)
        .map(|i| {
            let outer_radius = effective_radius(i, profile.inner_radius, params);
            let outer_half = profile.half_width_at(outer_radius).min(inner_half);
            let base_z = i as f64 * step_up;
            HelixSlice::new(
                (i as f64 * degree_step).to_radians(),
                base_z,
                base_z + params.pitch / 2.0,
                (inner_radius, inner_half),
                (outer_radius, outer_half),
            )
        })
        .collect();

    let vertices: Vec<DVec3> = slices.iter().flat_map(HelixSlice::points).collect();
    let polyhedron = Polyhedron::new(vertices, thread_faces(steps));
    debug!(
        "Generated thread: {} slices, {} faces",
        slices.len(),
        polyhedron.face_count()
    );

    ThreadMesh {
        slices,
        polyhedron,
        profile,
        step_count: steps,
        pitch: params.pitch,
    }
}

/// Face list for `steps + 1` slices, clockwise from outside
fn thread_faces(steps: usize) -> Vec<Vec<u32>> {
    let mut faces = Vec::with_capacity(4 * steps + 2);
    faces.push(vec![0, 2, 3, 1]);
    for j in 0..steps {
        let o = (4 * j) as u32;
        let q = o + 4;
        // lower flank, crest, upper flank, root
        faces.push(vec![o + 3, q + 3, q + 1, o + 1]);
        faces.push(vec![o + 2, q + 2, q + 3, o + 3]);
        faces.push(vec![o, q, q + 2, o + 2]);
        faces.push(vec![o + 1, q + 1, q, o]);
    }
    let e = (4 * steps) as u32;
    faces.push(vec![e + 1, e + 3, e + 2, e]);
    faces
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThreadEnd {
    Bottom,
    Top,
}

/// Thread polyhedron fused with its filler core, chamfered where requested
pub fn thread_segment(params: &ThreadParams) -> Solid {
    let mesh = generate_thread(params);
    let Some((z_bottom, z_top)) = mesh.axial_extent() else {
        return Solid::Empty;
    };

    let profile = *mesh.profile();
    let core = Solid::cylinder(z_top - z_bottom, profile.core_radius, params.resolution)
        .translate(DVec3::new(0.0, 0.0, z_bottom));

    let mut cuts = Vec::new();
    if params.chamfer_bottom {
        cuts.extend(chamfer_cut(&mesh, ThreadEnd::Bottom, params.resolution));
    }
    if params.chamfer_top {
        cuts.extend(chamfer_cut(&mesh, ThreadEnd::Top, params.resolution));
    }

    let body = Solid::union(vec![Solid::polyhedron(mesh.into_polyhedron()), core]);
    Solid::difference(body, cuts)
}

/// Ring outside a 45° cone that starts at the end slice's inner radius
///
/// Radii come from the generated end slice, so a lead recess at that end
/// shrinks the chamfer with it.
fn chamfer_cut(mesh: &ThreadMesh, end: ThreadEnd, resolution: u32) -> Option<Solid> {
    let (z_bottom, z_top) = mesh.axial_extent()?;
    let slice = match end {
        ThreadEnd::Bottom => mesh.slices().first()?,
        ThreadEnd::Top => mesh.slices().last()?,
    };
    let inner = slice.inner_radius();
    let size = slice.outer_radius() - inner;
    if size < MIN_CHAMFER {
        debug!("Skipping {:?} chamfer: end slice is only {:.4} deep", end, size);
        return None;
    }

    let reach = mesh.profile().outer_radius.max(slice.outer_radius()) + size;
    let height = size + MIN_CHAMFER;
    let (ring, keep) = match end {
        ThreadEnd::Bottom => (
            Solid::cylinder(height, reach, resolution)
                .translate(DVec3::new(0.0, 0.0, z_bottom - MIN_CHAMFER)),
            Solid::cone(height, inner - MIN_CHAMFER, inner + size, resolution)
                .translate(DVec3::new(0.0, 0.0, z_bottom - MIN_CHAMFER)),
        ),
        ThreadEnd::Top => (
            Solid::cylinder(height, reach, resolution)
                .translate(DVec3::new(0.0, 0.0, z_top - size)),
            Solid::cone(height, inner + size, inner - MIN_CHAMFER, resolution)
                .translate(DVec3::new(0.0, 0.0, z_top - size)),
        ),
    };
    Some(Solid::difference(ring, vec![keep]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small() -> ThreadParams {
        ThreadParams {
            segments_per_turn: 12,
            length: 4.0,
            pitch: 1.0,
            diameter: 6.0,
            ..ThreadParams::default()
        }
    }

    #[test]
    fn test_profile_radii() {
        let p = ThreadParams {
            truncation: 0.1,
            fill: 0.1,
            ..ThreadParams::screw(10.0, 1.5, 20.0)
        };
        let profile = p.profile();
        let h = (30f64).to_radians().cos() * 1.5;
        assert_relative_eq!(profile.height, h, epsilon = 1e-12);
        assert_relative_eq!(profile.outer_radius, 5.0 - 0.1, epsilon = 1e-12);
        assert_relative_eq!(profile.depth(), h - 0.2, epsilon = 1e-12);
        assert_relative_eq!(profile.core_radius, profile.inner_radius + 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_auto_truncation_and_fill() {
        let p = ThreadParams::default();
        let h = p.thread_height();
        assert_relative_eq!(p.resolved_truncation(), h / 4.0);
        assert_relative_eq!(p.resolved_fill(), h / 8.0);
        let c = p.complementary();
        assert_relative_eq!(c.truncation, h / 8.0);
        assert_relative_eq!(c.fill, h / 4.0);
    }

    #[test]
    fn test_min_fill_floor() {
        let p = ThreadParams {
            fill: 0.0,
            ..ThreadParams::default()
        };
        let profile = p.profile();
        assert_relative_eq!(profile.core_radius, profile.inner_radius + MIN_FILL);
    }

    #[test]
    fn test_half_width_is_clamped() {
        let profile = ThreadParams::default().profile();
        assert_relative_eq!(
            profile.half_width_at(profile.inner_radius - 1.0),
            profile.max_half_width()
        );
        assert_eq!(profile.half_width_at(profile.apex_radius() + 1.0), 0.0);
        assert!(profile.material_half_width(profile.outer_radius + 0.01).is_none());
    }

    #[test]
    fn test_step_count_exact_multiple() {
        let p = ThreadParams {
            length: 3.0,
            pitch: 1.0,
            segments_per_turn: 10,
            ..ThreadParams::default()
        };
        assert_eq!(p.step_count(), 20);
    }

    #[test]
    fn test_end_segment_count() {
        assert_eq!(ThreadParams::default().end_segment_count(), 16);
        let coarse = ThreadParams {
            segments_per_turn: 3,
            ..ThreadParams::default()
        };
        assert_eq!(coarse.end_segment_count(), 1);
    }

    #[test]
    fn test_slice_layout() {
        let mesh = generate_thread(&small());
        let n = mesh.step_count();
        assert_eq!(n, 36);
        assert_eq!(mesh.slices().len(), n + 1);
        assert_eq!(mesh.polyhedron().vertex_count(), 4 * (n + 1));
        assert_eq!(mesh.polyhedron().face_count(), 4 * n + 2);
        let s = mesh.slices()[0];
        assert!(s.inner_upper.z > s.inner_lower.z);
        assert!(s.outer_upper.z >= s.outer_lower.z);
        assert!(s.outer_radius() > s.inner_radius());
    }

    #[test]
    fn test_slices_follow_effective_radius() {
        let params = ThreadParams {
            lead_top: true,
            lead_bottom: true,
            ..small()
        };
        let mesh = generate_thread(&params);
        let base = mesh.profile().inner_radius;
        for (i, slice) in mesh.slices().iter().enumerate() {
            assert_relative_eq!(
                slice.outer_radius(),
                effective_radius(i, base, &params),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_faces_reference_defined_vertices() {
        let mesh = generate_thread(&small());
        let count = mesh.polyhedron().vertex_count() as u32;
        assert!(
            mesh.polyhedron()
                .faces
                .iter()
                .flatten()
                .all(|&i| i < count)
        );
    }

    #[test]
    fn test_thread_is_closed_and_outward() {
        let mesh = generate_thread(&small());
        let report = mesh.polyhedron().edge_report();
        assert!(report.is_watertight(), "{report}");
        assert!(mesh.polyhedron().signed_volume() > 0.0);
    }

    #[test]
    fn test_turns_do_not_touch() {
        let p = small();
        let mesh = generate_thread(&p);
        let per_turn = p.segments_per_turn as usize;
        for (a, b) in mesh.slices().iter().zip(mesh.slices().iter().skip(per_turn)) {
            assert!(b.inner_lower.z - a.inner_upper.z >= PITCH_SPACE - 1e-12);
        }
    }

    #[test]
    fn test_short_thread_is_empty() {
        let p = ThreadParams {
            length: 1.0,
            pitch: 1.25,
            ..ThreadParams::default()
        };
        assert!(generate_thread(&p).is_empty());
        assert!(thread_segment(&p).is_empty());
        assert!(p.diagnose().iter().any(|d| matches!(d, ThreadDiagnostic::TooShort { .. })));
    }

    #[test]
    fn test_collapsed_profile_is_diagnosed() {
        let p = ThreadParams {
            truncation: 0.6,
            fill: 0.6,
            ..ThreadParams::default()
        };
        assert!(
            p.diagnose()
                .iter()
                .any(|d| matches!(d, ThreadDiagnostic::ProfileCollapsed { .. }))
        );
        // Diagnostics never change the output
        assert!(!generate_thread(&p).is_empty());
    }

    #[test]
    fn test_adjust_sign_check() {
        assert!(ThreadDiagnostic::check_adjust(-0.1, false).is_none());
        assert!(ThreadDiagnostic::check_adjust(0.1, true).is_none());
        assert!(ThreadDiagnostic::check_adjust(0.1, false).is_some());
        assert!(ThreadDiagnostic::check_adjust(-0.1, true).is_some());
    }

    #[test]
    fn test_segment_includes_core() {
        let s = thread_segment(&small());
        assert!(matches!(s, Solid::Union(ref c) if c.len() == 2));
    }

    #[test]
    fn test_chamfer_adds_cut() {
        let p = ThreadParams {
            chamfer_bottom: true,
            ..small()
        };
        assert!(matches!(thread_segment(&p), Solid::Difference { ref subtract, .. } if subtract.len() == 1));
    }

    #[test]
    fn test_lead_end_skips_chamfer() {
        let p = ThreadParams {
            chamfer_top: true,
            lead_top: true,
            ..small()
        };
        // The recessed end slice leaves nothing to bevel
        assert!(matches!(thread_segment(&p), Solid::Union(_)));
    }
}
