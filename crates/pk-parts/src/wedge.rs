//! Right-triangle prisms and chamfer trims

use std::f64::consts::FRAC_PI_2;

use glam::{DAffine3, DMat3, DQuat, DVec2, DVec3};
use pk_kernel::Solid;
use serde::{Deserialize, Serialize};

use crate::OVERLAP;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgeParams {
    /// Prism length along X
    pub length: f64,
    /// Leg along Y
    pub run: f64,
    /// Leg along Z
    pub rise: f64,
}

impl Default for WedgeParams {
    fn default() -> Self {
        Self {
            length: 20.0,
            run: 2.0,
            rise: 2.0,
        }
    }
}

/// Prism along X with its right angle on the X axis and legs on +Y and +Z
pub fn wedge(params: &WedgeParams) -> Solid {
    let profile = vec![
        DVec2::ZERO,
        DVec2::new(params.run, 0.0),
        DVec2::new(0.0, params.rise),
    ];
    Solid::extrude(profile, params.length).rotate(DVec3::new(90.0, 0.0, 90.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeAxis {
    #[default]
    X,
    Y,
    Z,
}

impl EdgeAxis {
    pub fn unit(self) -> DVec3 {
        match self {
            EdgeAxis::X => DVec3::X,
            EdgeAxis::Y => DVec3::Y,
            EdgeAxis::Z => DVec3::Z,
        }
    }

    /// Cyclic permutation taking X to this axis
    fn frame(self) -> DMat3 {
        match self {
            EdgeAxis::X => DMat3::IDENTITY,
            EdgeAxis::Y => DMat3::from_cols(DVec3::Y, DVec3::Z, DVec3::X),
            EdgeAxis::Z => DMat3::from_cols(DVec3::Z, DVec3::X, DVec3::Y),
        }
    }
}

/// Edge of a body to trim
///
/// The edge starts at `origin` and runs along `axis`. With `quadrant` 0
/// the body lies on the positive side of the two other axes, taken in
/// cyclic order (Y/Z for X, Z/X for Y, X/Y for Z); each further quadrant
/// turns that a quarter turn about the edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSpec {
    pub origin: DVec3,
    pub axis: EdgeAxis,
    pub quadrant: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgeTrimParams {
    pub edge: EdgeSpec,
    pub length: f64,
    pub run: f64,
    pub rise: f64,
}

impl Default for WedgeTrimParams {
    fn default() -> Self {
        Self {
            edge: EdgeSpec::default(),
            length: 20.0,
            run: 1.0,
            rise: 1.0,
        }
    }
}

/// Cutter for a trim, grown past the faces it meets without moving its
/// sloped face
fn edge_wedge(params: &WedgeTrimParams) -> Solid {
    if params.run <= 0.0 || params.rise <= 0.0 {
        return Solid::Empty;
    }
    let cutter = wedge(&WedgeParams {
        length: params.length + 2.0 * OVERLAP,
        run: params.run * (1.0 + OVERLAP / params.rise) + OVERLAP,
        rise: params.rise * (1.0 + OVERLAP / params.run) + OVERLAP,
    })
    .translate(DVec3::splat(-OVERLAP));

    let edge = params.edge;
    let turn = DQuat::from_axis_angle(DVec3::X, f64::from(edge.quadrant % 4) * FRAC_PI_2);
    let placement = DAffine3::from_translation(edge.origin)
        * DAffine3::from_mat3(edge.axis.frame())
        * DAffine3::from_quat(turn);
    cutter.transform(placement)
}

/// Cut a chamfer of `run × rise` along an edge of `base`
pub fn wedge_trim(base: Solid, params: &WedgeTrimParams) -> Solid {
    Solid::difference(base, vec![edge_wedge(params)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wedge_axes() {
        let b = wedge(&WedgeParams {
            length: 10.0,
            run: 2.0,
            rise: 3.0,
        })
        .bounds()
        .unwrap();
        assert!(b.min.abs_diff_eq(DVec3::ZERO, 1e-9));
        assert!(b.max.abs_diff_eq(DVec3::new(10.0, 2.0, 3.0), 1e-9));
    }

    #[test]
    fn test_frames_are_rotations() {
        for axis in [EdgeAxis::X, EdgeAxis::Y, EdgeAxis::Z] {
            assert_relative_eq!(axis.frame().determinant(), 1.0);
            assert!((axis.frame() * DVec3::X).abs_diff_eq(axis.unit(), 1e-12));
        }
    }

    #[test]
    fn test_cutter_follows_z_edge() {
        let params = WedgeTrimParams {
            edge: EdgeSpec {
                origin: DVec3::new(5.0, 5.0, 0.0),
                axis: EdgeAxis::Z,
                quadrant: 0,
            },
            length: 10.0,
            run: 2.0,
            rise: 3.0,
        };
        let b = edge_wedge(&params).bounds().unwrap();
        assert_relative_eq!(b.min.z, -OVERLAP, epsilon = 1e-9);
        assert_relative_eq!(b.max.z, 10.0 + OVERLAP, epsilon = 1e-9);
        // legs run along +X then +Y
        assert!(b.max.x > 7.0 && b.max.x < 7.1);
        assert!(b.max.y > 8.0 && b.max.y < 8.1);
    }

    #[test]
    fn test_quadrant_turns_about_edge() {
        let params = WedgeTrimParams {
            edge: EdgeSpec {
                quadrant: 2,
                ..EdgeSpec::default()
            },
            ..WedgeTrimParams::default()
        };
        let b = edge_wedge(&params).bounds().unwrap();
        assert!(b.max.y < 0.1 && b.max.z < 0.1);
        assert!(b.min.y < -1.0 && b.min.z < -1.0);
    }

    #[test]
    fn test_flat_trim_leaves_base() {
        let base = Solid::cube(10.0);
        let params = WedgeTrimParams {
            run: 0.0,
            ..WedgeTrimParams::default()
        };
        assert_eq!(wedge_trim(base.clone(), &params), base);
    }
}
