//! Immutable CSG tree values
//!
//! Constructors and combinators never fail and never evaluate geometry;
//! they only assemble the tree. Evaluation happens in a
//! [`CsgKernel`](crate::CsgKernel).

use std::sync::Arc;

use glam::{DAffine3, DMat3, DQuat, DVec2, DVec3, EulerRot};

use crate::bounds::Aabb;
use crate::constants::{CYLINDER_SEGMENTS, SPHERE_SEGMENTS};
use crate::polyhedron::Polyhedron;

/// A node of a constructive solid geometry tree
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Solid {
    /// The empty set; identity for union, absorbing for intersection
    #[default]
    Empty,
    Cuboid {
        size: DVec3,
        center: bool,
    },
    /// Cylinder along Z; a cone when the radii differ
    Cylinder {
        height: f64,
        radius_bottom: f64,
        radius_top: f64,
        segments: u32,
        center: bool,
    },
    Sphere {
        radius: f64,
        segments: u32,
    },
    /// 2D profile in the XY plane swept along Z
    Extrusion {
        profile: Vec<DVec2>,
        height: f64,
        center: bool,
    },
    Polyhedron(Arc<Polyhedron>),
    Hull(Vec<Solid>),
    Union(Vec<Solid>),
    Difference {
        base: Box<Solid>,
        subtract: Vec<Solid>,
    },
    Intersection(Vec<Solid>),
    Transformed {
        transform: DAffine3,
        child: Box<Solid>,
    },
}

impl Solid {
    /// Box with one corner at the origin
    pub fn cuboid(size: DVec3) -> Self {
        Solid::Cuboid {
            size,
            center: false,
        }
    }

    pub fn cube(edge: f64) -> Self {
        Self::cuboid(DVec3::splat(edge))
    }

    pub fn cylinder(height: f64, radius: f64, segments: u32) -> Self {
        Self::cone(height, radius, radius, segments)
    }

    pub fn cone(height: f64, radius_bottom: f64, radius_top: f64, segments: u32) -> Self {
        Solid::Cylinder {
            height,
            radius_bottom,
            radius_top,
            segments,
            center: false,
        }
    }

    /// Cylinder with the default segment count
    pub fn rod(height: f64, radius: f64) -> Self {
        Self::cylinder(height, radius, CYLINDER_SEGMENTS)
    }

    pub fn sphere(radius: f64, segments: u32) -> Self {
        Solid::Sphere { radius, segments }
    }

    /// Sphere with the default segment count
    pub fn ball(radius: f64) -> Self {
        Self::sphere(radius, SPHERE_SEGMENTS)
    }

    pub fn extrude(profile: Vec<DVec2>, height: f64) -> Self {
        Solid::Extrusion {
            profile,
            height,
            center: false,
        }
    }

    pub fn polyhedron(polyhedron: Polyhedron) -> Self {
        if polyhedron.is_empty() {
            return Solid::Empty;
        }
        Solid::Polyhedron(Arc::new(polyhedron))
    }

    /// Centre a primitive on the origin (no effect on other nodes)
    pub fn centered(self) -> Self {
        match self {
            Solid::Cuboid { size, .. } => Solid::Cuboid { size, center: true },
            Solid::Cylinder {
                height,
                radius_bottom,
                radius_top,
                segments,
                ..
            } => Solid::Cylinder {
                height,
                radius_bottom,
                radius_top,
                segments,
                center: true,
            },
            Solid::Extrusion {
                profile, height, ..
            } => Solid::Extrusion {
                profile,
                height,
                center: true,
            },
            other => other,
        }
    }

    pub fn hull(children: Vec<Solid>) -> Self {
        let children = non_empty(children);
        if children.is_empty() {
            return Solid::Empty;
        }
        Solid::Hull(children)
    }

    pub fn union(children: Vec<Solid>) -> Self {
        let mut children = non_empty(children);
        match children.len() {
            0 => Solid::Empty,
            1 => children.remove(0),
            _ => Solid::Union(children),
        }
    }

    pub fn difference(base: Solid, subtract: Vec<Solid>) -> Self {
        if base.is_empty() {
            return Solid::Empty;
        }
        let subtract = non_empty(subtract);
        if subtract.is_empty() {
            return base;
        }
        Solid::Difference {
            base: Box::new(base),
            subtract,
        }
    }

    pub fn intersection(mut children: Vec<Solid>) -> Self {
        if children.is_empty() || children.iter().any(Solid::is_empty) {
            return Solid::Empty;
        }
        if children.len() == 1 {
            return children.remove(0);
        }
        Solid::Intersection(children)
    }

    pub fn translate(self, offset: DVec3) -> Self {
        self.transform(DAffine3::from_translation(offset))
    }

    /// Rotate by Euler angles in degrees, applied about X, then Y, then Z
    pub fn rotate(self, degrees: DVec3) -> Self {
        let rotation = DQuat::from_euler(
            EulerRot::ZYX,
            degrees.z.to_radians(),
            degrees.y.to_radians(),
            degrees.x.to_radians(),
        );
        self.transform(DAffine3::from_quat(rotation))
    }

    pub fn scale(self, factors: DVec3) -> Self {
        self.transform(DAffine3::from_scale(factors))
    }

    /// Reflect across the plane through the origin with the given normal
    pub fn mirror(self, normal: DVec3) -> Self {
        let n = normal.normalize_or_zero();
        if n == DVec3::ZERO {
            return self;
        }
        let reflect = DMat3::from_cols(
            DVec3::X - 2.0 * n * n.x,
            DVec3::Y - 2.0 * n * n.y,
            DVec3::Z - 2.0 * n * n.z,
        );
        self.transform(DAffine3::from_mat3(reflect))
    }

    /// Apply an affine transform, folding nested transforms together
    pub fn transform(self, transform: DAffine3) -> Self {
        match self {
            Solid::Empty => Solid::Empty,
            Solid::Transformed {
                transform: inner,
                child,
            } => Solid::Transformed {
                transform: transform * inner,
                child,
            },
            other => Solid::Transformed {
                transform,
                child: Box::new(other),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Solid::Empty)
    }

    /// Conservative bounding box, `None` when the solid is known to be empty
    pub fn bounds(&self) -> Option<Aabb> {
        match self {
            Solid::Empty => None,
            Solid::Cuboid { size, center } => {
                let offset = if *center { -*size * 0.5 } else { DVec3::ZERO };
                Some(Aabb::new(offset, offset + *size))
            }
            Solid::Cylinder {
                height,
                radius_bottom,
                radius_top,
                center,
                ..
            } => {
                let r = radius_bottom.abs().max(radius_top.abs());
                let z0 = if *center { -height / 2.0 } else { 0.0 };
                Some(Aabb::new(
                    DVec3::new(-r, -r, z0),
                    DVec3::new(r, r, z0 + height),
                ))
            }
            Solid::Sphere { radius, .. } => {
                Some(Aabb::new(DVec3::splat(-radius), DVec3::splat(*radius)))
            }
            Solid::Extrusion {
                profile,
                height,
                center,
            } => {
                let z0 = if *center { -height / 2.0 } else { 0.0 };
                let flat = Aabb::from_points(profile.iter().map(|p| p.extend(z0)))?;
                Some(Aabb::new(flat.min, flat.max.with_z(z0 + height)))
            }
            Solid::Polyhedron(p) => p.bounds(),
            Solid::Hull(children) | Solid::Union(children) => children
                .iter()
                .filter_map(Solid::bounds)
                .reduce(|a, b| a.merge(&b)),
            Solid::Difference { base, .. } => base.bounds(),
            Solid::Intersection(children) => {
                let mut iter = children.iter().map(Solid::bounds);
                let mut acc = iter.next()??;
                for b in iter {
                    acc = acc.intersection(&b?)?;
                }
                Some(acc)
            }
            Solid::Transformed { transform, child } => {
                child.bounds().map(|b| b.transformed(transform))
            }
        }
    }

    /// Number of leaf primitives in the tree
    pub fn primitive_count(&self) -> usize {
        match self {
            Solid::Empty => 0,
            Solid::Cuboid { .. }
            | Solid::Cylinder { .. }
            | Solid::Sphere { .. }
            | Solid::Extrusion { .. }
            | Solid::Polyhedron(_) => 1,
            Solid::Hull(children) | Solid::Union(children) | Solid::Intersection(children) => {
                children.iter().map(Solid::primitive_count).sum()
            }
            Solid::Difference { base, subtract } => {
                base.primitive_count() + subtract.iter().map(Solid::primitive_count).sum::<usize>()
            }
            Solid::Transformed { child, .. } => child.primitive_count(),
        }
    }
}

fn non_empty(children: Vec<Solid>) -> Vec<Solid> {
    children.into_iter().filter(|c| !c.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_union_drops_empty() {
        let u = Solid::union(vec![Solid::Empty, Solid::cube(1.0), Solid::Empty]);
        assert_eq!(u, Solid::cube(1.0));
        assert!(Solid::union(vec![]).is_empty());
    }

    #[test]
    fn test_difference_of_empty_base() {
        assert!(Solid::difference(Solid::Empty, vec![Solid::cube(1.0)]).is_empty());
        assert_eq!(
            Solid::difference(Solid::cube(1.0), vec![Solid::Empty]),
            Solid::cube(1.0)
        );
    }

    #[test]
    fn test_intersection_with_empty() {
        assert!(Solid::intersection(vec![Solid::cube(1.0), Solid::Empty]).is_empty());
    }

    #[test]
    fn test_nested_transforms_fold() {
        let s = Solid::cube(1.0)
            .translate(DVec3::X)
            .translate(DVec3::Y);
        match &s {
            Solid::Transformed { transform, child } => {
                assert_eq!(**child, Solid::cube(1.0));
                assert_relative_eq!(transform.translation.x, 1.0);
                assert_relative_eq!(transform.translation.y, 1.0);
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn test_rotate_order_x_then_z() {
        // X then Z: +Y -> +Z (about X) -> +Z (about Z)
        let s = Solid::cube(1.0).rotate(DVec3::new(90.0, 0.0, 90.0));
        let Solid::Transformed { transform, .. } = s else {
            panic!("expected transform");
        };
        let p = transform.transform_point3(DVec3::Y);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-12);
        let q = transform.transform_point3(DVec3::X);
        assert_relative_eq!(q.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mirror_bounds() {
        let b = Solid::cube(2.0).mirror(DVec3::X).bounds().unwrap();
        assert_relative_eq!(b.min.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(b.max.x, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_intersection_bounds() {
        let s = Solid::intersection(vec![
            Solid::cube(2.0),
            Solid::cube(2.0).translate(DVec3::splat(1.0)),
        ]);
        let b = s.bounds().unwrap();
        assert_relative_eq!(b.min.x, 1.0);
        assert_relative_eq!(b.max.x, 2.0);
    }

    #[test]
    fn test_primitive_count() {
        let s = Solid::difference(
            Solid::union(vec![Solid::cube(1.0), Solid::ball(1.0)]),
            vec![Solid::rod(1.0, 0.2)],
        );
        assert_eq!(s.primitive_count(), 3);
    }
}
