//! Primitive mesh generation
//!
//! Generates closed, outward-oriented triangle meshes for the leaf shapes of
//! a [`Solid`](crate::Solid) tree:
//! - Cuboid
//! - Cylinder / cone (apex when a radius is zero)
//! - Sphere (UV sphere with single pole vertices)
//! - Linear extrusion of a 2D profile

mod cuboid;
mod cylinder;
mod extrusion;
mod sphere;
mod triangulate;

pub use cuboid::generate_cuboid;
pub use cylinder::generate_cylinder;
pub use extrusion::generate_extrusion;
pub use sphere::generate_sphere;
pub use triangulate::{signed_area, triangulate_polygon};

use glam::{DAffine3, DVec3};

use crate::bounds::Aabb;
use crate::polyhedron::Polyhedron;

/// Indexed triangle mesh, counter-clockwise when viewed from outside
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of every triangle
    pub fn triangle_positions(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        self.triangles.iter().map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Enclosed volume (positive for outward winding)
    pub fn volume(&self) -> f64 {
        self.triangle_positions()
            .map(|[a, b, c]| a.dot(b.cross(c)))
            .sum::<f64>()
            / 6.0
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Apply an affine transform; mirroring transforms flip the winding back outward
    pub fn transformed(&self, transform: &DAffine3) -> TriMesh {
        let flip = transform.matrix3.determinant() < 0.0;
        TriMesh {
            positions: self
                .positions
                .iter()
                .map(|p| transform.transform_point3(*p))
                .collect(),
            triangles: self
                .triangles
                .iter()
                .map(|&[a, b, c]| if flip { [a, c, b] } else { [a, b, c] })
                .collect(),
        }
    }

    /// Convert to the clockwise-from-outside polyhedron convention
    pub fn to_polyhedron(&self) -> Polyhedron {
        Polyhedron::new(
            self.positions.clone(),
            self.triangles.iter().map(|&[a, b, c]| vec![a, c, b]).collect(),
        )
    }
}
