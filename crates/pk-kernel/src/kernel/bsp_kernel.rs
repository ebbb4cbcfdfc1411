//! Pure-Rust CSG kernel backed by polygon BSP trees

use std::collections::HashMap;

use glam::{DAffine3, DVec3};
use tracing::debug;

use super::bsp::{self, Polygon};
use super::hull::{convex_hull, weld_key};
use super::traits::{CadError, CadResult, CsgKernel, TessellatedMesh};
use crate::constants::BSP_EPSILON;
use crate::primitive::{
    TriMesh, generate_cuboid, generate_cylinder, generate_extrusion, generate_sphere,
};
use crate::solid::Solid;

/// BSP boolean kernel
#[derive(Debug, Clone, Copy, Default)]
pub struct BspKernel;

impl BspKernel {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a solid into convex polygons facing outward
    pub fn evaluate(&self, solid: &Solid) -> CadResult<Vec<Polygon>> {
        match solid {
            Solid::Empty => Ok(Vec::new()),
            Solid::Cuboid { size, center } => Ok(polygons_from_mesh(&generate_cuboid(*size, *center))),
            Solid::Cylinder {
                height,
                radius_bottom,
                radius_top,
                segments,
                center,
            } => Ok(polygons_from_mesh(&generate_cylinder(
                *height,
                *radius_bottom,
                *radius_top,
                *segments,
                *center,
            ))),
            Solid::Sphere { radius, segments } => {
                Ok(polygons_from_mesh(&generate_sphere(*radius, *segments)))
            }
            Solid::Extrusion {
                profile,
                height,
                center,
            } => {
                let mesh = generate_extrusion(profile, *height, *center);
                if mesh.is_empty() {
                    return Err(CadError::InvalidProfile(format!(
                        "extrusion profile with {} points has no area",
                        profile.len()
                    )));
                }
                Ok(polygons_from_mesh(&mesh))
            }
            Solid::Polyhedron(p) => Ok(polygons_from_mesh(&p.to_tri_mesh())),
            Solid::Hull(children) => {
                let mut points = Vec::new();
                for child in children {
                    for polygon in self.evaluate(child)? {
                        points.extend(polygon.vertices);
                    }
                }
                Ok(polygons_from_mesh(&convex_hull(&points)?))
            }
            Solid::Union(children) => {
                let mut acc: Option<(Vec<Polygon>, Option<crate::Aabb>)> = None;
                for child in children {
                    let polygons = self.evaluate(child)?;
                    let bounds = child.bounds();
                    acc = Some(match acc {
                        None => (polygons, bounds),
                        Some((current, current_bounds)) => {
                            let merged = merge_bounds(current_bounds, bounds);
                            if disjoint(current_bounds, bounds) {
                                let mut current = current;
                                current.extend(polygons);
                                (current, merged)
                            } else {
                                (bsp::union(current, polygons), merged)
                            }
                        }
                    });
                }
                Ok(acc.map(|(p, _)| p).unwrap_or_default())
            }
            Solid::Difference { base, subtract } => {
                let mut acc = self.evaluate(base)?;
                let base_bounds = base.bounds();
                for cutter in subtract {
                    if acc.is_empty() {
                        break;
                    }
                    if disjoint(base_bounds, cutter.bounds()) {
                        continue;
                    }
                    acc = bsp::subtract(acc, self.evaluate(cutter)?);
                }
                Ok(acc)
            }
            Solid::Intersection(children) => {
                if solid.bounds().is_none() {
                    return Ok(Vec::new());
                }
                let mut iter = children.iter();
                let Some(first) = iter.next() else {
                    return Ok(Vec::new());
                };
                let mut acc = self.evaluate(first)?;
                for child in iter {
                    acc = bsp::intersect(acc, self.evaluate(child)?);
                }
                Ok(acc)
            }
            Solid::Transformed { transform, child } => {
                let polygons = self.evaluate(child)?;
                Ok(transform_polygons(polygons, transform))
            }
        }
    }
}

impl CsgKernel for BspKernel {
    fn name(&self) -> &str {
        "BSP"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn render(&self, solid: &Solid) -> CadResult<TessellatedMesh> {
        let polygons = self.evaluate(solid)?;
        let mesh = tessellate(&polygons);
        debug!(
            "Rendered {} primitives into {} triangles",
            solid.primitive_count(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

fn polygons_from_mesh(mesh: &TriMesh) -> Vec<Polygon> {
    mesh.triangle_positions()
        .filter_map(|[a, b, c]| Polygon::new(vec![a, b, c]))
        .collect()
}

fn transform_polygons(polygons: Vec<Polygon>, transform: &DAffine3) -> Vec<Polygon> {
    let flip = transform.matrix3.determinant() < 0.0;
    polygons
        .into_iter()
        .filter_map(|polygon| {
            let mut vertices: Vec<DVec3> = polygon
                .vertices
                .iter()
                .map(|v| transform.transform_point3(*v))
                .collect();
            if flip {
                vertices.reverse();
            }
            Polygon::new(vertices)
        })
        .collect()
}

fn merge_bounds(a: Option<crate::Aabb>, b: Option<crate::Aabb>) -> Option<crate::Aabb> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

fn disjoint(a: Option<crate::Aabb>, b: Option<crate::Aabb>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => !a.overlaps(&b, BSP_EPSILON),
        _ => true,
    }
}

/// Weld polygon corners into an indexed mesh with area-weighted normals
fn tessellate(polygons: &[Polygon]) -> TessellatedMesh {
    let mut positions: Vec<DVec3> = Vec::new();
    let mut vertex_map: HashMap<[i64; 3], u32> = HashMap::new();
    let mut indices = Vec::new();

    for polygon in polygons {
        for triangle in polygon.triangles() {
            let tri = triangle.map(|p| {
                *vertex_map.entry(weld_key(p)).or_insert_with(|| {
                    positions.push(p);
                    (positions.len() - 1) as u32
                })
            });
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                continue;
            }
            indices.extend(tri);
        }
    }

    let mut normals = vec![DVec3::ZERO; positions.len()];
    for t in indices.chunks_exact(3) {
        let (a, b, c) = (
            positions[t[0] as usize],
            positions[t[1] as usize],
            positions[t[2] as usize],
        );
        let n = (b - a).cross(c - a);
        for &i in t {
            normals[i as usize] += n;
        }
    }

    TessellatedMesh {
        vertices: positions
            .iter()
            .map(|p| p.as_vec3().to_array())
            .collect(),
        normals: normals
            .iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                let n = if n == DVec3::ZERO { DVec3::Z } else { n };
                n.as_vec3().to_array()
            })
            .collect(),
        indices,
    }
}
