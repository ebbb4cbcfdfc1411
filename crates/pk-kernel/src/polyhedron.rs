//! Explicit vertex/face meshes
//!
//! Faces are listed clockwise when viewed from outside the solid. The
//! [`EdgeReport`] walks the directed edge set to check that a mesh is
//! closed and consistently wound.

use std::collections::HashMap;
use std::fmt;

use glam::DVec3;

use crate::bounds::Aabb;
use crate::primitive::TriMesh;

/// Polyhedron with faces wound clockwise from outside
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyhedron {
    pub vertices: Vec<DVec3>,
    pub faces: Vec<Vec<u32>>,
}

impl Polyhedron {
    pub fn new(vertices: Vec<DVec3>, faces: Vec<Vec<u32>>) -> Self {
        Self { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Fan triangulation of every face, keeping the face winding
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.faces.iter().flat_map(|face| {
            (1..face.len().saturating_sub(1)).map(move |i| [face[0], face[i], face[i + 1]])
        })
    }

    /// Enclosed volume; positive when the mesh is closed and wound clockwise from outside
    pub fn signed_volume(&self) -> f64 {
        let mut sum = 0.0;
        for [a, b, c] in self.triangles() {
            let (Some(a), Some(b), Some(c)) = (
                self.vertices.get(a as usize),
                self.vertices.get(b as usize),
                self.vertices.get(c as usize),
            ) else {
                continue;
            };
            sum += a.dot(b.cross(*c));
        }
        -sum / 6.0
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Check edge pairing: every edge of a closed mesh is shared by exactly
    /// two faces that traverse it in opposite directions.
    pub fn edge_report(&self) -> EdgeReport {
        let vertex_count = self.vertices.len();
        let mut report = EdgeReport::default();
        // (forward, backward) traversal counts keyed by the sorted vertex pair
        let mut edges: HashMap<(u32, u32), (u32, u32)> = HashMap::new();

        for face in &self.faces {
            if face.iter().any(|&i| i as usize >= vertex_count) {
                report.out_of_range_faces += 1;
                continue;
            }
            if face.len() < 3 {
                report.degenerate_faces += 1;
                continue;
            }
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                if a == b {
                    report.degenerate_faces += 1;
                    continue;
                }
                let entry = edges.entry((a.min(b), a.max(b))).or_insert((0, 0));
                if a < b {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }

        report.edge_count = edges.len();
        for &(forward, backward) in edges.values() {
            match forward + backward {
                1 => report.boundary_edges += 1,
                2 if forward == 1 => {}
                2 => report.misoriented_edges += 1,
                _ => report.non_manifold_edges += 1,
            }
        }
        report
    }

    /// Number of face-connected vertex groups
    pub fn connected_components(&self) -> usize {
        let mut parent: Vec<usize> = (0..self.vertices.len()).collect();
        let mut used = vec![false; self.vertices.len()];

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for face in &self.faces {
            let indices: Vec<usize> = face
                .iter()
                .map(|&i| i as usize)
                .filter(|&i| i < parent.len())
                .collect();
            let Some(&first) = indices.first() else {
                continue;
            };
            for &i in &indices {
                used[i] = true;
                let (ra, rb) = (find(&mut parent, first), find(&mut parent, i));
                if ra != rb {
                    parent[rb] = ra;
                }
            }
        }

        (0..parent.len())
            .filter(|&i| used[i] && find(&mut parent, i) == i)
            .count()
    }

    /// Convert to a counter-clockwise (outward normal) triangle mesh
    pub fn to_tri_mesh(&self) -> TriMesh {
        TriMesh {
            positions: self.vertices.clone(),
            triangles: self.triangles().map(|[a, b, c]| [a, c, b]).collect(),
        }
    }
}

/// Edge pairing statistics for a polyhedron
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges
    pub edge_count: usize,
    /// Edges used by a single face
    pub boundary_edges: usize,
    /// Edges shared by more than two faces
    pub non_manifold_edges: usize,
    /// Edges shared by two faces walking the same direction
    pub misoriented_edges: usize,
    /// Faces with fewer than three distinct corners
    pub degenerate_faces: usize,
    /// Faces referencing a vertex that does not exist
    pub out_of_range_faces: usize,
}

impl EdgeReport {
    pub fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    pub fn is_consistently_wound(&self) -> bool {
        self.misoriented_edges == 0
    }

    /// Closed, consistently wound and free of broken faces
    pub fn is_watertight(&self) -> bool {
        self.is_closed()
            && self.is_consistently_wound()
            && self.out_of_range_faces == 0
            && self.degenerate_faces == 0
    }
}

impl fmt::Display for EdgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} edges, {} boundary, {} non-manifold, {} misoriented",
            self.edge_count, self.boundary_edges, self.non_manifold_edges, self.misoriented_edges
        )?;
        if self.degenerate_faces > 0 || self.out_of_range_faces > 0 {
            write!(
                f,
                ", {} degenerate faces, {} faces out of range",
                self.degenerate_faces, self.out_of_range_faces
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> Polyhedron {
        // Clockwise from outside
        Polyhedron::new(
            vec![
                DVec3::ZERO,
                DVec3::X,
                DVec3::Y,
                DVec3::Z,
            ],
            vec![vec![0, 1, 2], vec![0, 3, 1], vec![0, 2, 3], vec![1, 3, 2]],
        )
    }

    #[test]
    fn test_tetrahedron_volume() {
        assert_relative_eq!(tetrahedron().signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_tetrahedron_edges() {
        let report = tetrahedron().edge_report();
        assert_eq!(report.edge_count, 6);
        assert!(report.is_watertight(), "{report}");
    }

    #[test]
    fn test_open_mesh_reports_boundary() {
        let mut p = tetrahedron();
        p.faces.pop();
        let report = p.edge_report();
        assert_eq!(report.boundary_edges, 3);
        assert!(!report.is_closed());
    }

    #[test]
    fn test_flipped_face_reports_misorientation() {
        let mut p = tetrahedron();
        p.faces[0].reverse();
        let report = p.edge_report();
        assert!(report.is_closed());
        assert_eq!(report.misoriented_edges, 3);
    }

    #[test]
    fn test_out_of_range_face() {
        let mut p = tetrahedron();
        p.faces.push(vec![0, 1, 9]);
        assert_eq!(p.edge_report().out_of_range_faces, 1);
    }

    #[test]
    fn test_connected_components() {
        let mut p = tetrahedron();
        assert_eq!(p.connected_components(), 1);
        let offset = p.vertices.len() as u32;
        let shifted: Vec<DVec3> = p.vertices.iter().map(|v| *v + DVec3::splat(5.0)).collect();
        let faces: Vec<Vec<u32>> = p
            .faces
            .iter()
            .map(|f| f.iter().map(|i| i + offset).collect())
            .collect();
        p.vertices.extend(shifted);
        p.faces.extend(faces);
        assert_eq!(p.connected_components(), 2);
    }

    #[test]
    fn test_to_tri_mesh_is_outward() {
        let mesh = tetrahedron().to_tri_mesh();
        assert_relative_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-12);
    }
}
