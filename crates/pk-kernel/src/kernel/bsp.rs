//! Polygon BSP trees and the boolean operations built on them
//!
//! The classic csg.js algorithm: each operand becomes a BSP tree of convex
//! polygons, trees clip each other's polygons and the survivors are
//! rebuilt into the result. Nodes live in an arena and every traversal
//! uses an explicit stack, so long helical meshes cannot overflow the call
//! stack.

use glam::DVec3;

use crate::constants::{BSP_EPSILON, DEGENERATE_AREA};

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: DVec3,
    pub w: f64,
}

impl Plane {
    /// Plane through three counter-clockwise points, `None` if they are collinear
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let n = (b - a).cross(c - a);
        let len = n.length();
        if !(len > DEGENERATE_AREA) {
            return None;
        }
        let normal = n / len;
        Some(Self {
            normal,
            w: normal.dot(a),
        })
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    fn side(&self, p: DVec3) -> u8 {
        let t = self.normal.dot(p) - self.w;
        if t < -BSP_EPSILON {
            BACK
        } else if t > BSP_EPSILON {
            FRONT
        } else {
            COPLANAR
        }
    }

    fn split(&self, polygon: Polygon) -> Split {
        let mut polygon_type = COPLANAR;
        let types: Vec<u8> = polygon
            .vertices
            .iter()
            .map(|v| {
                let side = self.side(*v);
                polygon_type |= side;
                side
            })
            .collect();

        match polygon_type {
            COPLANAR if self.normal.dot(polygon.plane.normal) > 0.0 => Split::CoplanarFront(polygon),
            COPLANAR => Split::CoplanarBack(polygon),
            FRONT => Split::Front(polygon),
            BACK => Split::Back(polygon),
            _ => {
                let n = polygon.vertices.len();
                let mut front = Vec::with_capacity(n + 1);
                let mut back = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let j = (i + 1) % n;
                    let (ti, tj) = (types[i], types[j]);
                    let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);
                    if ti != BACK {
                        front.push(vi);
                    }
                    if ti != FRONT {
                        back.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let t = (self.w - self.normal.dot(vi)) / self.normal.dot(vj - vi);
                        let v = vi.lerp(vj, t);
                        front.push(v);
                        back.push(v);
                    }
                }
                let plane = polygon.plane;
                Split::Spanning {
                    front: (front.len() >= 3).then(|| Polygon::with_plane(front, plane)),
                    back: (back.len() >= 3).then(|| Polygon::with_plane(back, plane)),
                }
            }
        }
    }
}

enum Split {
    CoplanarFront(Polygon),
    CoplanarBack(Polygon),
    Front(Polygon),
    Back(Polygon),
    Spanning {
        front: Option<Polygon>,
        back: Option<Polygon>,
    },
}

/// Convex planar polygon, counter-clockwise around its plane normal
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<DVec3>,
    pub plane: Plane,
}

impl Polygon {
    /// Polygon from counter-clockwise convex vertices, `None` when degenerate
    pub fn new(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        // Newell normal tolerates collinear leading vertices left by splits
        let n = vertices.len();
        let mut normal = DVec3::ZERO;
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            normal += DVec3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            );
        }
        let len = normal.length();
        if !(len > DEGENERATE_AREA) {
            return None;
        }
        let normal = normal / len;
        let w = normal.dot(vertices[0]);
        Some(Self {
            vertices,
            plane: Plane { normal, w },
        })
    }

    pub fn with_plane(vertices: Vec<DVec3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Fan triangulation (valid because polygons stay convex)
    pub fn triangles(&self) -> impl Iterator<Item = [DVec3; 3]> + '_ {
        (1..self.vertices.len().saturating_sub(1))
            .map(|i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }
}

#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    front: Option<usize>,
    back: Option<usize>,
    polygons: Vec<Polygon>,
}

/// Arena-backed BSP tree
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
}

impl BspTree {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut tree = Self {
            nodes: vec![BspNode::default()],
        };
        tree.build(polygons);
        tree
    }

    /// Insert polygons, splitting them along existing node planes
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack = vec![(0usize, polygons)];
        while let Some((index, polygons)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }
            let plane = match self.nodes[index].plane {
                Some(plane) => plane,
                None => {
                    let plane = polygons[0].plane;
                    self.nodes[index].plane = Some(plane);
                    plane
                }
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in polygons {
                match plane.split(polygon) {
                    Split::CoplanarFront(p) | Split::CoplanarBack(p) => {
                        self.nodes[index].polygons.push(p)
                    }
                    Split::Front(p) => front.push(p),
                    Split::Back(p) => back.push(p),
                    Split::Spanning { front: f, back: b } => {
                        front.extend(f);
                        back.extend(b);
                    }
                }
            }

            if !front.is_empty() {
                let child = self.front_child(index);
                stack.push((child, front));
            }
            if !back.is_empty() {
                let child = self.back_child(index);
                stack.push((child, back));
            }
        }
    }

    fn front_child(&mut self, index: usize) -> usize {
        if let Some(child) = self.nodes[index].front {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(BspNode::default());
        self.nodes[index].front = Some(child);
        child
    }

    fn back_child(&mut self, index: usize) -> usize {
        if let Some(child) = self.nodes[index].back {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(BspNode::default());
        self.nodes[index].back = Some(child);
        child
    }

    /// Swap solid space and empty space
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Remove the parts of `polygons` that lie inside this tree's solid
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack = vec![(0usize, polygons)];
        while let Some((index, polygons)) = stack.pop() {
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                result.extend(polygons);
                continue;
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in polygons {
                match plane.split(polygon) {
                    Split::CoplanarFront(p) | Split::Front(p) => front.push(p),
                    Split::CoplanarBack(p) | Split::Back(p) => back.push(p),
                    Split::Spanning { front: f, back: b } => {
                        front.extend(f);
                        back.extend(b);
                    }
                }
            }

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
            // Polygons behind a leaf are inside the solid and dropped
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }
        result
    }

    /// Remove every polygon of this tree that lies inside `other`
    pub fn clip_to(&mut self, other: &BspTree) {
        for node in &mut self.nodes {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }

    pub fn into_polygons(self) -> Vec<Polygon> {
        self.nodes
            .into_iter()
            .flat_map(|node| node.polygons)
            .collect()
    }
}

pub fn union(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = BspTree::new(a);
    let mut b = BspTree::new(b);
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.into_polygons());
    a.into_polygons()
}

pub fn subtract(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = BspTree::new(a);
    let mut b = BspTree::new(b);
    a.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    b.invert();
    b.clip_to(&a);
    b.invert();
    a.build(b.into_polygons());
    a.invert();
    a.into_polygons()
}

pub fn intersect(a: Vec<Polygon>, b: Vec<Polygon>) -> Vec<Polygon> {
    let mut a = BspTree::new(a);
    let mut b = BspTree::new(b);
    a.invert();
    b.clip_to(&a);
    b.invert();
    a.clip_to(&b);
    b.clip_to(&a);
    a.build(b.into_polygons());
    a.invert();
    a.into_polygons()
}
