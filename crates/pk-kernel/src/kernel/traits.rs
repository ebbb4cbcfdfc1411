//! CSG kernel trait definitions
//!
//! These types define the interface every evaluation kernel implements.

use thiserror::Error;

use crate::bounds::Aabb;
use crate::solid::Solid;

/// Error type for kernel operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Boolean operation failed: {0}")]
    BooleanFailed(String),

    #[error("Convex hull failed: {0}")]
    HullFailed(String),

    #[error("Tessellation failed: {0}")]
    TessellationFailed(String),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Result type for kernel operations
pub type CadResult<T> = Result<T, CadError>;

/// Boolean operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanType {
    /// Union (add)
    Union,
    /// Subtraction (cut)
    Subtract,
    /// Intersection (common)
    Intersect,
}

/// A tessellated mesh output from the kernel
#[derive(Debug, Clone, Default)]
pub struct TessellatedMesh {
    /// Vertex positions (3 floats per vertex)
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals (3 floats per vertex)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (3 indices per triangle)
    pub indices: Vec<u32>,
}

impl TessellatedMesh {
    /// Create an empty tessellated mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.vertices
                .iter()
                .map(|v| glam::DVec3::new(v[0] as f64, v[1] as f64, v[2] as f64)),
        )
    }
}

/// CSG evaluation kernel
///
/// Turns a [`Solid`] tree into a triangle mesh. Implementations must be
/// thread-safe so parts can be rendered in parallel.
pub trait CsgKernel: Send + Sync {
    /// Get the name of this kernel
    fn name(&self) -> &str;

    /// Check if this kernel is available
    fn is_available(&self) -> bool;

    /// Evaluate the tree and tessellate the result
    fn render(&self, solid: &Solid) -> CadResult<TessellatedMesh>;

    /// Combine two solids and evaluate the result
    fn boolean(&self, a: &Solid, b: &Solid, op: BooleanType) -> CadResult<TessellatedMesh> {
        let combined = match op {
            BooleanType::Union => Solid::union(vec![a.clone(), b.clone()]),
            BooleanType::Subtract => Solid::difference(a.clone(), vec![b.clone()]),
            BooleanType::Intersect => Solid::intersection(vec![a.clone(), b.clone()]),
        };
        self.render(&combined)
    }
}

/// A null kernel that returns errors for all operations
///
/// Used when no kernel is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKernel;

impl CsgKernel for NullKernel {
    fn name(&self) -> &str {
        "None"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn render(&self, _solid: &Solid) -> CadResult<TessellatedMesh> {
        Err(CadError::KernelNotAvailable(
            "No CSG kernel available".into(),
        ))
    }
}
