//! Solid primitives and CSG evaluation for partkit
//!
//! A [`Solid`] is an immutable CSG tree value. Part generators compose
//! solids freely; a [`CsgKernel`] turns the tree into a triangle mesh that
//! can be written out with [`save_stl`].

pub mod bounds;
pub mod constants;
pub mod kernel;
pub mod polyhedron;
pub mod primitive;
pub mod solid;
pub mod stl;

pub use bounds::Aabb;
pub use kernel::{
    BooleanType, BspKernel, CadError, CadResult, CsgKernel, NullKernel, TessellatedMesh,
    default_kernel, kernel_by_name,
};
pub use polyhedron::{EdgeReport, Polyhedron};
pub use primitive::TriMesh;
pub use solid::Solid;
pub use stl::{StlError, save_stl, write_stl};
