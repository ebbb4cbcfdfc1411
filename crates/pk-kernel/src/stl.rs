//! STL export

use std::io::{BufWriter, Write};
use std::path::Path;

use crate::kernel::TessellatedMesh;

/// Save a tessellated mesh as a binary STL file
pub fn save_stl(mesh: &TessellatedMesh, path: impl AsRef<Path>) -> Result<(), StlError> {
    let file = std::fs::File::create(path.as_ref()).map_err(|e| StlError::Io(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    write_stl(mesh, &mut writer)?;
    writer.flush().map_err(|e| StlError::Io(e.to_string()))
}

/// Write a tessellated mesh as binary STL to any writer
pub fn write_stl<W: Write>(mesh: &TessellatedMesh, writer: &mut W) -> Result<(), StlError> {
    let mut triangles = Vec::with_capacity(mesh.triangle_count());
    for chunk in mesh.indices.chunks_exact(3) {
        let corner = |i: u32| {
            mesh.vertices
                .get(i as usize)
                .copied()
                .ok_or(StlError::IndexOutOfRange(i))
        };
        let (v0, v1, v2) = (corner(chunk[0])?, corner(chunk[1])?, corner(chunk[2])?);

        triangles.push(stl_io::Triangle {
            normal: stl_io::Normal::new(face_normal(v0, v1, v2)),
            vertices: [
                stl_io::Vertex::new(v0),
                stl_io::Vertex::new(v1),
                stl_io::Vertex::new(v2),
            ],
        });
    }

    stl_io::write_stl(writer, triangles.iter()).map_err(|e| StlError::Write(e.to_string()))
}

fn face_normal(v0: [f32; 3], v1: [f32; 3], v2: [f32; 3]) -> [f32; 3] {
    let e1 = glam::Vec3::from(v1) - glam::Vec3::from(v0);
    let e2 = glam::Vec3::from(v2) - glam::Vec3::from(v0);
    let n = e1.cross(e2).normalize_or_zero();
    if n == glam::Vec3::ZERO {
        [0.0, 0.0, 1.0]
    } else {
        n.to_array()
    }
}

/// STL-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StlError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Write error: {0}")]
    Write(String),
    #[error("Triangle references missing vertex {0}")]
    IndexOutOfRange(u32),
}
