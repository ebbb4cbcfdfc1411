//! Render every part of a build file to STL

use std::collections::HashSet;
use std::path::PathBuf;

use pk_kernel::{CadError, CsgKernel, StlError, kernel_by_name, save_stl};
use pk_parts::generate_thread;
use tracing::{debug, info, warn};

use crate::config::{BuildFile, ConfigError, NamedPart};

/// Command line overrides for a build file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    pub output_dir: Option<PathBuf>,
    pub kernel: Option<String>,
    /// Log the edge report of every thread before rendering
    pub report: bool,
}

/// One written STL file
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltPart {
    pub name: String,
    pub path: PathBuf,
    pub triangles: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Unknown kernel: {0}")]
    UnknownKernel(String),
    #[error("Invalid part name: {0:?}")]
    InvalidName(String),
    #[error("Duplicate part name: {0}")]
    DuplicateName(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Failed to render {name}: {source}")]
    Render { name: String, source: CadError },
    #[error("Failed to write {name}: {source}")]
    Stl { name: String, source: StlError },
}

/// Part names become file stems; reject anything that would leave the output directory
fn check_names(parts: &[NamedPart]) -> Result<(), BuildError> {
    let mut seen = HashSet::new();
    for part in parts {
        let name = part.name.as_str();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(BuildError::InvalidName(part.name.clone()));
        }
        if !seen.insert(name) {
            return Err(BuildError::DuplicateName(part.name.clone()));
        }
    }
    Ok(())
}

fn report_thread(part: &NamedPart) {
    let Some(params) = part.part.thread_params() else {
        return;
    };
    let mesh = generate_thread(&params);
    let report = mesh.polyhedron().edge_report();
    if report.is_watertight() {
        info!(
            "{}: thread with {} steps, {}",
            part.name,
            mesh.step_count(),
            report
        );
    } else {
        warn!(
            "{}: thread with {} steps is not watertight: {}",
            part.name,
            mesh.step_count(),
            report
        );
    }
}

pub fn run_build(file: &BuildFile, options: &BuildOptions) -> Result<Vec<BuiltPart>, BuildError> {
    let kernel_name = options.kernel.as_deref().unwrap_or(&file.kernel);
    let kernel: Box<dyn CsgKernel> =
        kernel_by_name(kernel_name).ok_or_else(|| BuildError::UnknownKernel(kernel_name.into()))?;
    if !kernel.is_available() {
        warn!("Kernel {} cannot render; every part will fail", kernel.name());
    }

    check_names(&file.parts)?;

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| file.output_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| BuildError::Io(format!("{}: {}", output_dir.display(), e)))?;

    info!(
        "Building {} parts with the {} kernel into {}",
        file.parts.len(),
        kernel.name(),
        output_dir.display()
    );

    let mut built = Vec::with_capacity(file.parts.len());
    for part in &file.parts {
        if options.report {
            report_thread(part);
        }

        let solid = part.part.build();
        debug!(
            "{}: {} with {} primitives",
            part.name,
            part.part.kind(),
            solid.primitive_count()
        );

        let mesh = kernel.render(&solid).map_err(|source| BuildError::Render {
            name: part.name.clone(),
            source,
        })?;
        if mesh.is_empty() {
            warn!("{}: {} rendered to an empty mesh", part.name, part.part.kind());
        }

        let path = output_dir.join(format!("{}.stl", part.name));
        save_stl(&mesh, &path).map_err(|source| BuildError::Stl {
            name: part.name.clone(),
            source,
        })?;
        info!(
            "{}: wrote {} triangles to {}",
            part.name,
            mesh.triangle_count(),
            path.display()
        );

        built.push(BuiltPart {
            name: part.name.clone(),
            path,
            triangles: mesh.triangle_count(),
        });
    }

    Ok(built)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartSpec;
    use pk_parts::WedgeParams;

    fn wedge_part(name: &str) -> NamedPart {
        NamedPart::new(name, PartSpec::Wedge(WedgeParams::default()))
    }

    #[test]
    fn test_names_must_be_unique() {
        let parts = vec![wedge_part("a"), wedge_part("a")];
        assert!(matches!(
            check_names(&parts),
            Err(BuildError::DuplicateName(name)) if name == "a"
        ));
    }

    #[test]
    fn test_names_stay_in_output_dir() {
        for name in ["", "..", "sub/part", "sub\\part"] {
            assert!(matches!(
                check_names(&[wedge_part(name)]),
                Err(BuildError::InvalidName(_))
            ));
        }
        assert!(check_names(&[wedge_part("ok"), wedge_part("also-ok")]).is_ok());
    }

    #[test]
    fn test_unknown_kernel() {
        let file = BuildFile::default();
        let options = BuildOptions {
            kernel: Some("occt".into()),
            ..BuildOptions::default()
        };
        assert!(matches!(
            run_build(&file, &options),
            Err(BuildError::UnknownKernel(name)) if name == "occt"
        ));
    }
}
