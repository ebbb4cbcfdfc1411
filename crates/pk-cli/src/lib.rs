//! Build-file driven STL export for partkit
//!
//! A build file lists named parts with their generator parameters; each
//! part is rendered with the selected kernel and written to `<name>.stl`.

pub mod args;
pub mod build;
pub mod config;

pub use args::Cli;
pub use build::{BuildError, BuildOptions, BuiltPart, run_build};
pub use config::{BuildFile, ConfigError, NamedPart, PartSpec};
