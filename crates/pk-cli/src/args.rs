//! Command line parsing

use std::path::PathBuf;

use clap::Parser;

use crate::build::BuildOptions;

/// Render a partkit build file to one STL per part
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "pk", version, long_about = None)]
#[command(after_help = "Log verbosity follows RUST_LOG, e.g. RUST_LOG=pk_kernel=debug.")]
pub struct Cli {
    /// RON build file
    #[arg(value_name = "BUILD_FILE")]
    pub file: PathBuf,

    /// Write STL files here instead of the build file's output_dir
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Evaluation kernel: bsp (default) or null
    #[arg(long, value_name = "NAME")]
    pub kernel: Option<String>,

    /// Log the edge report of every thread before rendering
    #[arg(long)]
    pub report: bool,
}

impl Cli {
    /// Overrides applied on top of the build file
    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            output_dir: self.out.clone(),
            kernel: self.kernel.clone(),
            report: self.report,
        }
    }
}
