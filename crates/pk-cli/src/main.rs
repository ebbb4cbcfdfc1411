//! partkit command line entry point

use clap::Parser;
use pk_cli::{BuildError, BuildFile, Cli, run_build};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pk_cli=info,pk_parts=info,pk_kernel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = BuildFile::load(&cli.file)
        .map_err(BuildError::from)
        .and_then(|build| run_build(&build, &cli.options()));
    match result {
        Ok(parts) => tracing::info!("Built {} parts", parts.len()),
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    }
}
