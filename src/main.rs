use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, warn};

use address_normalizer::config::{Config, ExitConfig};
use address_normalizer::logging;
use address_normalizer::{Normalizer, ParserRegistry};

#[derive(Parser)]
#[command(name = "address_normalizer")]
#[command(about = "Normalize address records from .txt, .tsv and .xml files into JSON")]
#[command(version)]
struct Cli {
    /// Enter paths separated by space. E.g. --paths input/file1 input/file2 input/file3
    #[arg(long, required = true, num_args = 1.., value_parser = validate_path)]
    paths: Vec<PathBuf>,

    /// TOML configuration file (defaults to ./address_normalizer.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with status 1 even after a successful run
    #[arg(long)]
    legacy_exit_status: bool,
}

const INVALID_PATHS_MESSAGE: &str =
    "Please specify valid paths, separated by spaces, e.g: --paths path1 path2 path3";

fn validate_path(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(INVALID_PATHS_MESSAGE.to_string());
    }
    Ok(path)
}

/// Process status after a successful run. Legacy mode, from the flag or the
/// config file, reports 1 regardless.
fn success_status(legacy_flag: bool, exit: &ExitConfig) -> u8 {
    if legacy_flag || exit.legacy_nonzero_status {
        1
    } else {
        0
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let _guard = logging::init_logging(&config.logging)?;

    let registry = ParserRegistry::new();
    debug!("Supported extensions: {}", registry.list_extensions().join(", "));

    let normalizer = Normalizer::new(registry)
        .with_strict_extensions(config.dispatch.strict_extensions);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = normalizer.run(&cli.paths, &mut out) {
        error!("Run failed: {:#}", e);
        return Err(e);
    }

    let status = success_status(cli.legacy_exit_status, &config.exit);
    if status != 0 {
        warn!("Legacy exit status enabled; exiting with status {} after a successful run", status);
    }
    Ok(ExitCode::from(status))
}
