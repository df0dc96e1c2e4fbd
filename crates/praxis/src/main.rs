//! PRAXIS specification site builder.
//!
//! Renders the specification chapters under `spec/` into a static site under
//! `_site/`. Paths, site strings and the highlight theme come from
//! `praxis.toml` when one is found.

mod build;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use build::BuildArgs;
use output::Output;

/// Build the PRAXIS specification site.
#[derive(Parser)]
#[command(name = "praxis-site", version, about)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,

    /// Enable info-level logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, rust_log.as_deref()))
        .init();

    if let Err(err) = cli.build.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO, otherwise `RUST_LOG` applies, falling back to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}
