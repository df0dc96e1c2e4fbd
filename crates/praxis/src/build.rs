//! Site build command.

use std::path::PathBuf;

use clap::Args;
use praxis_config::Config;
use praxis_site::{BuildConfig, Registry, SiteBuilder, SiteInfo};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for building the site.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover praxis.toml).
    #[arg(short, long, env = "PRAXIS_CONFIG")]
    config: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");
        let registry = Registry::praxis();

        let report = SiteBuilder::new(&registry, build_config(&config))
            .build_with_progress(&mut |event| output.event(event))?;

        output.summary(&report);
        Ok(())
    }
}

fn build_config(config: &Config) -> BuildConfig {
    BuildConfig {
        source_dir: config.paths_resolved.source_dir.clone(),
        paper_pdf: config.paths_resolved.paper_pdf.clone(),
        output_dir: config.paths_resolved.output_dir.clone(),
        site: SiteInfo {
            name: config.site.name.clone(),
            version: config.site.version.clone(),
            description: config.site.description.clone(),
        },
        theme: config.highlight.theme.clone(),
    }
}
