//! Hazel - a static site generator for markdown-based personal blogs.

use anyhow::{Result, bail};
use clap::Parser;
use hazel::{
    build::build_site,
    cli::{Cli, Commands},
    config::SiteConfig,
    serve::serve_site,
};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Build { .. } => build_site(&config),
        Commands::Serve { .. } => {
            build_site(&config)?;
            serve_site(&config)
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
