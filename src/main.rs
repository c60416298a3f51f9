use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use shopping_cart_cli::{
    cli::{Args, LineInput, Session, TerminalInput},
    services::Catalog,
    utils::Config,
};

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;
    config.apply_args(&args);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(config.env_filter()?)
        .init();

    tracing::info!("🛒 Shopping cart starting...");
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );
    if config.is_production() && config.catalog_path.is_none() {
        tracing::warn!("Running in production with the built-in catalog");
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_file(path).context("Failed to load catalog")?,
        None => Catalog::builtin(),
    };

    let stdout = io::stdout();
    if io::stdin().is_terminal() && !args.plain {
        Session::new(&catalog, TerminalInput::new(), stdout.lock()).run()?;
    } else {
        let input = LineInput::new(io::stdin().lock(), io::stdout());
        Session::new(&catalog, input, stdout.lock()).run()?;
    }

    tracing::info!("🛒 Shopping cart stopped");
    Ok(())
}
