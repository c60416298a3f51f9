use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "shop-cli")]
#[command(about = "An interactive console shopping cart")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Load the product catalog from a JSON file
    #[arg(short, long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Read input line by line even when attached to a terminal
    #[arg(long)]
    pub plain: bool,
}
