pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cms")]
#[command(about = "Serve and manage a directory of text and markdown documents")]
pub struct Args {
    /// Path to the cms state directory (defaults to ~/.cms)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
