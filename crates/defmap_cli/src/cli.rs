use std::path::PathBuf;

use clap::Parser;

/// Translate a constant-definition source file into a JSON document.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The input source file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// The output JSON file.
    #[arg(short, long)]
    pub output: PathBuf,
}
