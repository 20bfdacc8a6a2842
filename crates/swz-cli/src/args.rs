use clap::Parser;
use std::path::PathBuf;

/// Front-end driver: tokenize, parse, and analyze one translation unit.
#[derive(Debug, Parser)]
#[command(name = "swz", version, about = "swz compiler front-end")]
pub struct Args {
    /// Source file to compile.
    pub file: PathBuf,

    /// Emit diagnostics as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Print the parsed AST back as source and exit.
    #[arg(long)]
    pub dump: bool,

    /// Suppress warnings; errors are still reported.
    #[arg(long, short)]
    pub quiet: bool,
}
