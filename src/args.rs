//! Command-line argument definitions

use clap::Parser;
use std::path::PathBuf;

/// Convert markdown files with YAML front matter into JSON lines
#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "fmd2json",
    disable_version_flag = true,
    about = "Convert markdown files with YAML front matter into line-delimited JSON",
    long_about = "fmd2json reads markdown documents, splits off their YAML front matter and \
                  writes one JSON object per document with the front matter properties plus \
                  `filename`, `body` and `mtime`. Paths are read from standard input, one per \
                  line, when none are given; `-` reads a single document from standard input."
)]
pub struct Cli {
    /// Files or directories to convert (`-` for standard input)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// jq expression applied to every record
    #[arg(long, value_name = "EXPR")]
    pub jq: Option<String>,

    /// Write string, number, boolean and null jq results as raw text
    #[arg(short, long)]
    pub raw_output: bool,

    /// Print version information and exit
    #[arg(long)]
    pub version: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
