use anyhow::Result;
use clap::Parser;
use std::io::{self, BufWriter};

use fmd2json::{args::Cli, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut stdin = io::stdin().lock();
    let mut stdout = BufWriter::new(io::stdout().lock());
    let mut stderr = io::stderr().lock();

    run(&cli, &mut stdin, &mut stdout, &mut stderr)?;
    Ok(())
}
