use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dfe_reweight::{load_config, run_analysis, write_report, AnalysisConfig, RunOpts};
use log::info;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory containing the `bub_*` simulation folders.
    #[arg(long)]
    pub root: PathBuf,
    /// YAML analysis configuration; the built-in sets are used when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Destination for the JSON report.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Number of folders evaluated in parallel.
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AnalysisConfig::default(),
    };
    let opts = RunOpts {
        concurrency: args.concurrency,
    };
    let report = run_analysis(&config, &args.root, &opts)?;
    for set in &report.sets {
        println!("{}", set.render_text());
    }
    if let Some(out) = &args.out {
        write_report(&report, out)?;
        info!("report written to {}", out.display());
    }
    Ok(())
}
