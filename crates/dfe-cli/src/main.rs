use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    config::{self, ConfigArgs},
    folder::{self, FolderArgs},
    run::{self, RunArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dfe", about = "Volume-corrected free-energy aggregation over simulation folders")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Aggregate every analysis set over the folders under a root directory.
    Run(RunArgs),
    /// Write the built-in analysis configuration as YAML.
    Config(ConfigArgs),
    /// Evaluate a single folder and print its raw ΔF/kT or skip reason.
    Folder(FolderArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run::run(&args),
        Command::Config(args) => config::run(&args),
        Command::Folder(args) => folder::run(&args),
    }
}
