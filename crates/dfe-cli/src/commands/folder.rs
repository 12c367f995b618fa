use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dfe_reweight::{evaluate_folder, FolderEvaluation};

#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Simulation folder holding `wfile.dat` and nested `energy.dat` logs.
    #[arg(long)]
    pub path: PathBuf,
}

pub fn run(args: &FolderArgs) -> Result<(), Box<dyn Error>> {
    match evaluate_folder(&args.path) {
        FolderEvaluation::Delta { raw, stats } => {
            println!("{}: raw dF/kT = {raw:.6}", args.path.display());
            println!(
                "  samples A = {}, B = {}, files = {}",
                stats.accepted_a, stats.accepted_b, stats.files_found
            );
            if !raw.is_finite() {
                println!("  non-finite result; the folder would be skipped in a set");
            }
        }
        FolderEvaluation::Insufficient { reason, .. } => {
            println!("{}: insufficient data ({reason})", args.path.display());
        }
    }
    Ok(())
}
