use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use dfe_reweight::AnalysisConfig;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Destination path for the configuration YAML.
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &ConfigArgs) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, AnalysisConfig::default().to_yaml_string()?)?;
    Ok(())
}
