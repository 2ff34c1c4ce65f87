// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses command line arguments with `clap` and hands off to the
// application layer. The only output is the inspect report,
// printed as JSON.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, InspectArgs};

use crate::application::inspect_use_case::InspectUseCase;
use crate::domain::config::ProcessorConfig;
use crate::infra::config_store;

#[derive(Parser, Debug)]
#[command(
    name = "autosome-data",
    version,
    about = "Prepare train/validation/test loaders for promoter expression data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    let base = match &args.config {
        Some(path) => config_store::load_config(path)?,
        None => ProcessorConfig::default(),
    };
    let cfg = args.apply(base);

    if let Some(path) = &args.save_config {
        config_store::save_config(&cfg, path)?;
        tracing::info!("Effective config written to '{}'", path.display());
    }

    let report = InspectUseCase::new(cfg, args.batches).execute()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
