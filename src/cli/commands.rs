// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// One subcommand, `inspect`, which builds the data processor and
// reports what each batch provider yields.
//
// Settings come from an optional JSON config file; any flag given
// on the command line overrides the file value.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::domain::config::ProcessorConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build train/validation/test loaders and report their shapes
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// JSON file with a full or partial processor config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tab-separated training table (sequence, bin)
    #[arg(long)]
    pub train: Option<PathBuf>,

    /// Validation table; without it a fold of the training data is used
    #[arg(long)]
    pub valid: Option<PathBuf>,

    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Plasmid sequence (JSON string, FASTA or plain text)
    #[arg(long)]
    pub plasmid: Option<PathBuf>,

    #[arg(long)]
    pub seqsize: Option<usize>,

    /// Validation fold, 0..5
    #[arg(long)]
    pub fold: Option<usize>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Seed for the training shuffle order
    #[arg(long)]
    pub generator_seed: Option<u64>,

    #[arg(long)]
    pub train_batch_size: Option<usize>,

    #[arg(long)]
    pub batch_per_epoch: Option<usize>,

    #[arg(long)]
    pub workers: Option<usize>,

    /// Training batches to pull for the report
    #[arg(long, default_value_t = 4)]
    pub batches: usize,

    /// Write the effective config to this path
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl InspectArgs {
    /// Apply command-line overrides on top of `base`.
    pub fn apply(&self, base: ProcessorConfig) -> ProcessorConfig {
        let mut cfg = base;

        if let Some(p) = &self.train {
            cfg.path_to_training_data = p.clone();
        }
        if let Some(p) = &self.valid {
            cfg.path_to_validation_data = Some(p.clone());
        }
        if let Some(p) = &self.test {
            cfg.path_to_test_data = p.clone();
        }
        if let Some(p) = &self.plasmid {
            cfg.plasmid_path = p.clone();
        }
        if let Some(v) = self.seqsize {
            cfg.seqsize = v;
        }
        if let Some(v) = self.fold {
            cfg.fold = Some(v);
        }
        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.generator_seed {
            cfg.generator_seed = v;
        }
        if let Some(v) = self.train_batch_size {
            cfg.train_batch_size = v;
        }
        if let Some(v) = self.batch_per_epoch {
            cfg.batch_per_epoch = v;
        }
        if let Some(v) = self.workers {
            cfg.train_workers = v;
            cfg.valid_workers = v;
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn parse(args: &[&str]) -> InspectArgs {
        let cli = TestCli::parse_from(std::iter::once("autosome-data").chain(args.iter().copied()));
        match cli.command {
            Commands::Inspect(a) => a,
        }
    }

    #[test]
    fn test_flags_override_base() {
        let args = parse(&["inspect", "--fold", "4", "--workers", "0", "--valid", "v.txt"]);
        let cfg = args.apply(ProcessorConfig::default());
        assert_eq!(cfg.fold, Some(4));
        assert_eq!(cfg.train_workers, 0);
        assert_eq!(cfg.valid_workers, 0);
        assert_eq!(cfg.path_to_validation_data, Some(PathBuf::from("v.txt")));
    }

    #[test]
    fn test_absent_flags_keep_base() {
        let args = parse(&["inspect"]);
        let base = ProcessorConfig { seqsize: 110, ..ProcessorConfig::default() };
        assert_eq!(args.apply(base.clone()), base);
        assert_eq!(args.batches, 4);
    }
}
