// ============================================================
// Layer 3 — Processor Configuration
// ============================================================
// Every parameter the data processor needs, fixed at construction.
// Serialisable so a run can be described by a JSON file and the
// exact settings can be written back out next to its outputs.
//
// Seeds:
//   - seed:           drives the k-fold shuffle and any validation/test
//                     shuffling
//   - generator_seed: drives the training loader's shuffle order, so
//                     two processors with the same value see batches
//                     in the same order
//
// Reference: Rust Book §5 (Structs), serde documentation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of folds used when the validation partition is carved out
/// of the training table.
pub const N_FOLDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Length every sequence is normalised to
    pub seqsize: usize,

    pub path_to_training_data: PathBuf,
    /// When absent, validation rows come from fold `fold` of the training data
    pub path_to_validation_data: Option<PathBuf>,
    pub path_to_test_data: PathBuf,
    /// Plasmid sequence providing the flanking context around the insert
    pub plasmid_path: PathBuf,

    pub seed: u64,
    pub generator_seed: u64,
    /// Required when `path_to_validation_data` is absent
    pub fold: Option<usize>,

    pub train_batch_size: usize,
    pub batch_per_epoch: usize,
    pub train_workers: usize,
    pub shuffle_train: bool,

    // Also used for the test loader.
    pub valid_batch_size: usize,
    pub valid_workers: usize,
    pub shuffle_val: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            seqsize: 150,
            path_to_training_data: PathBuf::from("data/train.txt"),
            path_to_validation_data: None,
            path_to_test_data: PathBuf::from("data/test.txt"),
            plasmid_path: PathBuf::from("data/plasmid.json"),
            seed: 42,
            generator_seed: 42,
            fold: None,
            train_batch_size: 1024,
            batch_per_epoch: 1000,
            train_workers: 8,
            shuffle_train: true,
            valid_batch_size: 4096,
            valid_workers: 8,
            shuffle_val: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let cfg: ProcessorConfig =
            serde_json::from_str(r#"{ "seqsize": 110, "fold": 3 }"#).unwrap();
        assert_eq!(cfg.seqsize, 110);
        assert_eq!(cfg.fold, Some(3));
        assert_eq!(cfg.train_batch_size, 1024);
        assert_eq!(cfg.valid_batch_size, 4096);
        assert!(cfg.shuffle_train);
        assert!(!cfg.shuffle_val);
    }

    #[test]
    fn test_default_fold_is_none() {
        assert_eq!(ProcessorConfig::default().fold, None);
        let cfg: ProcessorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.fold, None);
    }

    #[test]
    fn test_null_fold_deserialises_to_none() {
        let cfg: ProcessorConfig = serde_json::from_str(r#"{ "fold": null }"#).unwrap();
        assert_eq!(cfg.fold, None);
    }
}
