// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The data processor is assembled from collaborators that each
// have a narrow contract:
//
//   TablePreprocessor → (path, seqsize, plasmid_path) -> SeqTable
//   FoldSplitter      → n rows, fold i -> (train_idx, valid_idx)
//   DataProcessor     → the surface a training loop consumes
//
// Concrete adapters live in the data and application layers;
// tests substitute in-memory fakes through these traits.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use anyhow::{bail, Result};

use crate::domain::sequence::SeqTable;

// ─── TablePreprocessor ────────────────────────────────────────────────────────
/// Reads a raw sequence table and normalises it against the plasmid
/// context so every row has exactly `seqsize` nucleotides.
pub trait TablePreprocessor {
    fn preprocess(&self, path: &Path, seqsize: usize, plasmid_path: &Path) -> Result<SeqTable>;
}

// ─── FoldSplitter ─────────────────────────────────────────────────────────────
/// Deterministic cross-validation splitter over row indices `0..n_rows`.
pub trait FoldSplitter {
    /// Number of folds this splitter produces.
    fn n_splits(&self) -> usize;

    /// All `(train_indices, validation_indices)` pairs, one per fold.
    fn split(&self, n_rows: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>>;

    /// The `fold`-th split only.
    fn split_fold(&self, n_rows: usize, fold: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        if fold >= self.n_splits() {
            bail!("fold {} out of range: expected 0..{}", fold, self.n_splits());
        }
        match self.split(n_rows)?.into_iter().nth(fold) {
            Some(split) => Ok(split),
            None => bail!("splitter produced no fold {}", fold),
        }
    }
}

// ─── DataProcessor ────────────────────────────────────────────────────────────
/// Owns the train / validation / test partitions and hands out
/// batch providers for them.
///
/// Loader types are associated so this layer stays free of any
/// tensor framework.
pub trait DataProcessor {
    /// Batch provider yielding a fixed number of batches per epoch
    type TrainLoader;
    /// Batch provider consuming a whole partition per pass
    type EvalLoader;

    fn prepare_train_dataloader(&self) -> Self::TrainLoader;

    /// `None` when no validation data is available.
    fn prepare_valid_dataloader(&self) -> Option<Self::EvalLoader>;

    fn prepare_test_dataloader(&self) -> Self::EvalLoader;

    /// Batches per logical training epoch
    fn train_epoch_size(&self) -> usize;

    /// Encoding channels per sequence position
    fn data_channels(&self) -> usize;

    /// Positions per encoded sequence
    fn data_seqsize(&self) -> usize;
}
