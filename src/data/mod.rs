// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw sequence tables to tensor batches.
//
// The pipeline flows in this order:
//
//   .txt/.tsv tables + plasmid
//       │
//       ▼
//   loader            → reads rows and the plasmid sequence
//       │
//       ▼
//   SeqPreprocessor   → re-embeds each insert in plasmid context,
//       │               adds singleton flags and reverse complements
//       ▼
//   KFold             → carves a validation fold out of training data
//       │               (only when no validation file is given)
//       ▼
//   SeqDatasetProb    → implements Burn's Dataset trait
//       │
//       ▼
//   SeqBatcher        → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → Burn's loader (shuffling, worker threads)
//       │
//       ▼
//   EpochBoundedLoader → fixed number of batches per training epoch
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads sequence tables and plasmid files
pub mod loader;

/// Normalises sequences against the plasmid context
pub mod preprocessor;

/// Deterministic k-fold cross-validation splits
pub mod splitter;

/// Implements Burn's Dataset trait for encoded sequences
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Caps and cycles a loader to a fixed number of batches per epoch
pub mod epoch;
