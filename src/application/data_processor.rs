// ============================================================
// Layer 2 — Autosome Data Processor
// ============================================================
// Owns the train / validation / test partitions and builds Burn
// data loaders over them on request.
//
// Construction (eager, three reads at most):
//
//   Step 1: preprocess the training table
//   Step 2: validation =
//             preprocess(validation path)           if one is given
//             fold `fold` of a 5-fold split of train otherwise
//                 (train shrinks to the remaining four folds)
//   Step 3: preprocess the test table
//
// Loaders are rebuilt on every prepare_* call. They share the
// partition tables through Arc and never mutate them.
//
//   train → shuffled with generator_seed, wrapped to
//           batch_per_epoch batches per logical epoch
//   valid → one full pass, valid_* settings
//   test  → one full pass, also with the valid_* settings
//
// Reference: Burn Book §4 (DataLoaderBuilder)
//            Rust Book §9 (Error Handling with anyhow)

use std::sync::Arc;

use anyhow::{bail, Result};
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    tensor::backend::Backend,
};

use crate::data::{
    batcher::{SeqBatch, SeqBatcher},
    dataset::{SeqDatasetProb, N_CHANNELS},
    epoch::EpochBoundedLoader,
    preprocessor::SeqPreprocessor,
    splitter::KFold,
};
use crate::domain::{
    config::{ProcessorConfig, N_FOLDS},
    sequence::SeqTable,
    traits::{DataProcessor, FoldSplitter, TablePreprocessor},
};

/// Loader over a whole partition.
pub type SeqDataLoader<B> = Arc<dyn DataLoader<SeqBatch<B>>>;

pub struct AutosomeDataProcessor<B: Backend> {
    config: ProcessorConfig,
    device: B::Device,
    train: Arc<SeqTable>,
    valid: Option<Arc<SeqTable>>,
    test: Arc<SeqTable>,
}

impl<B: Backend> AutosomeDataProcessor<B> {
    /// Build with the file-based preprocessor and a seeded 5-fold splitter.
    pub fn new(config: ProcessorConfig, device: B::Device) -> Result<Self> {
        let splitter = KFold::new(N_FOLDS, config.seed, true);
        Self::with_collaborators(config, device, &SeqPreprocessor::new(), &splitter)
    }

    pub fn with_collaborators<P, S>(
        config: ProcessorConfig,
        device: B::Device,
        preprocessor: &P,
        splitter: &S,
    ) -> Result<Self>
    where
        P: TablePreprocessor,
        S: FoldSplitter,
    {
        validate(&config)?;

        let seqsize = config.seqsize;
        let plasmid = config.plasmid_path.as_path();

        // ── Step 1: training table ────────────────────────────────────────────
        let mut train = preprocessor.preprocess(&config.path_to_training_data, seqsize, plasmid)?;
        check_lengths(&train, seqsize, "training")?;

        // ── Step 2: validation table ──────────────────────────────────────────
        let valid = match &config.path_to_validation_data {
            Some(path) => {
                let valid = preprocessor.preprocess(path, seqsize, plasmid)?;
                check_lengths(&valid, seqsize, "validation")?;
                valid
            }
            None => {
                let (fold_train, fold_valid) = split_by_fold(&train, splitter, config.fold)?;
                train = fold_train;
                fold_valid
            }
        };

        // ── Step 3: test table ────────────────────────────────────────────────
        let test = preprocessor.preprocess(&config.path_to_test_data, seqsize, plasmid)?;
        check_lengths(&test, seqsize, "test")?;

        tracing::info!(
            "Partitions ready: {} train, {} validation, {} test rows",
            train.len(),
            valid.len(),
            test.len()
        );

        Ok(Self {
            config,
            device,
            train: Arc::new(train),
            valid: Some(Arc::new(valid)),
            test: Arc::new(test),
        })
    }

    pub fn train_table(&self) -> &SeqTable {
        &self.train
    }

    pub fn valid_table(&self) -> Option<&SeqTable> {
        self.valid.as_deref()
    }

    pub fn test_table(&self) -> &SeqTable {
        &self.test
    }

    fn build_loader(
        &self,
        table: &Arc<SeqTable>,
        batch_size: usize,
        workers: usize,
        shuffle_seed: Option<u64>,
    ) -> SeqDataLoader<B> {
        let seqsize = self.config.seqsize;
        let dataset = SeqDatasetProb::new(Arc::clone(table), seqsize);
        let batcher = SeqBatcher::<B>::new(self.device.clone(), seqsize);

        let mut builder = DataLoaderBuilder::new(batcher).batch_size(batch_size);
        if let Some(seed) = shuffle_seed {
            builder = builder.shuffle(seed);
        }
        // Burn's worker threads each batch a fixed contiguous slice, which
        // breaks both the batch size and a partition-wide shuffle. Batches
        // are materialised on the iterating thread instead.
        if workers > 0 {
            tracing::debug!("{} workers requested; loading on the iterating thread", workers);
        }

        builder.build(dataset)
    }

    fn build_eval_loader(&self, table: &Arc<SeqTable>) -> SeqDataLoader<B> {
        let cfg = &self.config;
        let shuffle = cfg.shuffle_val.then_some(cfg.seed);
        self.build_loader(table, cfg.valid_batch_size, cfg.valid_workers, shuffle)
    }
}

impl<B: Backend> DataProcessor for AutosomeDataProcessor<B> {
    type TrainLoader = EpochBoundedLoader<SeqBatch<B>>;
    type EvalLoader = SeqDataLoader<B>;

    fn prepare_train_dataloader(&self) -> Self::TrainLoader {
        let cfg = &self.config;
        let shuffle = cfg.shuffle_train.then_some(cfg.generator_seed);
        let loader = self.build_loader(&self.train, cfg.train_batch_size, cfg.train_workers, shuffle);

        tracing::debug!(
            "Train loader: {} rows, batch {}, {} workers, {} batches/epoch",
            self.train.len(),
            cfg.train_batch_size,
            cfg.train_workers,
            cfg.batch_per_epoch
        );
        EpochBoundedLoader::new(loader, cfg.batch_per_epoch)
    }

    fn prepare_valid_dataloader(&self) -> Option<Self::EvalLoader> {
        let valid = self.valid.as_ref()?;
        Some(self.build_eval_loader(valid))
    }

    fn prepare_test_dataloader(&self) -> Self::EvalLoader {
        self.build_eval_loader(&self.test)
    }

    fn train_epoch_size(&self) -> usize {
        self.config.batch_per_epoch
    }

    fn data_channels(&self) -> usize {
        N_CHANNELS
    }

    fn data_seqsize(&self) -> usize {
        self.config.seqsize
    }
}

/// Every row of a partition must hold exactly `seqsize` nucleotides.
fn check_lengths(table: &SeqTable, seqsize: usize, partition: &str) -> Result<()> {
    if let Some((i, row)) = table.rows().iter().enumerate().find(|(_, r)| r.seq.len() != seqsize) {
        bail!(
            "{} row {} has length {} (expected seqsize {})",
            partition,
            i,
            row.seq.len(),
            seqsize
        );
    }
    Ok(())
}

fn validate(config: &ProcessorConfig) -> Result<()> {
    if config.seqsize == 0 {
        bail!("seqsize must be positive");
    }
    if config.train_batch_size == 0 || config.valid_batch_size == 0 {
        bail!(
            "batch sizes must be positive (train={}, valid={})",
            config.train_batch_size,
            config.valid_batch_size
        );
    }
    Ok(())
}

/// Split `table` into new `(train, validation)` tables using fold `fold`.
fn split_by_fold<S: FoldSplitter>(
    table: &SeqTable,
    splitter: &S,
    fold: Option<usize>,
) -> Result<(SeqTable, SeqTable)> {
    let Some(fold) = fold else {
        bail!("fold must be set when no validation data path is given");
    };
    let (train_idx, valid_idx) = splitter.split_fold(table.len(), fold)?;

    tracing::info!(
        "Validation taken from fold {}/{} of training data: {} train, {} validation rows",
        fold,
        splitter.n_splits(),
        train_idx.len(),
        valid_idx.len()
    );

    Ok((table.select(&train_idx), table.select(&valid_idx)))
}
