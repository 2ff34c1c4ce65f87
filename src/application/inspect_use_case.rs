// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Builds a data processor and exercises every batch provider
// without training anything:
//
//   Step 1: Build the processor       (partitions loaded eagerly)
//   Step 2: Pull up to N train batches from one logical epoch
//   Step 3: Count batches in one validation and one test pass
//   Step 4: Return a report with sizes and tensor shapes
//
// Runs on the NdArray (CPU) backend.

use anyhow::Result;
use burn::backend::NdArray;
use serde::Serialize;

use crate::application::data_processor::AutosomeDataProcessor;
use crate::domain::{config::ProcessorConfig, traits::DataProcessor};

type InspectBackend = NdArray;

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub train_rows: usize,
    pub valid_rows: Option<usize>,
    pub test_rows: usize,
    pub channels: usize,
    pub seqsize: usize,
    pub batches_per_epoch: usize,
    /// Shapes of the train batches that were pulled
    pub train_batch_shapes: Vec<[usize; 3]>,
    pub valid_batches: Option<usize>,
    pub test_batches: usize,
}

pub struct InspectUseCase {
    config: ProcessorConfig,
    max_train_batches: usize,
}

impl InspectUseCase {
    pub fn new(config: ProcessorConfig, max_train_batches: usize) -> Self {
        Self { config, max_train_batches }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        // ── Step 1: Build partitions ─────────────────────────────────────────
        let processor =
            AutosomeDataProcessor::<InspectBackend>::new(self.config.clone(), Default::default())?;

        // ── Step 2: Sample the training loader ───────────────────────────────
        let train = processor.prepare_train_dataloader();
        let train_batch_shapes: Vec<[usize; 3]> = train
            .iter()
            .take(self.max_train_batches)
            .map(|b| b.x.dims())
            .collect();
        tracing::info!("Pulled {} training batches", train_batch_shapes.len());

        // ── Step 3: Full evaluation passes ───────────────────────────────────
        let valid_batches = processor.prepare_valid_dataloader().map(|l| l.iter().count());
        let test_batches = processor.prepare_test_dataloader().iter().count();

        Ok(InspectReport {
            train_rows: processor.train_table().len(),
            valid_rows: processor.valid_table().map(|t| t.len()),
            test_rows: processor.test_table().len(),
            channels: processor.data_channels(),
            seqsize: processor.data_seqsize(),
            batches_per_epoch: processor.train_epoch_size(),
            train_batch_shapes,
            valid_batches,
            test_batches,
        })
    }
}
