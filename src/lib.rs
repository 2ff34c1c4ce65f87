//! Sequence data preparation for promoter expression models.
//!
//! [`application::data_processor::AutosomeDataProcessor`] loads the
//! train / validation / test tables, optionally carves validation out of
//! training with a seeded 5-fold split, and hands out Burn data loaders.

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

pub use application::data_processor::{AutosomeDataProcessor, SeqDataLoader};
pub use data::{batcher::SeqBatch, epoch::EpochBoundedLoader};
pub use domain::{config::ProcessorConfig, traits::DataProcessor};
