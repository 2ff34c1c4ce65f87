// ============================================================
// Layer 4 — Sequence Batcher
// ============================================================
// Implements Burn's Batcher trait to stack SeqItems into tensors.
//
// How batching works here:
//   Input:  Vec of N SeqItems, each x of length 6 * L
//   Output: SeqBatch with
//             x:     [N, 6, L]
//             probs: [N, 18]
//             bins:  [N]
//
// Every item's x is already channel-major and the same length,
// so the flat concatenation reshapes directly.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    tensor::{backend::Backend, Tensor, TensorData},
};

use crate::data::dataset::{SeqItem, N_BINS, N_CHANNELS};

/// A batch of encoded sequences ready for a forward pass.
#[derive(Debug, Clone)]
pub struct SeqBatch<B: Backend> {
    /// Encoded sequences — shape: [batch_size, 6, seqsize]
    pub x: Tensor<B, 3>,

    /// Class probabilities — shape: [batch_size, 18]
    pub probs: Tensor<B, 2>,

    /// Measured bins — shape: [batch_size]
    pub bins: Tensor<B, 1>,
}

impl<B: Backend> SeqBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.bins.dims()[0]
    }
}

#[derive(Clone, Debug)]
pub struct SeqBatcher<B: Backend> {
    pub device: B::Device,
    seqsize: usize,
}

impl<B: Backend> SeqBatcher<B> {
    pub fn new(device: B::Device, seqsize: usize) -> Self {
        Self { device, seqsize }
    }
}

impl<B: Backend> Batcher<SeqItem, SeqBatch<B>> for SeqBatcher<B> {
    fn batch(&self, items: Vec<SeqItem>) -> SeqBatch<B> {
        let batch_size = items.len();

        let x_flat: Vec<f32> = items.iter().flat_map(|s| s.x.iter().copied()).collect();
        let probs_flat: Vec<f32> = items.iter().flat_map(|s| s.probs.iter().copied()).collect();
        let bins: Vec<f32> = items.iter().map(|s| s.bin).collect();

        let x = Tensor::<B, 3>::from_data(
            TensorData::new(x_flat, [batch_size, N_CHANNELS, self.seqsize]),
            &self.device,
        );
        let probs = Tensor::<B, 2>::from_data(
            TensorData::new(probs_flat, [batch_size, N_BINS]),
            &self.device,
        );
        let bins = Tensor::<B, 1>::from_data(TensorData::new(bins, [batch_size]), &self.device);

        SeqBatch { x, probs, bins }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::bin_probabilities;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn item(seqsize: usize, bin: f32) -> SeqItem {
        SeqItem {
            x: vec![0.5; N_CHANNELS * seqsize],
            probs: bin_probabilities(bin),
            bin,
        }
    }

    #[test]
    fn test_batch_shapes() {
        let batcher = SeqBatcher::<TestBackend>::new(Default::default(), 7);
        let batch = batcher.batch(vec![item(7, 1.0), item(7, 2.0), item(7, 3.0)]);
        assert_eq!(batch.x.dims(), [3, N_CHANNELS, 7]);
        assert_eq!(batch.probs.dims(), [3, N_BINS]);
        assert_eq!(batch.bins.dims(), [3]);
        assert_eq!(batch.batch_size(), 3);
    }

    #[test]
    fn test_bins_preserved_in_order() {
        let batcher = SeqBatcher::<TestBackend>::new(Default::default(), 2);
        let batch = batcher.batch(vec![item(2, 4.5), item(2, 9.0)]);
        let bins = batch.bins.into_data().to_vec::<f32>().unwrap();
        assert_eq!(bins, vec![4.5, 9.0]);
    }
}
