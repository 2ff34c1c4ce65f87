// ============================================================
// Layer 4 — Sequence Dataset
// ============================================================
// Implements Burn's Dataset trait over a SeqTable partition.
//
// Each row becomes a SeqItem:
//
//   x:     6 channels × seqsize positions, row-major
//            channel 0..4  one-hot A, C, G, T (N → 0.25 in each)
//            channel 4     is_singleton, repeated along the sequence
//            channel 5     rev (reverse-complement strand)
//   probs: 18 class probabilities for the expression bin
//   bin:   the raw measured bin
//
// The probability label spreads a bin over the 18 classes
// [-inf,1) [1,2) … [16,17) [17,+inf) using a normal distribution
// centred at bin + 0.5 with scale 0.5:
//
//   probs[k] = Φ((p[k+1] - μ) / σ) - Φ((p[k] - μ) / σ)
//
// Reference: Burn Book §4 (Datasets)

use std::sync::Arc;

use burn::data::dataset::Dataset;

use crate::domain::sequence::SeqTable;

/// Channels per position: 4 one-hot + singleton + reverse
pub const N_CHANNELS: usize = 6;

/// Expression classes in the probability label
pub const N_BINS: usize = 18;

const PROB_SHIFT: f64 = 0.5;
const PROB_SCALE: f64 = 0.5;

/// One encoded sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqItem {
    /// `N_CHANNELS * seqsize` values, channel-major
    pub x: Vec<f32>,
    pub probs: Vec<f32>,
    pub bin: f32,
}

pub struct SeqDatasetProb {
    table: Arc<SeqTable>,
    seqsize: usize,
}

impl SeqDatasetProb {
    pub fn new(table: Arc<SeqTable>, seqsize: usize) -> Self {
        Self { table, seqsize }
    }
}

impl Dataset<SeqItem> for SeqDatasetProb {
    fn get(&self, index: usize) -> Option<SeqItem> {
        let row = self.table.get(index)?;

        if row.seq.len() != self.seqsize {
            tracing::warn!(
                "Row {} has length {} (expected {}); skipping",
                index,
                row.seq.len(),
                self.seqsize
            );
            return None;
        }

        let mut x = encode_sequence(&row.seq);
        x.extend(std::iter::repeat(flag(row.is_singleton)).take(self.seqsize));
        x.extend(std::iter::repeat(flag(row.rev)).take(self.seqsize));

        Some(SeqItem {
            x,
            probs: bin_probabilities(row.bin),
            bin: row.bin,
        })
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

fn flag(b: bool) -> f32 {
    if b { 1.0 } else { 0.0 }
}

/// One-hot encode a sequence into 4 channels, channel-major.
pub fn encode_sequence(seq: &str) -> Vec<f32> {
    let len = seq.len();
    let mut out = vec![0.0f32; 4 * len];

    for (pos, base) in seq.bytes().enumerate() {
        match base.to_ascii_uppercase() {
            b'A' => out[pos] = 1.0,
            b'C' => out[len + pos] = 1.0,
            b'G' => out[2 * len + pos] = 1.0,
            b'T' => out[3 * len + pos] = 1.0,
            _ => {
                for ch in 0..4 {
                    out[ch * len + pos] = 0.25;
                }
            }
        }
    }

    out
}

/// Probability of each of the 18 expression classes for a measured bin.
pub fn bin_probabilities(bin: f32) -> Vec<f32> {
    let mu = bin as f64 + PROB_SHIFT;

    // Edges: -inf, 1, 2, …, 17, +inf
    let cdf = |edge: Option<f64>| match edge {
        None => 0.0,
        Some(e) if e.is_infinite() => 1.0,
        Some(e) => normal_cdf((e - mu) / PROB_SCALE),
    };

    let edges: Vec<Option<f64>> = std::iter::once(None)
        .chain((1..N_BINS).map(|e| Some(e as f64)))
        .chain(std::iter::once(Some(f64::INFINITY)))
        .collect();

    edges
        .windows(2)
        .map(|w| (cdf(w[1]) - cdf(w[0])).max(0.0) as f32)
        .collect()
}

fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz–Stegun 7.1.26, max error ~1.5e-7
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x >= 0.0 { 1.0 } else { -1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sequence::SeqRecord;

    fn table(rows: Vec<SeqRecord>) -> Arc<SeqTable> {
        Arc::new(SeqTable::new(rows))
    }

    #[test]
    fn test_one_hot_layout() {
        let x = encode_sequence("ACGT");
        // channel-major: A row, C row, G row, T row
        assert_eq!(
            x,
            vec![
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn test_n_is_uniform() {
        let x = encode_sequence("N");
        assert_eq!(x, vec![0.25; 4]);
    }

    #[test]
    fn test_item_has_six_channels() {
        let mut row = SeqRecord::new("ACGTA", 3.0).reverse_complement();
        row.is_singleton = true;
        let ds = SeqDatasetProb::new(table(vec![row]), 5);
        let item = ds.get(0).unwrap();
        assert_eq!(item.x.len(), N_CHANNELS * 5);
        assert!(item.x[20..25].iter().all(|&v| v == 1.0));
        assert!(item.x[25..30].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_forward_non_singleton_flags_are_zero() {
        let ds = SeqDatasetProb::new(table(vec![SeqRecord::new("ACG", 2.5)]), 3);
        let item = ds.get(0).unwrap();
        assert!(item.x[12..18].iter().all(|&v| v == 0.0));
        assert_eq!(item.bin, 2.5);
    }

    #[test]
    fn test_wrong_length_row_is_none() {
        let ds = SeqDatasetProb::new(table(vec![SeqRecord::new("ACG", 1.0)]), 5);
        assert!(ds.get(0).is_none());
    }

    #[test]
    fn test_out_of_range_is_none() {
        let ds = SeqDatasetProb::new(table(vec![]), 5);
        assert_eq!(ds.len(), 0);
        assert!(ds.get(0).is_none());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        for bin in [0.0f32, 3.7, 8.0, 16.2, 17.0] {
            let p = bin_probabilities(bin);
            assert_eq!(p.len(), N_BINS);
            let total: f32 = p.iter().sum();
            assert!((total - 1.0).abs() < 1e-5, "bin {bin}: sum {total}");
        }
    }

    #[test]
    fn test_probability_mass_centred_on_bin() {
        // bin 5 → μ = 5.5, class 5 covers [5, 6)
        let p = bin_probabilities(5.0);
        let argmax = p
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(argmax, 5);
        // Φ(1) - Φ(-1) ≈ 0.6827
        assert!((p[5] - 0.6827).abs() < 1e-3);
    }

    #[test]
    fn test_open_ended_classes() {
        let low = bin_probabilities(0.0);
        assert!(low[0] > 0.6);
        let high = bin_probabilities(17.0);
        assert!(high[N_BINS - 1] > 0.6);
    }
}
