// ============================================================
// Layer 4 — K-Fold Splitter
// ============================================================
// Deterministic k-fold cross-validation over row indices.
//
// How the folds are built:
//   1. indices = 0..n
//   2. If shuffling, permute them with a StdRng seeded from `seed`
//      (Fisher-Yates via rand::seq::SliceRandom)
//   3. Cut the permutation into k consecutive folds. The first
//      n % k folds get one extra row:
//        n = 11, k = 5  →  fold sizes 3, 2, 2, 2, 2
//   4. Split i = (every index outside fold i, fold i), both sorted
//      ascending so selected rows keep their table order
//
// Same n, k and seed always give the same folds. The validation
// folds are disjoint and together cover every row exactly once.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::domain::traits::FoldSplitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
    seed: u64,
    shuffle: bool,
}

impl KFold {
    pub fn new(n_splits: usize, seed: u64, shuffle: bool) -> Self {
        Self { n_splits, seed, shuffle }
    }

    /// Fold sizes for `n_rows` rows.
    pub fn fold_sizes(&self, n_rows: usize) -> Vec<usize> {
        let base = n_rows / self.n_splits;
        let extra = n_rows % self.n_splits;
        (0..self.n_splits)
            .map(|i| if i < extra { base + 1 } else { base })
            .collect()
    }
}

impl FoldSplitter for KFold {
    fn n_splits(&self) -> usize {
        self.n_splits
    }

    fn split(&self, n_rows: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            bail!("k-fold needs at least 2 splits, got {}", self.n_splits);
        }
        if n_rows < self.n_splits {
            bail!(
                "cannot make {} folds from {} rows",
                self.n_splits,
                n_rows
            );
        }

        let mut order: Vec<usize> = (0..n_rows).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            order.shuffle(&mut rng);
        }

        let mut splits = Vec::with_capacity(self.n_splits);
        let mut start = 0;

        for size in self.fold_sizes(n_rows) {
            let stop = start + size;

            let mut in_fold = vec![false; n_rows];
            for &i in &order[start..stop] {
                in_fold[i] = true;
            }

            let (valid, train): (Vec<usize>, Vec<usize>) = (0..n_rows).partition(|&i| in_fold[i]);
            splits.push((train, valid));
            start = stop;
        }

        tracing::debug!(
            "k-fold: {} rows into {} folds (shuffle={}, seed={})",
            n_rows,
            self.n_splits,
            self.shuffle,
            self.seed
        );

        Ok(splits)
    }
}
