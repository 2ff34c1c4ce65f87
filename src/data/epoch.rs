// ============================================================
// Layer 4 — Epoch-Bounded Loader
// ============================================================
// Training runs in logical epochs of a fixed number of batches,
// independent of how many rows the training partition holds.
//
//   EpochBoundedLoader  owns the underlying Burn DataLoader and the
//                       batches-per-epoch count
//   EpochCursor         borrows it and keeps the live iterator, so
//                       epoch k+1 continues where epoch k stopped
//   Epoch               one logical epoch: yields exactly
//                       `batch_per_epoch` batches
//
// When the underlying iterator runs dry mid-epoch the loader is
// restarted (a shuffled loader reshuffles on restart). The only
// way an epoch comes up short is a loader with no batches at all.
//
// Usage:
//   let train = processor.prepare_train_dataloader();
//   let mut cursor = train.epochs();
//   for _ in 0..n_epochs {
//       for batch in cursor.next_epoch() { ... }
//   }
//
// Reference: Rust Book §13 (Iterators)
//            Burn Book §4 (DataLoader)

use std::sync::Arc;

use burn::data::dataloader::{DataLoader, DataLoaderIterator};

pub struct EpochBoundedLoader<O> {
    loader: Arc<dyn DataLoader<O>>,
    batch_per_epoch: usize,
}

impl<O: 'static> EpochBoundedLoader<O> {
    pub fn new(loader: Arc<dyn DataLoader<O>>, batch_per_epoch: usize) -> Self {
        Self { loader, batch_per_epoch }
    }

    /// Batches per logical epoch.
    pub fn len(&self) -> usize {
        self.batch_per_epoch
    }

    pub fn is_empty(&self) -> bool {
        self.batch_per_epoch == 0
    }

    /// A cursor that carries the underlying iterator across epochs.
    pub fn epochs(&self) -> EpochCursor<'_, O> {
        EpochCursor {
            loader: self.loader.as_ref(),
            batch_per_epoch: self.batch_per_epoch,
            current: None,
        }
    }

    /// One logical epoch. Every call starts a fresh pass over the
    /// underlying loader, so consecutive calls do not continue from
    /// each other; a training loop that runs several epochs should
    /// hold one `epochs()` cursor instead.
    pub fn iter(&self) -> impl Iterator<Item = O> + '_ {
        let mut cursor = self.epochs();
        std::iter::from_fn(move || cursor.next_batch()).take(self.batch_per_epoch)
    }
}

pub struct EpochCursor<'a, O> {
    loader: &'a dyn DataLoader<O>,
    batch_per_epoch: usize,
    current: Option<Box<dyn DataLoaderIterator<O> + 'a>>,
}

impl<'a, O> EpochCursor<'a, O> {
    /// The next logical epoch.
    pub fn next_epoch(&mut self) -> Epoch<'_, 'a, O> {
        let remaining = self.batch_per_epoch;
        Epoch { cursor: self, remaining }
    }

    fn next_batch(&mut self) -> Option<O> {
        if let Some(batch) = self.current.as_mut().and_then(|it| it.next()) {
            return Some(batch);
        }

        // Not started yet, or the last pass is exhausted
        let mut fresh = self.loader.iter();
        let batch = fresh.next();
        self.current = Some(fresh);

        if batch.is_none() {
            tracing::warn!("Underlying loader produced no batches");
        }
        batch
    }
}

pub struct Epoch<'c, 'a, O> {
    cursor: &'c mut EpochCursor<'a, O>,
    remaining: usize,
}

impl<O> Iterator for Epoch<'_, '_, O> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        if self.remaining == 0 {
            return None;
        }
        match self.cursor.next_batch() {
            Some(batch) => {
                self.remaining -= 1;
                Some(batch)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::data::{
        dataloader::{batcher::Batcher, DataLoaderBuilder},
        dataset::InMemDataset,
    };

    #[derive(Clone)]
    struct VecBatcher;

    impl Batcher<usize, Vec<usize>> for VecBatcher {
        fn batch(&self, items: Vec<usize>) -> Vec<usize> {
            items
        }
    }

    fn loader(n_items: usize, batch_size: usize) -> Arc<dyn DataLoader<Vec<usize>>> {
        DataLoaderBuilder::new(VecBatcher)
            .batch_size(batch_size)
            .build(InMemDataset::new((0..n_items).collect::<Vec<_>>()))
    }

    #[test]
    fn test_epoch_yields_exact_batch_count() {
        // 10 items / 3 per batch = 4 batches per pass; epoch asks for 9
        let wrapped = EpochBoundedLoader::new(loader(10, 3), 9);
        assert_eq!(wrapped.len(), 9);
        assert_eq!(wrapped.iter().count(), 9);
    }

    #[test]
    fn test_epoch_shorter_than_pass() {
        let wrapped = EpochBoundedLoader::new(loader(100, 10), 3);
        let batches: Vec<Vec<usize>> = wrapped.iter().collect();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0], (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_cursor_continues_across_epochs() {
        // 4 batches per pass, 3 per epoch
        let wrapped = EpochBoundedLoader::new(loader(8, 2), 3);
        let mut cursor = wrapped.epochs();

        let first: Vec<Vec<usize>> = cursor.next_epoch().collect();
        let second: Vec<Vec<usize>> = cursor.next_epoch().collect();

        assert_eq!(first, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
        // Finishes the pass, then restarts from the beginning
        assert_eq!(second, vec![vec![6, 7], vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_iter_restarts_each_call() {
        let wrapped = EpochBoundedLoader::new(loader(8, 2), 3);

        let first: Vec<Vec<usize>> = wrapped.iter().collect();
        let second: Vec<Vec<usize>> = wrapped.iter().collect();

        assert_eq!(first, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
        assert_eq!(second, first);
    }

    #[test]
    fn test_empty_loader_ends_epoch() {
        let wrapped = EpochBoundedLoader::new(loader(0, 4), 5);
        assert_eq!(wrapped.iter().count(), 0);
    }

    #[test]
    fn test_zero_batches_per_epoch() {
        let wrapped = EpochBoundedLoader::new(loader(10, 2), 0);
        assert!(wrapped.is_empty());
        assert_eq!(wrapped.epochs().next_epoch().count(), 0);
    }
}
