//! Mini-batch supplier for the training loop.
//!
//! Owns a split's example matrix and labels plus an index permutation.
//! `batch(i)` returns the `i`-th contiguous slice of that permutation,
//! reshaped for the model contract: `[B, W, 1]` examples, `[B, 1]` labels.
//! `on_epoch_end` reshuffles when shuffling is enabled; with shuffling
//! disabled the order is the input order, every epoch.
//!
//! State is a plain permutation plus a seeded RNG, so iteration is
//! reproducible. One sequential consumer at a time; wrap it yourself if you
//! ever need to share it.
use ndarray::{s, Array2, Array3};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct BatchSupplier {
    examples: Array2<f32>,
    labels: Vec<u8>,
    order: Vec<usize>,
    batch_size: usize,
    shuffle: bool,
    rng: ChaCha8Rng,
}

impl BatchSupplier {
    /// Takes ownership of one split's rows. Shuffling (when enabled) is
    /// seeded here and applied immediately so epoch 0 is already permuted.
    pub fn new(
        examples: Array2<f32>,
        labels: Vec<u8>,
        batch_size: usize,
        shuffle: bool,
        seed: u64,
    ) -> Self {
        assert!(batch_size > 0, "batch size must be nonzero");
        assert_eq!(
            examples.nrows(),
            labels.len(),
            "examples and labels must be index-aligned"
        );
        let order: Vec<usize> = (0..examples.nrows()).collect();
        let mut sup = Self {
            examples,
            labels,
            order,
            batch_size,
            shuffle,
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        if sup.shuffle {
            sup.order.shuffle(&mut sup.rng);
        }
        sup
    }

    /// Number of batches per epoch: `ceil(n / batch_size)`.
    pub fn len(&self) -> usize {
        self.order.len().div_ceil(self.batch_size)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of examples across all batches.
    pub fn n_examples(&self) -> usize {
        self.order.len()
    }

    /// The `i`-th batch under the current permutation.
    ///
    /// The final batch may be short. Indexing past `len()` is a contract
    /// violation.
    pub fn batch(&self, i: usize) -> (Array3<f32>, Array2<f32>) {
        assert!(i < self.len(), "batch index {i} out of range ({} batches)", self.len());
        let start = i * self.batch_size;
        let end = (start + self.batch_size).min(self.order.len());
        let idx = &self.order[start..end];

        let b = idx.len();
        let w = self.examples.ncols();
        let mut x = Array3::zeros((b, w, 1));
        let mut y = Array2::zeros((b, 1));
        for (k, &j) in idx.iter().enumerate() {
            x.slice_mut(s![k, .., 0]).assign(&self.examples.row(j));
            y[[k, 0]] = self.labels[j] as f32;
        }
        (x, y)
    }

    /// End-of-epoch hook: reshuffle the permutation when enabled, no-op
    /// otherwise.
    pub fn on_epoch_end(&mut self) {
        if self.shuffle {
            self.order.shuffle(&mut self.rng);
        }
    }
}
