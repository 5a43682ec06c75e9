//! The classifier contract and a linear baseline.
//!
//! The convolutional architecture itself is a swappable collaborator; the
//! pipeline only relies on this trait. [`LogisticBaseline`] is the built-in
//! implementation — a single sigmoid unit over the flattened window — so
//! the harness, binaries, and tests have a concrete model to drive.
use ndarray::{s, Array1, Array2, Array3, ArrayView1};

/// A binary classifier over fixed-length single-channel windows.
///
/// Batches are shaped `[B, W, 1]`; predictions are `P(abnormal)` in
/// `[0, 1]`, one per example.
pub trait Model {
    /// One-line architecture/parameter description, printed once per run.
    fn summary(&self) -> String;

    /// Take one gradient step on a batch; returns the mean batch loss.
    fn train_batch(&mut self, x: &Array3<f32>, y: &Array2<f32>) -> f32;

    /// Probability of the positive class for each example in the batch.
    fn predict(&self, x: &Array3<f32>) -> Array1<f32>;
}

/// Logistic regression on the raw window, trained with mini-batch SGD.
#[derive(Debug, Clone)]
pub struct LogisticBaseline {
    w: Array1<f32>,
    b: f32,
    lr: f32,
}

impl LogisticBaseline {
    pub fn new(input_len: usize, lr: f32) -> Self {
        Self { w: Array1::zeros(input_len), b: 0.0, lr }
    }

    fn forward_one(&self, x: ArrayView1<f32>) -> f32 {
        sigmoid(x.dot(&self.w) + self.b)
    }
}

impl Model for LogisticBaseline {
    fn summary(&self) -> String {
        format!(
            "logistic baseline: {} inputs → 1 sigmoid unit ({} parameters)",
            self.w.len(),
            self.w.len() + 1,
        )
    }

    fn train_batch(&mut self, x: &Array3<f32>, y: &Array2<f32>) -> f32 {
        let b = x.shape()[0];
        if b == 0 {
            return 0.0;
        }
        let mut loss = 0.0_f64;
        let mut grad_w = Array1::<f32>::zeros(self.w.len());
        let mut grad_b = 0.0_f32;

        for k in 0..b {
            let xi = x.slice(s![k, .., 0]);
            let p = self.forward_one(xi);
            let t = y[[k, 0]];
            let pc = p.clamp(PROB_EPS, 1.0 - PROB_EPS) as f64;
            loss -= t as f64 * pc.ln() + (1.0 - t as f64) * (1.0 - pc).ln();
            let err = p - t;
            grad_w.scaled_add(err, &xi);
            grad_b += err;
        }

        let scale = self.lr / b as f32;
        self.w.scaled_add(-scale, &grad_w);
        self.b -= scale * grad_b;
        (loss / b as f64) as f32
    }

    fn predict(&self, x: &Array3<f32>) -> Array1<f32> {
        let b = x.shape()[0];
        Array1::from_iter((0..b).map(|k| self.forward_one(x.slice(s![k, .., 0]))))
    }
}

const PROB_EPS: f32 = 1e-7;

fn sigmoid(z: f32) -> f32 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    /// Batch of `n` constant-valued windows: value `lo` labeled 0, `hi`
    /// labeled 1, alternating.
    fn toy_batch(n: usize, w: usize, lo: f32, hi: f32) -> (Array3<f32>, Array2<f32>) {
        let x = Array3::from_shape_fn((n, w, 1), |(k, _, _)| if k % 2 == 0 { lo } else { hi });
        let y = Array2::from_shape_fn((n, 1), |(k, _)| (k % 2) as f32);
        (x, y)
    }

    #[test]
    fn untrained_model_is_uncommitted() {
        let m = LogisticBaseline::new(8, 0.1);
        let (x, _) = toy_batch(4, 8, -1.0, 1.0);
        for &p in m.predict(&x).iter() {
            approx::assert_abs_diff_eq!(p, 0.5, epsilon = 1e-6_f32);
        }
    }

    #[test]
    fn learns_a_separable_problem() {
        let mut m = LogisticBaseline::new(8, 0.5);
        let (x, y) = toy_batch(32, 8, -1.0, 1.0);
        let first = m.train_batch(&x, &y);
        let mut last = first;
        for _ in 0..200 {
            last = m.train_batch(&x, &y);
        }
        assert!(last < first, "loss did not decrease: {first} → {last}");

        let probs = m.predict(&x);
        for (k, &p) in probs.iter().enumerate() {
            if k % 2 == 0 {
                assert!(p < 0.5, "example {k}: p={p}");
            } else {
                assert!(p > 0.5, "example {k}: p={p}");
            }
        }
    }

    #[test]
    fn probabilities_stay_in_unit_interval() {
        let mut m = LogisticBaseline::new(4, 2.0);
        let (x, y) = toy_batch(16, 4, -100.0, 100.0);
        for _ in 0..50 {
            m.train_batch(&x, &y);
        }
        for &p in m.predict(&x).iter() {
            assert!((0.0..=1.0).contains(&p), "p={p}");
        }
    }
}
