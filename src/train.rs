//! Training loop with early stopping on validation AUPRC.
//!
//! One epoch = every training batch once, then a full pass over the fixed
//! validation order. The monitored metric is the area under the validation
//! precision-recall curve; when it fails to improve for `patience` epochs
//! the loop stops and the best-epoch model snapshot is returned.
use crate::batch::BatchSupplier;
use crate::config::TrainConfig;
use crate::metrics::{average_precision, log_loss};
use crate::model::Model;

/// Metrics recorded after each epoch.
#[derive(Debug, Clone)]
pub struct EpochMetrics {
    /// 1-based epoch number.
    pub epoch: usize,
    pub train_loss: f32,
    pub val_loss: f32,
    pub val_auprc: f32,
}

/// Run every batch of `sup` through the model and collect probabilities
/// alongside the true labels, in batch order.
pub fn predict_all<M: Model>(model: &M, sup: &BatchSupplier) -> (Vec<f32>, Vec<u8>) {
    let mut probs = Vec::with_capacity(sup.n_examples());
    let mut truth = Vec::with_capacity(sup.n_examples());
    for i in 0..sup.len() {
        let (x, y) = sup.batch(i);
        probs.extend(model.predict(&x).iter().copied());
        truth.extend(y.iter().map(|&t| t as u8));
    }
    (probs, truth)
}

/// Train `model`, monitoring the validation supplier (which must have
/// shuffling disabled so probabilities stay aligned across epochs).
///
/// Returns the best-epoch model and the full epoch history. Per-epoch
/// metric lines go to stdout; they are run output, not diagnostics.
pub fn fit<M: Model + Clone>(
    mut model: M,
    train: &mut BatchSupplier,
    val: &BatchSupplier,
    cfg: &TrainConfig,
) -> (M, Vec<EpochMetrics>) {
    let mut history = Vec::new();
    let mut best: Option<(f32, M)> = None;
    let mut stale = 0usize;

    for epoch in 1..=cfg.max_epochs {
        let n_batches = train.len();
        let mut loss_sum = 0.0_f64;
        for i in 0..n_batches {
            let (x, y) = train.batch(i);
            loss_sum += model.train_batch(&x, &y) as f64;
        }
        train.on_epoch_end();
        let train_loss = if n_batches > 0 { (loss_sum / n_batches as f64) as f32 } else { 0.0 };

        let (probs, truth) = predict_all(&model, val);
        let val_loss = log_loss(&probs, &truth);
        let val_auprc = average_precision(&probs, &truth);

        let improved = best.as_ref().map_or(true, |(b, _)| val_auprc > *b);
        if improved {
            best = Some((val_auprc, model.clone()));
            stale = 0;
        } else {
            stale += 1;
        }

        println!(
            "epoch {epoch:3}/{} | train_loss={train_loss:.4} val_loss={val_loss:.4} val_auprc={val_auprc:.4}{}",
            cfg.max_epochs,
            if improved { " *" } else { "" },
        );
        history.push(EpochMetrics { epoch, train_loss, val_loss, val_auprc });

        if stale >= cfg.patience {
            println!("early stopping at epoch {epoch} (no val AUPRC gain in {} epochs)", cfg.patience);
            break;
        }
    }

    let model = match best {
        Some((_, m)) => m,
        None => model,
    };
    (model, history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogisticBaseline;
    use ndarray::Array2;

    /// Linearly separable toy split: constant windows at −1 (label 0) and
    /// +1 (label 1).
    fn toy_supplier(n: usize, shuffle: bool, seed: u64) -> BatchSupplier {
        let w = 8;
        let examples =
            Array2::from_shape_fn((n, w), |(r, _)| if r % 2 == 0 { -1.0 } else { 1.0 });
        let labels: Vec<u8> = (0..n).map(|r| (r % 2) as u8).collect();
        BatchSupplier::new(examples, labels, 4, shuffle, seed)
    }

    #[test]
    fn fit_learns_and_history_is_complete() {
        let mut train = toy_supplier(32, true, 1);
        let val = toy_supplier(16, false, 1);
        let cfg = TrainConfig { max_epochs: 10, patience: 10, ..TrainConfig::default() };

        let model = LogisticBaseline::new(8, 0.5);
        let (model, history) = fit(model, &mut train, &val, &cfg);

        assert_eq!(history.len(), 10);
        assert!(
            history.last().unwrap().train_loss < history[0].train_loss,
            "loss did not decrease"
        );
        let (probs, truth) = predict_all(&model, &val);
        approx::assert_abs_diff_eq!(
            average_precision(&probs, &truth),
            1.0,
            epsilon = 1e-4_f32
        );
    }

    #[test]
    fn early_stopping_respects_patience() {
        // Zero learning rate: AUPRC can never improve after epoch 1.
        let mut train = toy_supplier(32, true, 1);
        let val = toy_supplier(16, false, 1);
        let cfg = TrainConfig { max_epochs: 30, patience: 3, ..TrainConfig::default() };

        let model = LogisticBaseline::new(8, 0.0);
        let (_, history) = fit(model, &mut train, &val, &cfg);
        // Epoch 1 sets the best; epochs 2-4 are stale; stop at 4.
        assert_eq!(history.len(), 1 + 3);
    }

    #[test]
    fn predictions_align_with_validation_order() {
        let val = toy_supplier(10, false, 1);
        let model = LogisticBaseline::new(8, 0.1);
        let (probs, truth) = predict_all(&model, &val);
        assert_eq!(probs.len(), 10);
        assert_eq!(truth, (0..10).map(|r| (r % 2) as u8).collect::<Vec<_>>());
    }
}
