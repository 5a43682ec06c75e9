//! Evaluation metrics: confusion matrix, classification report, AUPRC.
//!
//! Probabilities are thresholded at a caller-chosen cutoff (the binaries use
//! 0.5). Every function is total: degenerate inputs (empty, single-class)
//! yield zeros, never NaN.
use std::cmp::Ordering;
use std::fmt;

/// Clip applied to probabilities before taking logarithms.
const PROB_EPS: f64 = 1e-7;

/// `num / den` as f64, or 0 when the denominator is empty.
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// 2×2 confusion matrix for the binary task (positive class = abnormal).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn from_preds(preds: &[u8], labels: &[u8]) -> Self {
        assert_eq!(preds.len(), labels.len(), "predictions and labels must align");
        let mut m = ConfusionMatrix { tp: 0, fp: 0, tn: 0, fn_: 0 };
        for (&p, &t) in preds.iter().zip(labels.iter()) {
            match (p, t) {
                (1, 1) => m.tp += 1,
                (1, 0) => m.fp += 1,
                (0, 0) => m.tn += 1,
                _ => m.fn_ += 1,
            }
        }
        m
    }

    pub fn from_probs(probs: &[f32], labels: &[u8], threshold: f32) -> Self {
        let preds: Vec<u8> = probs.iter().map(|&p| (p >= threshold) as u8).collect();
        Self::from_preds(&preds, labels)
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "confusion matrix (rows = truth, cols = prediction)")?;
        writeln!(f, "          pred:0  pred:1")?;
        writeln!(f, "  true:0  {:6}  {:6}", self.tn, self.fp)?;
        write!(f, "  true:1  {:6}  {:6}", self.fn_, self.tp)
    }
}

/// Precision/recall/F1 for one class.
#[derive(Debug, Clone, Copy)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

impl ClassMetrics {
    fn new(tp: usize, fp: usize, fn_: usize, support: usize) -> Self {
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self { precision, recall, f1, support }
    }
}

/// Per-class metrics plus macro/weighted averages and overall accuracy.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    /// Index 0 = normal, index 1 = abnormal.
    pub classes: [ClassMetrics; 2],
    pub accuracy: f64,
    pub total: usize,
}

impl ClassificationReport {
    pub fn from_confusion(m: &ConfusionMatrix) -> Self {
        // Class 1 straight from the matrix; class 0 with the roles flipped.
        let abnormal = ClassMetrics::new(m.tp, m.fp, m.fn_, m.tp + m.fn_);
        let normal = ClassMetrics::new(m.tn, m.fn_, m.fp, m.tn + m.fp);
        Self {
            classes: [normal, abnormal],
            accuracy: m.accuracy(),
            total: m.total(),
        }
    }

    pub fn from_probs(probs: &[f32], labels: &[u8], threshold: f32) -> Self {
        Self::from_confusion(&ConfusionMatrix::from_probs(probs, labels, threshold))
    }

    fn macro_avg(&self) -> (f64, f64, f64) {
        let [a, b] = &self.classes;
        (
            (a.precision + b.precision) / 2.0,
            (a.recall + b.recall) / 2.0,
            (a.f1 + b.f1) / 2.0,
        )
    }

    fn weighted_avg(&self) -> (f64, f64, f64) {
        let [a, b] = &self.classes;
        let n = (a.support + b.support) as f64;
        if n == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        let (wa, wb) = (a.support as f64 / n, b.support as f64 / n);
        (
            a.precision * wa + b.precision * wb,
            a.recall * wa + b.recall * wb,
            a.f1 * wa + b.f1 * wb,
        )
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12} {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        for (name, c) in [("normal", &self.classes[0]), ("abnormal", &self.classes[1])] {
            writeln!(
                f,
                "{:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}",
                name, c.precision, c.recall, c.f1, c.support,
            )?;
        }
        writeln!(f)?;
        writeln!(f, "{:>12} {:>29.4} {:>9}", "accuracy", self.accuracy, self.total)?;
        let (mp, mr, mf) = self.macro_avg();
        writeln!(f, "{:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}", "macro avg", mp, mr, mf, self.total)?;
        let (wp, wr, wf) = self.weighted_avg();
        write!(f, "{:>12} {:>9.4} {:>9.4} {:>9.4} {:>9}", "weighted avg", wp, wr, wf, self.total)
    }
}

/// Area under the precision-recall curve (average precision).
///
/// `AP = Σ (R_k − R_{k−1}) · P_k` over examples in descending score order.
/// Returns 0 when there are no positives.
pub fn average_precision(probs: &[f32], labels: &[u8]) -> f32 {
    assert_eq!(probs.len(), labels.len(), "probabilities and labels must align");
    let n_pos = labels.iter().filter(|&&t| t == 1).count();
    if n_pos == 0 {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..probs.len()).collect();
    order.sort_by(|&a, &b| probs[b].partial_cmp(&probs[a]).unwrap_or(Ordering::Equal));

    let mut tp = 0usize;
    let mut ap = 0.0_f64;
    let mut prev_recall = 0.0_f64;
    for (k, &i) in order.iter().enumerate() {
        if labels[i] == 1 {
            tp += 1;
            let recall = tp as f64 / n_pos as f64;
            let precision = tp as f64 / (k + 1) as f64;
            ap += (recall - prev_recall) * precision;
            prev_recall = recall;
        }
    }
    ap as f32
}

/// Mean binary cross-entropy with probability clipping.
pub fn log_loss(probs: &[f32], labels: &[u8]) -> f32 {
    assert_eq!(probs.len(), labels.len(), "probabilities and labels must align");
    if probs.is_empty() {
        return 0.0;
    }
    let sum: f64 = probs
        .iter()
        .zip(labels.iter())
        .map(|(&p, &t)| {
            let p = (p as f64).clamp(PROB_EPS, 1.0 - PROB_EPS);
            if t == 1 {
                -p.ln()
            } else {
                -(1.0 - p).ln()
            }
        })
        .sum();
    (sum / probs.len() as f64) as f32
}
