//! Records, the assembled dataset, and the builder.
//!
//! A [`Record`] is one continuous recording after loader-side preprocessing.
//! [`Dataset::build`] windows every record and stacks the results into one
//! flat example matrix with parallel label and group arrays. Segmentation
//! never crosses record boundaries; every row traces back to exactly one
//! record.
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::segment;
use ndarray::{Array2, Axis};
use std::collections::HashSet;

/// One continuous recording, normalized and resampled to the target rate.
#[derive(Debug, Clone)]
pub struct Record {
    /// Samples at [`Record::fs`].
    pub signal: Vec<f32>,
    /// Sampling rate in Hz (the pipeline target rate after loading).
    pub fs: f32,
    /// Binary target: 0 = normal, 1 = abnormal.
    pub label: u8,
    /// Identifier of the physical recording; shared by all its windows.
    pub group: String,
}

/// The flat collection of training windows with parallel label/group arrays.
///
/// Invariant (by construction): `examples.nrows() == labels.len()
/// == groups.len()`, and rows sharing a group id came from the same record
/// and carry the same label.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// `[N, window]` example matrix.
    pub examples: Array2<f32>,
    pub labels: Vec<u8>,
    pub groups: Vec<String>,
}

impl Dataset {
    /// Window every record and stack the results, record order preserved.
    pub fn build(records: &[Record], cfg: &PipelineConfig) -> Result<Dataset> {
        let window = cfg.window_samples();
        let step = cfg.window_step();

        let mut flat: Vec<f32> = Vec::new();
        let mut labels: Vec<u8> = Vec::new();
        let mut groups: Vec<String> = Vec::new();
        let mut n_rows = 0usize;

        for rec in records {
            let wins = segment::segment(&rec.signal, window, step);
            let n = wins.nrows();
            flat.extend(wins.iter().copied());
            labels.extend(std::iter::repeat(rec.label).take(n));
            groups.extend(std::iter::repeat(rec.group.clone()).take(n));
            n_rows += n;
        }

        let examples = Array2::from_shape_vec((n_rows, window), flat).map_err(|e| {
            Error::Shape(format!("stacking {n_rows} windows of {window} samples: {e}"))
        })?;
        log::info!("built dataset: {n_rows} windows from {} records", records.len());
        Ok(Dataset { examples, labels, groups })
    }

    /// Number of examples.
    pub fn len(&self) -> usize {
        self.examples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct source recordings represented.
    pub fn n_groups(&self) -> usize {
        self.groups.iter().map(String::as_str).collect::<HashSet<_>>().len()
    }

    /// Copy out the rows (and labels) at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> (Array2<f32>, Vec<u8>) {
        let examples = self.examples.select(Axis(0), indices);
        let labels = indices.iter().map(|&i| self.labels[i]).collect();
        (examples, labels)
    }

    /// One-line shape and class-balance summary for run logs.
    pub fn summary(&self) -> String {
        let n = self.len();
        let pos = self.labels.iter().filter(|&&l| l == 1).count();
        let neg = n - pos;
        let pct = if n > 0 { 100.0 * pos as f64 / n as f64 } else { 0.0 };
        format!(
            "{n} examples × {} samples | {neg} normal / {pos} abnormal ({pct:.1}% abnormal) | {} groups",
            self.examples.ncols(),
            self.n_groups(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(len: usize, label: u8, group: &str) -> Record {
        Record {
            signal: (0..len).map(|i| (i as f32 * 0.01).sin()).collect(),
            fs: 300.0,
            label,
            group: group.to_string(),
        }
    }

    fn cfg() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn build_counts_sum_per_record() {
        let records = vec![
            record(4500, 0, "a"),
            record(9000, 1, "b"),
            record(2000, 0, "c"),
        ];
        let ds = Dataset::build(&records, &cfg()).unwrap();
        // 1 + 3 + 1 (short record zero-padded into a single window)
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.labels, vec![0, 1, 1, 1, 0]);
        assert_eq!(ds.groups, vec!["a", "b", "b", "b", "c"]);
    }

    #[test]
    fn rows_never_cross_records() {
        // Two constant-valued records: every row must be single-valued.
        let mut a = record(4500, 0, "a");
        a.signal = vec![1.0; 4500];
        let mut b = record(4500, 1, "b");
        b.signal = vec![2.0; 4500];
        let ds = Dataset::build(&[a, b], &cfg()).unwrap();
        assert_eq!(ds.len(), 2);
        assert!(ds.examples.row(0).iter().all(|&v| v == 1.0));
        assert!(ds.examples.row(1).iter().all(|&v| v == 2.0));
    }

    #[test]
    fn select_keeps_alignment() {
        let records = vec![record(9000, 1, "b"), record(4500, 0, "a")];
        let ds = Dataset::build(&records, &cfg()).unwrap();
        let (x, y) = ds.select(&[3, 0]);
        assert_eq!(x.nrows(), 2);
        assert_eq!(y, vec![0, 1]);
    }

    #[test]
    fn summary_reports_balance() {
        let ds = Dataset::build(&[record(4500, 1, "a"), record(4500, 0, "b")], &cfg()).unwrap();
        let s = ds.summary();
        assert!(s.contains("2 examples"), "{s}");
        assert!(s.contains("1 normal / 1 abnormal"), "{s}");
        assert!(s.contains("2 groups"), "{s}");
    }
}
