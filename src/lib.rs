//! # ecgtrain — ECG arrhythmia dataset pipeline and training harness
//!
//! `ecgtrain` builds a binary arrhythmia classification dataset from two
//! heterogeneous single-lead ECG sources, then trains and evaluates a
//! swappable classifier on it. The data side is the substance: label
//! harmonization across sources, rational resampling to a common rate,
//! overlapping windowing, and group-aware splitting so no recording leaks
//! across the train/validation/test boundary.
//!
//! ## Pipeline overview
//!
//! ```text
//! REFERENCE.csv + <id>.safetensors      bundle.safetensors
//!   │  (one record per file)              │  (matrix + labels)
//!   ├─ load::load_record_dir()           ├─ load::load_bundle()
//!   │    per record: z-score → resample to 300 Hz → binary label
//!   └──────────────┬─────────────────────┘
//!                  ▼
//!   Dataset::build()        15 s windows, 50% overlap, zero-pad short records
//!   split::split_by_group() whole recordings per partition, seeded
//!   BatchSupplier           [B, 4500, 1] batches, reshuffled per epoch
//!   train::fit()            early stopping on validation AUPRC
//!   metrics                 confusion matrix + classification report
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use ecgtrain::{build_dataset, split_by_group, BatchSupplier, LogisticBaseline};
//! use ecgtrain::{PipelineConfig, TrainConfig};
//! use std::path::Path;
//!
//! let pcfg = PipelineConfig::default();
//! let tcfg = TrainConfig::default();
//!
//! let ds = build_dataset(
//!     Path::new("data/records"),
//!     Path::new("data/bundle.safetensors"),
//!     128.0,
//!     &pcfg,
//! ).unwrap();
//! println!("{}", ds.summary());
//!
//! let split = split_by_group(&ds.groups, tcfg.test_frac, tcfg.val_frac, tcfg.seed).unwrap();
//! let (train_x, train_y) = ds.select(&split.train);
//! let mut batches = BatchSupplier::new(train_x, train_y, tcfg.batch_size, true, tcfg.seed);
//!
//! let (val_x, val_y) = ds.select(&split.val);
//! let val_batches = BatchSupplier::new(val_x, val_y, tcfg.batch_size, false, tcfg.seed);
//!
//! let model = LogisticBaseline::new(pcfg.window_samples(), 0.01);
//! let (model, _history) = ecgtrain::fit(model, &mut batches, &val_batches, &tcfg);
//! # let _ = model;
//! ```
//!
//! Each stage is also usable on its own — see the module docs.

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod io;
pub mod label;
pub mod load;
pub mod metrics;
pub mod model;
pub mod normalize;
pub mod resample;
pub mod segment;
pub mod split;
pub mod train;

use std::path::Path;

// ── Crate-root re-exports ─────────────────────────────────────────────────
//
// Everything a downstream user is likely to need is available directly as
// `ecgtrain::Foo` without having to know the internal module layout.

// config
pub use config::{PipelineConfig, TrainConfig};

// error
pub use error::{Error, Result};

// data model
pub use dataset::{Dataset, Record};

// loaders
pub use load::{load_bundle, load_record_dir};

// splitting + batching
pub use batch::BatchSupplier;
pub use split::{split_by_group, SplitIndices};

// model + training
pub use model::{LogisticBaseline, Model};
pub use train::{fit, predict_all, EpochMetrics};

// metrics
pub use metrics::{average_precision, log_loss, ClassificationReport, ConfusionMatrix};

// dsp
pub use normalize::zscore_inplace;
pub use resample::resample;
pub use segment::segment;

/// Load both sources and assemble the full example matrix.
///
/// This is the main entry point for the dataset half of the crate: it runs
/// both loaders (reference-table directory first, then the bundle), with
/// every record z-scored and resampled to `cfg.target_fs`, and windows the
/// lot into one flat [`Dataset`].
///
/// # Arguments
///
/// * `record_dir` — directory holding `REFERENCE.csv` and one
///   `<id>.safetensors` payload per listed record.
/// * `bundle_path` — safetensors file with a `signals` matrix and parallel
///   `labels` strings.
/// * `bundle_fs` — documented sampling rate of the bundle rows in Hz (the
///   bundle stores no per-row rate).
/// * `cfg` — window geometry and target rate.
///
/// # Errors
///
/// Any loader failure aborts the build; see [`error::Error`] for the
/// taxonomy. There is no partial-dataset recovery.
pub fn build_dataset(
    record_dir: &Path,
    bundle_path: &Path,
    bundle_fs: f32,
    cfg: &PipelineConfig,
) -> Result<Dataset> {
    let tag = bundle_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("bundle")
        .to_string();

    let mut records = load::load_record_dir(record_dir, cfg)?;
    records.extend(load::load_bundle(bundle_path, bundle_fs, &tag, cfg)?);
    Dataset::build(&records, cfg)
}
