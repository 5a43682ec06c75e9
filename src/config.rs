//! Pipeline and training configuration.
//!
//! [`PipelineConfig`] holds the signal-side tunables (target rate, window
//! geometry); [`TrainConfig`] holds the training-side ones (batching, split
//! fractions, early stopping). All fields have defaults matching the values
//! used to train the reference classifier.

/// Configuration for dataset preparation.
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use ecgtrain::PipelineConfig;
///
/// let cfg = PipelineConfig {
///     target_fs: 250.0,   // resample to 250 Hz instead of 300
///     ..PipelineConfig::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target sampling rate in Hz after resampling.
    ///
    /// The resampler is skipped entirely when a record's source rate already
    /// equals this value (within 1 mHz).
    ///
    /// Default: `300.0` Hz.
    pub target_fs: f32,

    /// Duration of each training window in seconds.
    ///
    /// At the default 15.0 s / 300 Hz each window has **4 500 samples**.
    ///
    /// Default: `15.0` s.
    pub window_dur: f32,

    /// Fraction of each window shared with its successor.
    ///
    /// `0.5` means consecutive windows start half a window apart. `0.0`
    /// disables overlap entirely (back-to-back windows).
    ///
    /// Default: `0.5`.
    pub overlap: f32,
}

impl Default for PipelineConfig {
    /// Returns the training configuration: 300 Hz · 15 s windows · 50% overlap.
    fn default() -> Self {
        Self {
            target_fs: 300.0,
            window_dur: 15.0,
            overlap: 0.5,
        }
    }
}

impl PipelineConfig {
    /// Number of samples per window at the target sampling rate.
    ///
    /// Computed as `floor(window_dur × target_fs)`. At the defaults this
    /// returns **4 500** (= 15 s × 300 Hz).
    ///
    /// # Examples
    ///
    /// ```
    /// use ecgtrain::PipelineConfig;
    /// let cfg = PipelineConfig::default();
    /// assert_eq!(cfg.window_samples(), 4500);
    /// ```
    pub fn window_samples(&self) -> usize {
        (self.window_dur * self.target_fs) as usize
    }

    /// Offset between consecutive window starts, in samples.
    ///
    /// Computed as `window_samples × (1 − overlap)`, clamped to at least 1.
    /// At the defaults this returns **2 250** (50% overlap).
    pub fn window_step(&self) -> usize {
        let step = (self.window_samples() as f32 * (1.0 - self.overlap)) as usize;
        step.max(1)
    }
}

/// Configuration for splitting, batching, and the training loop.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Mini-batch size.
    pub batch_size: usize,

    /// Fraction of all examples held out for the test split (by group).
    pub test_frac: f64,

    /// Fraction of the remaining pool held out for validation (by group).
    pub val_frac: f64,

    /// Early-stopping patience: stop after this many epochs without a
    /// validation AUPRC improvement.
    pub patience: usize,

    /// Upper bound on training epochs.
    pub max_epochs: usize,

    /// Seed for every random choice in the run (splitting and shuffling).
    /// Identical seed + identical input reproduces the run exactly.
    pub seed: u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            test_frac: 0.2,
            val_frac: 0.2,
            patience: 5,
            max_epochs: 30,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_geometry() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.window_samples(), 4500);
        assert_eq!(cfg.window_step(), 2250);
    }

    #[test]
    fn zero_overlap_steps_a_full_window() {
        let cfg = PipelineConfig { overlap: 0.0, ..PipelineConfig::default() };
        assert_eq!(cfg.window_step(), cfg.window_samples());
    }

    #[test]
    fn step_never_collapses_to_zero() {
        let cfg = PipelineConfig { overlap: 1.0, ..PipelineConfig::default() };
        assert_eq!(cfg.window_step(), 1);
    }
}
