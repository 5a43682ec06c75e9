//! Fixed-length overlapping windowing.
//!
//! Cuts one continuous signal into equal-length training windows. Signals
//! shorter than one window are right-padded with zeros into a single
//! window; otherwise windows start every `step` samples and the trailing
//! remainder that does not fill a full window is dropped.
use ndarray::Array2;

/// Number of windows `segment` will emit for a signal of length `len`.
pub fn window_count(len: usize, window: usize, step: usize) -> usize {
    if len < window {
        1
    } else {
        (len - window) / step + 1
    }
}

/// Cut `x` into windows of `window` samples, one per row.
///
/// Offsets are `0, step, 2·step, …` while the full window fits. Each row is
/// an independent copy of the underlying samples.
pub fn segment(x: &[f32], window: usize, step: usize) -> Array2<f32> {
    assert!(window > 0, "segment: window must be nonzero");
    assert!(step > 0, "segment: step must be nonzero");

    if x.len() < window {
        let mut out = Array2::zeros((1, window));
        for (i, &v) in x.iter().enumerate() {
            out[[0, i]] = v;
        }
        return out;
    }

    let n_win = window_count(x.len(), window, step);
    let mut out = Array2::zeros((n_win, window));
    for w in 0..n_win {
        let start = w * step;
        for (i, &v) in x[start..start + window].iter().enumerate() {
            out[[w, i]] = v;
        }
    }
    out
}
