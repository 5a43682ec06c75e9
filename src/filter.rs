//! Anti-aliasing FIR lowpass: windowed-sinc design + overlap-add application.
//!
//! This module serves the resampler. `firwin` designs a Hamming-windowed
//! sinc lowpass with unit DC gain; `filter_1d` applies it with FFT
//! overlap-add. Zero phase is achieved by shifting the output left by
//! `(N−1)/2` samples rather than filtering twice; the edge transient is
//! suppressed with reflect-limited padding of `N−1` samples per side.
use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Design a lowpass FIR filter with a Hamming-windowed sinc.
///
/// `cutoff_hz` is the -6 dB point at sampling rate `fs`. `n_taps` must be
/// odd so the filter is linear-phase with an integer group delay. The taps
/// are normalized to unit DC gain.
pub fn firwin(n_taps: usize, cutoff_hz: f32, fs: f32) -> Vec<f32> {
    assert!(n_taps % 2 == 1, "firwin requires odd tap count, got {n_taps}");
    let alpha = (n_taps - 1) as f64 / 2.0;
    let nyq = fs as f64 / 2.0;
    let fc = cutoff_hz as f64 / nyq; // normalized [0, 1]

    let win = hamming(n_taps);

    let mut h: Vec<f64> = (0..n_taps)
        .map(|i| {
            let x = i as f64 - alpha;
            // f(x) = sin(π·fc·x) / (π·x);  lim_{x→0} f(x) = fc
            let sinc = if x == 0.0 { fc } else { (PI * fc * x).sin() / (PI * x) };
            sinc * win[i]
        })
        .collect();

    let s: f64 = h.iter().sum();
    h.iter_mut().for_each(|v| *v /= s);

    h.iter().map(|&v| v as f32).collect()
}

/// Hamming window of length `n`.
pub fn hamming(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / (n - 1) as f64).cos())
        .collect()
}

/// Filter a single signal with the overlap-add algorithm.
///
/// `h` must have odd length. Returns a vector of the same length as `x`,
/// aligned with the input (zero-phase).
pub fn filter_1d(x: &[f32], h: &[f32]) -> Vec<f32> {
    let n_x = x.len();
    let n_h = h.len();
    assert!(n_h % 2 == 1, "filter_1d requires an odd-length kernel");

    if n_x == 0 {
        return vec![];
    }

    // Shift for zero-phase: (N-1)/2.
    let shift = (n_h - 1) / 2;
    let n_edge = n_h - 1;

    let x_ext = reflect_limited_pad(x, n_edge, n_edge);
    let n_ext = x_ext.len();

    let n_fft = choose_fft_len(n_h, n_ext);
    let h_fft = fft_of_kernel(h, n_fft);

    let n_seg = n_fft - n_h + 1;
    let n_segments = n_ext.div_ceil(n_seg);
    let mut acc = vec![0.0_f32; n_ext];

    let mut planner: FftPlanner<f32> = FftPlanner::new();
    let fft_fwd = planner.plan_fft_forward(n_fft);
    let fft_inv = planner.plan_fft_inverse(n_fft);
    let inv_scale = 1.0 / n_fft as f32;

    for seg_idx in 0..n_segments {
        let start = seg_idx * n_seg;
        let stop = (start + n_seg).min(n_ext);

        let mut buf: Vec<Complex<f32>> = x_ext[start..stop]
            .iter()
            .map(|&v| Complex { re: v, im: 0.0 })
            .chain(std::iter::repeat(Complex::default()))
            .take(n_fft)
            .collect();

        fft_fwd.process(&mut buf);
        for (b, &hf) in buf.iter_mut().zip(h_fft.iter()) {
            *b *= hf;
        }
        fft_inv.process(&mut buf);

        // Accumulate, shifting left by the group delay.
        let out_start = start.saturating_sub(shift);
        let out_end = (out_start + n_fft).min(n_ext);
        let prod_start = if start < shift { shift - start } else { 0 };

        for (o, p) in (out_start..out_end).zip(prod_start..) {
            if p < buf.len() {
                acc[o] += buf[p].re * inv_scale;
            }
        }
    }

    acc[n_edge..n_edge + n_x].to_vec()
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Reflect-limited padding: odd reflection around the boundary samples,
/// zero-filled where the requested pad exceeds the signal length.
fn reflect_limited_pad(x: &[f32], n_l: usize, n_r: usize) -> Vec<f32> {
    let n = x.len();
    let actual_l = n_l.min(n - 1);
    let actual_r = n_r.min(n - 1);

    let mut out = Vec::with_capacity(n_l + n + n_r);

    for _ in actual_l..n_l {
        out.push(0.0);
    }
    for i in (1..=actual_l).rev() {
        out.push(2.0 * x[0] - x[i]);
    }

    out.extend_from_slice(x);

    let last = x[n - 1];
    for i in 1..=actual_r {
        let idx = (n - 1).saturating_sub(i);
        out.push(2.0 * last - x[idx]);
    }
    for _ in actual_r..n_r {
        out.push(0.0);
    }

    out
}

/// Choose the FFT block size (power of 2 minimizing the operation count).
///
/// Cost model:
///   `cost = ceil(n_x / (N - n_h + 1)) * N * (log2(N) + 1) + 4e-5 * N * n_x`
fn choose_fft_len(n_h: usize, n_x: usize) -> usize {
    let min_fft = 2 * n_h - 1;

    let max_pow = (n_x as f64).log2().ceil() as u32 + 1;
    let min_pow = (min_fft as f64).log2().ceil() as u32;

    let mut best_n = 1_usize << max_pow;
    let mut best_cost = f64::INFINITY;

    for pow in min_pow..=max_pow {
        let n = 1_usize << pow;
        if n < min_fft {
            continue;
        }
        let n_seg = (n - n_h + 1) as f64;
        let cost = (n_x as f64 / n_seg).ceil() * n as f64 * (pow as f64 + 1.0)
            + 4e-5 * n as f64 * n_x as f64;
        if cost < best_cost {
            best_cost = cost;
            best_n = n;
        }
    }
    best_n
}

/// FFT of `h` zero-padded to `n_fft`.
fn fft_of_kernel(h: &[f32], n_fft: usize) -> Vec<Complex<f32>> {
    let mut buf: Vec<Complex<f32>> = h
        .iter()
        .map(|&v| Complex { re: v, im: 0.0 })
        .chain(std::iter::repeat(Complex::default()))
        .take(n_fft)
        .collect();
    let mut planner: FftPlanner<f32> = FftPlanner::new();
    planner.plan_fft_forward(n_fft).process(&mut buf);
    buf
}

/// Direct (time-domain) zero-phase convolution, for cross-checking the
/// overlap-add path in tests.
#[cfg(test)]
fn filter_1d_direct(x: &[f32], h: &[f32]) -> Vec<f32> {
    let shift = (h.len() - 1) / 2;
    let n_edge = h.len() - 1;
    let x_ext = reflect_limited_pad(x, n_edge, n_edge);
    let mut out = vec![0.0_f32; x.len()];
    for (o, out_v) in out.iter_mut().enumerate() {
        let center = o + n_edge + shift;
        let mut acc = 0.0_f64;
        for (k, &hv) in h.iter().enumerate() {
            let idx = center as isize - k as isize;
            if idx >= 0 && (idx as usize) < x_ext.len() {
                acc += hv as f64 * x_ext[idx as usize] as f64;
            }
        }
        *out_v = acc as f32;
    }
    out
}
