//! Rational-ratio resampling to the target sampling rate.
//!
//! Algorithm:
//!   1. Reduce `fs_dst / fs_src` to an integer ratio `up / down` via GCD.
//!   2. Zero-stuff the signal by `up` (insert `up−1` zeros between samples).
//!   3. Anti-alias with a Hamming-windowed sinc lowpass cut at
//!      `min(fs_src, fs_dst) / 2`, applied zero-phase (see [`crate::filter`]),
//!      and compensate the interpolation gain.
//!   4. Keep every `down`-th sample.
//!
//! Output length is `ceil(n · up / down)`. The whole path is stateless and
//! deterministic; equal source and target rates skip it entirely.
use crate::filter::{filter_1d, firwin};

/// Compute `(up, down)` from dst/src via GCD reduction.
pub fn rational_approx(dst: f32, src: f32) -> (usize, usize) {
    let scale = 1000usize;
    let up0 = (dst * scale as f32).round() as usize;
    let down0 = (src * scale as f32).round() as usize;
    let g = gcd(up0, down0);
    (up0 / g, down0 / g)
}

/// Exact output length: `ceil(n · up / down)`.
pub fn final_length(n: usize, up: usize, down: usize) -> usize {
    (n * up).div_ceil(down)
}

/// Resample `x` from `fs_src` to `fs_dst`.
///
/// When the rates already match (within 1 mHz) the input is returned
/// unchanged, without copying.
pub fn resample(x: Vec<f32>, fs_src: f32, fs_dst: f32) -> Vec<f32> {
    if (fs_src - fs_dst).abs() < 1e-3 {
        return x;
    }
    if x.is_empty() {
        return x;
    }
    let (up, down) = rational_approx(fs_dst, fs_src);
    let out_len = final_length(x.len(), up, down);

    // Anti-aliasing lowpass at the upsampled rate. 20·max(up,down)+1 taps
    // puts the cutoff transition well inside the narrower Nyquist band.
    let n_taps = 20 * up.max(down) + 1;
    let fs_up = fs_src * up as f32;
    let cutoff = fs_src.min(fs_dst) / 2.0;
    let h = firwin(n_taps, cutoff, fs_up);

    let mut stuffed = vec![0.0_f32; x.len() * up];
    for (i, &v) in x.iter().enumerate() {
        stuffed[i * up] = v;
    }

    let filtered = filter_1d(&stuffed, &h);

    // Zero-stuffing spreads each sample's energy over `up` slots; the
    // lowpass averages it back, so multiply by `up` to restore amplitude.
    let gain = up as f32;
    let mut out = Vec::with_capacity(out_len);
    let mut idx = 0;
    while idx < filtered.len() {
        out.push(filtered[idx] * gain);
        idx += down;
    }
    debug_assert_eq!(out.len(), out_len);
    out
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f32> {
        (0..n).map(|i| i as f32 / n as f32).collect()
    }

    #[test]
    fn resample_noop_is_identity() {
        let x = ramp(512);
        let y = resample(x.clone(), 300.0, 300.0);
        assert_eq!(x, y);
    }

    #[test]
    fn resample_half_rate_length() {
        let y = resample(vec![0.0; 1024], 600.0, 300.0);
        assert_eq!(y.len(), 512);
    }

    #[test]
    fn resample_preserves_dc() {
        let y = resample(vec![3.14_f32; 2048], 128.0, 300.0);
        // Skip the filter transient at both ends.
        let edge = y.len() / 10;
        for &v in &y[edge..y.len() - edge] {
            approx::assert_abs_diff_eq!(v, 3.14, epsilon = 1e-2_f32);
        }
    }

    #[test]
    fn resample_preserves_low_frequency_tone() {
        // 2 Hz tone at 360 Hz, resampled to 300 Hz, should still be a 2 Hz tone.
        let fs_src = 360.0_f32;
        let n = 3600;
        let x: Vec<f32> = (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * 2.0 * i as f32 / fs_src).sin())
            .collect();
        let y = resample(x, fs_src, 300.0);
        let edge = y.len() / 10;
        for (i, &v) in y.iter().enumerate().skip(edge).take(y.len() - 2 * edge) {
            let expect = (2.0 * std::f32::consts::PI * 2.0 * i as f32 / 300.0).sin();
            approx::assert_abs_diff_eq!(v, expect, epsilon = 5e-2_f32);
        }
    }

    #[test]
    fn round_trip_length_within_one() {
        for (src, dst, n) in [
            (300.0_f32, 128.0_f32, 9000_usize),
            (128.0, 300.0, 6553),
            (360.0, 300.0, 6500),
            (250.0, 300.0, 7500),
        ] {
            let there = resample(vec![0.0; n], src, dst);
            let back = resample(there, dst, src);
            let diff = back.len().abs_diff(n);
            assert!(diff <= 1, "{src}→{dst}→{src}: {n} became {}", back.len());
        }
    }

    #[test]
    fn rational_approx_reduces() {
        assert_eq!(rational_approx(300.0, 360.0), (5, 6));
        assert_eq!(rational_approx(300.0, 128.0), (75, 32));
        assert_eq!(rational_approx(300.0, 150.0), (2, 1));
    }

    #[test]
    fn final_length_rule() {
        assert_eq!(final_length(1000, 75, 32), 2344); // ceil(75000/32)
        assert_eq!(final_length(1024, 1, 2), 512);
        assert_eq!(final_length(5, 2, 3), 4); // ceil(10/3)
    }
}
