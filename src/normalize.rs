//! Per-signal z-score normalization.
//!
//! `zscore_inplace` — `x = (x − μ) / (σ + 1e-7)`
//!
//! The additive constant keeps constant (σ = 0) signals finite instead of
//! dividing by zero. Statistics are accumulated in f64 and applied as f32.

/// Guard added to the denominator so constant signals normalize to ≈ 0.
const STD_EPS: f64 = 1e-7;

/// Z-score a single signal in place.
/// Returns the (mean, std) that were removed.
pub fn zscore_inplace(x: &mut [f32]) -> (f32, f32) {
    if x.is_empty() {
        return (0.0, 0.0);
    }
    let n = x.len() as f64;
    let mean = x.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = x.iter().map(|&v| {
        let d = v as f64 - mean; d * d
    }).sum::<f64>() / n;
    let std = var.sqrt();

    let inv = 1.0 / (std + STD_EPS);
    for v in x.iter_mut() {
        *v = ((*v as f64 - mean) * inv) as f32;
    }
    (mean as f32, std as f32)
}
