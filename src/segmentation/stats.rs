//! Small statistical helpers shared by the change-score and peak-picking
//! passes. All variances here are population (biased) variances.

pub fn mean(data: &[f32]) -> f32 {
    let sum: f32 = data.iter().sum();
    sum / data.len() as f32
}

pub fn variance(data: &[f32], mean: f32) -> f32 {
    let sum_sq: f32 = data.iter().map(|v| (v - mean) * (v - mean)).sum();
    sum_sq / data.len() as f32
}

pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// In-place global min-max normalization to [0, 1]. A zero range maps the
/// whole series to zero so downstream consumers never see out-of-range or
/// non-finite values.
pub fn min_max_normalize(data: &mut [f32]) {
    let min = data.iter().copied().fold(f32::INFINITY, f32::min);
    let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;
    if range != 0.0 {
        for v in data.iter_mut() {
            *v = (*v - min) / range;
        }
    } else {
        data.fill(0.0);
    }
}
