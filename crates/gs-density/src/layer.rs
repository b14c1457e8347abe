//! Layer normalization and combination.

/// Min-max scale `values` into [0, 1] in place.
///
/// A constant surface (max == min, including all-zero and single-element
/// input) becomes all zeros — the defined degenerate result, never NaN.
pub fn min_max_normalize(values: &mut [f64]) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values.iter() {
        min = min.min(v);
        max = max.max(v);
    }

    let range = max - min;
    if values.is_empty() || range <= 0.0 || !range.is_finite() {
        values.fill(0.0);
        return;
    }

    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}

/// Weighted sum of normalized layers: `total[i] = Σ weight · layer[i]`.
///
/// A missing layer (`None`) contributes zero.  Weights are used exactly as
/// given — no renormalization, even when they do not sum to 1.
///
/// # Panics
/// Panics in debug mode if a present layer's length differs from `len`.
pub fn combine(len: usize, layers: &[(f64, Option<&[f64]>)]) -> Vec<f64> {
    let mut total = vec![0.0; len];
    for (weight, layer) in layers {
        let Some(values) = layer else { continue };
        debug_assert_eq!(values.len(), len, "layers must be index-aligned");
        for (t, v) in total.iter_mut().zip(values.iter()) {
            *t += weight * v;
        }
    }
    total
}
