//! Assorted helpers used by the aligners.

/// Resolve a "percentage or count" parameter against a base quantity.
///
/// Factors in `[0.0, 1.0]` (both ends inclusive) are a fraction of `base`;
/// anything larger is taken as an absolute count and truncated. Callers
/// reject negative and non-finite factors before getting here.
#[inline]
pub fn nominal_prop(base: usize, factor: f64) -> usize {
    if (0.0..=1.0).contains(&factor) {
        (base as f64 * factor) as usize
    } else {
        factor as usize
    }
}

/// Copy a slice in reverse order.
#[inline]
pub fn reversed(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().copied().collect()
}
