//! Numeric helpers shared by the scoring engine and the validator.
//!
//! Every helper here is total: non-finite input degrades to a defined value
//! instead of propagating NaN through a sum.

/// Returns `value` if it is finite, otherwise `fallback`.
#[inline]
#[must_use]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// `count / total` as a ratio. Zero when `total` is zero.
#[inline]
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Population standard deviation of `values` about an arbitrary `center`.
///
/// The center is not required to be the sample mean. Returns zero for an
/// empty input.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn std_dev_about<I>(values: I, center: f64) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (count, sum_sq) = values
        .into_iter()
        .fold((0usize, 0.0f64), |(n, acc), v| (n + 1, acc + (v - center).powi(2)));
    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f64).sqrt()
}
