//! Float helpers suitable on `no_std`.

/// Equivalent to `f64::floor`.
#[inline]
pub(crate) fn floor(x: f64) -> f64 {
    libm::floor(x)
}

/// Equivalent to `f64::ceil`.
#[inline]
pub(crate) fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Equivalent to `f64::sin_cos`.
#[inline]
pub(crate) fn sin_cos(x: f64) -> (f64, f64) {
    (libm::sin(x), libm::cos(x))
}
