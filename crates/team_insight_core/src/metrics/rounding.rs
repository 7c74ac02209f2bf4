//! Display rounding policy.
//!
//! Calculators and aggregators keep full `f64` precision. Values are
//! rounded only when a display projection is built, always through
//! [`round_display`].

/// Rounds to the nearest integer, halves away from zero.
///
/// Non-finite input maps to `0`; out-of-range input saturates.
pub fn round_display(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates at the i64 bounds.
    value.round() as i64
}

/// [`round_display`] for values that are non-negative by construction.
pub fn round_display_unsigned(value: f64) -> u32 {
    let rounded = round_display(value).max(0);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
