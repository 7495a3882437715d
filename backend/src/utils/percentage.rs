//! Conversion between the fractional workload percentage edited in forms
//! (0.01-1.00) and the integer representation kept in storage (x100).
//!
//! This module is the single conversion boundary; nothing else multiplies
//! or divides by the factor.

const FACTOR: f64 = 100.0;

/// Smallest and largest valid stored values (0.01 and 1.00 as fractions).
pub const MIN_STORED: i32 = 1;
pub const MAX_STORED: i32 = 100;

/// Converts an edit-layer fraction to the stored integer.
pub fn percentage_to_storage(fraction: f64) -> i32 {
    (fraction * FACTOR).round() as i32
}

/// Converts a stored integer back to the edit-layer fraction.
pub fn percentage_from_storage(stored: i32) -> f64 {
    f64::from(stored) / FACTOR
}

/// A fraction is valid when it lies in [0.01, 1.00] and is a multiple of
/// 0.01 (up to floating-point noise).
pub fn is_valid_fraction(fraction: f64) -> bool {
    if !fraction.is_finite() {
        return false;
    }
    let scaled = fraction * FACTOR;
    let stored = scaled.round();
    (f64::from(MIN_STORED)..=f64::from(MAX_STORED)).contains(&stored)
        && (scaled - stored).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact_for_every_valid_fraction() {
        for stored in MIN_STORED..=MAX_STORED {
            let fraction = percentage_from_storage(stored);
            assert!(is_valid_fraction(fraction), "{} should be valid", fraction);
            assert_eq!(percentage_to_storage(fraction), stored);
            // from(to(p)) == p, bit-exact
            assert_eq!(
                percentage_from_storage(percentage_to_storage(fraction)),
                fraction
            );
        }
    }

    #[test]
    fn rejects_out_of_range_fractions() {
        assert!(!is_valid_fraction(0.0));
        assert!(!is_valid_fraction(0.001));
        assert!(!is_valid_fraction(1.01));
        assert!(!is_valid_fraction(-0.5));
    }

    #[test]
    fn rejects_non_multiples_of_the_step() {
        assert!(!is_valid_fraction(0.015));
        assert!(!is_valid_fraction(0.333));
    }

    #[test]
    fn rejects_nan_and_infinity() {
        assert!(!is_valid_fraction(f64::NAN));
        assert!(!is_valid_fraction(f64::INFINITY));
    }
}
