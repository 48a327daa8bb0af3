//! Fuzzy floating-point comparisons used throughout the kinematic calculations.

/// Tolerance below which two values are considered equal.
const EPSILON: f64 = 1e-5;

/// Returns true if `a` and `b` are equal within [EPSILON].
pub(crate) fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns true if `a` is greater than or fuzzily equal to `b`.
pub(crate) fn fuzzy_geq(a: f64, b: f64) -> bool {
    a - b > -EPSILON
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fuzzy_comparisons() {
        assert!(fuzzy_eq(1.0, 1.0 + 1e-7));
        assert!(!fuzzy_eq(1.0, 1.001));
        assert!(fuzzy_geq(1.0, 1.0));
        assert!(fuzzy_geq(1.0 - 1e-7, 1.0));
        assert!(fuzzy_geq(2.0, 1.0));
        assert!(!fuzzy_geq(1.0, 2.0));
    }
}
