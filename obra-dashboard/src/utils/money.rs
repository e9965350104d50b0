//! Money calculation utilities using rust_decimal for precision
//!
//! Roll-ups (costo, valor, ganancia, horas) are summed as `Decimal` and
//! converted back to `f64` without rounding, so a total always equals the sum
//! of its parts. Rounding to 2 dp is only applied to display ratios and to
//! generated amounts.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Inputs are finite after document decoding. If NaN/Infinity somehow
/// reaches here, logs an error and returns ZERO.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert Decimal back to f64 at full precision
#[inline]
pub fn to_f64_exact(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Σ values, exact
pub fn sum_exact<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64_exact(values.into_iter().map(to_decimal).sum())
}

/// a − b, exact
pub fn sub_exact(a: f64, b: f64) -> f64 {
    to_f64_exact(to_decimal(a) - to_decimal(b))
}

/// Σ values, rounded to 2 dp
pub fn sum_money<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(values.into_iter().map(to_decimal).sum())
}

/// part / whole × 100, 0 when whole is 0
pub fn percentage(part: f64, whole: f64) -> f64 {
    let whole = to_decimal(whole);
    if whole.is_zero() {
        return 0.0;
    }
    to_f64(to_decimal(part) * Decimal::ONE_HUNDRED / whole)
}

/// round(part / whole × 100) as a whole number, 0 when whole is 0
pub fn whole_percentage(part: Decimal, whole: Decimal) -> u32 {
    if whole.is_zero() {
        return 0;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);
        assert_eq!(sum_money([0.1, 0.2]), 0.3);
    }

    #[test]
    fn test_accumulation_precision() {
        assert_eq!(sum_money(std::iter::repeat_n(0.01, 1000)), 10.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(12345, 3)), 12.35);
        assert_eq!(to_f64(Decimal::new(-12345, 3)), -12.35);
    }

    #[test]
    fn test_sub_and_percentage() {
        assert_eq!(sub_exact(14500.0, 9870.0), 4630.0);
        assert_eq!(percentage(4630.0, 14500.0), 31.93);
        assert_eq!(percentage(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_exact_sums_keep_sub_cent_values() {
        assert_eq!(sum_exact([0.004, 0.004]), 0.008);
        assert_eq!(sum_exact([0.125, 0.25]), 0.375);
        assert_eq!(sub_exact(10.005, 0.0), 10.005);
        assert_eq!(sum_exact([0.1, 0.2]), 0.3);
    }

    #[test]
    fn test_whole_percentage_rounds_once() {
        // 249.9 / 2000 = 12.495%
        let total = Decimal::new(20000, 1);
        assert_eq!(whole_percentage(Decimal::new(2499, 1), total), 12);
        assert_eq!(whole_percentage(Decimal::new(17501, 1), total), 88);
        assert_eq!(whole_percentage(Decimal::new(250, 0), total), 13);
        assert_eq!(whole_percentage(Decimal::ONE, Decimal::ZERO), 0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
