//! Overflow-safe decimal arithmetic.
//!
//! Calculators never fail on numeric input, so results that leave the range of
//! `Decimal` saturate at `Decimal::MAX` / `Decimal::MIN` and log a warning.

use rust_decimal::Decimal;

/// A `Decimal` whose arithmetic saturates instead of panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZakatDecimal(Decimal);

impl ZakatDecimal {
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn safe_add(self, rhs: Decimal) -> Self {
        Self(self.0.checked_add(rhs).unwrap_or_else(|| {
            saturate("add", self.0, rhs, rhs.is_sign_negative())
        }))
    }

    pub fn safe_sub(self, rhs: Decimal) -> Self {
        Self(self.0.checked_sub(rhs).unwrap_or_else(|| {
            saturate("sub", self.0, rhs, !rhs.is_sign_negative())
        }))
    }

    pub fn safe_mul(self, rhs: Decimal) -> Self {
        Self(self.0.checked_mul(rhs).unwrap_or_else(|| {
            saturate("mul", self.0, rhs, self.0.is_sign_negative() != rhs.is_sign_negative())
        }))
    }

    pub fn value(self) -> Decimal {
        self.0
    }
}

fn saturate(operation: &'static str, lhs: Decimal, rhs: Decimal, negative: bool) -> Decimal {
    tracing::warn!(operation, %lhs, %rhs, "decimal overflow, saturating");
    if negative { Decimal::MIN } else { Decimal::MAX }
}

impl std::ops::Deref for ZakatDecimal {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ZakatDecimal> for Decimal {
    fn from(value: ZakatDecimal) -> Self {
        value.0
    }
}

/// Saturating sum of an iterator of amounts.
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values
        .into_iter()
        .fold(ZakatDecimal::new(Decimal::ZERO), ZakatDecimal::safe_add)
        .value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_in_range_arithmetic_is_exact() {
        let v = ZakatDecimal::new(dec!(100)).safe_mul(dec!(0.025)).safe_add(dec!(1.5)).safe_sub(dec!(0.5));
        assert_eq!(v.value(), dec!(3.5));
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(ZakatDecimal::new(Decimal::MAX).safe_mul(dec!(12)).value(), Decimal::MAX);
        assert_eq!(ZakatDecimal::new(Decimal::MAX).safe_mul(dec!(-2)).value(), Decimal::MIN);
        assert_eq!(ZakatDecimal::new(Decimal::MAX).safe_add(Decimal::MAX).value(), Decimal::MAX);
        assert_eq!(ZakatDecimal::new(Decimal::MIN).safe_sub(Decimal::MAX).value(), Decimal::MIN);
    }

    #[test]
    fn test_saturating_sum() {
        assert_eq!(saturating_sum([dec!(1), dec!(2)]), dec!(3));
        assert_eq!(saturating_sum(vec![Decimal::MAX; 40]), Decimal::MAX);
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }
}
