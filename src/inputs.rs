//! Conversions and sanitization for raw numeric inputs.
//!
//! The engine never rejects a malformed amount. Values that cannot be read, are
//! non-finite or are negative are replaced by zero, or treated as absent where
//! a documented default exists. The strict variants return [`ZakatError`] for
//! callers that want to flag the offending field instead.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::str::FromStr;

use crate::types::ZakatError;

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This trait allows users to pass `i32`, `f64`, `&str`, etc. directly into
/// setters without needing to wrap them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Decimal::from_f64(self as f64).ok_or_else(|| {
                        ZakatError::invalid_input("amount", self.to_string(), "not a finite number")
                    })
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        let cleaned: String = self.trim().chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .map_err(|e| ZakatError::invalid_input("amount", self, e.to_string()))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

/// Reads an amount, mapping unreadable or negative values to zero.
pub fn sanitize_amount(value: impl IntoZakatDecimal) -> Decimal {
    match value.into_zakat_decimal() {
        Ok(v) if v >= Decimal::ZERO => v,
        Ok(v) => {
            tracing::warn!(value = %v, "negative amount sanitized to zero");
            Decimal::ZERO
        }
        Err(e) => {
            tracing::warn!(error = %e, "unreadable amount sanitized to zero");
            Decimal::ZERO
        }
    }
}

/// Like [`sanitize_amount`], but keeps absence distinct from zero.
pub fn optional_amount<T: IntoZakatDecimal>(value: Option<T>) -> Option<Decimal> {
    value.map(sanitize_amount)
}

/// Reads a price. Unreadable or negative prices count as absent so that the
/// caller's default applies.
pub fn sanitize_price(value: impl IntoZakatDecimal) -> Option<Decimal> {
    value.into_zakat_decimal().ok().filter(|v| *v >= Decimal::ZERO)
}

/// Parses a form field, reporting malformed or negative values as errors.
///
/// Blank input is `Ok(None)`.
pub fn parse_amount_strict(field: &str, raw: &str) -> Result<Option<Decimal>, ZakatError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value = raw.into_zakat_decimal().map_err(|_| {
        ZakatError::invalid_input(field, raw, "not a number")
    })?;
    if value < Decimal::ZERO {
        return Err(ZakatError::invalid_input(field, raw, "must be non-negative"));
    }
    Ok(Some(value))
}

/// Conversion of raw animal counts into a whole, non-negative head count.
///
/// Negative and non-finite values become 0, fractions are floored and values
/// beyond `u32::MAX` saturate.
pub trait IntoHeadCount {
    fn into_head_count(self) -> u32;
}

macro_rules! impl_into_head_count_int {
    ($($t:ty),*) => {
        $(
            impl IntoHeadCount for $t {
                fn into_head_count(self) -> u32 {
                    if self <= 0 as $t {
                        0
                    } else {
                        u32::try_from(self).unwrap_or(u32::MAX)
                    }
                }
            }
        )*
    };
}

impl_into_head_count_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoHeadCount for f64 {
    fn into_head_count(self) -> u32 {
        if !self.is_finite() || self <= 0.0 {
            0
        } else {
            // Float-to-int `as` casts saturate.
            self.floor() as u32
        }
    }
}

impl IntoHeadCount for f32 {
    fn into_head_count(self) -> u32 {
        (self as f64).into_head_count()
    }
}

impl IntoHeadCount for &str {
    fn into_head_count(self) -> u32 {
        self.trim().parse::<f64>().map(IntoHeadCount::into_head_count).unwrap_or(0)
    }
}

impl IntoHeadCount for String {
    fn into_head_count(self) -> u32 {
        self.as_str().into_head_count()
    }
}
