//! # Nisab Resolution
//!
//! ## Thresholds
//! - **Gold**: 20 Mithqal, taken as **85 g**.
//! - **Silver**: 200 Dirham, taken as **595 g**. This is the default method; it
//!   yields the lower threshold at common prices and so favours the recipients.
//!
//! An explicit override always wins over the metal-based figure.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::math::ZakatDecimal;

pub const GOLD_NISAB_GRAMS: Decimal = dec!(85);
pub const SILVER_NISAB_GRAMS: Decimal = dec!(595);

/// Price used when no valid gold price is supplied.
pub const DEFAULT_GOLD_PRICE_PER_GRAM: Decimal = dec!(800);
/// Price used when no valid silver price is supplied.
pub const DEFAULT_SILVER_PRICE_PER_GRAM: Decimal = dec!(12);

/// Metal the monetary nisab is derived from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NisabMethod {
    Gold,
    #[default]
    Silver,
}

/// Where the resolved nisab came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NisabSource {
    Gold,
    Silver,
    Override,
}

/// A resolved monetary threshold plus how it was derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NisabBreakdown {
    pub value: Decimal,
    pub source: NisabSource,
    /// Metal weight the value was derived from; `None` for overrides.
    pub grams: Option<Decimal>,
    /// Price per gram actually used, after falling back to defaults.
    pub price_per_gram: Option<Decimal>,
}

impl NisabBreakdown {
    /// Human-readable derivation, e.g. `"595 g silver x 12 = 7140"`.
    pub fn description(&self) -> String {
        match (self.source, self.grams, self.price_per_gram) {
            (NisabSource::Override, _, _) => format!("override = {}", self.value),
            (source, Some(grams), Some(price)) => {
                let metal = if source == NisabSource::Gold { "gold" } else { "silver" };
                format!("{} g {} x {} = {}", grams, metal, price, self.value)
            }
            _ => self.value.to_string(),
        }
    }
}

impl std::fmt::Display for NisabBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.description())
    }
}

/// Keeps a price only when it is present and non-negative.
fn usable_price(price: Option<Decimal>, field: &'static str) -> Option<Decimal> {
    match price {
        Some(p) if p < Decimal::ZERO => {
            tracing::warn!(field, price = %p, "negative price ignored, using default");
            None
        }
        other => other,
    }
}

/// Resolves the monetary nisab.
///
/// A positive `nisab_override` is returned verbatim regardless of `method`.
/// Missing or negative prices fall back to [`DEFAULT_GOLD_PRICE_PER_GRAM`] and
/// [`DEFAULT_SILVER_PRICE_PER_GRAM`]. Never fails.
pub fn resolve_nisab(
    method: NisabMethod,
    silver_price_per_gram: Option<Decimal>,
    gold_price_per_gram: Option<Decimal>,
    nisab_override: Option<Decimal>,
) -> NisabBreakdown {
    if let Some(value) = nisab_override.filter(|v| *v > Decimal::ZERO) {
        tracing::debug!(%value, "nisab taken from override");
        return NisabBreakdown {
            value,
            source: NisabSource::Override,
            grams: None,
            price_per_gram: None,
        };
    }

    let (source, grams, price) = match method {
        NisabMethod::Gold => (
            NisabSource::Gold,
            GOLD_NISAB_GRAMS,
            usable_price(gold_price_per_gram, "gold_price_per_gram")
                .unwrap_or(DEFAULT_GOLD_PRICE_PER_GRAM),
        ),
        NisabMethod::Silver => (
            NisabSource::Silver,
            SILVER_NISAB_GRAMS,
            usable_price(silver_price_per_gram, "silver_price_per_gram")
                .unwrap_or(DEFAULT_SILVER_PRICE_PER_GRAM),
        ),
    };

    let breakdown = NisabBreakdown {
        value: ZakatDecimal::new(grams).safe_mul(price).value(),
        source,
        grams: Some(grams),
        price_per_gram: Some(price),
    };
    tracing::debug!(nisab = %breakdown, "nisab resolved");
    breakdown
}
