//! Price inputs for valuing livestock due in kind.
//!
//! Metal prices for the nisab live on [`crate::config::NisabSettings`]; this
//! module only holds the per-class animal prices used by
//! [`crate::maal::livestock::cash_equivalent`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;
use crate::maal::livestock::DueItem;

/// Partial mapping from a canonical price key (see [`DueItem::price_key`]) to
/// the price of one animal of that class.
///
/// Prices never change which animals are due; they only feed the cash
/// equivalent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct DueItemPrices(BTreeMap<String, Decimal>);

impl DueItemPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the price for `key`. Values that cannot be read as a number are
    /// left out, which makes the key count as missing.
    pub fn with_price(mut self, key: impl Into<String>, price: impl IntoZakatDecimal) -> Self {
        let key = key.into();
        match price.into_zakat_decimal() {
            Ok(p) => {
                self.0.insert(key, p);
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "unreadable livestock price ignored");
                self.0.remove(&key);
            }
        }
        self
    }

    /// Convenience for `with_price(item.price_key(), price)`.
    pub fn with_item_price(self, item: &DueItem, price: impl IntoZakatDecimal) -> Self {
        self.with_price(item.price_key(), price)
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.0.get(key).copied()
    }

    /// Price usable for valuation: present and strictly positive.
    pub fn usable_price(&self, key: &str) -> Option<Decimal> {
        self.get(key).filter(|p| *p > Decimal::ZERO)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, Decimal)> for DueItemPrices {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
