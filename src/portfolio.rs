//! # Portfolio Aggregation
//!
//! Each line item is assessed on its own against its own threshold, and the
//! totals are a plain sum of the per-item zakat. Categories are never joined to
//! reach a nisab together.
//!
//! Results may be in different units (currency, kilograms of produce, heads of
//! livestock). [`combined_total`] adds them regardless;
//! [`combined_total_checked`] refuses to. Both stay within the range of
//! `Decimal`: the former saturates, the latter reports the overflow.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::NisabSettings;
use crate::math::{ZakatDecimal, saturating_sum};
use crate::traits::CalculateZakat;
use crate::types::{ZakatCalculationResult, ZakatCategory, ZakatError, ZakatUnit};

/// One assessed entry of a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: uuid::Uuid,
    pub label: Option<String>,
    pub category: ZakatCategory,
    pub result: ZakatCalculationResult,
}

impl LineItem {
    /// Assesses a calculator into a line item.
    pub fn assess(item: &dyn CalculateZakat, settings: &NisabSettings) -> Self {
        Self {
            id: item.get_id(),
            label: item.get_label(),
            category: item.category(),
            result: item.calculate_zakat(settings),
        }
    }

    pub fn unit(&self) -> ZakatUnit {
        self.result.unit
    }
}

/// Sum of `total_zakat` over all line items, whatever their units.
/// Saturates at `Decimal::MAX`.
pub fn combined_total(line_items: &[LineItem]) -> Decimal {
    saturating_sum(line_items.iter().map(|item| item.result.total_zakat))
}

fn check_units(line_items: &[LineItem]) -> Result<(), ZakatError> {
    if let Some(first) = line_items.first() {
        let expected = first.unit();
        if let Some(other) = line_items.iter().find(|item| item.unit() != expected) {
            return Err(ZakatError::UnitMismatch {
                expected,
                found: other.unit(),
            });
        }
    }
    Ok(())
}

/// Like [`combined_total`], but fails when the items are not all in the same
/// unit or when the sum leaves the range of `Decimal`. An empty list sums to
/// zero.
pub fn combined_total_checked(line_items: &[LineItem]) -> Result<Decimal, ZakatError> {
    check_units(line_items)?;
    line_items.iter().try_fold(Decimal::ZERO, |acc, item| {
        acc.checked_add(item.result.total_zakat)
            .ok_or_else(|| ZakatError::overflow("combined_total"))
    })
}

/// Result of a portfolio calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResult {
    pub line_items: Vec<LineItem>,
    /// Unchecked sum; see `unit_consistent`.
    pub total_zakat: Decimal,
    /// Whether every line item is in the same unit, making `total_zakat` meaningful.
    pub unit_consistent: bool,
}

impl PortfolioResult {
    /// Items on which zakat is due.
    pub fn payable(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|item| item.result.has_zakat_due)
    }

    /// Checked total, see [`combined_total_checked`].
    pub fn checked_total(&self) -> Result<Decimal, ZakatError> {
        combined_total_checked(&self.line_items)
    }

    /// Sum of zakat per unit, for portfolios mixing units.
    pub fn totals_by_unit(&self) -> Vec<(ZakatUnit, Decimal)> {
        let mut totals: Vec<(ZakatUnit, Decimal)> = Vec::new();
        for item in &self.line_items {
            match totals.iter_mut().find(|(unit, _)| *unit == item.unit()) {
                Some((_, total)) => *total = ZakatDecimal::new(*total).safe_add(item.result.total_zakat).value(),
                None => totals.push((item.unit(), item.result.total_zakat)),
            }
        }
        totals
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.id == id)
    }
}

/// Staged calculator inputs, reassessed from scratch on every
/// [`ZakatPortfolio::calculate_total`].
#[derive(Default)]
pub struct ZakatPortfolio {
    items: Vec<Box<dyn CalculateZakat + Send + Sync>>,
}

impl ZakatPortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<T: CalculateZakat + Send + Sync + 'static>(mut self, item: T) -> Self {
        self.items.push(Box::new(item));
        self
    }

    pub fn push<T: CalculateZakat + Send + Sync + 'static>(&mut self, item: T) -> uuid::Uuid {
        let id = item.get_id();
        self.items.push(Box::new(item));
        id
    }

    /// Removes the item with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: uuid::Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.get_id() != id);
        before != self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn calculate_total(&self, settings: &NisabSettings) -> PortfolioResult {
        let line_items: Vec<LineItem> = self
            .items
            .iter()
            .map(|item| LineItem::assess(item.as_ref(), settings))
            .collect();

        let total_zakat = combined_total(&line_items);
        let unit_consistent = check_units(&line_items).is_ok();
        if !unit_consistent {
            tracing::warn!(items = line_items.len(), "portfolio mixes units; total_zakat is not a single amount");
        }
        tracing::debug!(items = line_items.len(), %total_zakat, unit_consistent, "portfolio assessed");

        PortfolioResult {
            line_items,
            total_zakat,
            unit_consistent,
        }
    }
}
