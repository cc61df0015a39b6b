//! Raw form input, as typed into a host application's text fields.
//!
//! Every form maps into a calculator two ways:
//! - `into_calculator` is lenient: blank fields are absent, unreadable or
//!   negative amounts become 0 and unknown choices fall back to their default.
//! - `try_into_calculator` reports the first bad field as
//!   [`ZakatError::InvalidInput`] instead. It also backs [`AssetBuilder::build`].

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builder::AssetBuilder;
use crate::inputs::{IntoHeadCount, parse_amount_strict, sanitize_amount};
use crate::maal::agriculture::{ProduceAssets, WateringMethod};
use crate::maal::business::{NetValueAssets, NetValueSector};
use crate::maal::income::{SalaryCalculationMode, SalaryZakatCalculator};
use crate::maal::livestock::{Camel121Choice, LivestockAssets, LivestockSpecies};
use crate::pricing::DueItemPrices;
use crate::types::ZakatError;

fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

fn lenient_amount(raw: &str) -> Option<Decimal> {
    (!is_blank(raw)).then(|| sanitize_amount(raw))
}

fn lenient_choice<T: FromStr + Default>(field: &str, raw: &str) -> Option<T> {
    if is_blank(raw) {
        return None;
    }
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(field, value = raw, "unknown choice, using default");
            Some(T::default())
        }
    }
}

fn strict_choice<T: FromStr>(field: &str, raw: &str) -> Result<Option<T>, ZakatError> {
    if is_blank(raw) {
        return Ok(None);
    }
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|_| ZakatError::invalid_input(field, raw, "unknown option"))
}

fn label_of(raw: &str) -> Option<String> {
    (!is_blank(raw)).then(|| raw.trim().to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SalaryForm {
    pub label: String,
    pub monthly_income: String,
    pub living_expense: String,
    pub mode: String,
}

impl SalaryForm {
    pub fn into_calculator(&self) -> SalaryZakatCalculator {
        SalaryZakatCalculator {
            monthly_income: lenient_amount(&self.monthly_income).unwrap_or_default(),
            living_expense: lenient_amount(&self.living_expense),
            mode: lenient_choice::<SalaryCalculationMode>("mode", &self.mode).unwrap_or_default(),
            label: label_of(&self.label),
            ..SalaryZakatCalculator::new()
        }
    }

    pub fn try_into_calculator(&self) -> Result<SalaryZakatCalculator, ZakatError> {
        Ok(SalaryZakatCalculator {
            monthly_income: parse_amount_strict("monthly_income", &self.monthly_income)?.unwrap_or_default(),
            living_expense: parse_amount_strict("living_expense", &self.living_expense)?,
            mode: strict_choice("mode", &self.mode)?.unwrap_or_default(),
            label: label_of(&self.label),
            ..SalaryZakatCalculator::new()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProduceForm {
    pub label: String,
    pub is_for_trade: bool,
    pub quantity_kg: String,
    pub market_value: String,
    pub watering_method: String,
}

impl ProduceForm {
    pub fn into_calculator(&self) -> ProduceAssets {
        ProduceAssets {
            is_for_trade: self.is_for_trade,
            quantity_kg: lenient_amount(&self.quantity_kg),
            market_value: lenient_amount(&self.market_value),
            watering: lenient_choice::<WateringMethod>("watering_method", &self.watering_method),
            label: label_of(&self.label),
            ..ProduceAssets::new()
        }
    }

    pub fn try_into_calculator(&self) -> Result<ProduceAssets, ZakatError> {
        Ok(ProduceAssets {
            is_for_trade: self.is_for_trade,
            quantity_kg: parse_amount_strict("quantity_kg", &self.quantity_kg)?,
            market_value: parse_amount_strict("market_value", &self.market_value)?,
            watering: strict_choice("watering_method", &self.watering_method)?,
            label: label_of(&self.label),
            ..ProduceAssets::new()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NetValueForm {
    pub label: String,
    pub sector: String,
    pub market_value: String,
    pub operating_costs: String,
}

impl NetValueForm {
    pub fn into_calculator(&self) -> NetValueAssets {
        NetValueAssets {
            sector: lenient_choice::<NetValueSector>("sector", &self.sector).unwrap_or_default(),
            market_value: lenient_amount(&self.market_value).unwrap_or_default(),
            operating_costs: lenient_amount(&self.operating_costs).unwrap_or_default(),
            label: label_of(&self.label),
            ..NetValueAssets::new()
        }
    }

    pub fn try_into_calculator(&self) -> Result<NetValueAssets, ZakatError> {
        Ok(NetValueAssets {
            sector: strict_choice("sector", &self.sector)?.unwrap_or_default(),
            market_value: parse_amount_strict("market_value", &self.market_value)?.unwrap_or_default(),
            operating_costs: parse_amount_strict("operating_costs", &self.operating_costs)?
                .unwrap_or_default(),
            label: label_of(&self.label),
            ..NetValueAssets::new()
        })
    }
}

/// Herd form. `prices` maps price keys such as `"camel_hiqqah"` to raw text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LivestockForm {
    pub label: String,
    pub species: String,
    pub count: String,
    pub camel121_choice: String,
    pub prices: BTreeMap<String, String>,
}

impl LivestockForm {
    pub fn into_calculator(&self) -> LivestockAssets {
        let species = if is_blank(&self.species) {
            None
        } else {
            let parsed = self.species.trim().parse::<LivestockSpecies>().ok();
            if parsed.is_none() {
                tracing::warn!(value = %self.species, "unknown livestock species ignored");
            }
            parsed
        };

        let prices = self
            .prices
            .iter()
            .filter(|(_, raw)| !is_blank(raw))
            .fold(DueItemPrices::new(), |prices, (key, raw)| {
                prices.with_price(key.as_str(), raw.as_str())
            });

        LivestockAssets {
            species,
            count: self.count.as_str().into_head_count(),
            camel121_choice: lenient_choice::<Camel121Choice>("camel121_choice", &self.camel121_choice),
            prices,
            label: label_of(&self.label),
            ..LivestockAssets::new()
        }
    }

    pub fn try_into_calculator(&self) -> Result<LivestockAssets, ZakatError> {
        let species = strict_choice::<LivestockSpecies>("species", &self.species)?;
        let count = match parse_amount_strict("count", &self.count)? {
            Some(count) if !count.fract().is_zero() => {
                return Err(ZakatError::invalid_input("count", &self.count, "must be a whole number"));
            }
            Some(count) => u32::try_from(count)
                .map_err(|_| ZakatError::invalid_input("count", &self.count, "too large"))?,
            None => 0,
        };

        let mut prices = DueItemPrices::new();
        for (key, raw) in &self.prices {
            if let Some(price) = parse_amount_strict(key, raw)? {
                prices = prices.with_price(key.as_str(), price);
            }
        }

        Ok(LivestockAssets {
            species,
            count,
            camel121_choice: strict_choice("camel121_choice", &self.camel121_choice)?,
            prices,
            label: label_of(&self.label),
            ..LivestockAssets::new()
        })
    }
}

macro_rules! strict_form_builder {
    ($($form:ty => $calc:ty),* $(,)?) => {
        $(
            impl AssetBuilder<$calc> for $form {
                fn build(self) -> Result<$calc, ZakatError> {
                    self.try_into_calculator()
                }
            }
        )*
    };
}

strict_form_builder! {
    SalaryForm => SalaryZakatCalculator,
    ProduceForm => ProduceAssets,
    NetValueForm => NetValueAssets,
    LivestockForm => LivestockAssets,
}
