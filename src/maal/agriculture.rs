//! # Fiqh Compliance: Agricultural Produce
//!
//! ## Harvest (Ushr)
//! - Nisab is 5 Wasq, taken as 653 kg, checked on the quantity harvested.
//! - 10% when watered by rain or rivers, 5% when irrigation is paid for.
//! - Due in kind, so the harvest result is in kilograms.
//!
//! ## Produce held for trade
//! - Treated as trade goods: 2.5% of market value against the monetary nisab.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::NisabSettings;
use crate::inputs::{IntoZakatDecimal, sanitize_amount};
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, CalculationTrace, ZakatCalculationResult, ZakatCategory, ZakatUnit};

/// 5 Wasq.
pub const PRODUCE_NISAB_KG: Decimal = dec!(653);

pub const TRADE_RATE: Decimal = dec!(0.025);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WateringMethod {
    /// Rain, rivers or springs.
    #[default]
    Natural,
    PaidIrrigation,
}

impl WateringMethod {
    pub fn rate(&self) -> Decimal {
        match self {
            WateringMethod::Natural => dec!(0.10),
            WateringMethod::PaidIrrigation => dec!(0.05),
        }
    }
}

crate::zakat_asset! {
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ProduceAssets {
        pub is_for_trade: bool,
        pub quantity_kg: Option<Decimal>,
        pub market_value: Option<Decimal>,
        pub watering: Option<WateringMethod>,
    }
}

impl ProduceAssets {
    pub fn for_trade(mut self, is_for_trade: bool) -> Self {
        self.is_for_trade = is_for_trade;
        self
    }

    pub fn quantity_kg(mut self, kg: impl IntoZakatDecimal) -> Self {
        self.quantity_kg = Some(sanitize_amount(kg));
        self
    }

    pub fn market_value(mut self, value: impl IntoZakatDecimal) -> Self {
        self.market_value = Some(sanitize_amount(value));
        self
    }

    pub fn watering(mut self, method: WateringMethod) -> Self {
        self.watering = Some(method);
        self
    }
}

/// Assesses produce either as trade goods or as a harvest, see the module docs.
pub fn calculate_produce_zakat(
    input: &ProduceAssets,
    settings: &NisabSettings,
) -> ZakatCalculationResult {
    let mut trace = CalculationTrace::new();

    if input.is_for_trade {
        let nisab = settings.resolve_nisab();
        let value = input.market_value.unwrap_or_default().max(Decimal::ZERO);
        trace.push(CalculationStep::initial("Market Value (trade)", value));
        trace.push(CalculationStep::info(format!("Nisab: {}", nisab.description())));
        tracing::debug!(%value, nisab = %nisab.value, "produce assessed as trade goods");
        return ZakatCalculationResult::assess(
            ZakatCategory::Produce,
            ZakatUnit::Currency,
            nisab.value,
            value,
            TRADE_RATE,
            trace,
        );
    }

    let watering = input.watering.unwrap_or_default();
    let quantity = input.quantity_kg.unwrap_or_default().max(Decimal::ZERO);
    trace.push(CalculationStep::initial("Harvest Quantity (kg)", quantity));
    trace.push(CalculationStep::info(format!("Watering: {}", watering)));
    tracing::debug!(%quantity, %watering, "produce assessed as harvest");

    ZakatCalculationResult::assess(
        ZakatCategory::Produce,
        ZakatUnit::Kilograms,
        PRODUCE_NISAB_KG,
        quantity,
        watering.rate(),
        trace,
    )
}

impl CalculateZakat for ProduceAssets {
    fn calculate_zakat(&self, settings: &NisabSettings) -> ZakatCalculationResult {
        calculate_produce_zakat(self, settings)
    }

    fn category(&self) -> ZakatCategory {
        ZakatCategory::Produce
    }

    fn get_label(&self) -> Option<String> {
        self.label_ref()
    }

    fn get_id(&self) -> uuid::Uuid {
        self.id_ref()
    }
}
