//! # Fiqh Compliance: Net-Value Assets
//!
//! Agriculture not covered by Ushr, trade and industry are assessed on their
//! net value: market value less operating costs, at 2.5% once the monetary
//! nisab is reached. The sector only decides the breakdown label.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::config::NisabSettings;
use crate::inputs::{IntoZakatDecimal, sanitize_amount};
use crate::math::ZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, CalculationTrace, ZakatCalculationResult, ZakatCategory, ZakatUnit};

pub const NET_VALUE_RATE: Decimal = dec!(0.025);

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
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum NetValueSector {
    OtherAgriculture,
    #[default]
    Trade,
    Industrial,
}

impl From<NetValueSector> for ZakatCategory {
    fn from(sector: NetValueSector) -> Self {
        match sector {
            NetValueSector::OtherAgriculture => ZakatCategory::OtherAgriculture,
            NetValueSector::Trade => ZakatCategory::Trade,
            NetValueSector::Industrial => ZakatCategory::Industrial,
        }
    }
}

crate::zakat_asset! {
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct NetValueAssets {
        pub sector: NetValueSector,
        pub market_value: Decimal,
        pub operating_costs: Decimal,
    }
}

impl NetValueAssets {
    pub fn sector(mut self, sector: NetValueSector) -> Self {
        self.sector = sector;
        self
    }

    pub fn market_value(mut self, value: impl IntoZakatDecimal) -> Self {
        self.market_value = sanitize_amount(value);
        self
    }

    pub fn operating_costs(mut self, costs: impl IntoZakatDecimal) -> Self {
        self.operating_costs = sanitize_amount(costs);
        self
    }
}

pub fn calculate_net_value_zakat(
    input: &NetValueAssets,
    settings: &NisabSettings,
) -> ZakatCalculationResult {
    let nisab = settings.resolve_nisab();
    let market = input.market_value.max(Decimal::ZERO);
    let costs = input.operating_costs.max(Decimal::ZERO);

    let mut trace = CalculationTrace::new();
    trace.push(CalculationStep::initial("Market Value", market));
    trace.push(CalculationStep::subtract("Operating Costs", costs));
    let net = ZakatDecimal::new(market).safe_sub(costs).value().max(Decimal::ZERO);
    trace.push(CalculationStep::result("Net Value", net));
    trace.push(CalculationStep::info(format!("Nisab: {}", nisab.description())));

    tracing::debug!(sector = %input.sector, %net, nisab = %nisab.value, "net value assessed");

    ZakatCalculationResult::assess(
        input.sector.into(),
        ZakatUnit::Currency,
        nisab.value,
        net,
        NET_VALUE_RATE,
        trace,
    )
}

impl CalculateZakat for NetValueAssets {
    fn calculate_zakat(&self, settings: &NisabSettings) -> ZakatCalculationResult {
        calculate_net_value_zakat(self, settings)
    }

    fn category(&self) -> ZakatCategory {
        self.sector.into()
    }

    fn get_label(&self) -> Option<String> {
        self.label_ref()
    }

    fn get_id(&self) -> uuid::Uuid {
        self.id_ref()
    }
}
