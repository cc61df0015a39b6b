//! # Fiqh Compliance: Professional Income (Zakat al-Mustafad)
//!
//! ## Concept
//! - **Source**: Based on *Mal Mustafad* (wealth acquired during the year).
//! - Basic living needs (*Hajah Asliyyah*) are deducted before the surplus is
//!   compared with the monetary nisab.
//!
//! ## Modes
//! - **Annual**: twelve months of income and expenses against the nisab.
//! - **Monthly**: a single month's surplus against the same, unscaled nisab.
//!   This is stricter than the annual reading and is kept as such.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::NisabSettings;
use crate::inputs::{IntoZakatDecimal, sanitize_amount};
use crate::math::ZakatDecimal;
use crate::traits::CalculateZakat;
use crate::types::{CalculationStep, CalculationTrace, ZakatCalculationResult, ZakatCategory, ZakatUnit};

/// Living expense assumed per month when none is given.
pub const DEFAULT_MONTHLY_LIVING_EXPENSE: Decimal = dec!(3266);

pub const SALARY_RATE: Decimal = dec!(0.025);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SalaryCalculationMode {
    #[default]
    Annual,
    Monthly,
}

crate::zakat_asset! {
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct SalaryZakatCalculator {
        pub monthly_income: Decimal,
        /// `None` means [`DEFAULT_MONTHLY_LIVING_EXPENSE`].
        pub living_expense: Option<Decimal>,
        pub mode: SalaryCalculationMode,
    }
}

impl SalaryZakatCalculator {
    pub fn income(mut self, monthly_income: impl IntoZakatDecimal) -> Self {
        self.monthly_income = sanitize_amount(monthly_income);
        self
    }

    pub fn living_expense(mut self, expense: impl IntoZakatDecimal) -> Self {
        self.living_expense = Some(sanitize_amount(expense));
        self
    }

    pub fn mode(mut self, mode: SalaryCalculationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Monthly expense after applying the default. Negative values count as 0.
    pub fn effective_living_expense(&self) -> Decimal {
        self.living_expense
            .unwrap_or(DEFAULT_MONTHLY_LIVING_EXPENSE)
            .max(Decimal::ZERO)
    }
}

/// Salary zakat: the surplus of income over living expense, at 2.5%, when it
/// reaches the monetary nisab.
pub fn calculate_salary_zakat(
    input: &SalaryZakatCalculator,
    settings: &NisabSettings,
) -> ZakatCalculationResult {
    let nisab = settings.resolve_nisab();
    let income = input.monthly_income.max(Decimal::ZERO);
    let expense = input.effective_living_expense();

    let mut trace = CalculationTrace::new();
    let net = match input.mode {
        SalaryCalculationMode::Annual => {
            let annual_income = ZakatDecimal::new(income).safe_mul(dec!(12)).value();
            let annual_expense = ZakatDecimal::new(expense).safe_mul(dec!(12)).value();
            trace.push(CalculationStep::initial("Annual Income", annual_income));
            trace.push(CalculationStep::subtract("Annual Living Expense", annual_expense));
            ZakatDecimal::new(annual_income).safe_sub(annual_expense).value()
        }
        SalaryCalculationMode::Monthly => {
            trace.push(CalculationStep::initial("Monthly Income", income));
            trace.push(CalculationStep::subtract("Monthly Living Expense", expense));
            ZakatDecimal::new(income).safe_sub(expense).value()
        }
    };
    let net = net.max(Decimal::ZERO);
    trace.push(CalculationStep::result("Net Zakatable Income", net));
    trace.push(CalculationStep::info(format!("Nisab: {}", nisab.description())));

    tracing::debug!(mode = %input.mode, %net, nisab = %nisab.value, "salary assessed");

    ZakatCalculationResult::assess(
        ZakatCategory::Salary,
        ZakatUnit::Currency,
        nisab.value,
        net,
        SALARY_RATE,
        trace,
    )
}

impl CalculateZakat for SalaryZakatCalculator {
    fn calculate_zakat(&self, settings: &NisabSettings) -> ZakatCalculationResult {
        calculate_salary_zakat(self, settings)
    }

    fn category(&self) -> ZakatCategory {
        ZakatCategory::Salary
    }

    fn get_label(&self) -> Option<String> {
        self.label_ref()
    }

    fn get_id(&self) -> uuid::Uuid {
        self.id_ref()
    }
}
