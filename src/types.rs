use std::collections::BTreeMap;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::math::ZakatDecimal;

/// The unit every figure of a [`ZakatCalculationResult`] is expressed in.
///
/// Produce harvested for consumption is assessed in kilograms and livestock in
/// heads; everything else is currency. Summing results of different units is
/// meaningless, see [`crate::portfolio::combined_total_checked`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema, Display,
)]
#[serde(rename_all = "camelCase")]
pub enum ZakatUnit {
    #[default]
    #[strum(to_string = "currency")]
    Currency,
    #[strum(to_string = "kg")]
    Kilograms,
    #[strum(to_string = "head")]
    Head,
}

/// Category a line item is assessed under. Used as the breakdown key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ZakatCategory {
    Salary,
    Produce,
    OtherAgriculture,
    Trade,
    Industrial,
    Livestock,
}

/// Operation performed by a single trace step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Compare => "?",
            Operation::Rate => "x",
            Operation::Result => "=",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// This struct provides transparency into how the final Zakat amount was derived,
/// enabling users to understand and verify each step of the calculation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with(description: impl Into<String>, amount: Option<Decimal>, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Initial)
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Add)
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Subtract)
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Compare)
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with(description, Some(rate), Operation::Rate)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with(description, Some(amount), Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::with(description, None, Operation::Info)
    }
}

/// Ordered list of steps explaining a result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct CalculationTrace(pub Vec<CalculationStep>);

impl CalculationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: CalculationStep) {
        self.0.push(step);
    }
}

impl std::ops::Deref for CalculationTrace {
    type Target = Vec<CalculationStep>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<CalculationStep>> for CalculationTrace {
    fn from(steps: Vec<CalculationStep>) -> Self {
        Self(steps)
    }
}

/// Outcome for a single category.
///
/// `is_applicable` holds exactly when `zakat_amount > 0`, which holds exactly
/// when `net_wealth` is positive and reaches the nisab.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResult {
    pub zakat_amount: Decimal,
    pub is_applicable: bool,
    pub net_wealth: Decimal,
}

/// Result of one calculator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatCalculationResult {
    /// The threshold the wealth was compared against.
    pub nisab: Decimal,
    pub total_wealth: Decimal,
    pub total_zakat: Decimal,
    pub has_zakat_due: bool,
    /// Unit of `nisab`, `total_wealth` and `total_zakat`.
    pub unit: ZakatUnit,
    pub breakdown: BTreeMap<ZakatCategory, CategoryResult>,
    pub trace: CalculationTrace,
}

impl ZakatCalculationResult {
    /// Compares `net_wealth` against `nisab` and applies `rate` when it is reached.
    ///
    /// Appends the comparison and outcome steps to `trace`. Negative wealth is
    /// clamped to zero before the comparison.
    pub fn assess(
        category: ZakatCategory,
        unit: ZakatUnit,
        nisab: Decimal,
        net_wealth: Decimal,
        rate: Decimal,
        mut trace: CalculationTrace,
    ) -> Self {
        let net_wealth = net_wealth.max(Decimal::ZERO);
        let is_applicable = net_wealth >= nisab && net_wealth > Decimal::ZERO && rate > Decimal::ZERO;
        let zakat_amount = if is_applicable {
            ZakatDecimal::new(net_wealth).safe_mul(rate).value()
        } else {
            Decimal::ZERO
        };

        trace.push(CalculationStep::compare("Nisab Threshold", nisab));
        if is_applicable {
            trace.push(CalculationStep::rate("Applied Rate", rate));
            trace.push(CalculationStep::result("Zakat Due", zakat_amount));
        } else {
            trace.push(CalculationStep::info("Net wealth below Nisab - No Zakat Due"));
        }

        let mut breakdown = BTreeMap::new();
        breakdown.insert(
            category,
            CategoryResult {
                zakat_amount,
                is_applicable,
                net_wealth,
            },
        );

        Self {
            nisab,
            total_wealth: net_wealth,
            total_zakat: zakat_amount,
            has_zakat_due: is_applicable,
            unit,
            breakdown,
            trace,
        }
    }

    /// Converts an in-kind result (kilograms or heads) into currency using a
    /// uniform price per unit.
    ///
    /// Currency results are returned unchanged. Whether zakat is due does not
    /// depend on the price, so the applicability flags are preserved.
    pub fn in_currency(mut self, price_per_unit: Decimal) -> Self {
        if self.unit == ZakatUnit::Currency {
            return self;
        }
        let price = if price_per_unit < Decimal::ZERO {
            tracing::warn!(%price_per_unit, "negative unit price clamped to zero");
            Decimal::ZERO
        } else {
            price_per_unit
        };

        self.trace.push(CalculationStep::rate(
            format!("Price per {}", self.unit),
            price,
        ));
        let convert = |amount: Decimal| ZakatDecimal::new(amount).safe_mul(price).value();
        self.nisab = convert(self.nisab);
        self.total_wealth = convert(self.total_wealth);
        self.total_zakat = convert(self.total_zakat);
        for entry in self.breakdown.values_mut() {
            entry.zakat_amount = convert(entry.zakat_amount);
            entry.net_wealth = convert(entry.net_wealth);
        }
        self.trace
            .push(CalculationStep::result("Zakat Due (currency)", self.total_zakat));
        self.unit = ZakatUnit::Currency;
        self
    }

    /// Returns the Zakat due formatted with 2 decimal places.
    pub fn format_amount(&self) -> String {
        use rust_decimal::RoundingStrategy;
        let rounded = self
            .total_zakat
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", rounded)
    }

    /// Generates a human-readable explanation of the calculation, one line per
    /// trace step.
    pub fn explain(&self) -> String {
        use std::fmt::Write;
        let mut output = String::new();

        let categories: Vec<&str> = self.breakdown.keys().map(|c| c.as_ref()).collect();
        let _ = writeln!(output, "Explanation for {} ({}):", categories.join(", "), self.unit);
        let _ = writeln!(output, "{:-<50}", "");

        let width = self
            .trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in self.trace.iter() {
            match (step.operation, step.amount) {
                (Operation::Info, _) => {
                    let _ = writeln!(output, "  INFO: {}", step.description);
                }
                (Operation::Rate, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>10.3}",
                        step.description,
                        step.operation.symbol(),
                        amount,
                    );
                }
                (_, Some(amount)) => {
                    let _ = writeln!(
                        output,
                        "  {:<width$} : {} {:>10.2}",
                        step.description,
                        step.operation.symbol(),
                        amount,
                    );
                }
                (_, None) => {
                    let _ = writeln!(output, "  {:<width$} : [No Amount]", step.description);
                }
            }
        }

        let _ = writeln!(output, "{:-<50}", "");
        if self.has_zakat_due {
            let _ = writeln!(output, "Status: PAYABLE");
            let _ = writeln!(output, "Amount Due: {} {}", self.format_amount(), self.unit);
        } else {
            let _ = writeln!(output, "Status: EXEMPT");
        }
        output
    }
}

impl std::fmt::Display for ZakatCalculationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Wealth: {} | Nisab: {} ({})", self.total_wealth, self.nisab, self.unit)?;
        if self.has_zakat_due {
            write!(f, "Status: PAYABLE ({} due)", self.format_amount())
        } else {
            write!(f, "Status: EXEMPT")
        }
    }
}

/// Errors raised at the boundary of the engine.
///
/// Calculators themselves never fail: malformed amounts are sanitized. These
/// errors come from loading settings, strict form parsing and checked
/// aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum ZakatError {
    #[error("Configuration Error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Invalid Input [{field}]: {reason} (got '{value}')")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unit Mismatch: expected {expected}, found {found}")]
    UnitMismatch { expected: ZakatUnit, found: ZakatUnit },

    #[error("Calculation Overflow: {operation} exceeds the decimal range")]
    CalculationOverflow { operation: String },
}

impl ZakatError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        ZakatError::ConfigurationError {
            reason: reason.into(),
        }
    }

    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ZakatError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        ZakatError::CalculationOverflow {
            operation: operation.into(),
        }
    }
}
