//! Prelude module for the zakat engine.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//! ```

// Core exports
pub use crate::builder::AssetBuilder;
pub use crate::config::{NisabSettings, NisabSettingsBuilder};
pub use crate::inputs::{IntoHeadCount, IntoZakatDecimal};
pub use crate::nisab::{NisabBreakdown, NisabMethod, NisabSource, resolve_nisab};
pub use crate::portfolio::{LineItem, PortfolioResult, ZakatPortfolio, combined_total, combined_total_checked};
pub use crate::pricing::DueItemPrices;
pub use crate::traits::CalculateZakat;
pub use crate::types::{
    CalculationStep, CalculationTrace, CategoryResult, Operation, ZakatCalculationResult, ZakatCategory,
    ZakatError, ZakatUnit,
};

// Calculators
pub use crate::maal::agriculture::{PRODUCE_NISAB_KG, ProduceAssets, WateringMethod, calculate_produce_zakat};
pub use crate::maal::business::{NetValueAssets, NetValueSector, calculate_net_value_zakat};
pub use crate::maal::income::{
    DEFAULT_MONTHLY_LIVING_EXPENSE, SalaryCalculationMode, SalaryZakatCalculator, calculate_salary_zakat,
};
pub use crate::maal::livestock::{
    Camel121Choice, Camel121ChoiceOptions, CamelClass, CattleClass, DueItem, LivestockAssets, LivestockOptions,
    LivestockSpecies, LivestockZakatResult, cash_equivalent, price_key_of, resolve_livestock_due,
};

// Form adapters
pub use crate::forms::{LivestockForm, NetValueForm, ProduceForm, SalaryForm};

pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
