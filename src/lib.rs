//! Pure zakat calculation engine.
//!
//! Resolves the monetary nisab and assesses salary, agricultural produce,
//! net-value (trade, industrial, other agriculture) assets and livestock.
//! Every calculator is a pure function of its inputs and an explicit
//! [`NisabSettings`] snapshot.
//!
//! ```rust
//! use zakat_engine::prelude::*;
//!
//! let settings = NisabSettings::default();
//! let res = SalaryZakatCalculator::new().income(10000).calculate_zakat(&settings);
//! assert_eq!(res.total_zakat, dec!(2020.2));
//!
//! let herd = resolve_livestock_due(LivestockSpecies::Camels, 130, LivestockOptions::default());
//! assert_eq!(herd.due_text, "2 bint labun + 1 hiqqah");
//! ```

#[macro_use]
pub mod macros;

pub mod builder;
pub mod config;
pub mod forms;
pub mod inputs;
pub mod maal;
pub mod math;
pub mod nisab;
pub mod portfolio;
pub mod prelude;
pub mod pricing;
pub mod traits;
pub mod types;

pub use config::NisabSettings;
pub use nisab::{NisabBreakdown, NisabMethod, resolve_nisab};
pub use portfolio::{LineItem, PortfolioResult, ZakatPortfolio, combined_total, combined_total_checked};
pub use traits::CalculateZakat;
pub use types::{ZakatCalculationResult, ZakatCategory, ZakatError, ZakatUnit};
