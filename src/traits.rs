use crate::config::NisabSettings;
use crate::types::{ZakatCalculationResult, ZakatCategory};

/// Trait implemented by every category calculator.
///
/// Calculations are pure: the same inputs and settings always produce an equal
/// result, and nothing is retained between calls.
pub trait CalculateZakat {
    fn calculate_zakat(&self, settings: &NisabSettings) -> ZakatCalculationResult;

    /// Category the result is reported under.
    fn category(&self) -> ZakatCategory;

    /// Returns the label of the line item, if any.
    fn get_label(&self) -> Option<String> {
        None
    }

    /// Returns the stable unique identifier for this line item.
    fn get_id(&self) -> uuid::Uuid;
}
