use crate::types::ZakatError;

/// Staged input that is checked once and turned into something the engine can use.
///
/// Implemented by [`crate::config::NisabSettingsBuilder`] and by the raw forms
/// in [`crate::forms`], where `build` is the strict conversion.
pub trait AssetBuilder<T> {
    fn build(self) -> Result<T, ZakatError>;
}
