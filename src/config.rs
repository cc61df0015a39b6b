use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::builder::AssetBuilder;
use crate::inputs::{IntoZakatDecimal, sanitize_price};
use crate::nisab::{NisabBreakdown, NisabMethod, resolve_nisab};
use crate::types::ZakatError;

/// User-configured nisab inputs.
///
/// A snapshot of these settings is passed by reference into every calculator;
/// nothing in the engine keeps them between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct NisabSettings {
    pub method: NisabMethod,
    pub gold_price_per_gram: Option<Decimal>,
    pub silver_price_per_gram: Option<Decimal>,
    /// When positive, replaces the metal-based threshold regardless of `method`.
    pub nisab_override: Option<Decimal>,
}

impl std::str::FromStr for NisabSettings {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|e| ZakatError::configuration(format!("Failed to parse settings JSON: {}", e)))
    }
}

impl NisabSettings {
    pub fn builder() -> NisabSettingsBuilder {
        NisabSettingsBuilder::default()
    }

    pub fn new(method: NisabMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Resolves the monetary nisab for these settings.
    pub fn resolve_nisab(&self) -> NisabBreakdown {
        resolve_nisab(
            self.method,
            self.silver_price_per_gram,
            self.gold_price_per_gram,
            self.nisab_override,
        )
    }

    /// Shorthand for `resolve_nisab().value`.
    pub fn nisab_value(&self) -> Decimal {
        self.resolve_nisab().value
    }

    /// Loads settings from `ZAKAT_NISAB_METHOD`, `ZAKAT_GOLD_PRICE`,
    /// `ZAKAT_SILVER_PRICE` and `ZAKAT_NISAB_OVERRIDE`. All are optional.
    pub fn from_env() -> Result<Self, ZakatError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings from an arbitrary key lookup using the `ZAKAT_*` keys.
    ///
    /// Unset keys keep their defaults. Values that are present but unreadable
    /// are configuration errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZakatError> {
        let mut builder = Self::builder();

        if let Some(method) = lookup("ZAKAT_NISAB_METHOD") {
            let method = method.trim().parse::<NisabMethod>().map_err(|_| {
                ZakatError::configuration(format!("Invalid ZAKAT_NISAB_METHOD: {}", method))
            })?;
            builder = builder.method(method);
        }

        let read = |key: &str| -> Result<Option<Decimal>, ZakatError> {
            lookup(key)
                .map(|raw| {
                    raw.as_str().into_zakat_decimal().map_err(|e| {
                        ZakatError::configuration(format!("Invalid {} format: {}", key, e))
                    })
                })
                .transpose()
        };

        if let Some(price) = read("ZAKAT_GOLD_PRICE")? {
            builder = builder.gold_price(price);
        }
        if let Some(price) = read("ZAKAT_SILVER_PRICE")? {
            builder = builder.silver_price(price);
        }
        if let Some(value) = read("ZAKAT_NISAB_OVERRIDE")? {
            builder = builder.nisab_override(value);
        }

        builder.build()
    }

    /// Attempts to load settings from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, ZakatError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ZakatError::configuration(format!("Failed to read settings file: {}", e)))?;
        let settings: NisabSettings = content.parse()?;
        tracing::debug!(path, method = %settings.method, "loaded nisab settings");
        Ok(settings)
    }

    // ========== Fluent Helper Methods ==========

    pub fn with_method(mut self, method: NisabMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.gold_price_per_gram = sanitize_price(price);
        self
    }

    pub fn with_silver_price(mut self, price: impl IntoZakatDecimal) -> Self {
        self.silver_price_per_gram = sanitize_price(price);
        self
    }

    pub fn with_override(mut self, value: impl IntoZakatDecimal) -> Self {
        self.nisab_override = sanitize_price(value).filter(|v| *v > Decimal::ZERO);
        self
    }
}

// ========== NisabSettingsBuilder ==========

#[derive(Default)]
pub struct NisabSettingsBuilder {
    method: Option<NisabMethod>,
    gold_price: Option<Decimal>,
    silver_price: Option<Decimal>,
    nisab_override: Option<Decimal>,
}

impl NisabSettingsBuilder {
    pub fn method(mut self, method: NisabMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn gold_price(mut self, price: impl IntoZakatDecimal) -> Self {
        if let Ok(p) = price.into_zakat_decimal() {
            self.gold_price = Some(p);
        }
        self
    }

    pub fn silver_price(mut self, price: impl IntoZakatDecimal) -> Self {
        if let Ok(p) = price.into_zakat_decimal() {
            self.silver_price = Some(p);
        }
        self
    }

    pub fn nisab_override(mut self, value: impl IntoZakatDecimal) -> Self {
        if let Ok(v) = value.into_zakat_decimal() {
            self.nisab_override = Some(v);
        }
        self
    }
}

impl AssetBuilder<NisabSettings> for NisabSettingsBuilder {
    /// Negative prices and non-positive overrides are dropped with a warning so
    /// the documented defaults apply.
    fn build(self) -> Result<NisabSettings, ZakatError> {
        let keep = |value: Option<Decimal>, field: &'static str, allow_zero: bool| {
            value.filter(|v| {
                let ok = if allow_zero { *v >= Decimal::ZERO } else { *v > Decimal::ZERO };
                if !ok {
                    tracing::warn!(field, value = %v, "ignoring invalid setting");
                }
                ok
            })
        };

        Ok(NisabSettings {
            method: self.method.unwrap_or_default(),
            gold_price_per_gram: keep(self.gold_price, "gold_price_per_gram", true),
            silver_price_per_gram: keep(self.silver_price, "silver_price_per_gram", true),
            nisab_override: keep(self.nisab_override, "nisab_override", false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    #[test]
    fn test_default_settings_resolve_to_silver() {
        let settings = NisabSettings::default();
        assert_eq!(settings.nisab_value(), dec!(7140));
    }

    #[test]
    fn test_builder_drops_invalid_values() {
        let settings = NisabSettings::builder()
            .method(NisabMethod::Gold)
            .gold_price(-10)
            .nisab_override(0)
            .build()
            .unwrap();
        assert_eq!(settings.gold_price_per_gram, None);
        assert_eq!(settings.nisab_override, None);
        assert_eq!(settings.nisab_value(), dec!(68000));
    }

    #[test]
    fn test_from_json_string() {
        let settings: NisabSettings =
            r#"{"method":"gold","goldPricePerGram":"1000"}"#.parse().unwrap();
        assert_eq!(settings.method, NisabMethod::Gold);
        assert_eq!(settings.nisab_value(), dec!(85000));

        let bad = "{not json".parse::<NisabSettings>();
        assert!(matches!(bad, Err(ZakatError::ConfigurationError { .. })));
    }

    #[test]
    fn test_try_from_json_file() {
        let path = std::env::temp_dir().join(format!("nisab-settings-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"method":"gold","goldPricePerGram":"900"}"#).unwrap();

        let settings = NisabSettings::try_from_json(path.to_str().unwrap());
        std::fs::remove_file(&path).unwrap();
        let settings = settings.unwrap();
        assert_eq!(settings.method, NisabMethod::Gold);
        assert_eq!(settings.nisab_value(), dec!(76500));
    }

    #[test]
    fn test_try_from_json_missing_file() {
        let path = std::env::temp_dir().join(format!("missing-{}.json", uuid::Uuid::new_v4()));
        let res = NisabSettings::try_from_json(path.to_str().unwrap());
        match res {
            Err(ZakatError::ConfigurationError { reason }) => {
                assert!(reason.starts_with("Failed to read settings file"));
            }
            other => panic!("expected a configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("ZAKAT_NISAB_METHOD", "gold"),
            ("ZAKAT_GOLD_PRICE", "950.5"),
            ("ZAKAT_NISAB_OVERRIDE", "20000"),
        ]);
        let settings =
            NisabSettings::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(settings.method, NisabMethod::Gold);
        assert_eq!(settings.gold_price_per_gram, Some(dec!(950.5)));
        assert_eq!(settings.nisab_value(), dec!(20000));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let res = NisabSettings::from_lookup(|k| {
            (k == "ZAKAT_SILVER_PRICE").then(|| "cheap".to_string())
        });
        assert!(res.is_err());

        let res = NisabSettings::from_lookup(|k| {
            (k == "ZAKAT_NISAB_METHOD").then(|| "copper".to_string())
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_fluent_helpers() {
        let settings = NisabSettings::new(NisabMethod::Silver)
            .with_silver_price(f64::NAN)
            .with_override(-1);
        assert_eq!(settings.silver_price_per_gram, None);
        assert_eq!(settings.nisab_override, None);
        assert_eq!(settings.nisab_value(), dec!(7140));
    }
}
