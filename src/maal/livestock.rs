//! # Fiqh Compliance: Livestock
//!
//! ## Logic
//! - Camel age tiers (Bint Makhad, Bint Labun, Hiqqah, Jadhaah) follow the
//!   **Letter of Abu Bakr (ra)** (Sahih Bukhari 1454).
//! - From 121 camels the letter switches to "a bint labun for every forty and a
//!   hiqqah for every fifty". For 121–129 both readings are valid and the owner
//!   chooses; from 130 onwards the herd is covered by the combination of forties
//!   and fifties that leaves the smallest remainder with the fewest animals.
//! - Cattle follow the hadith of Mu'adh (ra): a tabi' for every thirty and a
//!   musinnah for every forty.
//!
//! Counts are assumed to satisfy Hawl and Saimah; neither is checked here.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::config::NisabSettings;
use crate::inputs::{IntoHeadCount, IntoZakatDecimal};
use crate::pricing::DueItemPrices;
use crate::traits::CalculateZakat;
use crate::types::{
    CalculationStep, CalculationTrace, CategoryResult, ZakatCalculationResult, ZakatCategory,
    ZakatUnit,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LivestockSpecies {
    Camels,
    Cattle,
    /// Sheep and goats are counted together.
    SheepGoats,
}

impl LivestockSpecies {
    /// Smallest herd on which anything is due.
    pub fn nisab_heads(&self) -> u32 {
        match self {
            LivestockSpecies::Camels => 5,
            LivestockSpecies::Cattle => 30,
            LivestockSpecies::SheepGoats => 40,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
pub enum CamelClass {
    /// Female in her second year.
    BintMakhad,
    /// Female in her third year.
    BintLabun,
    /// Female in her fourth year.
    Hiqqah,
    /// Female in her fifth year.
    Jadhaah,
}

impl CamelClass {
    pub fn name(&self) -> &'static str {
        match self {
            CamelClass::BintMakhad => "bint makhad",
            CamelClass::BintLabun => "bint labun",
            CamelClass::Hiqqah => "hiqqah",
            CamelClass::Jadhaah => "jadhaah",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
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
pub enum CattleClass {
    /// Calf in its second year.
    Tabi,
    /// Cow in its third year.
    Musinnah,
}

/// One class of animal owed, with how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DueItem {
    Sheep { count: u32 },
    Camel { class: CamelClass, count: u32 },
    Cattle { class: CattleClass, count: u32 },
}

impl DueItem {
    pub fn sheep(count: u32) -> Self {
        DueItem::Sheep { count }
    }

    pub fn camel(class: CamelClass, count: u32) -> Self {
        DueItem::Camel { class, count }
    }

    pub fn cattle(class: CattleClass, count: u32) -> Self {
        DueItem::Cattle { class, count }
    }

    pub fn count(&self) -> u32 {
        match self {
            DueItem::Sheep { count }
            | DueItem::Camel { count, .. }
            | DueItem::Cattle { count, .. } => *count,
        }
    }

    /// Canonical key used to request and look up prices, e.g. `"camel_hiqqah"`.
    pub fn price_key(&self) -> String {
        match self {
            DueItem::Sheep { .. } => "sheep".to_string(),
            DueItem::Camel { class, .. } => format!("camel_{}", class),
            DueItem::Cattle { class, .. } => format!("cattle_{}", class),
        }
    }
}

impl std::fmt::Display for DueItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DueItem::Sheep { count } => write!(f, "{} sheep", count),
            DueItem::Camel { class, count } => write!(f, "{} {}", count, class.name()),
            DueItem::Cattle { class, count } => write!(f, "{} {}", count, class),
        }
    }
}

/// See [`DueItem::price_key`].
pub fn price_key_of(item: &DueItem) -> String {
    item.price_key()
}

/// The owner's pick for 121–129 camels, where two schedules are valid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
pub enum Camel121Choice {
    #[default]
    #[serde(rename = "2_hiqqah")]
    #[strum(serialize = "2_hiqqah")]
    TwoHiqqah,
    #[serde(rename = "3_bint_labun")]
    #[strum(serialize = "3_bint_labun")]
    ThreeBintLabun,
}

impl Camel121Choice {
    pub fn due_items(&self) -> Vec<DueItem> {
        match self {
            Camel121Choice::TwoHiqqah => vec![DueItem::camel(CamelClass::Hiqqah, 2)],
            Camel121Choice::ThreeBintLabun => vec![DueItem::camel(CamelClass::BintLabun, 3)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockOptions {
    /// Only consulted for 121–129 camels. Defaults to two hiqqah.
    pub camel121_choice: Option<Camel121Choice>,
}

impl LivestockOptions {
    pub fn camel121(choice: Camel121Choice) -> Self {
        Self {
            camel121_choice: Some(choice),
        }
    }
}

/// Both valid schedules for 121–129 camels, for callers presenting the choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Camel121ChoiceOptions {
    pub first: Vec<DueItem>,
    pub second: Vec<DueItem>,
}

impl Camel121ChoiceOptions {
    fn new() -> Self {
        Self {
            first: Camel121Choice::TwoHiqqah.due_items(),
            second: Camel121Choice::ThreeBintLabun.due_items(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivestockZakatResult {
    pub due_items: Vec<DueItem>,
    /// e.g. `"2 hiqqah + 3 bint labun"`, or `"none"`.
    pub due_text: String,
    pub is_due: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camel121_choice_options: Option<Camel121ChoiceOptions>,
}

impl LivestockZakatResult {
    fn new(due_items: Vec<DueItem>) -> Self {
        let due_text = if due_items.is_empty() {
            "none".to_string()
        } else {
            due_items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" + ")
        };
        Self {
            is_due: !due_items.is_empty(),
            due_items,
            due_text,
            camel121_choice_options: None,
        }
    }

    /// Total animals owed across all classes.
    pub fn total_heads(&self) -> u32 {
        self.due_items.iter().map(DueItem::count).sum()
    }
}

// ========== Combinatorial cover ==========

/// Two unit sizes that cover large herds, and the herd size from which the
/// cover applies.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnitPair {
    pub small: u32,
    pub large: u32,
    pub threshold: u32,
    /// `(small_count, large_count)` of the first tier at `threshold`.
    pub fallback: (u32, u32),
}

pub(crate) const CATTLE_UNITS: UnitPair = UnitPair {
    small: 30,
    large: 40,
    threshold: 60,
    fallback: (2, 0),
};

pub(crate) const CAMEL_UNITS: UnitPair = UnitPair {
    small: 40,
    large: 50,
    threshold: 130,
    fallback: (2, 1),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cover {
    pub small_count: u32,
    pub large_count: u32,
    pub covered: u32,
    pub remainder: u32,
}

impl Cover {
    fn from_counts(units: UnitPair, owned: u32, small_count: u32, large_count: u32) -> Self {
        let covered = u64::from(small_count) * u64::from(units.small)
            + u64::from(large_count) * u64::from(units.large);
        let covered = u32::try_from(covered).unwrap_or(u32::MAX);
        Self {
            small_count,
            large_count,
            covered,
            remainder: owned.saturating_sub(covered),
        }
    }

    /// Total order: smallest remainder, then fewest animals, then more of the
    /// larger unit.
    fn rank(&self) -> (u32, u64, Reverse<u32>) {
        (
            self.remainder,
            u64::from(self.small_count) + u64::from(self.large_count),
            Reverse(self.large_count),
        )
    }
}

/// Finds the best cover of `owned` by the two units.
///
/// A pair is valid when it covers at least the threshold and leaves less than
/// one small unit uncovered. For a fixed large count only the largest fitting
/// small count can be valid. Dropping `small` large units leaves the same
/// remainder with more animals, so only the top `small` large counts need to
/// be ranked.
pub(crate) fn search_cover(units: UnitPair, owned: u32) -> Option<Cover> {
    let max_large = owned / units.large;
    let lowest = max_large.saturating_sub(units.small - 1);

    (lowest..=max_large)
        .map(|large_count| {
            let rest = owned - large_count * units.large;
            Cover::from_counts(units, owned, rest / units.small, large_count)
        })
        .filter(|c| c.covered >= units.threshold && c.remainder < units.small)
        .min_by_key(Cover::rank)
}

fn cover_or_fallback(units: UnitPair, owned: u32) -> Cover {
    search_cover(units, owned).unwrap_or_else(|| {
        let (small_count, large_count) = units.fallback;
        let cover = Cover::from_counts(units, owned, small_count, large_count);
        tracing::warn!(owned, covered = cover.covered, "no valid cover found, using minimal tier");
        cover
    })
}

fn cover_items(cover: Cover, small: impl Fn(u32) -> DueItem, large: impl Fn(u32) -> DueItem) -> Vec<DueItem> {
    let mut items = Vec::with_capacity(2);
    if cover.small_count > 0 {
        items.push(small(cover.small_count));
    }
    if cover.large_count > 0 {
        items.push(large(cover.large_count));
    }
    items
}

// ========== Per-species schedules ==========

fn sheep_due(owned: u32) -> Vec<DueItem> {
    let sheep = match owned {
        0..=39 => return Vec::new(),
        40..=120 => 1,
        121..=200 => 2,
        201..=399 => 3,
        _ => owned / 100,
    };
    vec![DueItem::sheep(sheep)]
}

fn cattle_due(owned: u32) -> Vec<DueItem> {
    match owned {
        0..=29 => Vec::new(),
        30..=39 => vec![DueItem::cattle(CattleClass::Tabi, 1)],
        40..=59 => vec![DueItem::cattle(CattleClass::Musinnah, 1)],
        _ => {
            let cover = cover_or_fallback(CATTLE_UNITS, owned);
            tracing::debug!(owned, ?cover, "cattle cover");
            cover_items(
                cover,
                |n| DueItem::cattle(CattleClass::Tabi, n),
                |n| DueItem::cattle(CattleClass::Musinnah, n),
            )
        }
    }
}

fn camel_due(owned: u32, choice: Camel121Choice) -> Vec<DueItem> {
    match owned {
        0..=4 => Vec::new(),
        5..=24 => vec![DueItem::sheep(owned / 5)],
        25..=35 => vec![DueItem::camel(CamelClass::BintMakhad, 1)],
        36..=45 => vec![DueItem::camel(CamelClass::BintLabun, 1)],
        46..=60 => vec![DueItem::camel(CamelClass::Hiqqah, 1)],
        61..=75 => vec![DueItem::camel(CamelClass::Jadhaah, 1)],
        76..=90 => vec![DueItem::camel(CamelClass::BintLabun, 2)],
        91..=120 => vec![DueItem::camel(CamelClass::Hiqqah, 2)],
        121..=129 => choice.due_items(),
        _ => {
            let cover = cover_or_fallback(CAMEL_UNITS, owned);
            tracing::debug!(owned, ?cover, "camel cover");
            cover_items(
                cover,
                |n| DueItem::camel(CamelClass::BintLabun, n),
                |n| DueItem::camel(CamelClass::Hiqqah, n),
            )
        }
    }
}

/// Resolves the animals owed on a herd.
///
/// `owned` is sanitized first: negative or non-finite counts become 0 and
/// fractions are floored. For 121–129 camels the result always carries both
/// valid schedules in `camel121_choice_options`; the returned items follow
/// `options.camel121_choice`.
pub fn resolve_livestock_due(
    species: LivestockSpecies,
    owned: impl IntoHeadCount,
    options: LivestockOptions,
) -> LivestockZakatResult {
    let owned = owned.into_head_count();
    let choice = options.camel121_choice.unwrap_or_default();

    let items = match species {
        LivestockSpecies::SheepGoats => sheep_due(owned),
        LivestockSpecies::Cattle => cattle_due(owned),
        LivestockSpecies::Camels => camel_due(owned, choice),
    };

    let mut result = LivestockZakatResult::new(items);
    if species == LivestockSpecies::Camels && (121..=129).contains(&owned) {
        result.camel121_choice_options = Some(Camel121ChoiceOptions::new());
    }
    tracing::debug!(%species, owned, due = %result.due_text, "livestock resolved");
    result
}

/// Values due items at the given per-class prices.
///
/// Returns `None` as soon as any item's class has no positive price; a partial
/// sum is never reported. No items cost nothing, so an empty list is `Some(0)`.
pub fn cash_equivalent(due_items: &[DueItem], prices: &DueItemPrices) -> Option<Decimal> {
    due_items.iter().try_fold(Decimal::ZERO, |total, item| {
        let price = prices.usable_price(&item.price_key())?;
        total.checked_add(Decimal::from(item.count()).checked_mul(price)?)
    })
}

// ========== Line item ==========

crate::zakat_asset! {
    /// A herd staged as a portfolio line item.
    ///
    /// Its result is expressed in heads: `nisab` is the minimum herd,
    /// `total_wealth` the owned count and `total_zakat` the animals owed.
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct LivestockAssets {
        pub species: Option<LivestockSpecies>,
        pub count: u32,
        pub camel121_choice: Option<Camel121Choice>,
        pub prices: DueItemPrices,
    }
}

impl LivestockAssets {
    pub fn species(mut self, species: LivestockSpecies) -> Self {
        self.species = Some(species);
        self
    }

    pub fn count(mut self, count: impl IntoHeadCount) -> Self {
        self.count = count.into_head_count();
        self
    }

    pub fn camel121_choice(mut self, choice: Camel121Choice) -> Self {
        self.camel121_choice = Some(choice);
        self
    }

    pub fn prices(mut self, prices: DueItemPrices) -> Self {
        self.prices = prices;
        self
    }

    pub fn price(mut self, key: impl Into<String>, price: impl IntoZakatDecimal) -> Self {
        self.prices = self.prices.with_price(key, price);
        self
    }

    /// Due items for this herd; empty when no species is set.
    pub fn resolve(&self) -> LivestockZakatResult {
        match self.species {
            Some(species) => resolve_livestock_due(
                species,
                self.count,
                LivestockOptions {
                    camel121_choice: self.camel121_choice,
                },
            ),
            None => LivestockZakatResult::new(Vec::new()),
        }
    }

    pub fn cash_equivalent(&self) -> Option<Decimal> {
        cash_equivalent(&self.resolve().due_items, &self.prices)
    }
}

impl CalculateZakat for LivestockAssets {
    fn calculate_zakat(&self, _settings: &NisabSettings) -> ZakatCalculationResult {
        let resolution = self.resolve();
        let nisab = Decimal::from(self.species.map_or(0, |s| s.nisab_heads()));
        let owned = Decimal::from(self.count);
        let heads_due = Decimal::from(resolution.total_heads());

        let mut trace = CalculationTrace::new();
        match self.species {
            Some(species) => trace.push(CalculationStep::initial(format!("{} Count", species), owned)),
            None => trace.push(CalculationStep::info("Species not set - No Zakat Due")),
        }
        trace.push(CalculationStep::compare("Nisab (head)", nisab));
        if resolution.is_due {
            trace.push(CalculationStep::result(format!("Due: {}", resolution.due_text), heads_due));
            match cash_equivalent(&resolution.due_items, &self.prices) {
                Some(cash) => trace.push(CalculationStep::info(format!("Cash equivalent: {}", cash))),
                None => trace.push(CalculationStep::info("Cash equivalent unavailable: missing prices")),
            }
        } else {
            trace.push(CalculationStep::info("Count below Nisab - No Zakat Due"));
        }

        ZakatCalculationResult {
            nisab,
            total_wealth: owned,
            total_zakat: heads_due,
            has_zakat_due: resolution.is_due,
            unit: ZakatUnit::Head,
            breakdown: [(
                ZakatCategory::Livestock,
                CategoryResult {
                    zakat_amount: heads_due,
                    is_applicable: resolution.is_due,
                    net_wealth: owned,
                },
            )]
            .into_iter()
            .collect(),
            trace,
        }
    }

    fn category(&self) -> ZakatCategory {
        ZakatCategory::Livestock
    }

    fn get_label(&self) -> Option<String> {
        self.label_ref()
    }

    fn get_id(&self) -> uuid::Uuid {
        self.id_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn due(species: LivestockSpecies, owned: u32) -> Vec<DueItem> {
        resolve_livestock_due(species, owned, LivestockOptions::default()).due_items
    }

    fn brute_force(units: UnitPair, owned: u32) -> Option<Cover> {
        let mut best: Option<Cover> = None;
        for large_count in 0..=owned / units.large {
            for small_count in 0..=owned / units.small {
                let cover = Cover::from_counts(units, owned, small_count, large_count);
                if cover.covered > owned
                    || cover.covered < units.threshold
                    || cover.remainder >= units.small
                {
                    continue;
                }
                if best.is_none_or(|b| cover.rank() < b.rank()) {
                    best = Some(cover);
                }
            }
        }
        best
    }

    #[test]
    fn test_sheep_tiers() {
        use LivestockSpecies::SheepGoats;
        assert!(due(SheepGoats, 39).is_empty());
        assert_eq!(due(SheepGoats, 40), vec![DueItem::sheep(1)]);
        assert_eq!(due(SheepGoats, 120), vec![DueItem::sheep(1)]);
        assert_eq!(due(SheepGoats, 121), vec![DueItem::sheep(2)]);
        assert_eq!(due(SheepGoats, 201), vec![DueItem::sheep(3)]);
        assert_eq!(due(SheepGoats, 399), vec![DueItem::sheep(3)]);
        assert_eq!(due(SheepGoats, 400), vec![DueItem::sheep(4)]);
        assert_eq!(due(SheepGoats, 1250), vec![DueItem::sheep(12)]);
    }

    #[test]
    fn test_cattle_tiers() {
        use LivestockSpecies::Cattle;
        assert!(due(Cattle, 29).is_empty());
        assert_eq!(due(Cattle, 30), vec![DueItem::cattle(CattleClass::Tabi, 1)]);
        assert_eq!(due(Cattle, 59), vec![DueItem::cattle(CattleClass::Musinnah, 1)]);
        assert_eq!(due(Cattle, 60), vec![DueItem::cattle(CattleClass::Tabi, 2)]);
        assert_eq!(
            due(Cattle, 70),
            vec![
                DueItem::cattle(CattleClass::Tabi, 1),
                DueItem::cattle(CattleClass::Musinnah, 1)
            ]
        );
        // 4 tabi and 3 musinnah both cover 120 exactly; fewer animals wins.
        assert_eq!(due(Cattle, 120), vec![DueItem::cattle(CattleClass::Musinnah, 3)]);
    }

    #[test]
    fn test_camel_tiers() {
        use LivestockSpecies::Camels;
        assert!(due(Camels, 4).is_empty());
        assert_eq!(due(Camels, 5), vec![DueItem::sheep(1)]);
        assert_eq!(due(Camels, 24), vec![DueItem::sheep(4)]);
        assert_eq!(due(Camels, 25), vec![DueItem::camel(CamelClass::BintMakhad, 1)]);
        assert_eq!(due(Camels, 45), vec![DueItem::camel(CamelClass::BintLabun, 1)]);
        assert_eq!(due(Camels, 60), vec![DueItem::camel(CamelClass::Hiqqah, 1)]);
        assert_eq!(due(Camels, 75), vec![DueItem::camel(CamelClass::Jadhaah, 1)]);
        assert_eq!(due(Camels, 90), vec![DueItem::camel(CamelClass::BintLabun, 2)]);
        assert_eq!(due(Camels, 120), vec![DueItem::camel(CamelClass::Hiqqah, 2)]);
        assert_eq!(
            due(Camels, 130),
            vec![
                DueItem::camel(CamelClass::BintLabun, 2),
                DueItem::camel(CamelClass::Hiqqah, 1)
            ]
        );
        assert_eq!(due(Camels, 150), vec![DueItem::camel(CamelClass::Hiqqah, 3)]);
        assert_eq!(due(Camels, 160), vec![DueItem::camel(CamelClass::BintLabun, 4)]);
        assert_eq!(due(Camels, 200), vec![DueItem::camel(CamelClass::Hiqqah, 4)]);
    }

    #[test]
    fn test_camel_121_choice() {
        let default = resolve_livestock_due(LivestockSpecies::Camels, 121, LivestockOptions::default());
        assert_eq!(default.due_items, vec![DueItem::camel(CamelClass::Hiqqah, 2)]);
        assert_eq!(
            default.camel121_choice_options,
            Some(Camel121ChoiceOptions {
                first: vec![DueItem::camel(CamelClass::Hiqqah, 2)],
                second: vec![DueItem::camel(CamelClass::BintLabun, 3)],
            })
        );

        let chosen = resolve_livestock_due(
            LivestockSpecies::Camels,
            128,
            LivestockOptions::camel121(Camel121Choice::ThreeBintLabun),
        );
        assert_eq!(chosen.due_items, vec![DueItem::camel(CamelClass::BintLabun, 3)]);
        assert_eq!(chosen.due_text, "3 bint labun");

        let outside = resolve_livestock_due(LivestockSpecies::Camels, 130, LivestockOptions::default());
        assert_eq!(outside.camel121_choice_options, None);
    }

    #[test]
    fn test_choice_parsing() {
        assert_eq!("3_bint_labun".parse::<Camel121Choice>().unwrap(), Camel121Choice::ThreeBintLabun);
        assert_eq!(Camel121Choice::TwoHiqqah.to_string(), "2_hiqqah");
    }

    #[test]
    fn test_due_text() {
        let res = resolve_livestock_due(LivestockSpecies::Camels, 130, LivestockOptions::default());
        assert_eq!(res.due_text, "2 bint labun + 1 hiqqah");
        assert!(res.is_due);

        let none = resolve_livestock_due(LivestockSpecies::Cattle, 10, LivestockOptions::default());
        assert_eq!(none.due_text, "none");
        assert!(!none.is_due);
    }

    #[test]
    fn test_sanitized_counts() {
        let negative = resolve_livestock_due(LivestockSpecies::SheepGoats, -50, LivestockOptions::default());
        assert!(!negative.is_due);
        let nan = resolve_livestock_due(LivestockSpecies::SheepGoats, f64::NAN, LivestockOptions::default());
        assert!(!nan.is_due);
        let fractional = resolve_livestock_due(LivestockSpecies::SheepGoats, 39.99, LivestockOptions::default());
        assert!(!fractional.is_due);
    }

    #[test]
    fn test_search_matches_brute_force() {
        for owned in 0..=1500 {
            assert_eq!(search_cover(CAMEL_UNITS, owned), brute_force(CAMEL_UNITS, owned), "camels {}", owned);
            assert_eq!(search_cover(CATTLE_UNITS, owned), brute_force(CATTLE_UNITS, owned), "cattle {}", owned);
        }
    }

    #[test]
    fn test_search_remainder_invariant() {
        for owned in 130..=5000 {
            let cover = search_cover(CAMEL_UNITS, owned).expect("cover exists above threshold");
            assert!(cover.covered <= owned);
            assert!(cover.remainder < CAMEL_UNITS.small);
        }
        for owned in 60..=5000 {
            let cover = search_cover(CATTLE_UNITS, owned).expect("cover exists above threshold");
            assert!(cover.remainder < CATTLE_UNITS.small);
        }
    }

    #[test]
    fn test_search_handles_huge_herds() {
        let cover = search_cover(CAMEL_UNITS, u32::MAX).unwrap();
        assert!(cover.remainder < 40);
        assert_eq!(cover.covered + cover.remainder, u32::MAX);
    }

    #[test]
    fn test_fallback_is_minimal_tier() {
        let camels = cover_or_fallback(CAMEL_UNITS, 100);
        assert_eq!((camels.small_count, camels.large_count, camels.covered), (2, 1, 130));
        assert_eq!(camels.remainder, 0);
        let cattle = cover_or_fallback(CATTLE_UNITS, 10);
        assert_eq!((cattle.small_count, cattle.large_count, cattle.covered), (2, 0, 60));
    }

    #[test]
    fn test_fallback_tiers_reach_threshold() {
        for units in [CAMEL_UNITS, CATTLE_UNITS] {
            let (small_count, large_count) = units.fallback;
            assert_eq!(small_count * units.small + large_count * units.large, units.threshold);
        }
    }

    #[test]
    fn test_every_class_has_a_distinct_price_key() {
        use strum::IntoEnumIterator;

        let mut keys: Vec<String> = CamelClass::iter()
            .map(|class| DueItem::camel(class, 1).price_key())
            .chain(CattleClass::iter().map(|class| DueItem::cattle(class, 1).price_key()))
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
        assert!(keys.iter().all(|k| k.starts_with("camel_") || k.starts_with("cattle_")));
    }

    #[test]
    fn test_every_species_starts_at_its_minimum() {
        use strum::IntoEnumIterator;

        for species in LivestockSpecies::iter() {
            let minimum = species.nisab_heads();
            assert!(!resolve_livestock_due(species, minimum - 1, LivestockOptions::default()).is_due, "{}", species);
            assert!(resolve_livestock_due(species, minimum, LivestockOptions::default()).is_due, "{}", species);
            assert_eq!(species.to_string().parse::<LivestockSpecies>().unwrap(), species);
        }
    }

    #[test]
    fn test_price_keys() {
        assert_eq!(DueItem::sheep(1).price_key(), "sheep");
        assert_eq!(DueItem::camel(CamelClass::BintMakhad, 1).price_key(), "camel_bint_makhad");
        assert_eq!(price_key_of(&DueItem::camel(CamelClass::Hiqqah, 2)), "camel_hiqqah");
        assert_eq!(DueItem::cattle(CattleClass::Musinnah, 1).price_key(), "cattle_musinnah");
    }

    #[test]
    fn test_cash_equivalent() {
        let items = vec![
            DueItem::camel(CamelClass::BintLabun, 1),
            DueItem::camel(CamelClass::Hiqqah, 2),
        ];
        let prices = DueItemPrices::new()
            .with_price("camel_hiqqah", 1500)
            .with_price("camel_bint_labun", 1000);
        assert_eq!(cash_equivalent(&items, &prices), Some(dec!(4000)));

        let partial = DueItemPrices::new().with_price("camel_hiqqah", 1500);
        assert_eq!(cash_equivalent(&items, &partial), None);

        let zero = prices.clone().with_price("camel_bint_labun", 0);
        assert_eq!(cash_equivalent(&items, &zero), None);

        assert_eq!(cash_equivalent(&[], &DueItemPrices::new()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_livestock_line_item() {
        let herd = LivestockAssets::new()
            .species(LivestockSpecies::Camels)
            .count(130)
            .price("camel_bint_labun", 1000)
            .price("camel_hiqqah", 1500)
            .label("North pasture");

        let res = herd.calculate_zakat(&NisabSettings::default());
        assert_eq!(res.unit, ZakatUnit::Head);
        assert_eq!(res.nisab, dec!(5));
        assert_eq!(res.total_zakat, dec!(3));
        assert!(res.has_zakat_due);
        assert_eq!(herd.cash_equivalent(), Some(dec!(3500)));
        assert_eq!(herd.get_label(), Some("North pasture".to_string()));
    }

    #[test]
    fn test_livestock_line_item_without_species() {
        let res = LivestockAssets::new().count(500).calculate_zakat(&NisabSettings::default());
        assert!(!res.has_zakat_due);
        assert_eq!(res.total_zakat, Decimal::ZERO);
    }

    #[test]
    fn test_due_item_serialization() {
        let json = serde_json::to_string(&DueItem::camel(CamelClass::BintLabun, 3)).unwrap();
        assert_eq!(json, r#"{"kind":"camel","class":"bint_labun","count":3}"#);
    }
}
