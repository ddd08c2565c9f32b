//! Price resolution
//!
//! Fills in missing accessory prices from recent auction sales and bazaar
//! snapshots. Network access sits behind [`PriceSource`] so the resolution
//! rules can run against any backend (the CLI uses the CoflNet API).
//!
//! Lookup failures never abort a pass: they are logged and the accessory is
//! left unpriced, to be skipped by the ranker.

use crate::accessory::CatalogEntry;
use crate::reference::Rarity;
use serde::{Deserialize, Serialize};

/// Error type for price lookups
#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

/// Result type for price lookups
pub type PriceResult<T> = Result<T, PriceError>;

/// A recently sold auction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sale {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl Sale {
    pub fn new(uuid: impl Into<String>, price: f64) -> Self {
        Self {
            uuid: Some(uuid.into()),
            price: Some(price),
        }
    }
}

/// Market data backend
pub trait PriceSource {
    /// Recent auction sales for an item, newest first
    fn recent_sales(&self, item_id: &str) -> PriceResult<Vec<Sale>>;

    /// Rarity tier of a sold auction, if the backend reports one
    fn auction_tier(&self, auction_id: &str) -> PriceResult<Option<String>>;

    /// Instant-buy price of a bazaar product
    fn bazaar_buy_price(&self, product_id: &str) -> PriceResult<Option<f64>>;
}

impl<T: PriceSource + ?Sized> PriceSource for &T {
    fn recent_sales(&self, item_id: &str) -> PriceResult<Vec<Sale>> {
        (**self).recent_sales(item_id)
    }

    fn auction_tier(&self, auction_id: &str) -> PriceResult<Option<String>> {
        (**self).auction_tier(auction_id)
    }

    fn bazaar_buy_price(&self, product_id: &str) -> PriceResult<Option<f64>> {
        (**self).bazaar_buy_price(product_id)
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// Bazaar product consumed by one recombobulation
pub const UPGRADE_PRODUCT_ID: &str = "RECOMBOBULATOR_3000";

/// Number of recent sales averaged for a plain price lookup
pub const RECENT_SALES_WINDOW: usize = 3;

/// Number of matching sales collected for a rarity-specific lookup
pub const TIERED_SALES_LIMIT: usize = 5;

/// Accessories sold by NPCs at a fixed price
pub const NPC_PRICES: &[(&str, f64)] = &[
    ("Scavenger Talisman", 200.0),
    ("Mine Affinity Talisman", 200.0),
    ("Village Affinity Talisman", 200.0),
    ("Intimidation Talisman", 200.0),
    ("Skeleton Talisman", 50.0),
    ("Zombie Talisman", 50.0),
    ("Jacobus Register", 21_500_000.0),
];

/// Accessory priced from its bazaar ingredients
#[derive(Debug, Clone, PartialEq)]
pub struct CraftRecipe {
    pub name: &'static str,
    pub ingredients: &'static [(&'static str, u32)],
}

/// Accessories priced by crafting cost
pub const CRAFT_RECIPES: &[CraftRecipe] = &[CraftRecipe {
    name: "Fried Frozen Chicken",
    ingredients: &[
        ("FRIED_FEATHER", 256),
        ("ENCHANTED_GLACITE", 128),
        ("ENCHANTED_BLAZE_POWDER", 128),
    ],
}];

/// Accessories that exist at several rarities under one id
pub const MULTI_RARITY_ITEMS: &[(&str, &[Rarity])] = &[(
    "Runebook",
    &[
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ],
)];

/// Accessories whose sales are listed under a different id
pub const PRICE_ALIASES: &[(&str, &str)] = &[("Abicase", "ABICASE_SUMSUNG_1")];

fn npc_price(name: &str) -> Option<f64> {
    NPC_PRICES.iter().find(|(n, _)| *n == name).map(|(_, p)| *p)
}

fn craft_recipe(name: &str) -> Option<&'static CraftRecipe> {
    CRAFT_RECIPES.iter().find(|r| r.name == name)
}

fn multi_rarities(name: &str) -> Option<&'static [Rarity]> {
    MULTI_RARITY_ITEMS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, r)| *r)
}

fn price_alias(name: &str) -> Option<&'static str> {
    PRICE_ALIASES.iter().find(|(n, _)| *n == name).map(|(_, id)| *id)
}

/// Median of a set of prices (mean of the middle pair for even counts)
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Outcome of a price-fixing pass
#[derive(Debug, Default)]
pub struct PriceReport {
    pub entries: Vec<CatalogEntry>,
    /// Names of accessories still without any price
    pub unpriced: Vec<String>,
}

/// Applies the pricing rules on top of a [`PriceSource`]
pub struct PriceResolver<S> {
    source: S,
}

impl<S: PriceSource> PriceResolver<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Median of the last few sales, truncated to whole coins
    ///
    /// A median of zero coins counts as no price.
    pub fn resolve_price(&self, item_id: &str) -> Option<f64> {
        let sales = match self.source.recent_sales(item_id) {
            Ok(sales) => sales,
            Err(e) => {
                tracing::warn!("Recent sales lookup failed for {}: {}", item_id, e);
                return None;
            }
        };

        // A newest sale without a price means the listing is unusable
        if sales.first().map_or(true, |s| s.price.is_none()) {
            return None;
        }

        let prices: Vec<f64> = sales
            .iter()
            .take(RECENT_SALES_WINDOW)
            .filter_map(|s| s.price)
            .collect();
        median(&prices).map(f64::trunc).filter(|p| *p > 0.0)
    }

    /// Median price of recent sales that sold at the given rarity
    pub fn resolve_tiered_price(&self, item_id: &str, rarity: Rarity) -> Option<f64> {
        let sales = match self.source.recent_sales(item_id) {
            Ok(sales) => sales,
            Err(e) => {
                tracing::warn!("Recent sales lookup failed for {} {}: {}", item_id, rarity, e);
                return None;
            }
        };

        let mut matched = Vec::new();
        for sale in &sales {
            let Some(uuid) = sale.uuid.as_deref() else {
                continue;
            };

            match self.source.auction_tier(uuid) {
                Ok(Some(tier)) if tier.eq_ignore_ascii_case(rarity.code()) => {
                    if let Some(price) = sale.price {
                        tracing::debug!("{} {} sold for {}", item_id, rarity, price);
                        matched.push(price.trunc());
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Auction lookup failed for {}: {}", uuid, e),
            }

            if matched.len() >= TIERED_SALES_LIMIT {
                break;
            }
        }

        median(&matched).map(f64::trunc).filter(|p| *p > 0.0)
    }

    /// Total bazaar cost of a recipe's ingredients
    ///
    /// Ingredients without a price contribute nothing.
    pub fn craft_price(&self, recipe: &CraftRecipe) -> f64 {
        let mut total = 0.0;
        for (ingredient, qty) in recipe.ingredients {
            match self.source.bazaar_buy_price(ingredient) {
                Ok(Some(unit)) => {
                    let cost = unit * f64::from(*qty);
                    tracing::debug!("{}: {} x{} = {}", recipe.name, ingredient, qty, cost);
                    total += cost;
                }
                Ok(None) => tracing::warn!("No buy price for {}", ingredient),
                Err(e) => tracing::warn!("Failed to fetch {} price: {}", ingredient, e),
            }
        }
        total.trunc()
    }

    /// Price of one recombobulation, if the bazaar has one
    pub fn upgrade_unit_cost(&self) -> Option<f64> {
        match self.source.bazaar_buy_price(UPGRADE_PRODUCT_ID) {
            Ok(Some(price)) if price > 0.0 => Some(price),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Failed to fetch {} price: {}", UPGRADE_PRODUCT_ID, e);
                None
            }
        }
    }

    /// Fill in missing prices across a catalog
    pub fn fix_prices(&self, entries: Vec<CatalogEntry>) -> PriceReport {
        let mut fixed = Vec::with_capacity(entries.len());
        for entry in entries {
            self.fix_entry(entry, &mut fixed);
        }

        let unpriced = fixed
            .iter()
            .filter(|e| e.best_price().is_none())
            .map(|e| e.name.clone())
            .collect();

        PriceReport {
            entries: fixed,
            unpriced,
        }
    }

    fn fix_entry(&self, mut entry: CatalogEntry, out: &mut Vec<CatalogEntry>) {
        let name = entry.name.clone();

        if entry.rarity_code().is_none() {
            tracing::info!("{} had no rarity, set to {}", name, Rarity::Common);
            entry.rarity = Some(Rarity::Common.code().to_string());
        }

        if let Some(price) = npc_price(&name) {
            tracing::info!("{} set NPC price {}", name, price);
            entry.npc_price = Some(price);
            out.push(entry);
            return;
        }

        if let Some(recipe) = craft_recipe(&name) {
            let price = self.craft_price(recipe);
            tracing::info!("{} craft price = {}", name, price);
            entry.craft_price = Some(price);
            out.push(entry);
            return;
        }

        if let Some(rarities) = multi_rarities(&name) {
            let item_id = entry.item_id().unwrap_or_default();
            for rarity in rarities {
                let mut clone = entry.clone();
                clone.rarity = Some(rarity.code().to_string());
                match self.resolve_tiered_price(&item_id, *rarity) {
                    Some(price) => {
                        tracing::info!("{} ({}) price = {}", name, rarity, price);
                        clone.auction_price = Some(price);
                    }
                    None => tracing::warn!("No recent sales found for {} ({})", name, rarity),
                }
                out.push(clone);
            }
            return;
        }

        if let Some(alias) = price_alias(&name) {
            match self.resolve_price(alias) {
                Some(price) => {
                    tracing::info!("{} priced via {} = {}", name, alias, price);
                    entry.auction_price = Some(price);
                }
                None => tracing::warn!("No recent sales found for {} ({})", name, alias),
            }
            out.push(entry);
            return;
        }

        if entry.needs_price() {
            match entry.item_id().and_then(|id| self.resolve_price(&id)) {
                Some(price) => {
                    tracing::info!("{} = {}", name, price);
                    entry.auction_price = Some(price);
                }
                None => tracing::warn!("No price found for {}", name),
            }
        }

        out.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeSource {
        sales: HashMap<String, Vec<Sale>>,
        tiers: HashMap<String, String>,
        bazaar: HashMap<String, f64>,
        tier_lookups: RefCell<usize>,
    }

    impl FakeSource {
        fn with_sales(mut self, id: &str, prices: &[f64]) -> Self {
            let sales = prices
                .iter()
                .enumerate()
                .map(|(i, p)| Sale::new(format!("{}-{}", id, i), *p))
                .collect();
            self.sales.insert(id.to_string(), sales);
            self
        }

        fn with_bazaar(mut self, id: &str, price: f64) -> Self {
            self.bazaar.insert(id.to_string(), price);
            self
        }
    }

    impl PriceSource for FakeSource {
        fn recent_sales(&self, item_id: &str) -> PriceResult<Vec<Sale>> {
            self.sales
                .get(item_id)
                .cloned()
                .ok_or_else(|| PriceError::Status {
                    status: 404,
                    url: item_id.to_string(),
                })
        }

        fn auction_tier(&self, auction_id: &str) -> PriceResult<Option<String>> {
            *self.tier_lookups.borrow_mut() += 1;
            Ok(self.tiers.get(auction_id).cloned())
        }

        fn bazaar_buy_price(&self, product_id: &str) -> PriceResult<Option<f64>> {
            if product_id == "BROKEN" {
                return Err(PriceError::Request("connection reset".to_string()));
            }
            Ok(self.bazaar.get(product_id).copied())
        }
    }

    fn entry(json: &str) -> CatalogEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_median() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_resolve_price_uses_last_three_sales() {
        let source = FakeSource::default().with_sales("HEGEMONY", &[100.0, 301.0, 200.0, 1.0]);
        let resolver = PriceResolver::new(source);
        assert_eq!(resolver.resolve_price("HEGEMONY"), Some(200.0));
    }

    #[test]
    fn test_zero_median_is_unpriced() {
        let source = FakeSource::default()
            .with_sales("X", &[0.0, 0.0, 5.0])
            .with_sales("ABICASE_SUMSUNG_1", &[0.0, 0.0, 5.0]);
        let resolver = PriceResolver::new(source);
        assert_eq!(resolver.resolve_price("X"), None);

        let report = resolver.fix_prices(vec![
            entry(r#"{"name": "X", "id": "X", "rarity": "EPIC"}"#),
            entry(r#"{"name": "Abicase", "id": "ABICASE", "rarity": "RARE"}"#),
        ]);
        assert_eq!(report.entries[0].auction_price, None);
        assert_eq!(report.entries[1].auction_price, None);
        assert_eq!(report.unpriced, vec!["X", "Abicase"]);

        let (records, skipped) = crate::to_records(&report.entries);
        assert!(records.is_empty());
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn test_resolve_price_truncates_median() {
        let source = FakeSource::default().with_sales("X", &[100.0, 101.0]);
        let resolver = PriceResolver::new(source);
        assert_eq!(resolver.resolve_price("X"), Some(100.0));
    }

    #[test]
    fn test_resolve_price_failures_are_none() {
        let mut source = FakeSource::default();
        source.sales.insert("EMPTY".to_string(), vec![]);
        source.sales.insert(
            "NOPRICE".to_string(),
            vec![Sale {
                uuid: Some("a".to_string()),
                price: None,
            }],
        );
        let resolver = PriceResolver::new(source);

        assert_eq!(resolver.resolve_price("EMPTY"), None);
        assert_eq!(resolver.resolve_price("NOPRICE"), None);
        assert_eq!(resolver.resolve_price("MISSING"), None);
    }

    #[test]
    fn test_tiered_price_stops_after_limit() {
        let prices = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];
        let mut source = FakeSource::default().with_sales("RUNEBOOK", &prices);
        for i in 0..8 {
            let tier = if i == 1 { "rare" } else { "EPIC" };
            source.tiers.insert(format!("RUNEBOOK-{}", i), tier.to_string());
        }
        let resolver = PriceResolver::new(source);

        // EPIC matches: 10, 30, 40, 50, 60 (stops there)
        assert_eq!(resolver.resolve_tiered_price("RUNEBOOK", Rarity::Epic), Some(40.0));
        assert_eq!(*resolver.source().tier_lookups.borrow(), 6);
    }

    #[test]
    fn test_tiered_price_matches_case_insensitively() {
        let mut source = FakeSource::default().with_sales("RUNEBOOK", &[10.0, 20.0]);
        source.tiers.insert("RUNEBOOK-1".to_string(), "rare".to_string());
        let resolver = PriceResolver::new(source);

        assert_eq!(resolver.resolve_tiered_price("RUNEBOOK", Rarity::Rare), Some(20.0));
        assert_eq!(resolver.resolve_tiered_price("RUNEBOOK", Rarity::Mythic), None);
    }

    #[test]
    fn test_tiered_price_ignores_zero_median() {
        let mut source = FakeSource::default().with_sales("RUNEBOOK", &[0.0, 0.0, 5.0]);
        for i in 0..3 {
            source.tiers.insert(format!("RUNEBOOK-{}", i), "EPIC".to_string());
        }
        let resolver = PriceResolver::new(source);

        assert_eq!(resolver.resolve_tiered_price("RUNEBOOK", Rarity::Epic), None);
    }

    #[test]
    fn test_craft_price_skips_missing_ingredients() {
        let source = FakeSource::default()
            .with_bazaar("FRIED_FEATHER", 10.0)
            .with_bazaar("ENCHANTED_GLACITE", 2.5);
        let resolver = PriceResolver::new(source);

        let price = resolver.craft_price(&CRAFT_RECIPES[0]);
        assert_eq!(price, 256.0 * 10.0 + 128.0 * 2.5);
    }

    #[test]
    fn test_upgrade_unit_cost() {
        let source = FakeSource::default().with_bazaar(UPGRADE_PRODUCT_ID, 7_500_000.0);
        let resolver = PriceResolver::new(source);
        assert_eq!(resolver.upgrade_unit_cost(), Some(7_500_000.0));

        let resolver = PriceResolver::new(FakeSource::default());
        assert_eq!(resolver.upgrade_unit_cost(), None);
    }

    #[test]
    fn test_fix_prices() {
        let mut source = FakeSource::default()
            .with_sales("HEGEMONY_ARTIFACT", &[300.0, 100.0, 200.0])
            .with_sales("ABICASE_SUMSUNG_1", &[50.0])
            .with_sales("RUNEBOOK", &[1.0, 2.0])
            .with_bazaar("FRIED_FEATHER", 1.0)
            .with_bazaar("ENCHANTED_GLACITE", 1.0)
            .with_bazaar("ENCHANTED_BLAZE_POWDER", 1.0);
        source.tiers.insert("RUNEBOOK-0".to_string(), "COMMON".to_string());
        source.tiers.insert("RUNEBOOK-1".to_string(), "EPIC".to_string());
        let resolver = PriceResolver::new(&source);

        let report = resolver.fix_prices(vec![
            entry(r#"{"name":"Hegemony Artifact","id":"HEGEMONY_ARTIFACT","rarity":"LEGENDARY"}"#),
            entry(r#"{"name":"Zombie Talisman","id":"ZOMBIE_TALISMAN"}"#),
            entry(r#"{"name":"Fried Frozen Chicken","rarity":"RARE"}"#),
            entry(r#"{"name":"Runebook","id":"RUNEBOOK"}"#),
            entry(r#"{"name":"Abicase","id":"ABICASE","rarity":"RARE"}"#),
            entry(r#"{"name":"Already Priced","rarity":"RARE","auction_price":42}"#),
            entry(r#"{"name":"Unknown","id":"NOPE","rarity":"RARE"}"#),
        ]);

        let by_name = |n: &str| report.entries.iter().find(|e| e.name == n).unwrap();

        assert_eq!(by_name("Hegemony Artifact").auction_price, Some(200.0));

        let zombie = by_name("Zombie Talisman");
        assert_eq!(zombie.npc_price, Some(50.0));
        assert_eq!(zombie.rarity.as_deref(), Some("COMMON"));

        assert_eq!(by_name("Fried Frozen Chicken").craft_price, Some(512.0));
        assert_eq!(by_name("Abicase").auction_price, Some(50.0));
        assert_eq!(by_name("Already Priced").auction_price, Some(42.0));

        let runebooks: Vec<_> = report
            .entries
            .iter()
            .filter(|e| e.name == "Runebook")
            .map(|e| (e.rarity.clone().unwrap(), e.auction_price))
            .collect();
        assert_eq!(
            runebooks,
            vec![
                ("COMMON".to_string(), Some(1.0)),
                ("UNCOMMON".to_string(), None),
                ("RARE".to_string(), None),
                ("EPIC".to_string(), Some(2.0)),
                ("LEGENDARY".to_string(), None),
            ]
        );

        assert_eq!(report.entries.len(), 11);
        assert_eq!(
            report.unpriced,
            vec!["Runebook", "Runebook", "Runebook", "Unknown"]
        );
    }
}
