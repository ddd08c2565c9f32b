//! Accessory records
//!
//! [`CatalogEntry`] is the loose shape of an accessory in the catalog JSON
//! files. [`AccessoryRecord`] is the validated, priced form consumed by the
//! ranker.

use crate::reference::Rarity;
use serde::{Deserialize, Deserializer, Serialize};

/// Item identifier as it appears in catalog files (string tag or number)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Tag(String),
    Number(serde_json::Number),
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tag(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One accessory as stored in a catalog file
///
/// Fields this crate does not understand are kept in `extra` so rewriting a
/// catalog never loses data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub auction_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub craft_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub npc_price: Option<f64>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Accept a number or a numeric string; anything else reads as no price
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let price = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(price.filter(|p| p.is_finite()))
}

impl CatalogEntry {
    /// Create a bare entry with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Best available price: auction, then craft, then NPC
    pub fn best_price(&self) -> Option<f64> {
        self.auction_price.or(self.craft_price).or(self.npc_price)
    }

    /// True when no source has produced a usable (non-zero) price yet
    pub fn needs_price(&self) -> bool {
        [self.auction_price, self.craft_price, self.npc_price]
            .iter()
            .all(|p| p.map_or(true, |v| v == 0.0))
    }

    /// Item id rendered as a string, as the price API expects
    pub fn item_id(&self) -> Option<String> {
        self.id.as_ref().map(ToString::to_string)
    }

    /// Rarity code, treating an empty string as missing
    pub fn rarity_code(&self) -> Option<&str> {
        self.rarity.as_deref().filter(|r| !r.is_empty())
    }
}

/// A priced accessory with a recognized rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessoryRecord {
    pub name: String,
    pub rarity: Rarity,
    pub price: f64,
    pub magical_power: u32,
}

impl AccessoryRecord {
    /// Create a record using the reference magical power for its rarity
    pub fn new(name: impl Into<String>, rarity: Rarity, price: f64) -> Self {
        Self {
            name: name.into(),
            rarity,
            price,
            magical_power: rarity.magical_power(),
        }
    }

    /// Price per point of magical power; infinite when the record has none
    pub fn coins_per_mp(&self) -> f64 {
        coins_per_mp(self.price, self.magical_power)
    }
}

/// `price / mp`, with zero magical power treated as infinitely expensive
pub fn coins_per_mp(price: f64, magical_power: u32) -> f64 {
    if magical_power == 0 {
        f64::INFINITY
    } else {
        price / f64::from(magical_power)
    }
}

/// Why a catalog entry could not be ranked
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingPrice,
    InvalidPrice(f64),
    UnknownRarity(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrice => write!(f, "no price"),
            Self::InvalidPrice(p) => write!(f, "invalid price {}", p),
            Self::UnknownRarity(r) if r.is_empty() => write!(f, "no rarity"),
            Self::UnknownRarity(r) => write!(f, "unknown rarity {:?}", r),
        }
    }
}

/// A catalog entry excluded from ranking
#[derive(Debug, Clone, PartialEq)]
pub struct Skip {
    pub name: String,
    pub reason: SkipReason,
}

/// Convert catalog entries into ranker input
///
/// Entries without a price, with a negative or non-finite price, or with an
/// unrecognized rarity are returned as skips instead of failing the pass.
pub fn to_records(entries: &[CatalogEntry]) -> (Vec<AccessoryRecord>, Vec<Skip>) {
    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = Vec::new();

    for entry in entries {
        match to_record(entry) {
            Ok(record) => records.push(record),
            Err(reason) => {
                tracing::warn!("Skipping {}: {}", entry.name, reason);
                skipped.push(Skip {
                    name: entry.name.clone(),
                    reason,
                });
            }
        }
    }

    (records, skipped)
}

fn to_record(entry: &CatalogEntry) -> Result<AccessoryRecord, SkipReason> {
    let price = entry.best_price().ok_or(SkipReason::MissingPrice)?;
    if !price.is_finite() || price < 0.0 {
        return Err(SkipReason::InvalidPrice(price));
    }

    let code = entry.rarity.as_deref().unwrap_or_default();
    let rarity = code
        .parse::<Rarity>()
        .map_err(|_| SkipReason::UnknownRarity(code.to_string()))?;

    Ok(AccessoryRecord::new(entry.name.clone(), rarity, price))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> CatalogEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_unparseable_price_falls_through() {
        let e = entry(r#"{"name":"Odd","rarity":"RARE","auction_price":"N/A","npc_price":200}"#);
        assert_eq!(e.auction_price, None);
        assert_eq!(e.best_price(), Some(200.0));

        let e = entry(r#"{"name":"A","auction_price":" 1500 ","craft_price":[1],"npc_price":"NaN"}"#);
        assert_eq!(e.auction_price, Some(1500.0));
        assert_eq!(e.craft_price, None);
        assert_eq!(e.npc_price, None);

        let e = entry(r#"{"name":"A","auction_price":null}"#);
        assert!(e.needs_price());
    }

    #[test]
    fn test_best_price_priority() {
        let e = entry(r#"{"name":"A","auction_price":10,"craft_price":5,"npc_price":1}"#);
        assert_eq!(e.best_price(), Some(10.0));

        let e = entry(r#"{"name":"A","craft_price":5,"npc_price":1}"#);
        assert_eq!(e.best_price(), Some(5.0));

        let e = entry(r#"{"name":"A","auction_price":null,"npc_price":1}"#);
        assert_eq!(e.best_price(), Some(1.0));

        assert_eq!(CatalogEntry::named("A").best_price(), None);
    }

    #[test]
    fn test_needs_price_ignores_zero() {
        let e = entry(r#"{"name":"A","auction_price":0}"#);
        assert!(e.needs_price());
        let e = entry(r#"{"name":"A","npc_price":50}"#);
        assert!(!e.needs_price());
    }

    #[test]
    fn test_item_id_accepts_numbers() {
        let e = entry(r#"{"name":"A","id":1234}"#);
        assert_eq!(e.item_id().as_deref(), Some("1234"));
        let e = entry(r#"{"name":"A","id":"WOLF_PAW"}"#);
        assert_eq!(e.item_id().as_deref(), Some("WOLF_PAW"));
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let e = entry(r#"{"name":"A","wiki":"https://example.invalid/a","tags":[1,2]}"#);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["wiki"], "https://example.invalid/a");
        assert_eq!(json["tags"][1], 2);
        assert!(json.get("auction_price").is_none());
    }

    #[test]
    fn test_to_records_skips_unusable_entries() {
        let entries = vec![
            entry(r#"{"name":"Good","rarity":"EPIC","auction_price":1200}"#),
            entry(r#"{"name":"NoPrice","rarity":"EPIC"}"#),
            entry(r#"{"name":"Lowercase","rarity":"epic","npc_price":10}"#),
            entry(r#"{"name":"NoRarity","npc_price":10}"#),
            entry(r#"{"name":"Negative","rarity":"RARE","npc_price":-5}"#),
        ];

        let (records, skipped) = to_records(&entries);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Good");
        assert_eq!(records[0].magical_power, 12);
        assert_eq!(records[0].coins_per_mp(), 100.0);

        let reasons: Vec<_> = skipped.iter().map(|s| s.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::MissingPrice,
                SkipReason::UnknownRarity("epic".to_string()),
                SkipReason::UnknownRarity(String::new()),
                SkipReason::InvalidPrice(-5.0),
            ]
        );
    }

    #[test]
    fn test_zero_magical_power_is_infinite() {
        assert!(coins_per_mp(100.0, 0).is_infinite());
        assert!(coins_per_mp(0.0, 0).is_infinite());
        assert_eq!(coins_per_mp(0.0, 3), 0.0);
    }
}
