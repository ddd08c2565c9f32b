//! Rarity reference data
//!
//! Hardcoded magical power values per rarity and the gain from upgrading
//! (recombobulating) an accessory one tier. The table is indexed by
//! `Rarity as usize`, so every rarity has exactly one row.

use serde::{Deserialize, Serialize};

/// Accessory rarity, ordered from lowest to highest tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "COMMON")]
    Common,
    #[serde(rename = "UNCOMMON")]
    Uncommon,
    #[serde(rename = "RARE")]
    Rare,
    #[serde(rename = "EPIC")]
    Epic,
    #[serde(rename = "LEGENDARY")]
    Legendary,
    #[serde(rename = "MYTHIC")]
    Mythic,
    #[serde(rename = "SPECIAL")]
    Special,
    #[serde(rename = "VERY SPECIAL")]
    VerySpecial,
}

impl Rarity {
    /// Number of rarity tiers
    pub const COUNT: usize = 8;

    /// All rarities in table order
    pub const ALL: [Rarity; Self::COUNT] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Special,
        Rarity::VerySpecial,
    ];

    /// Reference row for this rarity
    pub fn info(self) -> &'static RarityInfo {
        &RARITY_TABLE[self as usize]
    }

    /// Magical power granted by an accessory of this rarity
    pub fn magical_power(self) -> u32 {
        self.info().magical_power
    }

    /// Magical power gained by upgrading one accessory of this rarity
    pub fn upgrade_gain(self) -> u32 {
        self.info().upgrade_gain
    }

    /// Rarity reached by upgrading, `None` for terminal tiers
    pub fn next(self) -> Option<Rarity> {
        self.info().next
    }

    /// Exact uppercase code used in catalog files
    pub fn code(self) -> &'static str {
        self.info().code
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Rarity {
    type Err = ParseError;

    /// Case-sensitive: only the exact uppercase codes are recognized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        rarity_by_code(s)
            .map(|r| r.rarity)
            .ok_or_else(|| ParseError::InvalidRarity(s.to_string()))
    }
}

/// Parse errors for string conversions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid rarity: {0}")]
    InvalidRarity(String),
}

/// Rarity tier information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarityInfo {
    pub rarity: Rarity,
    pub code: &'static str,
    /// Magical power granted by one accessory of this tier
    pub magical_power: u32,
    /// Magical power gained by recombobulating one accessory of this tier.
    /// Zero for tiers that cannot be upgraded further.
    pub upgrade_gain: u32,
    pub next: Option<Rarity>,
}

/// All rarity tiers, indexed by `Rarity as usize`
pub const RARITY_TABLE: [RarityInfo; Rarity::COUNT] = [
    RarityInfo {
        rarity: Rarity::Common,
        code: "COMMON",
        magical_power: 3,
        upgrade_gain: 2,
        next: Some(Rarity::Uncommon),
    },
    RarityInfo {
        rarity: Rarity::Uncommon,
        code: "UNCOMMON",
        magical_power: 5,
        upgrade_gain: 3,
        next: Some(Rarity::Rare),
    },
    RarityInfo {
        rarity: Rarity::Rare,
        code: "RARE",
        magical_power: 8,
        upgrade_gain: 4,
        next: Some(Rarity::Epic),
    },
    RarityInfo {
        rarity: Rarity::Epic,
        code: "EPIC",
        magical_power: 12,
        upgrade_gain: 4,
        next: Some(Rarity::Legendary),
    },
    RarityInfo {
        rarity: Rarity::Legendary,
        code: "LEGENDARY",
        magical_power: 16,
        upgrade_gain: 6,
        next: Some(Rarity::Mythic),
    },
    RarityInfo {
        rarity: Rarity::Mythic,
        code: "MYTHIC",
        magical_power: 22,
        upgrade_gain: 0,
        next: None,
    },
    RarityInfo {
        rarity: Rarity::Special,
        code: "SPECIAL",
        magical_power: 3,
        upgrade_gain: 2,
        next: Some(Rarity::VerySpecial),
    },
    RarityInfo {
        rarity: Rarity::VerySpecial,
        code: "VERY SPECIAL",
        magical_power: 5,
        upgrade_gain: 0,
        next: None,
    },
];

/// Get rarity tier by catalog code
pub fn rarity_by_code(code: &str) -> Option<&'static RarityInfo> {
    RARITY_TABLE.iter().find(|r| r.code == code)
}
