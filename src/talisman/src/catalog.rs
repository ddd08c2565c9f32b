//! Catalog cleanup
//!
//! Removes accessories that should never be planned for (unobtainable,
//! event-only, or otherwise excluded), and splits off soulbound accessories
//! that cannot be bought.

use crate::accessory::CatalogEntry;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Accessories removed outright by name
pub const REMOVED_NAMES: &[&str] = &[
    "Combo Mania",
    "Argofay Trinket",
    "Master Skull - Tier 8",
    "Master Skull - Tier 9",
    "Master Skull - Tier 10",
    "Talisman of Space",
    "Ring of Space",
    "Artifact of Space",
    "Bingo Heirloom",
    "Old Boot",
    "Luck Talisman",
    "Cracked Piggy Bank",
    "Broken Piggy Bank",
    "Compass Talisman",
    "Grizzly Paw",
    "Punchcard Artifact",
    "Warding Trinket",
    "Harmonious Surgery Toolkit",
    "Celestial Starstone",
    "Crux Relic",
    "Crux Artifact",
    "Crux Ring",
    "Crux Heirloom",
    "Crux Talisman",
    "Crux Chronomicon",
    "Defective Monitor",
    "Satelite",
    "Perma-Jelled Garlic-Flavored Re-Heated Gummy Polar Bear",
    "Eternal Crystal",
];

/// Accessories that cannot be traded
pub const SOULBOUND_NAMES: &[&str] = &[
    "Archaeologist's Compass",
    "Sloth Hat of Celebration",
    "Crab Hat of Celebration - 2022 Edition",
    "Crab Hat of Celebration",
    "Odger's Bronze Tooth",
    "Odger's Silver Tooth",
    "Odger's Gold Tooth",
    "Odger's Diamond Tooth",
    "Shady Ring",
    "Crooked Artifact",
    "Seal of the Family",
    "Cat Talisman",
    "Lynx Talisman",
    "Cheetah Talisman",
    "Pig's Foot",
    "Wolf Paw",
    "Frozen Chicken",
    "King Talisman",
    "Book of Progression",
    "Survivor Cube",
    "Jake's Plushie",
    "IQ Point",
    "2 IQ Points",
    "Tiny Dancer",
    "Test Bucket Please Ignore",
    "Big Brain Talisman",
    "Miniaturized Tubulator",
    "Melody's Hair",
    "Kuudra Follower Relic",
    "Kuudra Follower Artifact",
    "Soul Campfire Initiate Badge I",
    "Soul Campfire Adept Badge I",
    "Soul Campfire Cultist Badge I",
    "Soul Campfire Scion Badge I",
    "Soul Campfire God Badge I",
    "Campfire Initiate Badge I",
    "Campfire Adept Badge I",
    "Campfire Cultist Badge I",
    "Campfire Scion Badge I",
    "Campfire God Badge I",
    "Ring of Broken Love",
    "Ring of Eternal Love",
    "Rubbish Ring of Love",
    "§eYellow Rock of Love",
    "Classy Ring of Love",
    "Exquisite Ring of Love",
    "Modest Ring of Love",
    "Mediocre Ring of Love",
    "§eShiny Yellow Rock",
    "Invaluable Ring of Love",
    "Refined Ring of Love",
    "Legendary Ring of Love",
    "Future Calories Talisman",
    "Talisman of Power",
    "Relic of Power",
    "Artifact of Power",
    "Personal Deletor 4000",
    "Personal Deletor 5000",
    "Personal Deletor 6000",
    "Personal Deletor 7000",
];

/// Name fragments that exclude an accessory (upgrade chains and event items)
pub const EXCLUDED_SUBSTRINGS: &[&str] = &["Campfire", "Ring of", "Yellow Rock"];

/// Result of a catalog cleanup pass
#[derive(Debug, Default)]
pub struct FilterReport {
    /// Accessories left for pricing
    pub kept: Vec<CatalogEntry>,
    /// Soulbound accessories split from the catalog
    pub soulbound: Vec<CatalogEntry>,
    /// Count removed by [`REMOVED_NAMES`]
    pub removed_by_name: usize,
    /// Count removed by [`EXCLUDED_SUBSTRINGS`]
    pub removed_by_substring: usize,
}

/// Clean a catalog
///
/// Order matters: the name blacklist runs first, then soulbound accessories
/// are split off, then substring exclusion runs on what remains. Soulbound
/// names that also contain an excluded fragment therefore land in the
/// soulbound list rather than being dropped.
pub fn filter_catalog(entries: Vec<CatalogEntry>) -> FilterReport {
    let mut report = FilterReport::default();

    for entry in entries {
        let name = entry.name.as_str();
        if REMOVED_NAMES.contains(&name) {
            report.removed_by_name += 1;
        } else if SOULBOUND_NAMES.contains(&name) {
            report.soulbound.push(entry);
        } else if EXCLUDED_SUBSTRINGS.iter().any(|s| name.contains(s)) {
            report.removed_by_substring += 1;
        } else {
            report.kept.push(entry);
        }
    }

    tracing::debug!(
        kept = report.kept.len(),
        soulbound = report.soulbound.len(),
        removed_by_name = report.removed_by_name,
        removed_by_substring = report.removed_by_substring,
        "Filtered catalog"
    );

    report
}

/// Load a catalog file (JSON array of accessories)
pub fn load_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Write a catalog file as pretty JSON
pub fn save_catalog(path: &Path, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}
