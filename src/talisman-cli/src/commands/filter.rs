//! Catalog filter command

use anyhow::{Context, Result};
use std::path::Path;
use talisman::FilterReport;

/// Handle the filter command
pub fn handle(input: &Path, output: &Path, soulbound: &Path) -> Result<()> {
    let report = filter_files(input, output, soulbound)?;

    println!("Removed {} accessories by name.", report.removed_by_name);
    println!(
        "Moved {} soulbound accessories into {}",
        report.soulbound.len(),
        soulbound.display()
    );
    println!(
        "Removed {} accessories containing {}.",
        report.removed_by_substring,
        talisman::catalog::EXCLUDED_SUBSTRINGS
            .iter()
            .map(|s| format!("'{}'", s))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "Cleaned list saved to {} with {} accessories.",
        output.display(),
        report.kept.len()
    );

    Ok(())
}

/// Filter `input`, writing the kept and soulbound accessories
pub fn filter_files(input: &Path, output: &Path, soulbound: &Path) -> Result<FilterReport> {
    let entries = talisman::load_catalog(input)
        .with_context(|| format!("Failed to load catalog {}", input.display()))?;

    let report = talisman::filter_catalog(entries);

    talisman::save_catalog(output, &report.kept)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    talisman::save_catalog(soulbound, &report.soulbound)
        .with_context(|| format!("Failed to write {}", soulbound.display()))?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_filter_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("accessories.json");
        let output = dir.path().join("accessories_clean.json");
        let soulbound = dir.path().join("accessories_soulbound.json");
        fs::write(
            &input,
            r#"[
                {"name": "Old Boot", "rarity": "COMMON"},
                {"name": "Pig's Foot", "rarity": "RARE"},
                {"name": "Campfire Talisman", "rarity": "COMMON"},
                {"name": "Wither Relic", "id": "WITHER_RELIC", "rarity": "EPIC"}
            ]"#,
        )
        .unwrap();

        let report = filter_files(&input, &output, &soulbound).unwrap();
        assert_eq!(report.removed_by_name, 1);
        assert_eq!(report.removed_by_substring, 1);

        let kept = talisman::load_catalog(&output).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].item_id().as_deref(), Some("WITHER_RELIC"));

        let bound = talisman::load_catalog(&soulbound).unwrap();
        assert_eq!(bound[0].name, "Pig's Foot");
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = filter_files(
            &dir.path().join("missing.json"),
            &dir.path().join("out.json"),
            &dir.path().join("bound.json"),
        );
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to load catalog"));
    }
}
