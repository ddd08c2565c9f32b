//! Ranking command

use crate::coflnet::CoflClient;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use talisman::{CatalogEntry, PriceResolver, RankedEntry};

/// Where the recombobulator price comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpgradeCost {
    /// Look it up on the bazaar
    Lookup,
    /// Use a known price
    Fixed(f64),
    /// Rank without upgrades
    Disabled,
}

impl UpgradeCost {
    pub fn from_args(upgrade_cost: Option<f64>, no_upgrades: bool) -> Self {
        match (upgrade_cost, no_upgrades) {
            (_, true) => Self::Disabled,
            (Some(cost), false) => Self::Fixed(cost),
            (None, false) => Self::Lookup,
        }
    }

    fn resolve(self, config: &Config) -> Option<f64> {
        match self {
            Self::Fixed(cost) => Some(cost),
            Self::Disabled => None,
            Self::Lookup => {
                let cost = PriceResolver::new(CoflClient::new(config)).upgrade_unit_cost();
                if cost.is_none() {
                    println!("Recombobulator price unavailable, ranking without upgrades");
                }
                cost
            }
        }
    }
}

/// Handle the rank command
pub fn handle(inputs: &[PathBuf], output: &Path, upgrade: UpgradeCost, config: &Config) -> Result<()> {
    let entries = load_inputs(inputs)?;
    let unit_cost = upgrade.resolve(config);
    let plan = rank_entries(&entries, unit_cost, output)?;

    for entry in &plan {
        println!("{}", talisman::plan::format_entry(entry));
    }

    let summary = talisman::plan::summarize(&plan);
    println!(
        "Saved {} items to {} ({} accessories, {} upgrades, {} MP for {} coins)",
        plan.len(),
        output.display(),
        summary.accessories,
        summary.upgrades,
        summary.total_mp,
        summary.total_price.trunc()
    );

    Ok(())
}

/// Concatenate the catalogs in `inputs`, skipping files that do not exist
pub fn load_inputs(inputs: &[PathBuf]) -> Result<Vec<CatalogEntry>> {
    let mut all = Vec::new();
    for path in inputs {
        if !path.exists() {
            tracing::warn!("{} not found, skipping", path.display());
            continue;
        }
        let entries = talisman::load_catalog(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?;
        all.extend(entries);
    }
    Ok(all)
}

/// Rank priced entries and write the plan
pub fn rank_entries(
    entries: &[CatalogEntry],
    unit_cost: Option<f64>,
    output: &Path,
) -> Result<Vec<RankedEntry>> {
    let (records, skipped) = talisman::to_records(entries);
    if !skipped.is_empty() {
        println!("Skipped {} accessories without a usable price or rarity", skipped.len());
    }

    let plan = talisman::rank(&records, unit_cost);

    talisman::write_plan(output, &plan)
        .with_context(|| format!("Failed to write plan {}", output.display()))?;

    Ok(plan)
}
