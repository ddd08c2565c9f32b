//! Full pipeline command

use super::rank::UpgradeCost;
use crate::config::Config;
use anyhow::Result;
use std::path::Path;

/// Handle the run command: filter, price, rank, and optionally publish
pub fn handle(dir: &Path, publish: Option<&Path>, config: &Config) -> Result<()> {
    let raw = dir.join("accessories.json");
    let clean = dir.join("accessories_clean.json");
    let soulbound = dir.join("accessories_soulbound.json");
    let fixed = dir.join("accessories_fixed.json");
    let plan = dir.join("accessory_plan.json");

    super::filter::handle(&raw, &clean, &soulbound)?;
    super::price::handle(&clean, &fixed, config)?;
    super::rank::handle(&[fixed], &plan, UpgradeCost::Lookup, config)?;

    if let Some(dest) = publish {
        super::publish::handle(dir, dest)?;
    }

    Ok(())
}
