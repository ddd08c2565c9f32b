//! Coins-per-magical-power ranking
//!
//! Orders accessories by how cheaply they buy magical power and interleaves
//! bulk recombobulation steps at the point where upgrading the accessories
//! already bought beats buying the next one.
//!
//! The pass is greedy: at every step the cheapest remaining source of
//! magical power is taken, and "upgrade the `n` accessories of rarity `r`
//! bought so far" is one such source with a fixed cost per point.

use crate::accessory::{coins_per_mp, AccessoryRecord};
use crate::reference::Rarity;
use serde::{Deserialize, Serialize};

/// Marker carried by synthetic bulk-upgrade entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Rarity of the accessories being upgraded
    pub from: Rarity,
    /// How many accessories are upgraded together
    pub count: u32,
}

/// One row of the accessory plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub name: String,
    /// Rarity of the accessory, or the rarity reached for upgrade entries
    pub rarity: Rarity,
    pub price: f64,
    pub mp: u32,
    #[serde(rename = "coinsPerMP")]
    pub coins_per_mp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<Upgrade>,
}

impl RankedEntry {
    fn accessory(record: &AccessoryRecord, coins_per_mp: f64) -> Self {
        Self {
            name: record.name.clone(),
            rarity: record.rarity,
            price: record.price,
            mp: record.magical_power,
            coins_per_mp,
            upgrade: None,
        }
    }

    /// Build the entry for upgrading `count` accessories of `from` at
    /// `unit_cost` each. Returns `None` for terminal tiers or an empty stock.
    pub fn bulk_upgrade(from: Rarity, count: u32, unit_cost: f64) -> Option<Self> {
        let to = from.next()?;
        let mp = from.upgrade_gain() * count;
        if mp == 0 {
            return None;
        }
        let price = unit_cost * f64::from(count);
        let plural = if count == 1 { "y" } else { "ies" };

        Some(Self {
            name: format!("Recombobulate {} {} accessor{}", count, from, plural),
            rarity: to,
            price,
            mp,
            coins_per_mp: coins_per_mp(price, mp),
            upgrade: Some(Upgrade { from, count }),
        })
    }

    /// True for synthetic bulk-upgrade entries
    pub fn is_upgrade(&self) -> bool {
        self.upgrade.is_some()
    }
}

/// Per-rarity count of accessories bought since that rarity's last upgrade
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeCounters([u32; Rarity::COUNT]);

impl UpgradeCounters {
    pub fn get(&self, rarity: Rarity) -> u32 {
        self.0[rarity as usize]
    }

    pub fn increment(&mut self, rarity: Rarity) {
        self.0[rarity as usize] += 1;
    }

    /// Reset a rarity's counter, returning what it held
    pub fn take(&mut self, rarity: Rarity) -> u32 {
        std::mem::take(&mut self.0[rarity as usize])
    }

    /// Non-zero counters in rarity order
    pub fn pending(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        Rarity::ALL
            .into_iter()
            .map(|r| (r, self.get(r)))
            .filter(|(_, count)| *count > 0)
    }
}

/// Rank accessories by coins per magical power
///
/// `upgrade_unit_cost` is the price of one recombobulation. When it is
/// `None` the output is just the sorted accessories. Ties keep input order
/// and an upgrade only fires when the next accessory is strictly more
/// expensive per point than the upgrade.
pub fn rank(items: &[AccessoryRecord], upgrade_unit_cost: Option<f64>) -> Vec<RankedEntry> {
    let mut sorted: Vec<(&AccessoryRecord, f64)> =
        items.iter().map(|r| (r, r.coins_per_mp())).collect();
    // `sort_by` is stable
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut counters = UpgradeCounters::default();
    let mut output = Vec::with_capacity(sorted.len());

    for (record, cpp) in sorted {
        if let Some(unit_cost) = upgrade_unit_cost {
            if cpp.is_finite() {
                emit_upgrades(&mut counters, unit_cost, cpp, &mut output);
            }
        }

        output.push(RankedEntry::accessory(record, cpp));
        counters.increment(record.rarity);
    }

    output
}

/// Emit a bulk upgrade for every rarity whose upgrade now beats `next_cpp`
fn emit_upgrades(
    counters: &mut UpgradeCounters,
    unit_cost: f64,
    next_cpp: f64,
    output: &mut Vec<RankedEntry>,
) {
    let due: Vec<Rarity> = counters
        .pending()
        .filter(|(rarity, _)| {
            let gain = rarity.upgrade_gain();
            gain > 0 && next_cpp > unit_cost / f64::from(gain)
        })
        .map(|(rarity, _)| rarity)
        .collect();

    for rarity in due {
        let count = counters.take(rarity);
        if let Some(entry) = RankedEntry::bulk_upgrade(rarity, count, unit_cost) {
            output.push(entry);
        }
    }
}
