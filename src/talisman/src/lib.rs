//! # talisman
//!
//! Accessory cost-efficiency planner library.
//!
//! This library provides functionality to:
//! - Clean an accessory catalog (blacklist, soulbound split, name filters)
//! - Fill in missing prices from auction and bazaar data
//! - Rank accessories by coins per magical power, interleaving bulk
//!   recombobulation steps where upgrading beats buying
//! - Export the resulting plan
//!
//! ## Example
//!
//! ```
//! use talisman::{rank, AccessoryRecord, Rarity};
//!
//! let items = vec![
//!     AccessoryRecord::new("A", Rarity::Common, 10.0),
//!     AccessoryRecord::new("B", Rarity::Common, 10.0),
//!     AccessoryRecord::new("C", Rarity::Uncommon, 100.0),
//! ];
//!
//! let plan = rank(&items, Some(7.0));
//! assert_eq!(plan[2].name, "Recombobulate 2 COMMON accessories");
//! assert_eq!(plan[3].name, "C");
//! ```

pub mod accessory;
pub mod catalog;
pub mod plan;
pub mod price;
pub mod publish;
pub mod ranker;
pub mod reference;

// Re-export commonly used items
#[doc(inline)]
pub use accessory::{to_records, AccessoryRecord, CatalogEntry, ItemId, Skip, SkipReason};
#[doc(inline)]
pub use catalog::{filter_catalog, load_catalog, save_catalog, CatalogError, FilterReport};
#[doc(inline)]
pub use plan::{write_plan, PlanError};
#[doc(inline)]
pub use price::{PriceError, PriceReport, PriceResolver, PriceResult, PriceSource, Sale};
#[doc(inline)]
pub use ranker::{rank, RankedEntry, Upgrade, UpgradeCounters};
#[doc(inline)]
pub use reference::{ParseError, Rarity};
