//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "talisman")]
#[command(about = "Accessory planner - price accessories and rank them by coins per magical power", long_about = None)]
pub struct Cli {
    /// CoflNet API base URL (overrides the configured value)
    #[arg(long, global = true, env = "TALISMAN_API_BASE")]
    pub api_base: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove excluded accessories and split off soulbound ones
    #[command(visible_alias = "f")]
    Filter {
        /// Raw accessory catalog
        #[arg(short, long, default_value = "accessories.json")]
        input: PathBuf,

        /// Cleaned catalog
        #[arg(short, long, default_value = "accessories_clean.json")]
        output: PathBuf,

        /// Where soulbound accessories are written
        #[arg(long, default_value = "accessories_soulbound.json")]
        soulbound: PathBuf,
    },

    /// Fill in missing prices from auction and bazaar data
    #[command(visible_alias = "p")]
    Price {
        /// Cleaned catalog
        #[arg(short, long, default_value = "accessories_clean.json")]
        input: PathBuf,

        /// Priced catalog
        #[arg(short, long, default_value = "accessories_fixed.json")]
        output: PathBuf,
    },

    /// Rank accessories by coins per magical power
    #[command(visible_alias = "r")]
    Rank {
        /// Priced catalogs (missing files are skipped)
        #[arg(short, long, num_args = 1.., default_value = "accessories_fixed.json")]
        input: Vec<PathBuf>,

        /// Plan output
        #[arg(short, long, default_value = "accessory_plan.json")]
        output: PathBuf,

        /// Recombobulator price to use instead of looking it up
        #[arg(long, conflicts_with = "no_upgrades", value_parser = parse_upgrade_cost)]
        upgrade_cost: Option<f64>,

        /// Rank without recombobulation steps
        #[arg(long)]
        no_upgrades: bool,
    },

    /// Copy pipeline output files to the planner frontend
    Publish {
        /// Directory containing the pipeline files
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Destination directory
        #[arg(short, long, default_value = talisman::publish::DEFAULT_DESTINATION)]
        dest: PathBuf,
    },

    /// Run filter, price, and rank in one go
    Run {
        /// Working directory holding accessories.json
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Also publish the results to this directory
        #[arg(long)]
        publish: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default API base URL
        #[arg(long = "set-api-base")]
        set_api_base: Option<String>,

        /// Set the request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Set the number of retries for failed requests
        #[arg(long)]
        retries: Option<u32>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

/// A recombobulator price must be a finite, non-negative number of coins
fn parse_upgrade_cost(s: &str) -> Result<f64, String> {
    let cost: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(format!("{} is not a valid price", s));
    }
    Ok(cost)
}
