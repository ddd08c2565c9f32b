//! Price fixing command

use crate::coflnet::CoflClient;
use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;
use talisman::{PriceReport, PriceResolver, PriceSource};

/// Handle the price command
pub fn handle(input: &Path, output: &Path, config: &Config) -> Result<()> {
    println!("Fetching prices from {}...", config.api_base);
    let client = CoflClient::new(config);
    let report = price_files(input, output, &client)?;

    println!(
        "Fixed prices saved to {} ({} accessories)",
        output.display(),
        report.entries.len()
    );
    if !report.unpriced.is_empty() {
        println!("  Still unpriced: {}", report.unpriced.len());
        for name in &report.unpriced {
            println!("    {}", name);
        }
    }

    Ok(())
}

/// Price the catalog in `input` and write it to `output`
pub fn price_files<S: PriceSource>(input: &Path, output: &Path, source: S) -> Result<PriceReport> {
    let entries = talisman::load_catalog(input)
        .with_context(|| format!("Failed to load catalog {}", input.display()))?;

    let report = PriceResolver::new(source).fix_prices(entries);

    talisman::save_catalog(output, &report.entries)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(report)
}
