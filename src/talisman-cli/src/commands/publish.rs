//! Publish command

use anyhow::{Context, Result};
use std::path::Path;

/// Handle the publish command
pub fn handle(source: &Path, dest: &Path) -> Result<()> {
    let report = talisman::publish::publish(source, dest)
        .with_context(|| format!("Failed to publish to {}", dest.display()))?;

    for path in &report.copied {
        println!("Copied {}", path.display());
    }
    for name in &report.missing {
        println!("File {} not found in {}", name, source.display());
    }

    Ok(())
}
