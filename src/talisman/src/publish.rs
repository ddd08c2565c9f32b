//! Copy pipeline artifacts to the planner frontend

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Files produced by the pipeline, in the order they are written
pub const ARTIFACTS: &[&str] = &[
    "accessories.json",
    "accessories_clean.json",
    "accessories_fixed.json",
    "accessories_soulbound.json",
    "accessory_plan.json",
];

/// Default destination, relative to the working directory
pub const DEFAULT_DESTINATION: &str = "accessory-planner/public";

#[derive(Debug, Default, PartialEq)]
pub struct PublishReport {
    pub copied: Vec<PathBuf>,
    pub missing: Vec<String>,
}

/// Copy each artifact from `source` into `dest`
///
/// Artifacts that do not exist yet are reported as missing. The destination
/// directory is created if needed.
pub fn publish(source: &Path, dest: &Path) -> io::Result<PublishReport> {
    fs::create_dir_all(dest)?;

    let mut report = PublishReport::default();
    for name in ARTIFACTS {
        let src = source.join(name);
        if !src.is_file() {
            tracing::debug!("{} not found in {}", name, source.display());
            report.missing.push((*name).to_string());
            continue;
        }

        let target = dest.join(name);
        fs::copy(&src, &target)?;
        report.copied.push(target);
    }

    Ok(report)
}
