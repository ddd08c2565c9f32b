//! Accessory plan export

use crate::ranker::RankedEntry;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8 in plan output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serialize a plan as JSON with four-space indentation
pub fn to_json(entries: &[RankedEntry]) -> Result<String, PlanError> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(Vec::new(), formatter);
    entries.serialize(&mut ser)?;
    Ok(String::from_utf8(ser.into_inner())?)
}

/// Write a plan file
pub fn write_plan(path: &Path, entries: &[RankedEntry]) -> Result<(), PlanError> {
    fs::write(path, to_json(entries)?)?;
    Ok(())
}

/// Read a previously written plan file
pub fn read_plan(path: &Path) -> Result<Vec<RankedEntry>, PlanError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// One human-readable line for a plan entry
pub fn format_entry(entry: &RankedEntry) -> String {
    format!(
        "{} | {} coins | {} MP | {} coins/MP",
        entry.name,
        entry.price.trunc(),
        entry.mp,
        entry.coins_per_mp.trunc()
    )
}

/// Totals across a plan
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PlanSummary {
    pub accessories: usize,
    pub upgrades: usize,
    pub total_price: f64,
    pub total_mp: u64,
}

/// Summarize a plan
pub fn summarize(entries: &[RankedEntry]) -> PlanSummary {
    entries.iter().fold(PlanSummary::default(), |mut s, e| {
        if e.is_upgrade() {
            s.upgrades += 1;
        } else {
            s.accessories += 1;
        }
        s.total_price += e.price;
        s.total_mp += u64::from(e.mp);
        s
    })
}
