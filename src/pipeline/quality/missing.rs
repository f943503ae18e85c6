//! Missing-value profiling: sentinel triage then a full null audit

use anyhow::{Context, Result};
use polars::prelude::*;
use regex::Regex;

use super::round2;
use crate::utils::print_info;

/// Literal sentinel the source files use for missingness in text values
pub const SENTINEL: &str = "NA";

/// Values normalized to null: leading "NA" with optional trailing
/// whitespace. Trailing-anchored or embedded "NA" substrings are
/// intentionally left alone.
const SENTINEL_PATTERN: &str = r"^NA\s*";

/// Count the values containing the sentinel substring in each candidate
/// text column, ranked descending. Ties keep the candidate order.
pub fn sentinel_counts(df: &DataFrame, columns: &[String]) -> Result<Vec<(String, usize)>> {
    let mut counts: Vec<(String, usize)> = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df
            .column(name)
            .with_context(|| format!("Missing-value check requires column '{}'", name))?;
        let values = column
            .str()
            .with_context(|| format!("Column '{}' is not text-typed", name))?;
        let count = values.iter().flatten().filter(|v| v.contains(SENTINEL)).count();
        counts.push((name.clone(), count));
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

/// Null out values matching the sentinel pattern in the given text
/// columns, returning a new frame
pub fn normalize_sentinels(df: &DataFrame, columns: &[String]) -> Result<DataFrame> {
    let pattern = Regex::new(SENTINEL_PATTERN).context("Invalid sentinel pattern")?;

    let mut out = df.clone();
    for name in columns {
        let values: Vec<Option<String>> = {
            let values = out
                .column(name)
                .with_context(|| format!("Cannot normalize missing column '{}'", name))?
                .str()
                .with_context(|| format!("Column '{}' is not text-typed", name))?;
            values
                .iter()
                .map(|v| match v {
                    Some(s) if pattern.is_match(s) => None,
                    Some(s) => Some(s.to_string()),
                    None => None,
                })
                .collect()
        };
        out.with_column(Series::new(name.as_str().into(), values))?;
    }
    Ok(out)
}

/// Two-phase missing-value profile.
///
/// Phase one counts sentinel hits per candidate column and normalizes
/// every column whose count exceeds one. Phase two audits true nulls
/// across *all* columns of the normalized frame, not just the
/// candidates. Reported percentages are rounded to 2 decimals,
/// restricted to nonzero columns and sorted descending.
pub fn missing_value_profile(df: &DataFrame, candidates: &[String]) -> Result<Vec<(String, f64)>> {
    let counts = sentinel_counts(df, candidates)?;

    let hits: Vec<String> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| format!("{} ({})", name, count))
        .collect();
    if !hits.is_empty() {
        print_info(&format!("Sentinel 'NA' hits by column: {}", hits.join(", ")));
    }

    let flagged: Vec<String> = counts
        .iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name.clone())
        .collect();

    let normalized = if flagged.is_empty() {
        df.clone()
    } else {
        normalize_sentinels(df, &flagged)?
    };

    let height = normalized.height();
    if height == 0 {
        return Ok(Vec::new());
    }

    let mut profile: Vec<(String, f64)> = Vec::new();
    for column in normalized.get_columns() {
        let nulls = column.null_count();
        if nulls == 0 {
            continue;
        }
        let pct = round2(nulls as f64 / height as f64 * 100.0);
        profile.push((column.name().to_string(), pct));
    }
    profile.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    Ok(profile)
}
