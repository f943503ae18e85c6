//! Robust outlier detection via the MAD modified z-score

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;

use super::round2;

/// 0.75 quantile of the standard normal: the consistency-scaling
/// constant of the modified z-score
pub const CONSISTENCY_SCALE: f64 = 0.6744897501960817;

/// Modified z-scores above this flag a value as an outlier
pub const Z_THRESHOLD: f64 = 3.5;

/// Columns coerced to numeric and mean-filled before outlier scanning
pub const CONVERT_FILL_COLUMNS: [&str; 6] = [
    "Applicant_Income_000",
    "Number_of_Owner_Occupied_Units",
    "Tract_to_MSA_MD_Income_Pct",
    "Census_Tract_Number",
    "FFIEC_Median_Family_Income",
    "Assets_000_Panel",
];

/// Coerce the fixed six columns to float and fill remaining nulls with
/// the column mean.
///
/// Unparseable values become null rather than erroring (lenient by
/// contract for this step only). A column with no parseable values keeps
/// its nulls. Columns absent from the input are skipped, so the step
/// works on raw loans, raw institutions or the merged view alike.
/// Returns a new frame; the input is untouched.
pub fn convert_fill(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for name in CONVERT_FILL_COLUMNS {
        if out.column(name).is_err() {
            continue;
        }
        let values = coerce_numeric(out.column(name)?)
            .with_context(|| format!("Cannot coerce column '{}' to numeric", name))?;

        let present: Vec<f64> = values.iter().flatten().copied().collect();
        let mean = if present.is_empty() {
            None
        } else {
            Some(present.iter().sum::<f64>() / present.len() as f64)
        };

        let filled: Vec<Option<f64>> = match mean {
            Some(mean) => values.into_iter().map(|v| Some(v.unwrap_or(mean))).collect(),
            None => values,
        };
        out.with_column(Series::new(name.into(), filled))?;
    }
    Ok(out)
}

fn coerce_numeric(column: &Column) -> Result<Vec<Option<f64>>> {
    match column.dtype() {
        DataType::String => Ok(column
            .str()?
            .iter()
            .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect()),
        _ => {
            let casted = column.cast(&DataType::Float64)?;
            Ok(casted.f64()?.iter().collect())
        }
    }
}

/// Indices of values whose modified z-score exceeds the threshold.
///
/// MAD = 0 policy (zero dispersion around the median): any value not
/// equal to the median is an outlier and median-equal values are not.
/// An empty or NaN-bearing input yields no outliers, since a poisoned
/// median carries no meaningful deviation ranking.
pub fn outlier_indices(values: &[f64]) -> Vec<usize> {
    if values.is_empty() || values.iter().any(|v| v.is_nan()) {
        return Vec::new();
    }

    let med = median(values);
    let diffs: Vec<f64> = values.iter().map(|v| (v - med).abs()).collect();
    let mad = median(&diffs);

    if mad == 0.0 {
        return diffs
            .iter()
            .enumerate()
            .filter_map(|(i, d)| (*d > 0.0).then_some(i))
            .collect();
    }

    diffs
        .iter()
        .enumerate()
        .filter_map(|(i, d)| (CONSISTENCY_SCALE * d / mad > Z_THRESHOLD).then_some(i))
        .collect()
}

/// Per-column outlier percentages: percentage of rows flagged, rounded
/// to 2 decimals, nonzero only, sorted descending. Columns are scanned
/// in parallel; a column still holding nulls yields no outliers.
pub fn outlier_profile(df: &DataFrame, columns: &[String]) -> Result<Vec<(String, f64)>> {
    let height = df.height();
    if height == 0 {
        return Ok(Vec::new());
    }

    let mut extracted: Vec<(String, Vec<Option<f64>>)> = Vec::with_capacity(columns.len());
    for name in columns {
        let column = df
            .column(name)
            .with_context(|| format!("Outlier check requires column '{}'", name))?;
        let casted = column
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' cannot be scanned numerically", name))?;
        extracted.push((name.clone(), casted.f64()?.iter().collect()));
    }

    let mut profile: Vec<(String, f64)> = extracted
        .par_iter()
        .filter_map(|(name, values)| {
            let count = count_outliers(values);
            if count == 0 {
                None
            } else {
                Some((name.clone(), round2(count as f64 / height as f64 * 100.0)))
            }
        })
        .collect();

    profile.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    Ok(profile)
}

fn count_outliers(values: &[Option<f64>]) -> usize {
    if values.iter().any(|v| v.is_none()) {
        return 0;
    }
    let values: Vec<f64> = values.iter().flatten().copied().collect();
    outlier_indices(&values).len()
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
