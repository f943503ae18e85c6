//! Data-quality diagnostics: duplicate keys, missing values, outliers

pub mod duplicates;
pub mod missing;
pub mod outliers;

pub use duplicates::*;
pub use missing::*;
pub use outliers::*;

use std::path::{Path, PathBuf};

use anyhow::Result;
use polars::prelude::*;

/// Default key columns for duplicate detection: the loan uniqueness key
pub const DEFAULT_DUPLICATE_KEYS: [&str; 4] = [
    "As_of_Year",
    "Agency_Code",
    "Respondent_ID",
    "Sequence_Number",
];

/// Accumulated results of the checks run so far.
///
/// `None` means a check has not run. The duplicate slot further
/// distinguishes a clean scan from found keys, so absent-vs-present is a
/// type-level distinction rather than a map-key convention.
#[derive(Debug, Clone, Default)]
pub struct QualityReport {
    pub duplicates: Option<DuplicateCheck>,
    pub missing_values: Option<Vec<(String, f64)>>,
    pub outliers: Option<Vec<(String, f64)>>,
}

impl QualityReport {
    /// True when no check has run yet
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_none() && self.missing_values.is_none() && self.outliers.is_none()
    }

    /// True when at least one check produced content for the spreadsheet.
    /// A clean duplicate scan writes no sheet, so it does not count.
    pub fn has_reportable_results(&self) -> bool {
        self.missing_values.is_some()
            || self.outliers.is_some()
            || matches!(&self.duplicates, Some(d) if !d.is_clean())
    }
}

/// Runs the quality checks against one working dataset.
///
/// The dataset is held immutably; checks that need numeric coercion work
/// on their own coerced copy, so the checks are independent and may run
/// in any order, each overwriting only its own report slot.
#[derive(Debug)]
pub struct QualityChecker {
    df: DataFrame,
    report: QualityReport,
}

impl QualityChecker {
    pub fn new(df: DataFrame) -> Self {
        Self {
            df,
            report: QualityReport::default(),
        }
    }

    pub fn dataset(&self) -> &DataFrame {
        &self.df
    }

    pub fn report(&self) -> &QualityReport {
        &self.report
    }

    /// Detect rows duplicated on the key-column tuple (defaults to the
    /// loan uniqueness key). Violations are flagged, never repaired.
    pub fn check_duplicate(&mut self, key_columns: Option<&[&str]>) -> Result<&DuplicateCheck> {
        let keys = key_columns.unwrap_or(&DEFAULT_DUPLICATE_KEYS);
        let result = find_duplicate_keys(&self.df, keys)?;
        Ok(self.report.duplicates.insert(result))
    }

    /// Profile missing values: sentinel triage over the candidate text
    /// columns (defaults to every text-typed column), then a null audit
    /// across the whole dataset.
    pub fn check_missing_value(&mut self, columns: Option<&[&str]>) -> Result<&[(String, f64)]> {
        let candidates: Vec<String> = match columns {
            Some(names) => names.iter().map(|n| n.to_string()).collect(),
            None => text_columns(&self.df),
        };
        let profile = missing_value_profile(&self.df, &candidates)?;
        Ok(self.report.missing_values.insert(profile))
    }

    /// Scan for outliers with the MAD modified z-score over the candidate
    /// columns (defaults to every numeric column of the coerced frame).
    pub fn check_outlier(&mut self, columns: Option<&[&str]>) -> Result<&[(String, f64)]> {
        let coerced = convert_fill(&self.df)?;
        let candidates: Vec<String> = match columns {
            Some(names) => names.iter().map(|n| n.to_string()).collect(),
            None => numeric_columns(&coerced),
        };
        let profile = outlier_profile(&coerced, &candidates)?;
        Ok(self.report.outliers.insert(profile))
    }

    /// Export the populated report slots to a timestamped spreadsheet
    /// under `dir`, one sheet per populated check.
    pub fn create_report(&self, dir: &Path) -> Result<PathBuf> {
        crate::report::write_quality_report(&self.report, dir)
    }
}

/// Names of the text-typed columns, in frame order
pub fn text_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| c.name().to_string())
        .collect()
}

/// Names of the numeric columns, in frame order
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|c| {
            matches!(
                c.dtype(),
                DataType::Int8
                    | DataType::Int16
                    | DataType::Int32
                    | DataType::Int64
                    | DataType::UInt8
                    | DataType::UInt16
                    | DataType::UInt32
                    | DataType::UInt64
                    | DataType::Float32
                    | DataType::Float64
            )
        })
        .map(|c| c.name().to_string())
        .collect()
}

/// Round a percentage to two decimals for reporting
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
