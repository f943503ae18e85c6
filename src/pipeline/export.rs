//! Filtered JSON export of a dataset in split orientation

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Local;
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::utils::print_info;

/// Column the optional state-membership filter applies to
pub const STATE_COLUMN: &str = "State";

/// Column the optional exact-match flag filter applies to
pub const CONFORMING_FLAG_COLUMN: &str = "Conventional_Conforming_Flag";

/// Why an export could not be produced. Messages keep the coarse
/// "export failed" prefix callers log; the failure is recoverable and
/// never fatal to the surrounding run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export failed: column '{0}' missing from dataset")]
    MissingColumn(String),
    #[error("export failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("export failed: could not serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Split-orientation layout: column list, row labels and row-major data
/// as three parallel structures rather than a list of objects
#[derive(Debug, Serialize)]
struct SplitFrame {
    columns: Vec<String>,
    index: Vec<usize>,
    data: Vec<Vec<Value>>,
}

/// Export a dataset slice to `<dir>/record_<YYYYMMDDTHHMMSS>.json`.
///
/// The two filters are optional and combine independently: state
/// membership on `State` and exact match on the conventional-conforming
/// flag. Column order is preserved and the exported `index` carries the
/// original row positions of the surviving rows (filtering does not
/// renumber). Returns the written path.
pub fn export_filtered(
    df: &DataFrame,
    states: Option<&[String]>,
    conforming_flag: Option<&str>,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let mask = build_mask(df, states, conforming_flag)?;

    let (selected, index): (DataFrame, Vec<usize>) = match mask {
        Some(keep) => {
            let index = keep
                .iter()
                .enumerate()
                .filter_map(|(i, k)| k.then_some(i))
                .collect();
            let keep = BooleanChunked::from_slice("mask".into(), &keep);
            (df.filter(&keep)?, index)
        }
        None => (df.clone(), (0..df.height()).collect()),
    };

    let frame = SplitFrame {
        columns: selected
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect(),
        index,
        data: rows_as_json(&selected),
    };

    let stamp = Local::now().format("%Y%m%dT%H%M%S");
    let path = dir.join(format!("record_{}.json", stamp));
    let json = serde_json::to_string(&frame)?;
    std::fs::write(&path, json)?;

    print_info(&format!("Dataset has been exported to {}", path.display()));

    Ok(path)
}

/// Combined row mask for the requested filters, `None` when no filter
/// was requested. Null cells never match either predicate.
fn build_mask(
    df: &DataFrame,
    states: Option<&[String]>,
    conforming_flag: Option<&str>,
) -> Result<Option<Vec<bool>>, ExportError> {
    let mut mask: Option<Vec<bool>> = None;

    if let Some(states) = states {
        let column = df
            .column(STATE_COLUMN)
            .map_err(|_| ExportError::MissingColumn(STATE_COLUMN.to_string()))?;
        let wanted: HashSet<&str> = states.iter().map(|s| s.as_str()).collect();
        let state_mask: Vec<bool> = column
            .str()?
            .iter()
            .map(|v| v.map(|s| wanted.contains(s)).unwrap_or(false))
            .collect();
        mask = Some(state_mask);
    }

    if let Some(flag) = conforming_flag {
        let column = df
            .column(CONFORMING_FLAG_COLUMN)
            .map_err(|_| ExportError::MissingColumn(CONFORMING_FLAG_COLUMN.to_string()))?;
        let flag_mask: Vec<bool> = column.str()?.iter().map(|v| v == Some(flag)).collect();
        mask = Some(match mask {
            Some(prev) => prev
                .into_iter()
                .zip(flag_mask)
                .map(|(a, b)| a && b)
                .collect(),
            None => flag_mask,
        });
    }

    Ok(mask)
}

/// Row-major JSON cells in the frame's column order
fn rows_as_json(df: &DataFrame) -> Vec<Vec<Value>> {
    let mut data: Vec<Vec<Value>> = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        for (i, av) in column.as_materialized_series().iter().enumerate() {
            data[i].push(any_value_to_json(&av));
        }
    }
    data
}

fn any_value_to_json(av: &AnyValue) -> Value {
    match av {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(v) => Value::from(*v),
        AnyValue::Int8(v) => Value::from(*v),
        AnyValue::Int16(v) => Value::from(*v),
        AnyValue::Int32(v) => Value::from(*v),
        AnyValue::Int64(v) => Value::from(*v),
        AnyValue::UInt32(v) => Value::from(*v),
        AnyValue::UInt64(v) => Value::from(*v),
        AnyValue::Float32(v) => Value::from(*v as f64),
        AnyValue::Float64(v) => Value::from(*v),
        AnyValue::String(v) => Value::from(*v),
        AnyValue::StringOwned(v) => Value::from(v.as_str()),
        other => Value::from(other.to_string()),
    }
}
