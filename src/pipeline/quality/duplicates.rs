//! Duplicate key detection

use std::collections::HashMap;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Result of a duplicate scan: either explicitly clean or the distinct
/// key tuples occurring more than once. Values are rendered as display
/// strings so keys of mixed column types compare and print uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateCheck {
    Clean,
    Found {
        columns: Vec<String>,
        keys: Vec<Vec<String>>,
    },
}

impl DuplicateCheck {
    pub fn is_clean(&self) -> bool {
        matches!(self, DuplicateCheck::Clean)
    }

    /// Number of distinct duplicate key tuples
    pub fn count(&self) -> usize {
        match self {
            DuplicateCheck::Clean => 0,
            DuplicateCheck::Found { keys, .. } => keys.len(),
        }
    }

    /// Each duplicate tuple joined with `", "` for display and reporting
    pub fn joined_keys(&self) -> Vec<String> {
        match self {
            DuplicateCheck::Clean => Vec::new(),
            DuplicateCheck::Found { keys, .. } => keys.iter().map(|k| k.join(", ")).collect(),
        }
    }
}

/// Scan for rows sharing the same value tuple across `key_columns`.
/// Only distinct offending tuples are reported, in first-seen order.
pub fn find_duplicate_keys(df: &DataFrame, key_columns: &[&str]) -> Result<DuplicateCheck> {
    let mut rendered: Vec<Vec<String>> = Vec::with_capacity(key_columns.len());
    for name in key_columns {
        let column = df
            .column(name)
            .with_context(|| format!("Duplicate check requires column '{}'", name))?;
        rendered.push(
            column
                .as_materialized_series()
                .iter()
                .map(|av| render_any_value(&av))
                .collect(),
        );
    }

    let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
    let mut order: Vec<Vec<String>> = Vec::new();
    for row in 0..df.height() {
        let key: Vec<String> = rendered.iter().map(|col| col[row].clone()).collect();
        let seen = counts.entry(key.clone()).or_insert(0);
        if *seen == 0 {
            order.push(key);
        }
        *seen += 1;
    }

    let keys: Vec<Vec<String>> = order
        .into_iter()
        .filter(|key| counts[key] > 1)
        .collect();

    if keys.is_empty() {
        Ok(DuplicateCheck::Clean)
    } else {
        Ok(DuplicateCheck::Found {
            columns: key_columns.iter().map(|n| n.to_string()).collect(),
            keys,
        })
    }
}

fn render_any_value(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => "null".to_string(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => other.to_string(),
    }
}
