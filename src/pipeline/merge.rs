//! Left-outer merge of loan records onto institution records

use polars::prelude::*;
use thiserror::Error;

use crate::pipeline::category::{loan_category, merge_category};
use crate::pipeline::loader::DatasetStore;
use crate::utils::print_info;

/// Join keys shared by the loan and institution tables
pub const JOIN_KEYS: [&str; 3] = ["As_of_Year", "Agency_Code", "Respondent_ID"];

/// Institution columns kept in the default (small) merged view
const SMALL_INSTITUTION_COLUMNS: [&str; 4] = [
    "As_of_Year",
    "Respondent_ID",
    "Agency_Code",
    "Respondent_Name_TS",
];

/// Name of the six-way derived category column
pub const LOANS_CATEGORY: &str = "Loans_Category";

/// Name of the four-way derived category column
pub const MERGE_CATEGORY: &str = "Loan_Merge_Category";

/// Why a merged view could not be produced. Messages keep the coarse
/// "merge failed" prefix callers log.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("merge failed: table '{0}' is not loaded")]
    MissingTable(String),
    #[error("merge failed: table '{0}' is empty")]
    EmptyTable(String),
    #[error("merge failed: column '{column}' missing from table '{table}'")]
    MissingColumn { table: String, column: String },
    #[error("merge failed: {0}")]
    Join(#[from] PolarsError),
}

/// Build the merged view: loans left-outer joined onto institutions on
/// (year, agency code, respondent ID), with the two derived category
/// columns computed from the loan amount.
///
/// With `full_size` false the institution side is restricted to the join
/// keys plus the respondent name before joining; with `full_size` true
/// every institution column is carried over. Loan rows are never dropped;
/// unmatched institution fields come back null.
pub fn merged_view(store: &DatasetStore, full_size: bool) -> Result<DataFrame, MergeError> {
    let loans = store
        .table("loans")
        .map_err(|_| MergeError::MissingTable("loans".to_string()))?;
    let institutions = store
        .table("institutions")
        .map_err(|_| MergeError::MissingTable("institutions".to_string()))?;

    if loans.height() == 0 {
        return Err(MergeError::EmptyTable("loans".to_string()));
    }
    if institutions.height() == 0 {
        return Err(MergeError::EmptyTable("institutions".to_string()));
    }

    for key in JOIN_KEYS {
        if loans.column(key).is_err() {
            return Err(MergeError::MissingColumn {
                table: "loans".to_string(),
                column: key.to_string(),
            });
        }
        if institutions.column(key).is_err() {
            return Err(MergeError::MissingColumn {
                table: "institutions".to_string(),
                column: key.to_string(),
            });
        }
    }

    // Categories are derived on the loan side before the join so the
    // institution columns land after them in the output layout
    let loans = with_category_columns(loans.clone())?;

    let right = if full_size {
        institutions.clone()
    } else {
        for column in SMALL_INSTITUTION_COLUMNS {
            if institutions.column(column).is_err() {
                return Err(MergeError::MissingColumn {
                    table: "institutions".to_string(),
                    column: column.to_string(),
                });
            }
        }
        institutions.select(SMALL_INSTITUTION_COLUMNS)?
    };

    let on: Vec<Expr> = JOIN_KEYS.iter().map(|k| col(*k)).collect();
    let merged = loans
        .lazy()
        .join(right.lazy(), on.clone(), on, JoinArgs::new(JoinType::Left))
        .collect()?;

    let (rows, cols) = merged.shape();
    print_info(&format!(
        "{} datasets have been merged successfully: {} columns and {} rows",
        store.len(),
        cols,
        rows
    ));

    Ok(merged)
}

/// Append the six-way and four-way category columns derived from
/// `Loan_Amount_000`. Null amounts yield null categories.
fn with_category_columns(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let amounts = df.column("Loan_Amount_000")?.cast(&DataType::Float64)?;
    let amounts = amounts.f64()?;

    let six: Vec<Option<&str>> = amounts.iter().map(|v| v.map(loan_category)).collect();
    let four: Vec<Option<&str>> = amounts.iter().map(|v| v.map(merge_category)).collect();

    df.with_column(Series::new(LOANS_CATEGORY.into(), six))?;
    df.with_column(Series::new(MERGE_CATEGORY.into(), four))?;

    Ok(df)
}
