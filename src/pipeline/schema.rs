//! Fixed column-type schemas for the HMDA source files

use anyhow::Result;
use polars::prelude::*;

/// File name of the reporting-institution dataset
pub const INSTITUTIONS_FILE: &str = "2012_to_2014_institutions_data.csv";

/// File name of the loan-application dataset
pub const LOANS_FILE: &str = "2012_to_2014_loans_data.csv";

/// Declared type of a source column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int8,
    Int64,
    Float64,
    Text,
}

impl ColumnType {
    /// Map the declared type to its polars dtype
    pub fn to_polars(self) -> DataType {
        match self {
            ColumnType::Int8 => DataType::Int8,
            ColumnType::Int64 => DataType::Int64,
            ColumnType::Float64 => DataType::Float64,
            ColumnType::Text => DataType::String,
        }
    }
}

/// A single named, typed column in a source file
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub dtype: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: &str, dtype: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            dtype,
        }
    }
}

/// Immutable schema for one source file: the file name plus its
/// ordered column list with declared types. Passed into the loader
/// rather than kept as global state.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub file_name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(file_name: &str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            file_name: file_name.to_string(),
            columns,
        }
    }

    /// Key this table registers under, derived from the file name:
    /// the second-to-last underscore-delimited token of the stem
    /// (`..._institutions_data.csv` keys under `institutions`).
    pub fn table_key(&self) -> Result<String> {
        table_key(&self.file_name).ok_or_else(|| {
            anyhow::anyhow!(
                "Cannot derive a table key from file name '{}': expected at least two underscore-delimited tokens",
                self.file_name
            )
        })
    }

    /// Build the polars schema used to enforce dtypes at load
    pub fn to_polars(&self) -> Schema {
        Schema::from_iter(
            self.columns
                .iter()
                .map(|c| Field::new(c.name.as_str().into(), c.dtype.to_polars())),
        )
    }

    /// Names of the text-typed columns, in schema order
    pub fn text_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.dtype == ColumnType::Text)
            .map(|c| c.name.clone())
            .collect()
    }
}

/// Derive a table key from a file name, `None` when the stem has
/// fewer than two underscore-delimited tokens.
pub fn table_key(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(".csv").unwrap_or(file_name);
    let tokens: Vec<&str> = stem.split('_').collect();
    if tokens.len() < 2 {
        return None;
    }
    let key = tokens[tokens.len() - 2];
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// The two fixed HMDA file schemas
pub fn builtin_schemas() -> Vec<TableSchema> {
    use ColumnType::*;

    let institutions = TableSchema::new(
        INSTITUTIONS_FILE,
        vec![
            ColumnSpec::new("As_of_Year", Int64),
            ColumnSpec::new("Agency_Code", Text),
            ColumnSpec::new("Respondent_ID", Text),
            ColumnSpec::new("Respondent_Name_TS", Text),
            ColumnSpec::new("Respondent_City_TS", Text),
            ColumnSpec::new("Respondent_State_TS", Text),
            ColumnSpec::new("Respondent_ZIP_Code", Text),
            ColumnSpec::new("Parent_Name_TS", Text),
            ColumnSpec::new("Parent_City_TS", Text),
            ColumnSpec::new("Parent_State_TS", Text),
            ColumnSpec::new("Parent_ZIP_Code", Text),
            ColumnSpec::new("Assets_000_Panel", Int64),
        ],
    );

    let loans = TableSchema::new(
        LOANS_FILE,
        vec![
            ColumnSpec::new("As_of_Year", Int64),
            ColumnSpec::new("Agency_Code", Text),
            ColumnSpec::new("Agency_Code_Description", Text),
            ColumnSpec::new("Respondent_ID", Text),
            ColumnSpec::new("Sequence_Number", Int64),
            ColumnSpec::new("Loan_Amount_000", Int64),
            ColumnSpec::new("Applicant_Income_000", Text),
            ColumnSpec::new("Loan_Purpose_Description", Text),
            ColumnSpec::new("Loan_Type_Description", Text),
            ColumnSpec::new("Lien_Status_Description", Text),
            ColumnSpec::new("State", Text),
            ColumnSpec::new("State_Code", Int8),
            ColumnSpec::new("County_Name", Text),
            ColumnSpec::new("County_Code", Text),
            ColumnSpec::new("MSA_MD", Text),
            ColumnSpec::new("MSA_MD_Description", Text),
            ColumnSpec::new("Census_Tract_Number", Text),
            ColumnSpec::new("FFIEC_Median_Family_Income", Text),
            ColumnSpec::new("Tract_to_MSA_MD_Income_Pct", Text),
            ColumnSpec::new("Number_of_Owner_Occupied_Units", Text),
            ColumnSpec::new("Conforming_Limit_000", Float64),
            ColumnSpec::new("Conventional_Status", Text),
            ColumnSpec::new("Conforming_Status", Text),
            ColumnSpec::new("Conventional_Conforming_Flag", Text),
        ],
    );

    vec![institutions, loans]
}
