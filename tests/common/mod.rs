//! Shared test utilities and fixture generators

use loansift::pipeline::{DatasetStore, INSTITUTIONS_FILE, LOANS_FILE};
use polars::prelude::*;
use std::io::Write;
use std::path::Path;

/// Loan-side fixture covering the columns the merge, export and quality
/// checks touch
///
/// Known characteristics:
/// - key tuples (year, agency, respondent, sequence) are all unique
/// - `Loan_Amount_000` spans every category bucket and holds one null
/// - `Applicant_Income_000` carries two literal `NA` strings
/// - `County_Name` carries two trailing-space `NA ` strings
/// - the (2014, "7", "R900") row has no matching institution
pub fn create_loans_dataframe() -> DataFrame {
    df! {
        "As_of_Year" => [2012i64, 2012, 2013, 2013, 2014, 2014],
        "Agency_Code" => ["1", "1", "5", "5", "7", "7"],
        "Respondent_ID" => ["R100", "R100", "R200", "R200", "R300", "R900"],
        "Sequence_Number" => [1i64, 2, 1, 2, 1, 3],
        "Loan_Amount_000" => [Some(110i64), Some(400), Some(1200), None, Some(250), Some(600)],
        "Applicant_Income_000" => ["45", "NA", "NA", "88", "120", "60"],
        "State" => [Some("DC"), Some("VA"), Some("MD"), Some("DC"), None, Some("VA")],
        "County_Name" => ["District of Columbia", "Fairfax County", "NA ", "NA ", "Montgomery County", "Arlington County"],
        "Conventional_Conforming_Flag" => ["Y", "N", "Y", "Y", "N", "Y"],
    }
    .unwrap()
}

/// Institution-side fixture: one row per (year, agency, respondent) key
/// matched by the loans fixture, except the R900 loan
pub fn create_institutions_dataframe() -> DataFrame {
    df! {
        "As_of_Year" => [2012i64, 2013, 2014],
        "Agency_Code" => ["1", "5", "7"],
        "Respondent_ID" => ["R100", "R200", "R300"],
        "Respondent_Name_TS" => ["FIRST UNION BANK", "CAPITAL MUTUAL", "BLUE RIDGE SAVINGS"],
        "Respondent_City_TS" => ["CHARLOTTE", "RICHMOND", "ROANOKE"],
        "Assets_000_Panel" => [Some(520_000i64), Some(81_000), None],
    }
    .unwrap()
}

/// Store holding both fixtures under their canonical keys
pub fn build_store() -> DatasetStore {
    let mut store = DatasetStore::new();
    store.insert("loans", create_loans_dataframe());
    store.insert("institutions", create_institutions_dataframe());
    store
}

/// Write full-width CSV fixtures for both source files into `dir`,
/// using the canonical file names the loader expects.
///
/// The files exercise typed loading: a literal `NA` in a text column
/// (applicant income, row 2), a literal `NA` in the float conforming
/// limit (row 3), a trailing-space `NA ` county name that must survive
/// as text, and `NA` parent fields on the second institution.
pub fn write_store_csvs(dir: &Path) {
    let loans_path = dir.join(LOANS_FILE);
    let mut file = std::fs::File::create(&loans_path).unwrap();
    writeln!(file, "As_of_Year,Agency_Code,Agency_Code_Description,Respondent_ID,Sequence_Number,Loan_Amount_000,Applicant_Income_000,Loan_Purpose_Description,Loan_Type_Description,Lien_Status_Description,State,State_Code,County_Name,County_Code,MSA_MD,MSA_MD_Description,Census_Tract_Number,FFIEC_Median_Family_Income,Tract_to_MSA_MD_Income_Pct,Number_of_Owner_Occupied_Units,Conforming_Limit_000,Conventional_Status,Conforming_Status,Conventional_Conforming_Flag").unwrap();
    writeln!(file, "2012,1,OCC,R100,1,110,45,Purchase,Conventional,First Lien,DC,11,District of Columbia,11001,47894,Washington Metro,55.01,105700,98.05,1435,417,Conventional,Conforming,Y").unwrap();
    writeln!(file, "2012,1,OCC,R100,2,400,NA,Refinance,Conventional,First Lien,VA,51,Fairfax County,51059,47894,Washington Metro,4154.01,105700,154.34,2612,417,Conventional,Conforming,N").unwrap();
    writeln!(file, "2013,5,NCUA,R200,1,1200,150,Purchase,VA-guaranteed,First Lien,MD,24,NA ,24031,13644,Bethesda Metro,7012.08,107300,201.77,1802,NA,Conventional,Jumbo,N").unwrap();
    writeln!(file, "2014,7,HUD,R300,1,250,88,Home improvement,FHA-insured,Subordinate Lien,DC,11,District of Columbia,11001,47894,Washington Metro,56.02,106300,77.15,997,417,Not Conventional,Conforming,Y").unwrap();
    drop(file);

    let institutions_path = dir.join(INSTITUTIONS_FILE);
    let mut file = std::fs::File::create(&institutions_path).unwrap();
    writeln!(file, "As_of_Year,Agency_Code,Respondent_ID,Respondent_Name_TS,Respondent_City_TS,Respondent_State_TS,Respondent_ZIP_Code,Parent_Name_TS,Parent_City_TS,Parent_State_TS,Parent_ZIP_Code,Assets_000_Panel").unwrap();
    writeln!(file, "2012,1,R100,FIRST UNION BANK,CHARLOTTE,NC,28202,FIRST UNION CORP,CHARLOTTE,NC,28202,520000").unwrap();
    writeln!(file, "2013,5,R200,CAPITAL MUTUAL,RICHMOND,VA,23219,NA,NA,NA,NA,81000").unwrap();
    writeln!(file, "2014,7,R300,BLUE RIDGE SAVINGS,ROANOKE,VA,24011,BRS HOLDINGS,ROANOKE,VA,24011,64000").unwrap();
    drop(file);
}

/// Assert that a DataFrame has expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    let (rows, cols) = df.shape();
    assert_eq!(rows, expected_rows, "Row count mismatch: expected {}, got {}", expected_rows, rows);
    assert_eq!(cols, expected_cols, "Column count mismatch: expected {}, got {}", expected_cols, cols);
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
