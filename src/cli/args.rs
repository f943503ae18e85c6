//! Command-line argument definitions using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Loansift - Merge, filter and quality-check HMDA mortgage datasets
#[derive(Parser, Debug)]
#[command(name = "loansift")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the two fixed-name input CSVs
    #[arg(short = 'd', long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory for JSON exports and the quality report.
    /// Defaults to the data directory; created if missing.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dataset the quality checks run on
    #[arg(long, value_enum, default_value_t = Source::Merged)]
    pub source: Source,

    /// Keep every institution column in the merged view instead of the
    /// join keys plus respondent name
    #[arg(long, default_value = "false")]
    pub full_size: bool,

    /// States to keep in the JSON export (comma-separated, e.g. DC,VA).
    /// Implies --export-json.
    #[arg(long, value_delimiter = ',')]
    pub states: Vec<String>,

    /// Conventional-conforming flag value to keep in the JSON export
    /// (typically Y or N). Implies --export-json.
    #[arg(long, value_parser = validate_flag)]
    pub conforming: Option<String>,

    /// Write the (optionally filtered) merged dataset as a split-layout
    /// JSON slice
    #[arg(long, default_value = "false")]
    pub export_json: bool,

    /// Skip writing the spreadsheet quality report
    #[arg(long, default_value = "false")]
    pub skip_report: bool,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,
}

/// Dataset the quality checks run on
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Merged,
    Loans,
    Institutions,
}

impl Source {
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Merged => "merged",
            Source::Loans => "loans",
            Source::Institutions => "institutions",
        }
    }
}

impl Cli {
    /// Effective output directory, falling back to the data directory
    pub fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.data_dir.clone())
    }

    /// Whether a JSON export was requested, explicitly or implied by a
    /// filter flag
    pub fn wants_export(&self) -> bool {
        self.export_json || !self.states.is_empty() || self.conforming.is_some()
    }

    /// State filter as a slice, `None` when no states were given
    pub fn state_filter(&self) -> Option<&[String]> {
        if self.states.is_empty() {
            None
        } else {
            Some(&self.states)
        }
    }
}

/// Validator for the conforming-flag filter value
fn validate_flag(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Err("conforming flag filter cannot be empty".to_string())
    } else {
        Ok(trimmed.to_string())
    }
}
