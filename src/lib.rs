//! Loansift: HMDA Loan Data Screening Library
//!
//! A library for merging mortgage loan and institution datasets,
//! deriving loan-amount categories, exporting filtered slices and
//! running duplicate / missing-value / outlier quality checks.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
