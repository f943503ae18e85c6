//! Report module - spreadsheet export and terminal summaries

pub mod summary;
pub mod workbook;

pub use summary::*;
pub use workbook::*;
