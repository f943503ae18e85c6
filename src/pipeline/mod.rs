//! Pipeline module - loading, merging and quality-checking datasets

pub mod category;
pub mod export;
pub mod loader;
pub mod merge;
pub mod quality;
pub mod schema;

pub use category::*;
pub use export::*;
pub use loader::*;
pub use merge::*;
pub use quality::*;
pub use schema::*;
