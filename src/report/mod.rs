//! Reporting utilities: text summaries and serializable fit snapshots.
//!
//! Formatting stays here so the engine and estimators remain free of
//! presentation concerns.

pub mod format;

pub use format::*;
