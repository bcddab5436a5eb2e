//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - configuration structs (`SpotConfig`, `SelectionConfig`, `SampleConfig`)
//! - the daily price series (`PriceHistory`)

pub mod types;

pub use types::*;
