//! Input data sources.
//!
//! Only a synthetic generator lives here; real price series are handed to the
//! library already in memory as a [`crate::domain::PriceHistory`].

pub mod sample;

pub use sample::*;
