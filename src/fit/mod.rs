//! Model selection across AR orders.
//!
//! Responsibilities:
//!
//! - fit every candidate order on a common sample (parallel)
//! - rank candidates by BIC with an identification guardrail

pub mod selection;

pub use selection::*;
