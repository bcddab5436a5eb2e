//! Shared domain types: configuration structs and the daily price history.
//!
//! Config types derive serde so callers can load them from whatever format
//! they already use; every field has a default and `validate` reports
//! nonsensical values before any fitting starts.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FitError, FitResult};

/// AR order used by the spot price example when none is configured.
pub const DEFAULT_SPOT_LAG: usize = 7;

/// Settings for [`crate::spot::SpotPricePrediction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    /// Number of past days each prediction regresses on.
    pub lag: usize,
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            lag: DEFAULT_SPOT_LAG,
        }
    }
}

impl SpotConfig {
    pub fn validate(&self) -> FitResult<()> {
        if self.lag == 0 {
            return Err(FitError::InvalidLag(self.lag));
        }
        Ok(())
    }
}

/// Bounds for [`crate::fit::select_lag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Largest AR order tried. Every order in `1..=max_lag` is fitted.
    pub max_lag: usize,
    /// Extra observations required beyond the parameter count before an
    /// order is considered identified.
    pub min_obs_buffer: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_lag: 10,
            min_obs_buffer: 5,
        }
    }
}

impl SelectionConfig {
    pub fn validate(&self) -> FitResult<()> {
        if self.max_lag == 0 {
            return Err(FitError::InvalidLag(self.max_lag));
        }
        Ok(())
    }
}

/// Parameters of the synthetic price generator in [`crate::data`].
///
/// Prices follow a mean-reverting AR(1):
/// `p_t = mean + phi * (p_{t-1} - mean) + sigma * z_t`, `z_t ~ N(0, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub seed: u64,
    pub count: usize,
    pub start_date: NaiveDate,
    pub start_price: f64,
    pub mean: f64,
    pub phi: f64,
    pub sigma: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            count: 365,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            start_price: 50.0,
            mean: 50.0,
            phi: 0.8,
            sigma: 2.0,
        }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> FitResult<()> {
        if self.count == 0 {
            return Err(FitError::InvalidConfig("sample count must be > 0".into()));
        }
        if !(self.start_price.is_finite() && self.mean.is_finite()) {
            return Err(FitError::InvalidConfig(
                "start price and mean must be finite".into(),
            ));
        }
        if !(self.phi.is_finite() && self.phi.abs() < 1.0) {
            return Err(FitError::InvalidConfig(format!(
                "phi must lie in (-1, 1) for a stationary path, got {}",
                self.phi
            )));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(FitError::InvalidConfig(format!(
                "sigma must be finite and >= 0, got {}",
                self.sigma
            )));
        }
        Ok(())
    }
}

/// One observation per calendar day, starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    pub start: NaiveDate,
    pub prices: Vec<f64>,
}

impl PriceHistory {
    pub fn new(start: NaiveDate, prices: Vec<f64>) -> FitResult<Self> {
        if prices.is_empty() {
            return Err(FitError::EmptyData);
        }
        if prices.iter().any(|p| !p.is_finite()) {
            return Err(FitError::NonFiniteData);
        }
        let history = Self { start, prices };
        // The day after the last observation must exist for `next_price`.
        history.date_of(history.len())?;
        Ok(history)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Calendar date of day `index` (0-based).
    pub fn date_of(&self, index: usize) -> FitResult<NaiveDate> {
        self.start
            .checked_add_days(Days::new(index as u64))
            .ok_or(FitError::DateOverflow {
                start: self.start,
                days: index,
            })
    }

    /// Day index of `date`, if it falls on or after `start`.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        usize::try_from((date - self.start).num_days()).ok()
    }

    pub fn last_date(&self) -> FitResult<NaiveDate> {
        self.date_of(self.prices.len().saturating_sub(1))
    }
}
