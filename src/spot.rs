//! Spot price prediction from a daily price history.
//!
//! An AR(`lag`) model is fitted once on the whole history. Day `d` (0-based)
//! has an in-sample prediction when `lag <= d < len`: it regresses on the
//! `lag` days before it.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::{PriceHistory, SpotConfig};
use crate::error::{FitError, FitResult};
use crate::math::Matrix;
use crate::models::{ArFit, ArSpec};

#[derive(Debug, Clone)]
pub struct SpotPricePrediction {
    history: PriceHistory,
    fit: ArFit,
}

impl SpotPricePrediction {
    pub fn new(history: PriceHistory, config: &SpotConfig) -> FitResult<Self> {
        config.validate()?;
        let series = Matrix::column_vector(&history.prices)?;
        let fit = ArSpec::new(config.lag).fit(&series)?;
        info!(
            lag = config.lag,
            days = history.len(),
            start = %history.start,
            "fitted spot price model"
        );
        Ok(Self { history, fit })
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn model(&self) -> &ArFit {
        &self.fit
    }

    /// In-sample predictions for days `lag..len`, one per row.
    pub fn predicted_prices(&self) -> &Matrix {
        self.fit.predictions()
    }

    /// In-sample prediction for day `index_day` (0-based).
    pub fn predicted_price_day(&self, index_day: usize) -> FitResult<f64> {
        let lag = self.fit.lag();
        let last = self.history.len() - 1;
        if index_day < lag || index_day > last {
            return Err(FitError::DayOutOfRange {
                index: index_day,
                first: lag,
                last,
            });
        }
        Ok(self.predicted_prices()[(index_day - lag, 0)])
    }

    pub fn predicted_price_on(&self, date: NaiveDate) -> FitResult<f64> {
        self.history
            .index_of(date)
            .and_then(|i| self.predicted_price_day(i).ok())
            .ok_or(FitError::DateOutOfRange(date))
    }

    /// Forecast for the day after the last observation.
    pub fn next_price(&self) -> FitResult<(NaiveDate, f64)> {
        let date = self.history.date_of(self.history.len())?;
        Ok((date, self.fit.forecast_next()))
    }

    /// Recursive forecasts for the `days` calendar days after the history.
    ///
    /// Fails with `DateOverflow` if the horizon runs past the calendar.
    pub fn forecast(&self, days: usize) -> FitResult<Vec<(NaiveDate, f64)>> {
        let n = self.history.len();
        self.fit
            .forecast(days)
            .into_iter()
            .enumerate()
            .map(|(i, p)| Ok((self.history.date_of(n + i)?, p)))
            .collect()
    }
}
