//! AR order selection by BIC.
//!
//! Every order `p` in `1..=max_lag` is fitted on the same effective sample
//! (the observations after the first `max_lag`) so the criteria are
//! comparable:
//!
//! ```text
//! BIC = n * ln(SSE/n) + k * ln(n)
//! ```
//!
//! Selection rules:
//! 1. Skip orders that are underdetermined: require `n >= k + min_obs_buffer`
//! 2. Fits that fail in the engine (singular normal equations) are skipped
//! 3. Choose the minimum BIC; ties go to the smaller order
//!
//! The winning order is then refitted on the full series. When no order
//! survives, the first engine failure is returned as is; `InsufficientData`
//! only means every order was underdetermined.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::domain::SelectionConfig;
use crate::error::{FitError, FitResult};
use crate::math::Matrix;
use crate::models::{ArFit, ArSpec, LaggedSeries, LinearRegression, lag_matrix};

/// Diagnostics for one candidate order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LagCandidate {
    pub lag: usize,
    pub n_obs: usize,
    pub sse: f64,
    pub bic: f64,
}

/// Output of [`select_lag`].
#[derive(Debug, Clone)]
pub struct LagSelection {
    /// Chosen order refitted on the whole series.
    pub best: ArFit,
    /// Candidates that produced a fit, ascending by lag.
    pub candidates: Vec<LagCandidate>,
    /// Orders that were skipped and why.
    pub skipped: Vec<(usize, String)>,
}

/// Why a candidate order produced no fit.
#[derive(Debug)]
enum Rejection {
    Underdetermined { n: usize, needed: usize },
    Failed(FitError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Underdetermined { n, needed } => {
                write!(f, "Underdetermined: n={n} < k+buffer={needed}")
            }
            Rejection::Failed(err) => write!(f, "Fit failed: {err}"),
        }
    }
}

pub fn select_lag(series: &Matrix, config: &SelectionConfig) -> FitResult<LagSelection> {
    config.validate()?;
    let max_lag = config.max_lag;
    let LaggedSeries { design, response } = lag_matrix(series, max_lag)?;

    let outcomes: Vec<(usize, Result<LagCandidate, Rejection>)> = (1..=max_lag)
        .into_par_iter()
        .map(|lag| (lag, evaluate_lag(&design, &response, lag, config.min_obs_buffer)))
        .collect();

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    let mut first_failure = None;
    for (lag, outcome) in outcomes {
        match outcome {
            Ok(c) => {
                trace!(lag, bic = c.bic, sse = c.sse, "lag candidate");
                candidates.push(c);
            }
            Err(rejection) => {
                let reason = rejection.to_string();
                warn!(lag, %reason, "lag candidate skipped");
                skipped.push((lag, reason));
                if let Rejection::Failed(err) = rejection {
                    first_failure.get_or_insert(err);
                }
            }
        }
    }

    let Some(winner) = pick_min_bic(&candidates) else {
        return Err(first_failure.unwrap_or(FitError::InsufficientData {
            n: series.nrows(),
            // AR(1) needs 2 parameters plus the buffer after the first max_lag rows.
            min: max_lag + 2 + config.min_obs_buffer,
        }));
    };

    debug!(lag = winner.lag, bic = winner.bic, "selected ar order");
    let best = ArSpec::new(winner.lag).fit(series)?;

    Ok(LagSelection {
        best,
        candidates,
        skipped,
    })
}

fn evaluate_lag(
    design: &Matrix,
    response: &Matrix,
    lag: usize,
    min_obs_buffer: usize,
) -> Result<LagCandidate, Rejection> {
    let n = response.nrows();
    let k = lag + 1;
    if n < k + min_obs_buffer {
        return Err(Rejection::Underdetermined {
            n,
            needed: k + min_obs_buffer,
        });
    }

    let fit = design
        .truncate(1, n, 1, lag)
        .map_err(FitError::from)
        .and_then(|columns| LinearRegression::new(response.clone(), columns))
        .and_then(|reg| reg.fit())
        .map_err(Rejection::Failed)?;

    let bic = fit.bic();
    if !bic.is_finite() {
        return Err(Rejection::Failed(FitError::NonFiniteBic { lag, sse: fit.sse }));
    }
    Ok(LagCandidate {
        lag,
        n_obs: fit.n_obs,
        sse: fit.sse,
        bic,
    })
}

/// Deterministic: minimum BIC, ties broken by the smaller lag.
fn pick_min_bic(candidates: &[LagCandidate]) -> Option<&LagCandidate> {
    let mut best: Option<&LagCandidate> = None;
    for c in candidates {
        best = match best {
            Some(b) if c.bic < b.bic || (c.bic == b.bic && c.lag < b.lag) => Some(c),
            Some(b) => Some(b),
            None => Some(c),
        };
    }
    best
}
