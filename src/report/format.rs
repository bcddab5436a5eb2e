//! Plain-text summaries of fitted models.

use serde::Serialize;

use crate::fit::LagSelection;
use crate::models::{ArFit, OlsFit};

/// Serializable snapshot of an AR fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArSummary {
    pub lag: usize,
    pub n_obs: usize,
    pub intercept: f64,
    pub ar_coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub t_stats: Vec<f64>,
    pub residual_variance: f64,
    pub r_squared: f64,
    pub bic: f64,
    pub next_forecast: f64,
}

impl ArSummary {
    pub fn from_fit(fit: &ArFit) -> Self {
        let ols = fit.ols();
        Self {
            lag: fit.lag(),
            n_obs: ols.n_obs,
            intercept: fit.intercept(),
            ar_coefficients: fit.ar_coefficients(),
            std_errors: ols.std_errors(),
            t_stats: ols.t_stats.as_slice().to_vec(),
            residual_variance: ols.residual_variance,
            r_squared: ols.r_squared,
            bic: ols.bic(),
            next_forecast: fit.forecast_next(),
        }
    }
}

/// Coefficient table with one row per parameter.
///
/// `labels` names the parameters in order; missing labels fall back to
/// `x1`, `x2`, ... after the intercept.
pub fn format_ols_summary(fit: &OlsFit, labels: &[&str]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "OLS: n={} k={} | SSE={:.6} sigma2={:.6} R2={:.4}\n",
        fit.n_obs,
        fit.n_params(),
        fit.sse,
        fit.residual_variance,
        fit.r_squared
    ));
    out.push_str(&format!(
        "{:<12} {:>14} {:>14} {:>10}\n",
        "term", "coef", "std_err", "t"
    ));

    let se = fit.std_errors();
    for i in 0..fit.n_params() {
        let name = match labels.get(i) {
            Some(l) => (*l).to_string(),
            None if i == 0 => "const".to_string(),
            None => format!("x{i}"),
        };
        out.push_str(&format!(
            "{:<12} {:>14.6} {:>14.6} {:>10.3}\n",
            name,
            fit.coefficients[(i, 0)],
            se[i],
            fit.t_stats[(i, 0)]
        ));
    }
    out
}

pub fn format_ar_summary(fit: &ArFit) -> String {
    let labels: Vec<String> = std::iter::once("const".to_string())
        .chain((1..=fit.lag()).map(|i| format!("y[t-{i}]")))
        .collect();
    let refs: Vec<&str> = labels.iter().map(String::as_str).collect();

    let mut out = format!("=== AR({}) ===\n", fit.lag());
    out.push_str(&format_ols_summary(fit.ols(), &refs));
    out.push_str(&format!(
        "BIC={:.3} | next={:.4}\n",
        fit.ols().bic(),
        fit.forecast_next()
    ));
    out
}

/// Candidate table for a lag search, chosen order marked with `*`.
pub fn format_lag_selection(selection: &LagSelection) -> String {
    let mut out = String::from("Lag diagnostics:\n");
    for c in &selection.candidates {
        let chosen = if c.lag == selection.best.lag() { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} AR({:<3}) n={} SSE={:.4} BIC={:.3}\n",
            c.lag, c.n_obs, c.sse, c.bic
        ));
    }
    for (lag, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped AR({lag})) {reason}\n"));
    }
    out
}
