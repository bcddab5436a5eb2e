//! Synthetic daily spot prices from a mean-reverting AR(1).

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::debug;

use crate::domain::{PriceHistory, SampleConfig};
use crate::error::{FitError, FitResult};

/// Generate `config.count` daily prices starting at `config.start_date`.
///
/// The same config (seed included) always yields the same path.
pub fn generate_price_path(config: &SampleConfig) -> FitResult<PriceHistory> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| FitError::InvalidConfig(format!("noise distribution error: {e}")))?;

    let mut prices = Vec::with_capacity(config.count);
    let mut prev = config.start_price;
    prices.push(prev);
    for _ in 1..config.count {
        let z: f64 = normal.sample(&mut rng);
        let next = config.mean + config.phi * (prev - config.mean) + config.sigma * z;
        prices.push(next);
        prev = next;
    }

    debug!(
        seed = config.seed,
        count = config.count,
        "generated synthetic price path"
    );
    PriceHistory::new(config.start_date, prices)
}
