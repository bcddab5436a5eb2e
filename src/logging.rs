//! Tracing setup for binaries and tests that want to see the crate's events.
//!
//! The library itself only emits events; installing a subscriber is left to
//! the caller.

use tracing_subscriber::EnvFilter;

/// Target name of this crate's events.
const CRATE_TARGET: &str = "ar_scratch";

fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a fmt subscriber filtered by verbosity.
///
/// Mapping:
/// - 0 -> warn
/// - 1 -> info
/// - 2 -> debug
/// - 3+ -> trace
///
/// `RUST_LOG` overrides the mapping when set. Returns `false` if a global
/// subscriber was already installed.
pub fn init(verbosity: u8) -> bool {
    let default_filter = format!("{CRATE_TARGET}={}", level_for(verbosity));
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn second_init_is_harmless() {
        let _ = init(2);
        assert!(!init(2));
    }
}
