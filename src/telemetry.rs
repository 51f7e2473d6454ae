//! Opt-in `tracing` subscriber setup for hosts embedding `ohlc-view`.
//!
//! Chart views only emit events. Hosts that already run a subscriber should
//! ignore this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "ohlc_view=info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback filter.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::*;

    #[test]
    fn disabled_feature_installs_nothing() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_filter("debug"));
    }
}
