//! Telemetry helpers for applications embedding `procchart`.
//!
//! Tracing setup stays explicit and opt-in. Hosts either call one of the
//! helpers below or install their own `tracing` subscriber.

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER_DIRECTIVE: &str = "procchart=info";

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER_DIRECTIVE`] when the variable is unset or invalid.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
