#![forbid(unsafe_code)]

//! Tracing bootstrap for native hosts and tests.
//!
//! The library only emits `tracing` events; it never installs a subscriber
//! on its own. Native embedders that want structured output enable the
//! `tracing-json` feature and call [`init`] once at startup. `RUST_LOG`
//! overrides the default filter.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "spotlight_core=info";

/// Install a JSON subscriber with an env-driven filter.
///
/// Returns `false` when a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-json"))]
mod tests {
    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = super::init();
        assert!(!super::init());
    }
}
