pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Used when `RUST_LOG` is unset or blank.
const DEFAULT_FILTER: &str = "warn,pledge_ledger=info";

/// Builds the log filter. A non-blank `RUST_LOG` value replaces the default
/// entirely, so `RUST_LOG=pledge_ledger=debug` takes effect.
pub fn build_filter(env_value: Option<&str>) -> EnvFilter {
    match env_value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(directives) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(directives),
        None => EnvFilter::builder().parse_lossy(DEFAULT_FILTER),
    }
}

/// Initializes the global tracing subscriber on stderr. Crate logs run at
/// `info` and other targets at `warn` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = fmt()
            .with_env_filter(build_filter(env_value.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_keeps_crate_logs_at_info() {
        for unset in [None, Some(""), Some("   ")] {
            let filter = build_filter(unset).to_string();
            assert!(filter.contains("pledge_ledger=info"), "{filter}");
            assert!(filter.contains("warn"), "{filter}");
        }
    }

    #[test]
    fn env_value_overrides_crate_level() {
        let filter = build_filter(Some("pledge_ledger=debug")).to_string();
        assert!(filter.contains("pledge_ledger=debug"), "{filter}");
        assert!(!filter.contains("pledge_ledger=info"), "{filter}");
    }
}
