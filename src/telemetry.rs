//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LogConfig;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over the configured level. Returns false when a
/// subscriber was already installed, which is harmless.
pub fn init(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_noop() {
        let config = LogConfig {
            level: "not a valid ==== filter".to_string(),
        };
        init(&config);
        assert!(!init(&LogConfig::default()));
    }
}
