//! Logging setup
//!
//! One-shot `tracing-subscriber` initialization for the CLI binary.
//! Level precedence: `RUST_LOG` > `--log` flag > config file.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for the effective log level. The crate's own
/// events follow the chosen level even when a dependency default is
/// noisier.
fn filter_directives(cli_level: Option<&str>, config_level: &str) -> String {
    let level = cli_level.unwrap_or(config_level);
    format!("{level},forge_engine={level}")
}

/// Install the global subscriber. `RUST_LOG`, when set, wins over
/// both the `--log` flag and the configured level. Repeated calls
/// are ignored.
pub fn init_telemetry(cli_level: Option<&str>, config_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(cli_level, config_level)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_config_level() {
        assert_eq!(
            filter_directives(Some("debug"), "info"),
            "debug,forge_engine=debug"
        );
    }

    #[test]
    fn test_config_level_is_the_fallback() {
        assert_eq!(filter_directives(None, "warn"), "warn,forge_engine=warn");
    }
}
