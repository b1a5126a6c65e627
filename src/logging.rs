use std::io;

use conduit_configuration::logging::LoggingConfiguration;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "debug";

/// Pick the tracing filter: `RUST_LOG` wins, then `--verbose`, then the configured level.
fn build_env_filter(logging: &LoggingConfiguration, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = if verbose {
        VERBOSE_FILTER
    } else {
        logging.level.as_str()
    };

    EnvFilter::try_new(directives)
        .into_diagnostic()
        .wrap_err_with(|| miette!("Invalid logging level directives: {}", directives))
}

/// Install the global tracing subscriber. Diagnostics go to stderr so they never
/// interleave with the regular console output on stdout.
pub fn initialize_tracing(logging: &LoggingConfiguration, verbose: bool) -> Result<()> {
    let env_filter = build_env_filter(logging, verbose)?;

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber was already installed");
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn logging(level: &str) -> LoggingConfiguration {
        LoggingConfiguration {
            level: level.to_string(),
            default_log_output_path: None,
        }
    }

    #[test]
    fn configured_level_is_parsed() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        assert!(build_env_filter(&logging("conduit_core=trace,warn"), false).is_ok());

        let filter = build_env_filter(&logging("warn"), true).unwrap();
        assert_eq!(filter.to_string(), VERBOSE_FILTER);
    }

    #[test]
    fn garbage_level_is_an_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }

        assert!(build_env_filter(&logging("=[=="), false).is_err());
    }
}
