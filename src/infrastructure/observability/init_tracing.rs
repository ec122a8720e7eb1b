use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::presentation::config::{Environment, LoggingSettings};

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(settings: &LoggingSettings, environment: Environment) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if settings.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }

    tracing::info!(
        environment = %environment,
        json_format = settings.json,
        "Tracing initialized"
    );
}
