use crate::config::{LogConfig, LogFormat};
use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| Error::Config(format!("log filter {:?}: {}", config.filter, e)))?;

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };

    installed.map_err(|e| Error::Config(format!("logging already initialised: {}", e)))
}
