use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod contracts;
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use contracts::{ContractResolver, ContractsConfig};
pub use core_types::AnalyticsParams;
pub use settings::{ApiConfig, ChartsConfig, Config, DatabaseConfig};

/// Prefix for environment overrides, e.g. `FUTSTATS__DATABASE__URL`.
pub const ENV_PREFIX: &str = "FUTSTATS";

/// Loads the application configuration from a TOML file, layered with
/// `FUTSTATS__*` environment variables.
///
/// The file is optional so that a deployment can be configured from the
/// environment alone. The result is validated before it is returned.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let builder = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Configuration loaded.");
    Ok(config)
}
