//! The `config` module loads layered application settings: defaults,
//! an optional `config/default` file, and environment overrides.

mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{ServerSettings, Settings, StorageSettings};

#[cfg(test)]
mod tests;

/// Loads the configuration from the default file and environment variables
/// and merges it with default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
            max_connections: partial
                .server
                .as_ref()
                .and_then(|s| s.max_connections)
                .unwrap_or(default.server.max_connections),
        },
        storage: StorageSettings {
            data_dir: partial
                .storage
                .as_ref()
                .and_then(|s| s.data_dir.clone())
                .unwrap_or(default.storage.data_dir),
        },
    })
}
