use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub amadeus: AmadeusConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Credentials and endpoint for the upstream travel-data provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. BLUEFLIGHTS__AMADEUS__API_KEY overrides amadeus.api_key
            .add_source(config::Environment::with_prefix("BLUEFLIGHTS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
