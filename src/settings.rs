use config::{Config, ConfigError, Environment, File};
use std::time::Duration;

use crate::app::provider::open_meteo::OpenMeteoProvider;

/// Service settings, read once at startup. Defaults are overridden by the
/// config file, which is overridden by `WEATHER_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub forecast_uri: String,
    pub upstream_timeout_secs: u64,
}

impl Settings {
    pub const DEFAULT_PATH: &'static str = "cfg/config.json";

    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut settings = Config::default();
        settings
            .set_default("bind_address", "localhost:8082")?
            .set_default("forecast_uri", OpenMeteoProvider::BASE_URI)?
            .set_default("upstream_timeout_secs", 10i64)?;

        settings.merge(File::with_name(path).required(false))?;
        settings.merge(Environment::with_prefix("WEATHER"))?;

        settings.try_into::<Settings>()
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}
