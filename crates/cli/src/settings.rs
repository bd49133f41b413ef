//! Layered Settings

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default settings file looked up in the working directory
const DEFAULT_FILE: &str = "digit-demo";

/// Environment variable prefix, e.g. `DIGIT_DEMO_API_URL`
const ENV_PREFIX: &str = "DIGIT_DEMO";

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the prediction service
    pub api_url: String,
    /// Transport timeout in milliseconds, unset for none
    pub request_timeout_ms: Option<u64>,
    /// Emit JSON log lines instead of plain text
    pub log_json: bool,
    /// On-screen width of the drawing surface when a gesture file has none
    pub display_width: f32,
    /// On-screen height of the drawing surface when a gesture file has none
    pub display_height: f32,
}

impl Settings {
    /// Defaults, then the settings file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("api_url", "http://localhost:9696")?
            .set_default("log_json", false)?
            .set_default("display_width", 280.0)?
            .set_default("display_height", 280.0)?;

        let builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
