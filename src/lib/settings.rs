use config::{Config, ConfigError, Environment, File, FileFormat};
use std::fs;
use std::time::Duration;
use thiserror::Error;

use crate::restcountries::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

#[derive(serde::Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Settings {
    // Endpoint used for remote lookups
    #[serde(default = "default_countries_api_url")]
    pub countries_api_url: String,
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_countries_api_url() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            countries_api_url: default_countries_api_url(),
            request_timeout_seconds: default_request_timeout_seconds(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Given settings file is not a file: {0}")]
    NotAFile(String),
    #[error("Unexpected error when loading metadata. {0}")]
    Metadata(#[from] std::io::Error),
    #[error("Config couldn't be built. {0}")]
    Config(#[from] ConfigError),
}

#[cfg_attr(test, mockall::automock)]
pub trait HasFile {
    fn file(&self) -> &str;
}
pub struct SettingsFile {}
impl HasFile for SettingsFile {
    fn file(&self) -> &str {
        "settings.yaml"
    }
}

fn _get_settings(settings: impl HasFile) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();
    // Either we use a settings.yaml file, or environment variables
    let settings_file = settings.file();
    builder = match fs::metadata(settings_file) {
        Ok(metadata) => match metadata.is_file() {
            true => builder.add_source(File::new(settings_file, FileFormat::Yaml)),
            false => return Err(SettingsError::NotAFile(settings_file.to_string())),
        },
        Err(error) => match error.kind() {
            std::io::ErrorKind::NotFound => builder.add_source(Environment::default()),
            _ => return Err(SettingsError::Metadata(error)),
        },
    };
    let config = builder.build()?;
    Ok(config.try_deserialize::<Settings>()?)
}

pub fn get_settings() -> Result<Settings, SettingsError> {
    _get_settings(SettingsFile {})
}
