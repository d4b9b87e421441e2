use crate::domain::Endpoint;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = ".acwm";
const ENV_PREFIX: &str = "ACWM";

// Environment keys are lowercased by the config crate, so the address can't be merged by serde.
// Checked in order, the first key present wins.
const ADDRESS_KEYS: [&str; 3] = ["airconipaddress", "aircon_ip_address", "airconIPAddress"];

pub struct AppConfig {
    endpoint: Endpoint,
}

#[derive(Deserialize)]
struct FileConfig {
    username: String,
    password: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default, with = "humantime_serde")]
    timeout: Option<Duration>,
}

fn default_port() -> u16 {
    80
}

impl AppConfig {
    /// `$HOME/.acwm`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoHomeDirectory)
    }

    /// Reads the JSON config file at `path`, with `ACWM_*` environment variables taking precedence.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json).required(true))
            .add_source(environment)
            .build()?;

        let address = ADDRESS_KEYS
            .iter()
            .find_map(|key| config.get_string(key).ok())
            .ok_or_else(|| config::ConfigError::NotFound("airconIPAddress".to_string()))?;
        let ip = address.parse::<IpAddr>().map_err(|_| ConfigError::InvalidAddress(address.clone()))?;

        let file_config: FileConfig = config.try_deserialize()?;

        let endpoint =
            Endpoint::new(ip, file_config.port, file_config.username, file_config.password).with_timeout(file_config.timeout);

        Ok(AppConfig { endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine the home directory")]
    NoHomeDirectory,
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("airconIPAddress is not a valid IP: '{0}'")]
    InvalidAddress(String),
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                endpoint: Endpoint::new(IpAddr::from([127, 0, 0, 1]), 80, "admin".to_string(), "secret".to_string()),
            },
        }
    }

    pub fn address(mut self, address: std::net::SocketAddr) -> Self {
        let endpoint = &self.config.endpoint;
        self.config.endpoint = Endpoint::new(
            address.ip(),
            address.port(),
            endpoint.username().to_string(),
            endpoint.password().to_string(),
        );
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
