use std::collections::HashMap;
use std::env;
use std::time::Duration;

use url::Url;

use crate::ReportError;

pub const DEFAULT_ENDPOINT: &str =
    "https://us-central1-delivery-form-api.cloudfunctions.net/api/report";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_KEY: &str = "endpoint";
pub const TIMEOUT_KEY: &str = "timeout";

const ENV_PREFIX: &str = "PARCELREPORT_";

/// String settings with typed accessors. Later layers override earlier
/// ones: defaults, then environment, then explicit settings.
#[derive(Clone, Default, Debug)]
pub struct ReportConfig {
    pub settings: HashMap<String, String>,
}

impl ReportConfig {
    pub fn new(settings: HashMap<String, String>) -> ReportConfig {
        ReportConfig { settings }
    }

    /// Reads `PARCELREPORT_ENDPOINT` and `PARCELREPORT_TIMEOUT`.
    pub fn from_env() -> ReportConfig {
        let mut config = ReportConfig::default();
        for key in [ENDPOINT_KEY, TIMEOUT_KEY] {
            let var_name = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(value) = env::var(&var_name) {
                log::debug!("{} set from environment", var_name);
                config.set(key.to_string(), value);
            }
        }
        config
    }

    pub fn merge(mut self, other: ReportConfig) -> ReportConfig {
        self.settings.extend(other.settings);
        self
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.settings.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.settings.insert(key, value);
    }

    pub fn endpoint(&self) -> Result<Url, ReportError> {
        let endpoint = self
            .get(ENDPOINT_KEY)
            .map(String::as_str)
            .unwrap_or(DEFAULT_ENDPOINT);
        let url = Url::parse(endpoint)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ReportError::ConfigError(format!(
                "unsupported endpoint scheme '{}' in {}",
                scheme, endpoint
            ))),
        }
    }

    pub fn timeout(&self) -> Result<Duration, ReportError> {
        match self.get(TIMEOUT_KEY) {
            None => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    ReportError::ConfigError(format!(
                        "timeout must be a positive number of seconds, got \
                         '{}'",
                        value
                    ))
                }),
        }
    }
}
