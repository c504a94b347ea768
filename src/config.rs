use crate::error::{Result, SoundbarError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::Duration;

/// Default HTTP port of the soundbar's UIC API
pub const DEFAULT_PORT: u16 = 80;

/// Default display name for a soundbar entity
pub const DEFAULT_NAME: &str = "Samsung Soundbar";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default poll cadence suggested to the host
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(5);

/// Connection settings for one soundbar installation
///
/// This is the per-instance context handed to [`SoundbarApi`](crate::SoundbarApi)
/// and [`SoundbarEntity`](crate::SoundbarEntity) at construction. Durations are
/// (de)serialized as seconds so host config entries can carry plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundbarConfig {
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_name")]
    pub name: String,

    /// Timeout applied to every device request
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// How often the host should call `refresh`
    #[serde(default = "default_scan_interval", with = "duration_secs")]
    pub scan_interval: Duration,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_scan_interval() -> Duration {
    DEFAULT_SCAN_INTERVAL
}

impl SoundbarConfig {
    /// Create a config for the given host with every other setting defaulted
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            name: default_name(),
            timeout: DEFAULT_TIMEOUT,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }

    /// Set the API port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the entity display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the suggested poll cadence
    pub fn with_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    /// Build a validated config from a host config entry (`{"host": ..., "port": ...}`)
    pub fn from_entry_data(data: serde_json::Value) -> Result<Self> {
        let config: Self = serde_json::from_value(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can address a device
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(SoundbarError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(SoundbarError::InvalidConfig("port must not be 0".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(SoundbarError::InvalidConfig("timeout must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// Base URL of the UIC command endpoint
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}/UIC", self.host, self.port)
    }

    /// URL probed by the setup-time connectivity check
    pub fn test_url(&self) -> String {
        format!("http://{}:{}/test", self.host, self.port)
    }
}

mod duration_secs {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
