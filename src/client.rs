use crate::config::SoundbarConfig;
use crate::error::{Result, SoundbarError};
use crate::protocol::{command_url, Command, ParamValue, ResponseEnvelope};
use crate::types::RawStatus;
use std::time::Duration;

/// Client for the soundbar's UIC HTTP/XML API
///
/// `SoundbarApi` turns get/set operations into `cmd` fragments, sends them as
/// HTTP GET requests and extracts single fields from the XML reply. It holds
/// no device state; every call goes to the device.
///
/// The `reqwest::Client` is the host's shared session. It is only used to
/// issue requests, never reconfigured.
#[derive(Debug, Clone)]
pub struct SoundbarApi {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl SoundbarApi {
    /// Create a client for the device described by `config`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use samsung_soundbar::{SoundbarApi, SoundbarConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = SoundbarConfig::new("192.168.1.100").with_port(56001);
    ///     let api = SoundbarApi::new(reqwest::Client::new(), &config)?;
    ///     let volume = api.get_value("GetVolume", "volume").await?;
    ///     println!("Volume: {:?}", volume);
    ///     Ok(())
    /// }
    /// ```
    pub fn new(http: reqwest::Client, config: &SoundbarConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            http,
            endpoint: config.endpoint(),
            timeout: config.timeout,
        })
    }

    /// The `http://{host}:{port}/UIC` endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send a raw command fragment and return the value under `key_to_extract`
    ///
    /// Returns `Ok(None)` when the reply is a well-formed envelope without
    /// that field. Transport failures, non-success statuses, timeouts and
    /// unparsable bodies are returned as errors; nothing is retried.
    pub async fn execute_command(
        &self,
        command: &str,
        key_to_extract: &str,
        endpoint: Option<&str>,
    ) -> Result<Option<String>> {
        let url = command_url(endpoint.unwrap_or(&self.endpoint), command);
        tracing::debug!("Executing: {} with cmd: {}", url, command);

        let body = match self.fetch(&url).await {
            Ok(body) => body,
            Err(SoundbarError::Timeout) => {
                tracing::error!("Timeout when executing command: {}", command);
                return Err(SoundbarError::Timeout);
            }
            Err(e) => {
                tracing::error!("HTTP request to {} failed: {}", url, e);
                return Err(e);
            }
        };
        tracing::debug!("Received: {}", body);

        let envelope = ResponseEnvelope::parse(&body).map_err(|e| {
            tracing::error!("Unusable response for {}: {}", command, e);
            e
        })?;

        Ok(envelope.get(key_to_extract))
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.http.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SoundbarError::Http {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Read a single value, e.g. `get_value("GetVolume", "volume")`
    pub async fn get_value(&self, action: &str, key_to_extract: &str) -> Result<Option<String>> {
        let command = Command::new(action);
        self.execute_command(&command.to_string(), key_to_extract, None).await
    }

    /// Set a property and return what the device echoes back for it
    ///
    /// Text values are sent as `type="str"`, integers as `type="dec"`. The echo
    /// is not compared with the requested value.
    pub async fn set_value(
        &self,
        action: &str,
        property_name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<Option<String>> {
        let command = Command::new(action).with_param(property_name, value);
        self.execute_command(&command.to_string(), property_name, None).await
    }

    /// Fetch power, volume and mute, one request after another
    ///
    /// The first failing request aborts the whole fetch.
    pub async fn get_status(&self) -> Result<RawStatus> {
        let power = self.get_value("GetPowerStatus", "power").await?;
        let volume = self.get_value("GetVolume", "volume").await?;
        let mute = self.get_value("GetMute", "mute").await?;

        Ok(RawStatus { power, volume, mute })
    }

    /// Check whether a soundbar answers at `http://{host}:{port}/test`
    ///
    /// Meant for initial setup only. Any failure, including a non-success
    /// status, counts as unreachable.
    pub async fn test_connection(http: &reqwest::Client, config: &SoundbarConfig) -> bool {
        let url = config.test_url();

        match http.get(&url).timeout(config.timeout).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!("Connection test to {} returned HTTP {}", url, response.status());
                false
            }
            Err(e) => {
                tracing::warn!("Connection test to {} failed: {}", url, e);
                false
            }
        }
    }
}
