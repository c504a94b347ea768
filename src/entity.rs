use crate::client::SoundbarApi;
use crate::config::SoundbarConfig;
use crate::error::{Result, SoundbarError};
use crate::types::{Feature, PowerState, StatusSnapshot, MAX_DEVICE_VOLUME, SUPPORTED_FEATURES, VOLUME_STEP};

/// Host-facing soundbar entity
///
/// Caches the last successfully fetched [`StatusSnapshot`] and routes user
/// intents (mute, volume) to [`SoundbarApi`]. The host decides when to call
/// [`refresh`](Self::refresh); see [`SoundbarConfig::scan_interval`].
#[derive(Debug, Clone)]
pub struct SoundbarEntity {
    name: String,
    api: SoundbarApi,
    snapshot: Option<StatusSnapshot>,
}

impl SoundbarEntity {
    /// Create an entity for the device described by `config`
    pub fn new(http: reqwest::Client, config: &SoundbarConfig) -> Result<Self> {
        let api = SoundbarApi::new(http, config)?;
        Ok(Self::from_api(config.name.clone(), api))
    }

    /// Wrap an existing client
    pub fn from_api(name: impl Into<String>, api: SoundbarApi) -> Self {
        let name = name.into();
        tracing::info!("Initializing soundbar entity {} at {}", name, api.endpoint());

        Self {
            name,
            api,
            snapshot: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The underlying device client
    pub fn api(&self) -> &SoundbarApi {
        &self.api
    }

    /// Features the host may offer for this entity
    pub fn supported_features(&self) -> &'static [Feature] {
        &SUPPORTED_FEATURES
    }

    /// Last known state, `None` until the first successful refresh
    pub fn snapshot(&self) -> Option<&StatusSnapshot> {
        self.snapshot.as_ref()
    }

    /// Power state; `Off` until the first successful refresh
    pub fn state(&self) -> PowerState {
        self.snapshot.map_or(PowerState::Off, |s| s.state)
    }

    pub fn is_on(&self) -> bool {
        self.state() == PowerState::On
    }

    /// Volume as a 0.0–1.0 fraction
    pub fn volume_level(&self) -> Option<f64> {
        self.snapshot.map(|s| s.volume)
    }

    pub fn is_volume_muted(&self) -> bool {
        self.snapshot.is_some_and(|s| s.muted)
    }

    /// Fetch the latest state from the device
    ///
    /// On success the cached snapshot is replaced and returned. On failure the
    /// error is returned and the previous snapshot stays in place.
    pub async fn refresh(&mut self) -> Result<StatusSnapshot> {
        let raw = self.api.get_status().await?;
        let snapshot = StatusSnapshot::try_from(raw)?;

        tracing::debug!("{} status: {:?}", self.name, snapshot);
        self.snapshot = Some(snapshot);
        Ok(snapshot)
    }

    // ========== Mute Control ==========

    /// Mute or unmute the device
    ///
    /// The cached snapshot is not touched; the next refresh reports the result.
    pub async fn set_muted(&self, muted: bool) -> Result<()> {
        let value = if muted { "on" } else { "off" };
        let echo = self.api.set_value("SetMute", "mute", value).await?;
        tracing::debug!("SetMute {} acknowledged with {:?}", value, echo);
        Ok(())
    }

    // ========== Volume Control ==========

    /// Set the volume from a 0.0–1.0 fraction
    ///
    /// The fraction is scaled to 0–100 and rounded half up.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use samsung_soundbar::{SoundbarConfig, SoundbarEntity};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = SoundbarConfig::new("192.168.1.100");
    /// let entity = SoundbarEntity::new(reqwest::Client::new(), &config)?;
    /// entity.set_volume(0.25).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn set_volume(&self, fraction: f64) -> Result<()> {
        let level = fraction_to_device_volume(fraction)?;
        self.send_volume(level).await
    }

    /// Raise the volume by one device step
    pub async fn volume_up(&self) -> Result<()> {
        let current = self.snapshot.ok_or(SoundbarError::NoState)?.device_volume;
        self.send_volume(current.saturating_add(VOLUME_STEP).min(MAX_DEVICE_VOLUME))
            .await
    }

    /// Lower the volume by one device step
    pub async fn volume_down(&self) -> Result<()> {
        let current = self.snapshot.ok_or(SoundbarError::NoState)?.device_volume;
        self.send_volume(current.saturating_sub(VOLUME_STEP)).await
    }

    async fn send_volume(&self, level: u8) -> Result<()> {
        let echo = self.api.set_value("SetVolume", "volume", level).await?;
        tracing::debug!("SetVolume {} acknowledged with {:?}", level, echo);
        Ok(())
    }
}

/// Scale a 0.0–1.0 fraction to the device's 0–100 range, rounding half up
fn fraction_to_device_volume(fraction: f64) -> Result<u8> {
    if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
        return Err(SoundbarError::InvalidVolume(fraction));
    }
    Ok((fraction * f64::from(MAX_DEVICE_VOLUME)).round() as u8)
}
