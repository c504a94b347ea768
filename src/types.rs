use crate::error::SoundbarError;
use serde::{Deserialize, Serialize};

/// Device volume range upper bound (wire units)
pub const MAX_DEVICE_VOLUME: u8 = 100;

/// Volume change per step, in device units
pub const VOLUME_STEP: u8 = 1;

/// Raw status fields as returned by the device, each possibly absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStatus {
    /// `on` / `off`
    pub power: Option<String>,

    /// Decimal string, 0–100
    pub volume: Option<String>,

    /// `on` / `off`
    pub mute: Option<String>,
}

/// Power state exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    /// Map the device's `power` field; anything other than `off` counts as on
    pub fn from_wire(value: &str) -> Self {
        if value == "off" {
            PowerState::Off
        } else {
            PowerState::On
        }
    }
}

/// Entity state as of the last successful refresh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub state: PowerState,

    /// Volume as a 0.0–1.0 fraction
    pub volume: f64,

    pub muted: bool,

    /// Volume in device units, clamped to 0–100
    pub device_volume: u8,
}

impl TryFrom<RawStatus> for StatusSnapshot {
    type Error = SoundbarError;

    fn try_from(raw: RawStatus) -> Result<Self, Self::Error> {
        let power = raw.power.ok_or(SoundbarError::MissingField("power"))?;
        let volume = raw.volume.ok_or(SoundbarError::MissingField("volume"))?;
        let mute = raw.mute.ok_or(SoundbarError::MissingField("mute"))?;

        let level: f64 = volume
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| SoundbarError::InvalidValue {
                field: "volume",
                value: volume.clone(),
            })?;

        Ok(Self {
            state: PowerState::from_wire(&power),
            volume: level / 100.0,
            muted: mute == "on",
            device_volume: level.round().clamp(0.0, f64::from(MAX_DEVICE_VOLUME)) as u8,
        })
    }
}

/// Capabilities advertised to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    VolumeStep,
    VolumeSet,
    VolumeMute,
}

/// Everything a soundbar entity supports
pub const SUPPORTED_FEATURES: [Feature; 3] = [Feature::VolumeStep, Feature::VolumeSet, Feature::VolumeMute];
