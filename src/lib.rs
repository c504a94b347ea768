//! Rust library for controlling Samsung soundbars over their local HTTP/XML API
//!
//! Soundbars expose a `UIC` endpoint that accepts an XML command fragment in
//! the `cmd` query parameter of a GET request and answers with a small XML
//! document. This library provides:
//!
//! - Command construction and request execution with a per-request timeout
//! - Response parsing and single-field extraction
//! - Typed get/set/status operations
//! - A polling entity that maps device values to power/volume/mute state
//! - A setup-time connectivity probe
//!
//! # Quick Start
//!
//! ```no_run
//! use samsung_soundbar::{SoundbarConfig, SoundbarEntity};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SoundbarConfig::new("192.168.1.100").with_port(56001);
//!     let mut soundbar = SoundbarEntity::new(reqwest::Client::new(), &config)?;
//!
//!     let status = soundbar.refresh().await?;
//!     println!("{:?}, volume {:.2}, muted {}", status.state, status.volume, status.muted);
//!
//!     soundbar.set_volume(0.3).await?;
//!     soundbar.set_muted(false).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Config**: per-installation connection settings
//! - **Protocol**: command fragments, `cmd` encoding, `UIC` response envelope
//! - **Client**: HTTP request execution and get/set/status operations
//! - **Entity**: cached status snapshot and user-intent routing
//! - **Types**: status records and advertised features

mod client;
mod config;
mod entity;
mod error;
mod protocol;
mod types;

// Public exports
pub use client::SoundbarApi;
pub use config::{SoundbarConfig, DEFAULT_NAME, DEFAULT_PORT, DEFAULT_SCAN_INTERVAL, DEFAULT_TIMEOUT};
pub use entity::SoundbarEntity;
pub use error::{Result, SoundbarError};
pub use protocol::{encode_command, Command, Param, ParamValue, ResponseEnvelope};
pub use types::{Feature, PowerState, RawStatus, StatusSnapshot, MAX_DEVICE_VOLUME, SUPPORTED_FEATURES, VOLUME_STEP};
