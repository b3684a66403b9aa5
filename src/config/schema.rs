//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::gate::DEFAULT_COLOR;

/// Main configuration for Portal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Where gates are kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Defaults for new gates
    #[serde(default)]
    pub gates: GateDefaults,

    /// Tap timing
    #[serde(default)]
    pub gestures: GestureConfig,

    /// How calls are placed
    #[serde(default)]
    pub telephony: TelephonyConfig,
}

impl PortalConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("audio.sample_rate must be between 8000 and 192000");
        }

        if self.gates.default_color.trim().is_empty() {
            bail!("gates.default_color must not be empty");
        }

        if self.gestures.double_tap_ms == 0 {
            bail!("gestures.double_tap_ms must be greater than 0");
        }
        if self.gestures.long_press_ms == 0 {
            bail!("gestures.long_press_ms must be greater than 0");
        }

        if let Some(command) = &self.telephony.command {
            if command.trim().is_empty() {
                bail!("telephony.command must not be empty when set");
            }
        }

        Ok(())
    }
}

/// Audio output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz for rendered files (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output device name (None = default device)
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 { 44100 }

/// Gate storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Gate file path (None = platform data directory)
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The gate file to use
    pub fn resolve_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        directories::ProjectDirs::from("", "", "portal")
            .map(|dirs| dirs.data_dir().join("gates.json"))
            .unwrap_or_else(|| PathBuf::from("gates.json"))
    }
}

/// Defaults applied to new gates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateDefaults {
    /// Color for gates created without one (default: #4A90D9)
    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for GateDefaults {
    fn default() -> Self {
        Self {
            default_color: default_color(),
        }
    }
}

fn default_color() -> String { DEFAULT_COLOR.to_string() }

/// Gesture timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Window for a second tap in ms (default: 400)
    #[serde(default = "default_double_tap_ms")]
    pub double_tap_ms: u64,

    /// Hold time for a long press in ms (default: 600)
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
}

impl GestureConfig {
    /// Double tap window
    pub fn double_tap(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }

    /// Long press threshold
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_ms: default_double_tap_ms(),
            long_press_ms: default_long_press_ms(),
        }
    }
}

fn default_double_tap_ms() -> u64 { 400 }
fn default_long_press_ms() -> u64 { 600 }

/// Telephony launcher configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TelephonyConfig {
    /// Program that opens tel: URLs (None = platform URL handler)
    pub command: Option<String>,
}
