//! Engine configuration (JSON file + command line overrides)

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::{Error, Result};
use crate::input::remote::{DEFAULT_PORT, DEFAULT_TOPIC};
use crate::input::Button;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "tinydoom.json";
/// PSRAM on the target board
pub const DEFAULT_PSRAM_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    /// Window pixels per framebuffer pixel (host preview only)
    pub scale: u32,
    pub vsync: bool,
    /// Size of the memory region the framebuffer is allocated from
    pub psram_bytes: usize,
    /// WAD file to load at startup
    pub wad: Option<PathBuf>,
    /// SDL key name -> button. Empty means the built-in bindings.
    pub keymap: BTreeMap<String, Button>,
    pub mqtt: Option<MqttConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: 2,
            vsync: true,
            psram_bytes: DEFAULT_PSRAM_BYTES,
            wad: None,
            keymap: BTreeMap::new(),
            mqtt: None,
        }
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.to_string(),
        }
    }
}

impl EngineConfig {
    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load `path` if it exists, otherwise defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
