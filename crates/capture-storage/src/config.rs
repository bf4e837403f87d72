//! Capture storage configuration

use std::{fs, path::Path};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::MediaKind;

pub const CONFIG_FILE_NAME: &str = "capture-storage.json";

/// First platform API level that accepts relative directory hints for media store entries
pub const RELATIVE_PATH_MIN_API_LEVEL: u32 = 29;

/// What the host platform's media index is able to accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformGate {
	/// Whether entries may carry a relative directory hint. Without it the index writes to its
	/// flat default location.
	pub supports_relative_path: bool,
}

impl PlatformGate {
	#[must_use]
	pub const fn from_api_level(api_level: u32) -> Self {
		Self {
			supports_relative_path: api_level >= RELATIVE_PATH_MIN_API_LEVEL,
		}
	}
}

impl Default for PlatformGate {
	fn default() -> Self {
		Self {
			supports_relative_path: true,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureStorageConfig {
	/// Config schema version
	pub version: u32,

	/// Relative directory for photos
	pub photo_directory: String,

	/// Relative directory for videos
	pub video_directory: String,

	pub platform: PlatformGate,

	/// Also cache a fallback to the primary volume, so a resolution that found no removable
	/// volume is never repeated
	#[serde(default)]
	pub settle_on_primary: bool,
}

impl CaptureStorageConfig {
	const fn target_version() -> u32 {
		1
	}

	/// Load configuration from a data directory, writing the defaults if none exists yet
	pub fn load_from(data_dir: &Path) -> Result<Self> {
		let config_path = data_dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			info!("Loading capture storage config from {:?}", config_path);
			let json = fs::read_to_string(&config_path)?;
			let config: Self = serde_json::from_str(&json)?;

			match config.version {
				v if v == Self::target_version() => Ok(config),
				v => Err(anyhow!("Unknown capture storage config version: {}", v)),
			}
		} else {
			warn!(
				"No capture storage config found, creating default at {:?}",
				config_path
			);
			let config = Self::default();
			config.save_to(data_dir)?;
			Ok(config)
		}
	}

	/// Load configuration, replacing an unreadable file with the defaults
	pub fn load_or_create(data_dir: &Path) -> Result<Self> {
		Self::load_from(data_dir).or_else(|e| {
			warn!("Failed to load capture storage config, resetting it: {}", e);
			let config = Self::default();
			config.save_to(data_dir)?;
			Ok(config)
		})
	}

	pub fn save_to(&self, data_dir: &Path) -> Result<()> {
		fs::create_dir_all(data_dir)?;

		let config_path = data_dir.join(CONFIG_FILE_NAME);
		let json = serde_json::to_string_pretty(self)?;
		fs::write(&config_path, json)?;
		info!("Saved capture storage config to {:?}", config_path);
		Ok(())
	}

	#[must_use]
	pub fn relative_path(&self, kind: MediaKind) -> &str {
		match kind {
			MediaKind::Photo => &self.photo_directory,
			MediaKind::Video => &self.video_directory,
		}
	}
}

impl Default for CaptureStorageConfig {
	fn default() -> Self {
		Self {
			version: Self::target_version(),
			photo_directory: MediaKind::Photo.default_relative_path().to_string(),
			video_directory: MediaKind::Video.default_relative_path().to_string(),
			platform: PlatformGate::default(),
			settle_on_primary: false,
		}
	}
}
