//! Storage volume types and the platform capability that lists them

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::{MediaKind, VolumeEnumerationError};

/// Media store name of the primary shared storage volume
pub const PRIMARY_VOLUME_NAME: &str = "external";

/// Mount state of a volume, using the platform's spelling
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VolumeState {
	Mounted,
	#[serde(rename = "mounted_ro")]
	#[strum(serialize = "mounted_ro")]
	MountedReadOnly,
	Unmounted,
	Checking,
	#[serde(rename = "nofs")]
	#[strum(serialize = "nofs")]
	NoFileSystem,
	Removed,
	BadRemoval,
	Unmountable,
	Shared,
	Ejecting,
	Unknown,
}

impl VolumeState {
	/// Parses a platform state string, anything unrecognised is [`VolumeState::Unknown`]
	#[must_use]
	pub fn from_platform(state: &str) -> Self {
		state.parse().unwrap_or(Self::Unknown)
	}
}

/// One storage volume as reported by the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageVolume {
	/// Opaque media store volume name, used to address the volume's collections
	pub volume_name: String,
	/// Human-readable label, only used for logging
	pub description: Option<String>,
	/// Whether this is the device's built-in shared storage
	pub is_primary: bool,
	pub state: VolumeState,
}

impl StorageVolume {
	pub fn primary() -> Self {
		Self {
			volume_name: PRIMARY_VOLUME_NAME.to_string(),
			description: Some("Internal shared storage".to_string()),
			is_primary: true,
			state: VolumeState::Mounted,
		}
	}

	pub fn removable(volume_name: impl Into<String>, state: VolumeState) -> Self {
		Self {
			volume_name: volume_name.into(),
			description: None,
			is_primary: false,
			state,
		}
	}

	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// A volume may receive captures when it is removable and mounted read-write
	#[must_use]
	pub fn is_capture_candidate(&self) -> bool {
		!self.is_primary && self.state == VolumeState::Mounted && !self.volume_name.is_empty()
	}
}

/// Picks the first volume, in enumeration order, that may receive captures.
///
/// Other candidates after the first one are ignored.
#[must_use]
pub fn select_preferred(volumes: &[StorageVolume]) -> Option<&StorageVolume> {
	volumes.iter().find(|volume| volume.is_capture_candidate())
}

/// Address of a media collection on a specific volume
///
/// Renders as the media store content URI, e.g. `content://media/external/images/media`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VolumeHandle {
	volume_name: String,
	kind: MediaKind,
}

impl VolumeHandle {
	/// The collection of `kind` on the primary volume
	#[must_use]
	pub fn primary(kind: MediaKind) -> Self {
		Self {
			volume_name: PRIMARY_VOLUME_NAME.to_string(),
			kind,
		}
	}

	/// The collection of `kind` on `volume`.
	///
	/// Media store volume names are lower case, so the identifier is normalised here.
	#[must_use]
	pub fn for_volume(volume: &StorageVolume, kind: MediaKind) -> Self {
		if volume.is_primary {
			return Self::primary(kind);
		}

		Self {
			volume_name: volume.volume_name.to_lowercase(),
			kind,
		}
	}

	#[must_use]
	pub fn volume_name(&self) -> &str {
		&self.volume_name
	}

	#[must_use]
	pub const fn kind(&self) -> MediaKind {
		self.kind
	}

	#[must_use]
	pub fn is_primary(&self) -> bool {
		self.volume_name == PRIMARY_VOLUME_NAME
	}
}

impl fmt::Display for VolumeHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"content://media/{}/{}/media",
			self.volume_name,
			self.kind.collection()
		)
	}
}

/// Platform capability listing the currently known storage volumes
///
/// Implementations are expected to be a synchronous, local read with no side effects.
pub trait VolumeSource: Send + Sync {
	fn list_volumes(&self) -> Result<Vec<StorageVolume>, VolumeEnumerationError>;
}

impl VolumeSource for Vec<StorageVolume> {
	fn list_volumes(&self) -> Result<Vec<StorageVolume>, VolumeEnumerationError> {
		Ok(self.clone())
	}
}

impl<T: VolumeSource + ?Sized> VolumeSource for Arc<T> {
	fn list_volumes(&self) -> Result<Vec<StorageVolume>, VolumeEnumerationError> {
		(**self).list_volumes()
	}
}

impl<T: VolumeSource + ?Sized> VolumeSource for &T {
	fn list_volumes(&self) -> Result<Vec<StorageVolume>, VolumeEnumerationError> {
		(**self).list_volumes()
	}
}
