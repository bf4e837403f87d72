//! Records handed to the media index (or a raw sink) for a finished capture

use serde::{Deserialize, Serialize};

use crate::{GeoLocation, MediaKind, Orientation, VolumeHandle};

/// Photo-only hints carried alongside the encoded image
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoTags {
	pub orientation: Orientation,
	/// Whether the image is mirrored left to right, as front cameras usually are
	pub reversed_horizontal: bool,
	pub reversed_vertical: bool,
}

/// What the capture pipeline knows about a capture besides its pixels
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
	/// Only attached to videos
	pub location: Option<GeoLocation>,
	/// Only attached to photos
	pub photo: PhotoTags,
}

impl CaptureMetadata {
	#[must_use]
	pub fn with_location(mut self, location: GeoLocation) -> Self {
		self.location = Some(location);
		self
	}

	#[must_use]
	pub fn with_photo_tags(mut self, photo: PhotoTags) -> Self {
		self.photo = photo;
		self
	}

	pub(crate) const fn location_for(&self, kind: MediaKind) -> Option<GeoLocation> {
		match kind {
			MediaKind::Video => self.location,
			MediaKind::Photo => None,
		}
	}

	pub(crate) const fn photo_tags_for(&self, kind: MediaKind) -> Option<PhotoTags> {
		match kind {
			MediaKind::Photo => Some(self.photo),
			MediaKind::Video => None,
		}
	}
}

/// Everything the media index needs to create the entry for a capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDescriptor {
	pub kind: MediaKind,
	/// Millisecond timestamp, `YYYY-MM-DD-HH-mm-ss-SSS`
	pub display_name: String,
	pub mime_type: String,
	/// Only set when the platform accepts relative directory hints
	pub relative_path: Option<String>,
	pub target_volume: VolumeHandle,
	pub location: Option<GeoLocation>,
	pub photo_tags: Option<PhotoTags>,
}

impl OutputDescriptor {
	/// Display name with the kind's file extension
	#[must_use]
	pub fn file_name(&self) -> String {
		format!("{}.{}", self.display_name, self.kind.extension())
	}
}

/// A capture written straight into a caller provided sink instead of the media index
#[derive(Debug)]
pub struct StreamOutput<W> {
	pub kind: MediaKind,
	pub display_name: String,
	pub mime_type: String,
	pub sink: W,
	pub location: Option<GeoLocation>,
	pub photo_tags: Option<PhotoTags>,
}

impl<W> StreamOutput<W> {
	pub fn into_sink(self) -> W {
		self.sink
	}
}

/// Where a capture ends up
#[derive(Debug)]
pub enum CaptureOutput<W> {
	MediaStore(OutputDescriptor),
	Stream(StreamOutput<W>),
}

impl<W> CaptureOutput<W> {
	#[must_use]
	pub fn display_name(&self) -> &str {
		match self {
			Self::MediaStore(descriptor) => &descriptor.display_name,
			Self::Stream(stream) => &stream.display_name,
		}
	}

	#[must_use]
	pub fn mime_type(&self) -> &str {
		match self {
			Self::MediaStore(descriptor) => &descriptor.mime_type,
			Self::Stream(stream) => &stream.mime_type,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_metadata_is_gated_by_kind() {
		let metadata = CaptureMetadata::default()
			.with_location(GeoLocation::new(1.0, 2.0, None, None))
			.with_photo_tags(PhotoTags {
				orientation: Orientation::CW90,
				reversed_horizontal: true,
				reversed_vertical: false,
			});

		assert!(metadata.location_for(MediaKind::Photo).is_none());
		assert!(metadata.location_for(MediaKind::Video).is_some());
		assert_eq!(
			metadata
				.photo_tags_for(MediaKind::Photo)
				.map(|tags| tags.orientation),
			Some(Orientation::CW90)
		);
		assert!(metadata.photo_tags_for(MediaKind::Video).is_none());
	}

	#[test]
	fn test_file_name() {
		let descriptor = OutputDescriptor {
			kind: MediaKind::Video,
			display_name: "2023-01-02-03-04-05-006".to_string(),
			mime_type: MediaKind::Video.mime_type().to_string(),
			relative_path: None,
			target_volume: VolumeHandle::primary(MediaKind::Video),
			location: None,
			photo_tags: None,
		};

		assert_eq!(descriptor.file_name(), "2023-01-02-03-04-05-006.mp4");
	}
}
