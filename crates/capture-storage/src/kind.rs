//! Kinds of captured media and the storage constants derived from them

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

use crate::{Error, Result};

/// The kind of media produced by a capture
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
	/// Still image, stored as JPEG
	Photo,
	/// Video recording, stored as MP4
	Video,
}

impl MediaKind {
	#[must_use]
	pub const fn mime_type(self) -> &'static str {
		match self {
			Self::Photo => "image/jpeg",
			Self::Video => "video/mp4",
		}
	}

	#[must_use]
	pub const fn extension(self) -> &'static str {
		match self {
			Self::Photo => "jpg",
			Self::Video => "mp4",
		}
	}

	/// Directory under the volume root that captures of this kind go to by default
	#[must_use]
	pub const fn default_relative_path(self) -> &'static str {
		match self {
			Self::Photo => "DCIM/Photo",
			Self::Video => "DCIM/Video",
		}
	}

	/// Path segment of the media store collection for this kind
	#[must_use]
	pub const fn collection(self) -> &'static str {
		match self {
			Self::Photo => "images",
			Self::Video => "video",
		}
	}

	/// Maps a media store collection name (`"Images"` or `"Video"`) to a kind.
	///
	/// Any other name is rejected with [`Error::InvalidArgument`].
	pub fn from_collection(collection: &str) -> Result<Self> {
		match collection {
			"Images" => Ok(Self::Photo),
			"Video" => Ok(Self::Video),
			other => Err(Error::InvalidArgument(format!(
				"wrong media store collection \"{other}\""
			))),
		}
	}

	pub(crate) const fn slot(self) -> usize {
		match self {
			Self::Photo => 0,
			Self::Video => 1,
		}
	}
}

impl FromStr for MediaKind {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		match s.to_ascii_lowercase().as_str() {
			"photo" | "image" | "images" => Ok(Self::Photo),
			"video" => Ok(Self::Video),
			_ => Err(Error::InvalidArgument(format!("unknown media kind \"{s}\""))),
		}
	}
}
