#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	#[error(transparent)]
	VolumeEnumeration(#[from] VolumeEnumerationError),
	#[error("there was an error while parsing the location of a capture")]
	LocationParse,
}

/// Returned by a [`crate::VolumeSource`] when the platform could not list its volumes.
///
/// Resolution treats this as non-fatal and falls back to the primary volume.
#[derive(Debug, thiserror::Error)]
#[error("failed to enumerate storage volumes: {reason}")]
pub struct VolumeEnumerationError {
	pub reason: String,
}

impl VolumeEnumerationError {
	pub fn new(reason: impl Into<String>) -> Self {
		Self {
			reason: reason.into(),
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
