//! Resolves where captures are stored and builds their output descriptors

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
	volume::select_preferred, CaptureMetadata, CaptureOutput, CaptureStorageConfig, Clock,
	MediaKind, OutputDescriptor, ResolvedVolumeCache, Result, StreamOutput, SystemClock,
	VolumeHandle, VolumeSource,
};

/// Chooses the volume each kind of capture is written to and describes the output file.
///
/// A mounted removable volume is preferred over the primary one. Once found, it is kept in the
/// shared [`ResolvedVolumeCache`] and the platform is not asked again for that kind until the
/// slot is invalidated.
#[derive(Debug)]
pub struct StorageResolver<S, C = SystemClock> {
	source: S,
	cache: Arc<ResolvedVolumeCache>,
	clock: C,
	config: CaptureStorageConfig,
}

impl<S: VolumeSource> StorageResolver<S> {
	pub fn new(source: S, cache: Arc<ResolvedVolumeCache>) -> Self {
		Self::with_clock(source, cache, SystemClock)
	}
}

impl<S: VolumeSource, C: Clock> StorageResolver<S, C> {
	pub fn with_clock(source: S, cache: Arc<ResolvedVolumeCache>, clock: C) -> Self {
		Self {
			source,
			cache,
			clock,
			config: CaptureStorageConfig::default(),
		}
	}

	#[must_use]
	pub fn with_config(mut self, config: CaptureStorageConfig) -> Self {
		self.config = config;
		self
	}

	pub const fn config(&self) -> &CaptureStorageConfig {
		&self.config
	}

	pub const fn cache(&self) -> &Arc<ResolvedVolumeCache> {
		&self.cache
	}

	/// Returns the collection handle captures of `kind` should be written to.
	///
	/// While the cache slot for `kind` is unresolved the platform volumes are listed and the
	/// first mounted, non-primary one is picked and cached. When there is none, or listing
	/// fails, the primary volume is returned and the slot is left unresolved (unless
	/// [`CaptureStorageConfig::settle_on_primary`] is set), so the next call looks again.
	#[instrument(skip(self))]
	pub fn resolve_preferred_volume(&self, kind: MediaKind) -> VolumeHandle {
		if let Some(handle) = self.cache.get(kind) {
			return handle;
		}

		let volumes = match self.source.list_volumes() {
			Ok(volumes) => volumes,
			Err(e) => {
				warn!("{e}; falling back to the primary volume");
				return VolumeHandle::primary(kind);
			}
		};

		if let Some(volume) = select_preferred(&volumes) {
			let handle = VolumeHandle::for_volume(volume, kind);
			info!(
				volume = %volume.volume_name,
				description = volume.description.as_deref().unwrap_or_default(),
				%handle,
				"Storing {kind} captures on removable volume"
			);
			self.cache.store(kind, handle.clone());
			return handle;
		}

		debug!(
			volumes = volumes.len(),
			"No mounted removable volume, using the primary volume"
		);

		let handle = VolumeHandle::primary(kind);
		if self.config.settle_on_primary {
			self.cache.store(kind, handle.clone());
		}
		handle
	}

	/// Same as [`Self::resolve_preferred_volume`], keyed by media store collection name
	pub fn resolve_collection(&self, collection: &str) -> Result<VolumeHandle> {
		MediaKind::from_collection(collection).map(|kind| self.resolve_preferred_volume(kind))
	}

	/// Builds the descriptor the media index needs to store a capture of `kind`
	#[instrument(skip(self, metadata))]
	pub fn build_output_descriptor(
		&self,
		kind: MediaKind,
		metadata: &CaptureMetadata,
	) -> OutputDescriptor {
		let display_name = self.clock.display_name();
		let relative_path = self
			.config
			.platform
			.supports_relative_path
			.then(|| self.config.relative_path(kind).to_string());

		let target_volume = self.resolve_preferred_volume(kind);

		debug!(%display_name, %target_volume, "Built capture output descriptor");

		OutputDescriptor {
			kind,
			display_name,
			mime_type: kind.mime_type().to_string(),
			relative_path,
			target_volume,
			location: metadata.location_for(kind),
			photo_tags: metadata.photo_tags_for(kind),
		}
	}

	pub fn build_output_descriptor_for_collection(
		&self,
		collection: &str,
		metadata: &CaptureMetadata,
	) -> Result<OutputDescriptor> {
		MediaKind::from_collection(collection)
			.map(|kind| self.build_output_descriptor(kind, metadata))
	}

	/// Describes a capture that goes straight into `sink`.
	///
	/// No volume is resolved and no relative path is computed for this mode.
	pub fn build_stream_output<W>(
		&self,
		kind: MediaKind,
		metadata: &CaptureMetadata,
		sink: W,
	) -> StreamOutput<W> {
		StreamOutput {
			kind,
			display_name: self.clock.display_name(),
			mime_type: kind.mime_type().to_string(),
			sink,
			location: metadata.location_for(kind),
			photo_tags: metadata.photo_tags_for(kind),
		}
	}

	/// Writes into `sink` when one is given, otherwise through the media index
	pub fn build_output<W>(
		&self,
		kind: MediaKind,
		metadata: &CaptureMetadata,
		sink: Option<W>,
	) -> CaptureOutput<W> {
		match sink {
			Some(sink) => CaptureOutput::Stream(self.build_stream_output(kind, metadata, sink)),
			None => CaptureOutput::MediaStore(self.build_output_descriptor(kind, metadata)),
		}
	}

	/// Forget the cached volume for `kind`, e.g. after the removable volume was ejected
	pub fn invalidate(&self, kind: MediaKind) {
		self.cache.invalidate(kind);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		FixedClock, PlatformGate, StorageVolume, VolumeEnumerationError, VolumeState,
	};
	use chrono::NaiveDate;

	struct FailingSource;

	impl VolumeSource for FailingSource {
		fn list_volumes(&self) -> std::result::Result<Vec<StorageVolume>, VolumeEnumerationError> {
			Err(VolumeEnumerationError::new("storage service unavailable"))
		}
	}

	fn fixed_clock() -> FixedClock {
		FixedClock(
			NaiveDate::from_ymd_opt(2023, 6, 9)
				.and_then(|date| date.and_hms_milli_opt(18, 30, 1, 42))
				.unwrap(),
		)
	}

	#[test]
	fn test_enumeration_failure_falls_back_to_primary() {
		let resolver = StorageResolver::new(FailingSource, Arc::new(ResolvedVolumeCache::new()));

		let handle = resolver.resolve_preferred_volume(MediaKind::Video);
		assert!(handle.is_primary());
		assert!(!resolver.cache().is_resolved(MediaKind::Video));
	}

	#[test]
	fn test_settle_on_primary_caches_fallback() {
		let resolver = StorageResolver::new(
			vec![StorageVolume::primary()],
			Arc::new(ResolvedVolumeCache::new()),
		)
		.with_config(CaptureStorageConfig {
			settle_on_primary: true,
			..Default::default()
		});

		assert!(resolver.resolve_preferred_volume(MediaKind::Photo).is_primary());
		assert!(resolver.cache().is_resolved(MediaKind::Photo));
	}

	#[test]
	fn test_descriptor_fields() {
		let volumes = vec![
			StorageVolume::primary(),
			StorageVolume::removable("9C33-6BBD", VolumeState::Mounted),
		];
		let resolver =
			StorageResolver::with_clock(volumes, Arc::new(ResolvedVolumeCache::new()), fixed_clock());

		let descriptor =
			resolver.build_output_descriptor(MediaKind::Photo, &CaptureMetadata::default());

		assert_eq!(descriptor.display_name, "2023-06-09-18-30-01-042");
		assert_eq!(descriptor.mime_type, "image/jpeg");
		assert_eq!(descriptor.relative_path.as_deref(), Some("DCIM/Photo"));
		assert_eq!(
			descriptor.target_volume.to_string(),
			"content://media/9c33-6bbd/images/media"
		);
		assert_eq!(descriptor.file_name(), "2023-06-09-18-30-01-042.jpg");
	}

	#[test]
	fn test_stream_mode_skips_resolution() {
		let resolver = StorageResolver::with_clock(
			FailingSource,
			Arc::new(ResolvedVolumeCache::new()),
			fixed_clock(),
		)
		.with_config(CaptureStorageConfig {
			platform: PlatformGate::from_api_level(33),
			..Default::default()
		});

		let output = resolver.build_output(
			MediaKind::Photo,
			&CaptureMetadata::default(),
			Some(Vec::<u8>::new()),
		);

		assert_eq!(output.display_name(), "2023-06-09-18-30-01-042");
		assert_eq!(output.mime_type(), "image/jpeg");
		assert!(matches!(output, CaptureOutput::Stream(_)));
		assert!(!resolver.cache().is_resolved(MediaKind::Photo));
	}
}
