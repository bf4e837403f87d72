//! Per-kind cache of the resolved capture volume

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::{MediaKind, VolumeHandle};

/// Holds, for each [`MediaKind`], the volume handle captures are written to.
///
/// Each slot starts out unresolved, meaning "use the primary volume". Photo and video slots
/// are independent, so resolving one never blocks on the other. Writes replace the whole
/// handle under the slot's lock, so readers only ever see a complete value.
#[derive(Debug, Default)]
pub struct ResolvedVolumeCache {
	slots: [RwLock<Option<VolumeHandle>>; 2],
}

impl ResolvedVolumeCache {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// The cached handle for `kind`, or `None` while the slot is still at its default
	#[must_use]
	pub fn get(&self, kind: MediaKind) -> Option<VolumeHandle> {
		self.slots[kind.slot()]
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.clone()
	}

	#[must_use]
	pub fn is_resolved(&self, kind: MediaKind) -> bool {
		self.slots[kind.slot()]
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.is_some()
	}

	/// Stores `handle` for `kind`; when several resolutions race, the last one wins
	pub fn store(&self, kind: MediaKind, handle: VolumeHandle) {
		debug!(%kind, %handle, "Caching capture volume");
		*self.slots[kind.slot()]
			.write()
			.unwrap_or_else(PoisonError::into_inner) = Some(handle);
	}

	/// Resets `kind` back to its default so the next resolution enumerates volumes again
	pub fn invalidate(&self, kind: MediaKind) {
		if self.slots[kind.slot()]
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.take()
			.is_some()
		{
			debug!(%kind, "Invalidated cached capture volume");
		}
	}

	pub fn invalidate_all(&self) {
		self.invalidate(MediaKind::Photo);
		self.invalidate(MediaKind::Video);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{StorageVolume, VolumeState};

	#[test]
	fn test_slots_are_independent() {
		let cache = ResolvedVolumeCache::new();
		let sd_card = StorageVolume::removable("0000-1111", VolumeState::Mounted);

		assert!(cache.get(MediaKind::Photo).is_none());
		cache.store(
			MediaKind::Photo,
			VolumeHandle::for_volume(&sd_card, MediaKind::Photo),
		);

		assert!(cache.is_resolved(MediaKind::Photo));
		assert!(!cache.is_resolved(MediaKind::Video));
	}

	#[test]
	fn test_invalidate() {
		let cache = ResolvedVolumeCache::new();
		let sd_card = StorageVolume::removable("0000-1111", VolumeState::Mounted);

		for kind in [MediaKind::Photo, MediaKind::Video] {
			cache.store(kind, VolumeHandle::for_volume(&sd_card, kind));
		}

		cache.invalidate(MediaKind::Video);
		assert!(cache.is_resolved(MediaKind::Photo));
		assert!(!cache.is_resolved(MediaKind::Video));

		cache.invalidate_all();
		assert!(cache.get(MediaKind::Photo).is_none());
	}
}
