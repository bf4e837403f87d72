#![doc = include_str!("../README.md")]
#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	clippy::expect_used,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::as_conversions,
	clippy::dbg_macro
)]
#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod cache;
pub mod clock;
pub mod config;
pub mod descriptor;
mod error;
pub mod kind;
pub mod location;
pub mod resolver;
pub mod volume;

pub use cache::ResolvedVolumeCache;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CaptureStorageConfig, PlatformGate};
pub use descriptor::{CaptureMetadata, CaptureOutput, OutputDescriptor, PhotoTags, StreamOutput};
pub use error::{Error, Result, VolumeEnumerationError};
pub use kind::MediaKind;
pub use location::{GeoLocation, Orientation};
pub use resolver::StorageResolver;
pub use volume::{StorageVolume, VolumeHandle, VolumeSource, VolumeState};
