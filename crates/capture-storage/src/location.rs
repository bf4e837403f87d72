//! Capture geolocation and orientation hints

use std::{fmt, ops::Neg};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// The amount of decimal places coordinates are rounded to, as `10^8`
pub const DECIMAL_SF: f64 = 100_000_000.0;
pub const LAT_MAX_POS: f64 = 90.0;
pub const LONG_MAX_POS: f64 = 180.0;
/// Lowest point on Earth, in metres
pub const ALT_MIN_HEIGHT: f64 = -430.0;
/// Highest point on Earth, in metres
pub const ALT_MAX_HEIGHT: f64 = 8848.0;
pub const BEARING_MAX: f64 = 360.0;

/// Where a capture was taken
#[derive(Default, Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeoLocation {
	latitude: f64,
	longitude: f64,
	altitude: Option<f64>,
	bearing: Option<f64>,
}

impl GeoLocation {
	/// Create a new [`GeoLocation`], clamping every value to its valid range.
	///
	/// Coordinates are rounded to 8 digits after the decimal point ([`DECIMAL_SF`]).
	///
	/// # Examples
	///
	/// ```
	/// use sd_capture_storage::GeoLocation;
	///
	/// let location = GeoLocation::new(38.897676331, -7.36560353, Some(32.0), None);
	/// assert_eq!(location.coordinates(), (38.89767633, -7.36560353));
	/// ```
	#[must_use]
	pub fn new(lat: f64, long: f64, altitude: Option<f64>, bearing: Option<f64>) -> Self {
		Self {
			latitude: Self::format_coordinate(lat, LAT_MAX_POS),
			longitude: Self::format_coordinate(long, LONG_MAX_POS),
			altitude: altitude.map(|v| v.clamp(ALT_MIN_HEIGHT, ALT_MAX_HEIGHT)),
			bearing: bearing.map(|v| v.clamp(0.0, BEARING_MAX)),
		}
	}

	/// This returns the contained coordinates as `(latitude, longitude)`
	#[inline]
	#[must_use]
	pub const fn coordinates(&self) -> (f64, f64) {
		(self.latitude, self.longitude)
	}

	#[inline]
	#[must_use]
	pub const fn altitude(&self) -> Option<f64> {
		self.altitude
	}

	#[inline]
	#[must_use]
	pub const fn bearing(&self) -> Option<f64> {
		self.bearing
	}

	/// `max` must be positive, and is the largest distance from zero allowed (e.g. 180 degrees)
	#[inline]
	fn format_coordinate(v: f64, max: f64) -> f64 {
		(v.clamp(max.neg(), max) * DECIMAL_SF).round() / DECIMAL_SF
	}
}

impl fmt::Display for GeoLocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}, {}", self.latitude, self.longitude)
	}
}

impl TryFrom<&str> for GeoLocation {
	type Error = Error;

	/// Parses a `"34.2493458, -23.4923843"` string
	fn try_from(value: &str) -> Result<Self> {
		let parts = value
			.split(',')
			.map(|part| part.trim().parse::<f64>())
			.collect::<std::result::Result<Vec<_>, _>>()
			.map_err(|_| Error::LocationParse)?;

		match parts.as_slice() {
			[lat, long] => Ok(Self::new(*lat, *long, None, None)),
			_ => Err(Error::LocationParse),
		}
	}
}

/// Orientation of a photo as stored in its EXIF `Orientation` tag
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
	#[default]
	Normal,
	CW90,
	CW180,
	CW270,
	MirroredVertical,
	MirroredHorizontal,
	MirroredHorizontalAnd90CW,
	MirroredHorizontalAnd270CW,
}

impl Orientation {
	/// Orientation a sensor rotation (in degrees, clockwise) corresponds to.
	///
	/// Values that are not a multiple of 90 are treated as [`Orientation::Normal`].
	#[must_use]
	pub const fn from_rotation_degrees(degrees: i32) -> Self {
		match degrees.rem_euclid(360) {
			90 => Self::CW90,
			180 => Self::CW180,
			270 => Self::CW270,
			_ => Self::Normal,
		}
	}

	/// The EXIF tag value (1-8)
	#[must_use]
	pub const fn exif_value(self) -> u32 {
		match self {
			Self::Normal => 1,
			Self::MirroredHorizontal => 2,
			Self::CW180 => 3,
			Self::MirroredVertical => 4,
			Self::MirroredHorizontalAnd270CW => 5,
			Self::CW90 => 6,
			Self::MirroredHorizontalAnd90CW => 7,
			Self::CW270 => 8,
		}
	}
}

impl From<u32> for Orientation {
	fn from(value: u32) -> Self {
		match value {
			2 => Self::MirroredHorizontal,
			3 => Self::CW180,
			4 => Self::MirroredVertical,
			5 => Self::MirroredHorizontalAnd270CW,
			6 => Self::CW90,
			7 => Self::MirroredHorizontalAnd90CW,
			8 => Self::CW270,
			_ => Self::Normal,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_location_is_clamped() {
		let location = GeoLocation::new(120.0, -200.0, Some(10_000.0), Some(-5.0));
		assert_eq!(location.coordinates(), (90.0, -180.0));
		assert_eq!(location.altitude(), Some(ALT_MAX_HEIGHT));
		assert_eq!(location.bearing(), Some(0.0));
	}

	#[test]
	fn test_location_from_str() {
		let location = GeoLocation::try_from("32.47583923, -28.49238495").unwrap();
		assert_eq!(location.to_string(), "32.47583923, -28.49238495");

		assert!(matches!(
			GeoLocation::try_from("32.4, north"),
			Err(Error::LocationParse)
		));
		assert!(matches!(
			GeoLocation::try_from("1, 2, 3"),
			Err(Error::LocationParse)
		));
	}

	#[test]
	fn test_orientation_exif_mapping() {
		for value in 1..=8 {
			assert_eq!(Orientation::from(value).exif_value(), value);
		}
		assert_eq!(Orientation::from(0), Orientation::Normal);
		assert_eq!(Orientation::from_rotation_degrees(-90), Orientation::CW270);
		assert_eq!(Orientation::from_rotation_degrees(450), Orientation::CW90);
	}
}
