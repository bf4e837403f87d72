//! Wall-clock sources for capture file names

use chrono::{Local, NaiveDateTime};

/// `YYYY-MM-DD-HH-mm-ss-SSS`, chrono formatting is not localised so the output is the same
/// for every host locale
pub const DISPLAY_NAME_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// Source of the local wall-clock time, with at least millisecond resolution
pub trait Clock: Send + Sync {
	fn now(&self) -> NaiveDateTime;

	/// Formats the current time as a capture display name.
	///
	/// Two captures within the same millisecond get the same name.
	fn display_name(&self) -> String {
		self.now().format(DISPLAY_NAME_FORMAT).to_string()
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> NaiveDateTime {
		Local::now().naive_local()
	}
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
	fn now(&self) -> NaiveDateTime {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	#[test]
	fn test_display_name_is_zero_padded() {
		let instant = NaiveDate::from_ymd_opt(2023, 1, 2)
			.and_then(|date| date.and_hms_milli_opt(3, 4, 5, 7))
			.unwrap();

		assert_eq!(FixedClock(instant).display_name(), "2023-01-02-03-04-05-007");
	}

	#[test]
	fn test_system_clock_shape() {
		let name = SystemClock.display_name();
		assert_eq!(name.len(), "YYYY-MM-DD-HH-mm-ss-SSS".len());
		assert!(name
			.split('-')
			.all(|part| part.chars().all(|c| c.is_ascii_digit())));
	}
}
