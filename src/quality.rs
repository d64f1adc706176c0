use std::fmt;
use std::time::{Duration, SystemTime};

use crate::error::{Result, TypesError};
use crate::value::{TaggedType, Value};
use crate::value_type::ValueType;

/// Trust indicator for a signal's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum SignalQuality {
	/// Quality not specified.
	#[default]
	Unknown = 0,
	/// Value is valid and reliable.
	Valid = 1,
	/// Value failed validation or the sensor reported an error; do not trust it.
	Invalid = 2,
	/// Signal source not present, disconnected, or not yet initialized.
	/// Not an error, just unavailable.
	NotAvailable = 3,
	/// Value has not been refreshed within its expected interval.
	Stale = 4,
	/// Value fell outside its physical or configured range.
	OutOfRange = 5,
}

impl SignalQuality {
	/// Canonical upper-case textual form (for example `NOT_AVAILABLE`).
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "UNKNOWN",
			Self::Valid => "VALID",
			Self::Invalid => "INVALID",
			Self::NotAvailable => "NOT_AVAILABLE",
			Self::Stale => "STALE",
			Self::OutOfRange => "OUT_OF_RANGE",
		}
	}

	/// Parse a quality from text, case-insensitively.
	///
	/// Accepts canonical names plus the aliases `NOTAVAILABLE`, `N/A`,
	/// `OUTOFRANGE`, and `OOR`.
	pub fn parse(input: &str) -> Option<Self> {
		Some(match input.trim().to_ascii_uppercase().as_str() {
			"UNKNOWN" => Self::Unknown,
			"VALID" => Self::Valid,
			"INVALID" => Self::Invalid,
			"NOT_AVAILABLE" | "NOTAVAILABLE" | "N/A" => Self::NotAvailable,
			"STALE" => Self::Stale,
			"OUT_OF_RANGE" | "OUTOFRANGE" | "OOR" => Self::OutOfRange,
			_ => return None,
		})
	}
}

impl fmt::Display for SignalQuality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Payload comparison used by [`QualifiedValue::changed_beyond`].
///
/// Numeric scalars honor a positive threshold as an inclusive absolute
/// difference bound; every other payload compares exactly.
pub trait ThresholdCompare {
	/// Whether `self` and `other` differ beyond `threshold`.
	fn differs_beyond(&self, other: &Self, threshold: f64) -> bool;
}

macro_rules! impl_threshold_numeric {
	($($ty:ty),* $(,)?) => {
		$(
			impl ThresholdCompare for $ty {
				fn differs_beyond(&self, other: &Self, threshold: f64) -> bool {
					if threshold > 0.0 {
						return ((*other as f64) - (*self as f64)).abs() >= threshold;
					}
					self != other
				}
			}
		)*
	};
}

impl_threshold_numeric!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl ThresholdCompare for bool {
	fn differs_beyond(&self, other: &Self, _threshold: f64) -> bool {
		self != other
	}
}

impl ThresholdCompare for String {
	fn differs_beyond(&self, other: &Self, _threshold: f64) -> bool {
		self != other
	}
}

impl<T: PartialEq> ThresholdCompare for Vec<T> {
	fn differs_beyond(&self, other: &Self, _threshold: f64) -> bool {
		self != other
	}
}

/// Statically typed value with quality and wall-clock timestamp.
///
/// Equality compares value and quality; the timestamp is ignored.
#[derive(Debug, Clone)]
pub struct QualifiedValue<T> {
	/// Payload, absent when nothing has been observed.
	pub value: Option<T>,
	/// Trust indicator for the payload.
	pub quality: SignalQuality,
	/// Wall-clock time the value was set.
	pub timestamp: SystemTime,
}

impl<T> Default for QualifiedValue<T> {
	fn default() -> Self {
		Self {
			value: None,
			quality: SignalQuality::Unknown,
			timestamp: SystemTime::now(),
		}
	}
}

impl<T> QualifiedValue<T> {
	/// Valid value stamped with the current wall clock.
	pub fn new(value: T) -> Self {
		Self::with_quality(value, SignalQuality::Valid)
	}

	/// Value with an explicit quality, stamped with the current wall clock.
	pub fn with_quality(value: T, quality: SignalQuality) -> Self {
		Self {
			value: Some(value),
			quality,
			timestamp: SystemTime::now(),
		}
	}

	/// Fully explicit constructor; bypasses the clock.
	pub fn at(value: Option<T>, quality: SignalQuality, timestamp: SystemTime) -> Self {
		Self {
			value,
			quality,
			timestamp,
		}
	}

	/// Whether a payload is present and its quality is [`SignalQuality::Valid`].
	pub fn is_valid(&self) -> bool {
		self.value.is_some() && self.quality == SignalQuality::Valid
	}

	/// Whether the quality is [`SignalQuality::Invalid`], payload or not.
	pub fn is_invalid(&self) -> bool {
		self.quality == SignalQuality::Invalid
	}

	/// Whether the quality is [`SignalQuality::NotAvailable`].
	pub fn is_not_available(&self) -> bool {
		self.quality == SignalQuality::NotAvailable
	}

	/// Elapsed wall-clock time since the timestamp, zero on clock regression.
	pub fn age(&self) -> Duration {
		self.timestamp.elapsed().unwrap_or(Duration::ZERO)
	}

	/// Payload reference, or [`TypesError::NoValue`] when absent.
	pub fn try_value(&self) -> Result<&T> {
		self.value.as_ref().ok_or(TypesError::NoValue)
	}
}

impl<T: Clone> QualifiedValue<T> {
	/// Payload clone when present, otherwise `default`.
	pub fn value_or(&self, default: T) -> T {
		self.value.clone().unwrap_or(default)
	}
}

impl<T: TaggedType> QualifiedValue<T> {
	/// Tag of the payload type.
	pub fn value_type(&self) -> ValueType {
		T::VALUE_TYPE
	}
}

impl<T: Clone + Into<Value>> QualifiedValue<T> {
	/// Lift into the dynamic representation, preserving quality and timestamp.
	pub fn to_dynamic(&self) -> DynamicQualifiedValue {
		DynamicQualifiedValue::at(
			self.value.clone().map_or(Value::Unspecified, Into::into),
			self.quality,
			self.timestamp,
		)
	}
}

impl<T: ThresholdCompare> QualifiedValue<T> {
	/// Whether the change from `self` to `new` is significant.
	///
	/// Quality changes always count. Two absent payloads never do, and a
	/// payload appearing or disappearing always does. Present payloads
	/// compare through [`ThresholdCompare`].
	pub fn changed_beyond(&self, new: &Self, threshold: f64) -> bool {
		if self.quality != new.quality {
			return true;
		}
		match (&self.value, &new.value) {
			(None, None) => false,
			(Some(a), Some(b)) => a.differs_beyond(b, threshold),
			_ => true,
		}
	}
}

impl<T: PartialEq> PartialEq for QualifiedValue<T> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value && self.quality == other.quality
	}
}

/// Dynamically typed value with quality and wall-clock timestamp.
///
/// Shape of [`QualifiedValue`] with a [`Value`] payload; the empty
/// alternative stands in for "no value". Equality compares value and
/// quality deeply; the timestamp is ignored.
#[derive(Debug, Clone)]
pub struct DynamicQualifiedValue {
	/// Payload, possibly the empty alternative.
	pub value: Value,
	/// Trust indicator for the payload.
	pub quality: SignalQuality,
	/// Wall-clock time the value was set.
	pub timestamp: SystemTime,
}

impl Default for DynamicQualifiedValue {
	fn default() -> Self {
		Self {
			value: Value::Unspecified,
			quality: SignalQuality::Unknown,
			timestamp: SystemTime::now(),
		}
	}
}

impl DynamicQualifiedValue {
	/// Valid value stamped with the current wall clock.
	pub fn new(value: impl Into<Value>) -> Self {
		Self::with_quality(value, SignalQuality::Valid)
	}

	/// Value with an explicit quality, stamped with the current wall clock.
	pub fn with_quality(value: impl Into<Value>, quality: SignalQuality) -> Self {
		Self {
			value: value.into(),
			quality,
			timestamp: SystemTime::now(),
		}
	}

	/// Fully explicit constructor; bypasses the clock.
	pub fn at(value: impl Into<Value>, quality: SignalQuality, timestamp: SystemTime) -> Self {
		Self {
			value: value.into(),
			quality,
			timestamp,
		}
	}

	/// Whether the payload is non-empty and its quality is [`SignalQuality::Valid`].
	pub fn is_valid(&self) -> bool {
		!self.value.is_empty() && self.quality == SignalQuality::Valid
	}

	/// Whether the quality is [`SignalQuality::Invalid`], payload or not.
	pub fn is_invalid(&self) -> bool {
		self.quality == SignalQuality::Invalid
	}

	/// Whether the quality is [`SignalQuality::NotAvailable`].
	pub fn is_not_available(&self) -> bool {
		self.quality == SignalQuality::NotAvailable
	}

	/// Elapsed wall-clock time since the timestamp, zero on clock regression.
	pub fn age(&self) -> Duration {
		self.timestamp.elapsed().unwrap_or(Duration::ZERO)
	}

	/// Whether the change from `self` to `new` is significant.
	///
	/// Quality changes always count. Two empty payloads never do, and a
	/// payload appearing or disappearing always does. Non-empty payloads
	/// compare through [`Value::changed_beyond`].
	pub fn changed_beyond(&self, new: &Self, threshold: f64) -> bool {
		if self.quality != new.quality {
			return true;
		}
		self.value.changed_beyond(&new.value, threshold)
	}

	/// Convert the payload to `target`, preserving the timestamp.
	///
	/// Conversion is only attempted on a valid, non-empty payload; anything
	/// else passes through untouched. A converter failure produces an empty
	/// payload with [`SignalQuality::Invalid`]; success keeps the original
	/// quality.
	pub fn convert_to(&self, target: ValueType) -> DynamicQualifiedValue {
		if self.quality != SignalQuality::Valid || self.value.is_empty() {
			return self.clone();
		}
		let converted = self.value.convert_to(target);
		if converted.is_empty() {
			return Self::at(Value::Unspecified, SignalQuality::Invalid, self.timestamp);
		}
		Self::at(converted, self.quality, self.timestamp)
	}
}

impl PartialEq for DynamicQualifiedValue {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value && self.quality == other.quality
	}
}
