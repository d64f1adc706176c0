use std::sync::Arc;

use crate::structs::StructValue;
use crate::value_type::ValueType;

/// Discriminated carrier of a single VSS datum.
///
/// Holds exactly one alternative: the empty marker, a primitive scalar, an
/// ordered sequence of primitives, or a composite. Composites are held
/// through a shared [`Arc`] handle so that one struct instance may be
/// referenced from several parent values; mutation goes through
/// [`Arc::make_mut`] and is copy-on-write.
///
/// Equality is tag-exact: two values compare equal only when the same
/// alternative is active and the payloads match. `Bool(true)` is never equal
/// to `Int32(1)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// No value (empty, distinct from invalid).
	#[default]
	Unspecified,
	/// Boolean scalar.
	Bool(bool),
	/// Signed 8-bit scalar.
	Int8(i8),
	/// Signed 16-bit scalar.
	Int16(i16),
	/// Signed 32-bit scalar.
	Int32(i32),
	/// Signed 64-bit scalar.
	Int64(i64),
	/// Unsigned 8-bit scalar.
	Uint8(u8),
	/// Unsigned 16-bit scalar.
	Uint16(u16),
	/// Unsigned 32-bit scalar.
	Uint32(u32),
	/// Unsigned 64-bit scalar.
	Uint64(u64),
	/// 32-bit floating point scalar.
	Float(f32),
	/// 64-bit floating point scalar.
	Double(f64),
	/// UTF-8 string scalar.
	String(String),
	/// Sequence of booleans.
	BoolArray(Vec<bool>),
	/// Sequence of signed 8-bit values.
	Int8Array(Vec<i8>),
	/// Sequence of signed 16-bit values.
	Int16Array(Vec<i16>),
	/// Sequence of signed 32-bit values.
	Int32Array(Vec<i32>),
	/// Sequence of signed 64-bit values.
	Int64Array(Vec<i64>),
	/// Sequence of unsigned 8-bit values.
	Uint8Array(Vec<u8>),
	/// Sequence of unsigned 16-bit values.
	Uint16Array(Vec<u16>),
	/// Sequence of unsigned 32-bit values.
	Uint32Array(Vec<u32>),
	/// Sequence of unsigned 64-bit values.
	Uint64Array(Vec<u64>),
	/// Sequence of 32-bit floats.
	FloatArray(Vec<f32>),
	/// Sequence of 64-bit floats.
	DoubleArray(Vec<f64>),
	/// Sequence of strings.
	StringArray(Vec<String>),
	/// Shared handle to a struct instance.
	Struct(Arc<StructValue>),
	/// Sequence of shared struct handles.
	StructArray(Vec<Arc<StructValue>>),
}

impl Value {
	/// Tag of the active alternative.
	pub fn value_type(&self) -> ValueType {
		match self {
			Self::Unspecified => ValueType::Unspecified,
			Self::Bool(_) => ValueType::Bool,
			Self::Int8(_) => ValueType::Int8,
			Self::Int16(_) => ValueType::Int16,
			Self::Int32(_) => ValueType::Int32,
			Self::Int64(_) => ValueType::Int64,
			Self::Uint8(_) => ValueType::Uint8,
			Self::Uint16(_) => ValueType::Uint16,
			Self::Uint32(_) => ValueType::Uint32,
			Self::Uint64(_) => ValueType::Uint64,
			Self::Float(_) => ValueType::Float,
			Self::Double(_) => ValueType::Double,
			Self::String(_) => ValueType::String,
			Self::BoolArray(_) => ValueType::BoolArray,
			Self::Int8Array(_) => ValueType::Int8Array,
			Self::Int16Array(_) => ValueType::Int16Array,
			Self::Int32Array(_) => ValueType::Int32Array,
			Self::Int64Array(_) => ValueType::Int64Array,
			Self::Uint8Array(_) => ValueType::Uint8Array,
			Self::Uint16Array(_) => ValueType::Uint16Array,
			Self::Uint32Array(_) => ValueType::Uint32Array,
			Self::Uint64Array(_) => ValueType::Uint64Array,
			Self::FloatArray(_) => ValueType::FloatArray,
			Self::DoubleArray(_) => ValueType::DoubleArray,
			Self::StringArray(_) => ValueType::StringArray,
			Self::Struct(_) => ValueType::Struct,
			Self::StructArray(_) => ValueType::StructArray,
		}
	}

	/// Whether the empty alternative is active.
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Unspecified)
	}

	/// Lossy projection of a numeric scalar to `f64`.
	///
	/// Booleans project to 0.0/1.0. Strings, sequences, composites, and the
	/// empty alternative project to 0.0. Used by threshold comparisons only;
	/// this is not a conversion.
	pub fn as_f64(&self) -> f64 {
		match self {
			Self::Bool(v) => {
				if *v {
					1.0
				} else {
					0.0
				}
			}
			Self::Int8(v) => f64::from(*v),
			Self::Int16(v) => f64::from(*v),
			Self::Int32(v) => f64::from(*v),
			Self::Int64(v) => *v as f64,
			Self::Uint8(v) => f64::from(*v),
			Self::Uint16(v) => f64::from(*v),
			Self::Uint32(v) => f64::from(*v),
			Self::Uint64(v) => *v as f64,
			Self::Float(v) => f64::from(*v),
			Self::Double(v) => *v,
			_ => 0.0,
		}
	}

	/// Borrow the struct instance when the [`Value::Struct`] alternative is active.
	pub fn as_struct(&self) -> Option<&StructValue> {
		match self {
			Self::Struct(handle) => Some(handle),
			_ => None,
		}
	}

	/// Borrow the struct sequence when the [`Value::StructArray`] alternative is active.
	pub fn as_struct_array(&self) -> Option<&[Arc<StructValue>]> {
		match self {
			Self::StructArray(handles) => Some(handles),
			_ => None,
		}
	}
}

/// Payload types with a fixed VSS tag known at compile time.
pub trait TaggedType {
	/// Tag of the [`Value`] alternative holding this type.
	const VALUE_TYPE: ValueType;
}

macro_rules! impl_payload {
	($($variant:ident => $ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value)
				}
			}

			impl TaggedType for $ty {
				const VALUE_TYPE: ValueType = ValueType::$variant;
			}
		)*
	};
}

impl_payload! {
	Bool => bool,
	Int8 => i8,
	Int16 => i16,
	Int32 => i32,
	Int64 => i64,
	Uint8 => u8,
	Uint16 => u16,
	Uint32 => u32,
	Uint64 => u64,
	Float => f32,
	Double => f64,
	String => String,
	BoolArray => Vec<bool>,
	Int8Array => Vec<i8>,
	Int16Array => Vec<i16>,
	Int32Array => Vec<i32>,
	Int64Array => Vec<i64>,
	Uint8Array => Vec<u8>,
	Uint16Array => Vec<u16>,
	Uint32Array => Vec<u32>,
	Uint64Array => Vec<u64>,
	FloatArray => Vec<f32>,
	DoubleArray => Vec<f64>,
	StringArray => Vec<String>,
	Struct => Arc<StructValue>,
	StructArray => Vec<Arc<StructValue>>,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<StructValue> for Value {
	fn from(value: StructValue) -> Self {
		Self::Struct(Arc::new(value))
	}
}

impl TaggedType for StructValue {
	const VALUE_TYPE: ValueType = ValueType::Struct;
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::{TaggedType, Value};
	use crate::structs::StructValue;
	use crate::value_type::ValueType;

	#[test]
	fn every_alternative_reports_its_own_tag() {
		let cases: Vec<(Value, ValueType)> = vec![
			(Value::Unspecified, ValueType::Unspecified),
			(Value::from(true), ValueType::Bool),
			(Value::from(-1_i8), ValueType::Int8),
			(Value::from(-2_i16), ValueType::Int16),
			(Value::from(42_i32), ValueType::Int32),
			(Value::from(123_456_789_i64), ValueType::Int64),
			(Value::from(1_u8), ValueType::Uint8),
			(Value::from(2_u16), ValueType::Uint16),
			(Value::from(42_u32), ValueType::Uint32),
			(Value::from(987_654_321_u64), ValueType::Uint64),
			(Value::from(3.14_f32), ValueType::Float),
			(Value::from(2.71828_f64), ValueType::Double),
			(Value::from("hello"), ValueType::String),
			(Value::from(vec![true, false, true]), ValueType::BoolArray),
			(Value::from(vec![-1_i8, 2]), ValueType::Int8Array),
			(Value::from(vec![-1_i16, 2]), ValueType::Int16Array),
			(Value::from(vec![1_i32, 2, 3]), ValueType::Int32Array),
			(Value::from(vec![100_i64, -200]), ValueType::Int64Array),
			(Value::from(vec![1_u8, 2]), ValueType::Uint8Array),
			(Value::from(vec![1_u16, 2]), ValueType::Uint16Array),
			(Value::from(vec![10_u32, 20]), ValueType::Uint32Array),
			(Value::from(vec![1000_u64, 2000]), ValueType::Uint64Array),
			(Value::from(vec![1.0_f32, 2.0]), ValueType::FloatArray),
			(Value::from(vec![1.1_f64, 2.2]), ValueType::DoubleArray),
			(Value::from(vec!["foo".to_owned(), "bar".to_owned()]), ValueType::StringArray),
			(Value::from(StructValue::new("Test")), ValueType::Struct),
			(Value::from(vec![Arc::new(StructValue::new("Test"))]), ValueType::StructArray),
		];

		for (value, expected) in cases {
			assert_eq!(value.value_type(), expected, "value {value:?}");
		}
	}

	#[test]
	fn compile_time_tags_match_runtime_tags() {
		assert_eq!(bool::VALUE_TYPE, ValueType::Bool);
		assert_eq!(f32::VALUE_TYPE, ValueType::Float);
		assert_eq!(<Vec<f32>>::VALUE_TYPE, ValueType::FloatArray);
		assert_eq!(String::VALUE_TYPE, ValueType::String);
		assert_eq!(StructValue::VALUE_TYPE, ValueType::Struct);
		assert_eq!(<Vec<Arc<StructValue>>>::VALUE_TYPE, ValueType::StructArray);
	}

	#[test]
	fn default_is_the_empty_alternative() {
		let value = Value::default();
		assert!(value.is_empty());
		assert_eq!(value.value_type(), ValueType::Unspecified);
		assert!(!Value::from(42_i32).is_empty());
	}

	#[test]
	fn equality_is_tag_exact() {
		assert_eq!(Value::from(42_i32), Value::from(42_i32));
		assert_ne!(Value::from(42_i32), Value::from(42_i64));
		assert_ne!(Value::from(42_i32), Value::from(42_u32));
		assert_ne!(Value::from(true), Value::from(1_i32));
		assert_ne!(Value::from(1.0_f32), Value::from(1.0_f64));
		assert_eq!(Value::Unspecified, Value::Unspecified);
	}

	#[test]
	fn sequence_equality_is_element_wise() {
		assert_eq!(Value::from(vec![1_i32, 2, 3]), Value::from(vec![1_i32, 2, 3]));
		assert_ne!(Value::from(vec![1_i32, 2, 3]), Value::from(vec![1_i32, 2]));
		assert_ne!(Value::from(vec![1_i32, 2, 3]), Value::from(vec![1_i32, 2, 4]));
	}

	#[test]
	fn composite_equality_ignores_handle_identity() {
		let mut a = StructValue::new("Position");
		a.set_field("Latitude", 37.7749_f64);
		a.set_field("Longitude", -122.4194_f64);

		let mut b = StructValue::new("Position");
		b.set_field("Longitude", -122.4194_f64);
		b.set_field("Latitude", 37.7749_f64);

		assert_eq!(Value::from(a.clone()), Value::from(b));

		let mut c = StructValue::new("Coordinates");
		c.set_field("Latitude", 37.7749_f64);
		c.set_field("Longitude", -122.4194_f64);
		assert_ne!(Value::from(a), Value::from(c));
	}

	#[test]
	fn numeric_projection_covers_all_scalars() {
		assert_eq!(Value::from(true).as_f64(), 1.0);
		assert_eq!(Value::from(false).as_f64(), 0.0);
		assert_eq!(Value::from(-5_i8).as_f64(), -5.0);
		assert_eq!(Value::from(100_i64).as_f64(), 100.0);
		assert_eq!(Value::from(7_u16).as_f64(), 7.0);
		assert_eq!(Value::from(1.5_f32).as_f64(), 1.5);
		assert_eq!(Value::from(2.5_f64).as_f64(), 2.5);
		assert_eq!(Value::from("12").as_f64(), 0.0);
		assert_eq!(Value::from(vec![1.0_f64]).as_f64(), 0.0);
		assert_eq!(Value::Unspecified.as_f64(), 0.0);
		assert_eq!(Value::from(StructValue::new("Test")).as_f64(), 0.0);
	}

	#[test]
	fn struct_accessors_expose_the_composite_payload() {
		let mut inner = StructValue::new("Waypoint");
		inner.set_field("Name", "SF");
		let value = Value::from(inner.clone());
		assert_eq!(value.as_struct().map(StructValue::type_name), Some("Waypoint"));
		assert!(value.as_struct_array().is_none());

		let array = Value::from(vec![Arc::new(inner)]);
		assert_eq!(array.as_struct_array().map(<[_]>::len), Some(1));
		assert!(array.as_struct().is_none());
	}
}
