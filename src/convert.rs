use crate::value::Value;
use crate::value_type::ValueType;

impl Value {
	/// Attempt a safe coercion of this value to `target`.
	///
	/// The identity conversion and the empty value pass through unchanged.
	/// Integer conversions widen inside their own family and range-check
	/// against the target width; float and double cast directly. Array
	/// variants convert element-wise, and one out-of-range element fails the
	/// whole conversion. Every failure is reported as
	/// [`Value::Unspecified`] and never as a panic.
	pub fn convert_to(&self, target: ValueType) -> Value {
		let current = self.value_type();
		if target == current || self.is_empty() {
			return self.clone();
		}
		if !target.is_compatible_with(current) {
			return Value::Unspecified;
		}

		match self {
			Self::Int8(v) => convert_signed(i64::from(*v), target),
			Self::Int16(v) => convert_signed(i64::from(*v), target),
			Self::Int32(v) => convert_signed(i64::from(*v), target),
			Self::Int64(v) => convert_signed(*v, target),
			Self::Uint8(v) => convert_unsigned(u64::from(*v), target),
			Self::Uint16(v) => convert_unsigned(u64::from(*v), target),
			Self::Uint32(v) => convert_unsigned(u64::from(*v), target),
			Self::Uint64(v) => convert_unsigned(*v, target),
			Self::Float(v) => match target {
				ValueType::Double => Value::Double(f64::from(*v)),
				_ => Value::Unspecified,
			},
			Self::Double(v) => match target {
				ValueType::Float => Value::Float(*v as f32),
				_ => Value::Unspecified,
			},
			Self::Int8Array(v) => convert_signed_array(v.iter().map(|x| i64::from(*x)), target),
			Self::Int16Array(v) => convert_signed_array(v.iter().map(|x| i64::from(*x)), target),
			Self::Int32Array(v) => convert_signed_array(v.iter().map(|x| i64::from(*x)), target),
			Self::Int64Array(v) => convert_signed_array(v.iter().copied(), target),
			Self::Uint8Array(v) => convert_unsigned_array(v.iter().map(|x| u64::from(*x)), target),
			Self::Uint16Array(v) => convert_unsigned_array(v.iter().map(|x| u64::from(*x)), target),
			Self::Uint32Array(v) => convert_unsigned_array(v.iter().map(|x| u64::from(*x)), target),
			Self::Uint64Array(v) => convert_unsigned_array(v.iter().copied(), target),
			Self::FloatArray(v) => match target {
				ValueType::DoubleArray => Value::DoubleArray(v.iter().map(|x| f64::from(*x)).collect()),
				_ => Value::Unspecified,
			},
			Self::DoubleArray(v) => match target {
				ValueType::FloatArray => Value::FloatArray(v.iter().map(|x| *x as f32).collect()),
				_ => Value::Unspecified,
			},
			_ => Value::Unspecified,
		}
	}

	/// Whether the change from `self` to `new` is significant.
	///
	/// Differing tags always count as a change and two empty values never
	/// do. For numeric scalars with `threshold > 0` the change is measured
	/// as `|new - old| >= threshold` (boundary inclusive) on the [`f64`]
	/// projection. Everything else, including sequences, composites, and a
	/// zero threshold, compares exactly.
	pub fn changed_beyond(&self, new: &Value, threshold: f64) -> bool {
		let tag = self.value_type();
		if tag != new.value_type() {
			return true;
		}
		if tag == ValueType::Unspecified {
			return false;
		}
		if tag.is_numeric() && threshold > 0.0 {
			return (new.as_f64() - self.as_f64()).abs() >= threshold;
		}
		self != new
	}
}

fn convert_signed(value: i64, target: ValueType) -> Value {
	match target {
		ValueType::Int8 => i8::try_from(value).map(Value::Int8).unwrap_or_default(),
		ValueType::Int16 => i16::try_from(value).map(Value::Int16).unwrap_or_default(),
		ValueType::Int32 => i32::try_from(value).map(Value::Int32).unwrap_or_default(),
		ValueType::Int64 => Value::Int64(value),
		_ => Value::Unspecified,
	}
}

fn convert_unsigned(value: u64, target: ValueType) -> Value {
	match target {
		ValueType::Uint8 => u8::try_from(value).map(Value::Uint8).unwrap_or_default(),
		ValueType::Uint16 => u16::try_from(value).map(Value::Uint16).unwrap_or_default(),
		ValueType::Uint32 => u32::try_from(value).map(Value::Uint32).unwrap_or_default(),
		ValueType::Uint64 => Value::Uint64(value),
		_ => Value::Unspecified,
	}
}

fn convert_signed_array(values: impl Iterator<Item = i64>, target: ValueType) -> Value {
	match target {
		ValueType::Int8Array => collect_checked(values, i8::try_from).map(Value::Int8Array).unwrap_or_default(),
		ValueType::Int16Array => collect_checked(values, i16::try_from).map(Value::Int16Array).unwrap_or_default(),
		ValueType::Int32Array => collect_checked(values, i32::try_from).map(Value::Int32Array).unwrap_or_default(),
		ValueType::Int64Array => Value::Int64Array(values.collect()),
		_ => Value::Unspecified,
	}
}

fn convert_unsigned_array(values: impl Iterator<Item = u64>, target: ValueType) -> Value {
	match target {
		ValueType::Uint8Array => collect_checked(values, u8::try_from).map(Value::Uint8Array).unwrap_or_default(),
		ValueType::Uint16Array => collect_checked(values, u16::try_from).map(Value::Uint16Array).unwrap_or_default(),
		ValueType::Uint32Array => collect_checked(values, u32::try_from).map(Value::Uint32Array).unwrap_or_default(),
		ValueType::Uint64Array => Value::Uint64Array(values.collect()),
		_ => Value::Unspecified,
	}
}

fn collect_checked<W, N, E>(values: impl Iterator<Item = W>, narrow: fn(W) -> Result<N, E>) -> Option<Vec<N>> {
	values.map(|v| narrow(v).ok()).collect()
}
