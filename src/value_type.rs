use std::fmt;

/// Tag enumeration mirroring the alternative set of [`crate::Value`].
///
/// Discriminants are stable and may be exchanged with external type
/// enumerations directly: 0 unspecified, 1-12 primitives, 20-31 arrays,
/// 40-41 composites. Gaps are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ValueType {
	/// Unknown or not set.
	Unspecified = 0,
	/// UTF-8 string scalar.
	String = 1,
	/// Boolean scalar.
	Bool = 2,
	/// Signed 8-bit scalar.
	Int8 = 3,
	/// Signed 16-bit scalar.
	Int16 = 4,
	/// Signed 32-bit scalar.
	Int32 = 5,
	/// Signed 64-bit scalar.
	Int64 = 6,
	/// Unsigned 8-bit scalar.
	Uint8 = 7,
	/// Unsigned 16-bit scalar.
	Uint16 = 8,
	/// Unsigned 32-bit scalar.
	Uint32 = 9,
	/// Unsigned 64-bit scalar.
	Uint64 = 10,
	/// 32-bit floating point scalar.
	Float = 11,
	/// 64-bit floating point scalar.
	Double = 12,
	/// Ordered sequence of strings.
	StringArray = 20,
	/// Ordered sequence of booleans.
	BoolArray = 21,
	/// Ordered sequence of signed 8-bit values.
	Int8Array = 22,
	/// Ordered sequence of signed 16-bit values.
	Int16Array = 23,
	/// Ordered sequence of signed 32-bit values.
	Int32Array = 24,
	/// Ordered sequence of signed 64-bit values.
	Int64Array = 25,
	/// Ordered sequence of unsigned 8-bit values.
	Uint8Array = 26,
	/// Ordered sequence of unsigned 16-bit values.
	Uint16Array = 27,
	/// Ordered sequence of unsigned 32-bit values.
	Uint32Array = 28,
	/// Ordered sequence of unsigned 64-bit values.
	Uint64Array = 29,
	/// Ordered sequence of 32-bit floats.
	FloatArray = 30,
	/// Ordered sequence of 64-bit floats.
	DoubleArray = 31,
	/// Single struct instance.
	Struct = 40,
	/// Ordered sequence of struct instances.
	StructArray = 41,
}

impl ValueType {
	/// Stable numeric code of this tag.
	pub fn code(self) -> i32 {
		self as i32
	}

	/// Map a stable numeric code back to its tag.
	pub fn from_code(code: i32) -> Option<Self> {
		Some(match code {
			0 => Self::Unspecified,
			1 => Self::String,
			2 => Self::Bool,
			3 => Self::Int8,
			4 => Self::Int16,
			5 => Self::Int32,
			6 => Self::Int64,
			7 => Self::Uint8,
			8 => Self::Uint16,
			9 => Self::Uint32,
			10 => Self::Uint64,
			11 => Self::Float,
			12 => Self::Double,
			20 => Self::StringArray,
			21 => Self::BoolArray,
			22 => Self::Int8Array,
			23 => Self::Int16Array,
			24 => Self::Int32Array,
			25 => Self::Int64Array,
			26 => Self::Uint8Array,
			27 => Self::Uint16Array,
			28 => Self::Uint32Array,
			29 => Self::Uint64Array,
			30 => Self::FloatArray,
			31 => Self::DoubleArray,
			40 => Self::Struct,
			41 => Self::StructArray,
			_ => return None,
		})
	}

	/// Canonical upper-case textual form (for example `FLOAT_ARRAY`).
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Unspecified => "UNSPECIFIED",
			Self::String => "STRING",
			Self::Bool => "BOOL",
			Self::Int8 => "INT8",
			Self::Int16 => "INT16",
			Self::Int32 => "INT32",
			Self::Int64 => "INT64",
			Self::Uint8 => "UINT8",
			Self::Uint16 => "UINT16",
			Self::Uint32 => "UINT32",
			Self::Uint64 => "UINT64",
			Self::Float => "FLOAT",
			Self::Double => "DOUBLE",
			Self::StringArray => "STRING_ARRAY",
			Self::BoolArray => "BOOL_ARRAY",
			Self::Int8Array => "INT8_ARRAY",
			Self::Int16Array => "INT16_ARRAY",
			Self::Int32Array => "INT32_ARRAY",
			Self::Int64Array => "INT64_ARRAY",
			Self::Uint8Array => "UINT8_ARRAY",
			Self::Uint16Array => "UINT16_ARRAY",
			Self::Uint32Array => "UINT32_ARRAY",
			Self::Uint64Array => "UINT64_ARRAY",
			Self::FloatArray => "FLOAT_ARRAY",
			Self::DoubleArray => "DOUBLE_ARRAY",
			Self::Struct => "STRUCT",
			Self::StructArray => "STRUCT_ARRAY",
		}
	}

	/// Parse a tag from text, case-insensitively.
	///
	/// Accepts canonical names (`FLOAT_ARRAY`), bracket forms (`float[]`),
	/// and the aliases `BOOLEAN`, `INT`, `LONG`, `UNSIGNED`, and `ULONG`
	/// (also inside array forms). Unknown input yields `None`.
	pub fn parse(input: &str) -> Option<Self> {
		let upper = input.trim().to_ascii_uppercase();
		if let Some(element) = upper.strip_suffix("[]") {
			return Self::parse_scalar(element)?.array_type();
		}
		if let Some(element) = upper.strip_suffix("_ARRAY") {
			return Self::parse_scalar(element)?.array_type();
		}
		Self::parse_scalar(&upper)
	}

	fn parse_scalar(upper: &str) -> Option<Self> {
		Some(match upper {
			"STRING" => Self::String,
			"BOOL" | "BOOLEAN" => Self::Bool,
			"INT8" => Self::Int8,
			"INT16" => Self::Int16,
			"INT32" | "INT" => Self::Int32,
			"INT64" | "LONG" => Self::Int64,
			"UINT8" => Self::Uint8,
			"UINT16" => Self::Uint16,
			"UINT32" | "UNSIGNED" => Self::Uint32,
			"UINT64" | "ULONG" => Self::Uint64,
			"FLOAT" => Self::Float,
			"DOUBLE" => Self::Double,
			"STRUCT" => Self::Struct,
			_ => return None,
		})
	}

	/// Whether this tag is a primitive scalar.
	pub fn is_primitive(self) -> bool {
		(1..=12).contains(&self.code())
	}

	/// Whether this tag is an array, including [`ValueType::StructArray`].
	pub fn is_array(self) -> bool {
		(20..=31).contains(&self.code()) || self == Self::StructArray
	}

	/// Whether this tag is [`ValueType::Struct`] or [`ValueType::StructArray`].
	pub fn is_struct(self) -> bool {
		matches!(self, Self::Struct | Self::StructArray)
	}

	/// Whether this tag is a signed integer scalar.
	pub fn is_signed(self) -> bool {
		matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
	}

	/// Whether this tag is an unsigned integer scalar.
	pub fn is_unsigned(self) -> bool {
		matches!(self, Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64)
	}

	/// Whether this tag is a floating point scalar.
	pub fn is_float(self) -> bool {
		matches!(self, Self::Float | Self::Double)
	}

	/// Whether this tag is a numeric scalar. Booleans are not numeric.
	pub fn is_numeric(self) -> bool {
		self.is_signed() || self.is_unsigned() || self.is_float()
	}

	/// Element tag of an array tag, `None` for non-arrays.
	pub fn element_type(self) -> Option<Self> {
		Some(match self {
			Self::StringArray => Self::String,
			Self::BoolArray => Self::Bool,
			Self::Int8Array => Self::Int8,
			Self::Int16Array => Self::Int16,
			Self::Int32Array => Self::Int32,
			Self::Int64Array => Self::Int64,
			Self::Uint8Array => Self::Uint8,
			Self::Uint16Array => Self::Uint16,
			Self::Uint32Array => Self::Uint32,
			Self::Uint64Array => Self::Uint64,
			Self::FloatArray => Self::Float,
			Self::DoubleArray => Self::Double,
			Self::StructArray => Self::Struct,
			_ => return None,
		})
	}

	/// Array tag holding elements of this scalar tag, `None` for non-scalars.
	pub fn array_type(self) -> Option<Self> {
		Some(match self {
			Self::String => Self::StringArray,
			Self::Bool => Self::BoolArray,
			Self::Int8 => Self::Int8Array,
			Self::Int16 => Self::Int16Array,
			Self::Int32 => Self::Int32Array,
			Self::Int64 => Self::Int64Array,
			Self::Uint8 => Self::Uint8Array,
			Self::Uint16 => Self::Uint16Array,
			Self::Uint32 => Self::Uint32Array,
			Self::Uint64 => Self::Uint64Array,
			Self::Float => Self::FloatArray,
			Self::Double => Self::DoubleArray,
			Self::Struct => Self::StructArray,
			_ => return None,
		})
	}

	/// Compatibility predicate used by validators and coercers.
	///
	/// Reflexive and symmetric. Tags are compatible when equal, when either
	/// side is unspecified, when both are scalars of the same numeric family
	/// (signed, unsigned, or floating point), or when both are arrays whose
	/// element tags are in the same numeric family. Signed and unsigned never
	/// mix, scalars never match arrays, and booleans, strings, and composites
	/// are compatible only with themselves.
	pub fn is_compatible_with(self, other: Self) -> bool {
		if self == other {
			return true;
		}
		if self == Self::Unspecified || other == Self::Unspecified {
			return true;
		}
		if let (Some(a), Some(b)) = (self.element_type(), other.element_type()) {
			return same_numeric_family(a, b);
		}
		same_numeric_family(self, other)
	}
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

fn same_numeric_family(a: ValueType, b: ValueType) -> bool {
	(a.is_signed() && b.is_signed())
		|| (a.is_unsigned() && b.is_unsigned())
		|| (a.is_float() && b.is_float())
}
