use thiserror::Error;

use crate::value_type::ValueType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TypesError>;

/// Errors produced while validating struct instances and reading qualified values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesError {
	/// Qualified value was read without a payload present.
	#[error("qualified value has no value")]
	NoValue,
	/// Struct instance names a type the registry does not know.
	#[error("struct type '{type_name}' not found in registry")]
	StructTypeNotFound {
		/// Unregistered struct type name.
		type_name: String,
	},
	/// Schema field without a default is absent from the instance.
	#[error("required field '{field}' missing in struct '{type_name}'")]
	RequiredFieldMissing {
		/// Missing field name.
		field: String,
		/// Struct type being validated.
		type_name: String,
	},
	/// Field payload tag is incompatible with the schema tag.
	#[error("field '{field}' in struct '{type_name}' has type {actual} but expected {expected}")]
	FieldTypeMismatch {
		/// Offending field name.
		field: String,
		/// Struct type being validated.
		type_name: String,
		/// Tag declared by the schema.
		expected: ValueType,
		/// Tag of the stored payload.
		actual: ValueType,
	},
	/// Nested struct value names a different type than the schema field declares.
	#[error("field '{field}' in struct '{type_name}' references struct type '{expected}' but value has type '{actual}'")]
	StructTypeMismatch {
		/// Offending field name.
		field: String,
		/// Struct type being validated.
		type_name: String,
		/// Struct type name declared by the schema field.
		expected: String,
		/// Struct type name carried by the nested value.
		actual: String,
	},
	/// Instance carries a field the schema does not declare (strict mode).
	#[error("extra field '{field}' not defined in struct type '{type_name}'")]
	ExtraField {
		/// Undeclared field name.
		field: String,
		/// Struct type being validated.
		type_name: String,
	},
	/// Validation failure inside a nested struct field.
	#[error("nested struct field '{field}': {source}")]
	NestedField {
		/// Field (or `field[index]` element) that holds the failing struct.
		field: String,
		/// Underlying validation failure.
		#[source]
		source: Box<TypesError>,
	},
}
