//! Backend-agnostic runtime model for VSS (Vehicle Signal Specification)
//! data: a discriminated value union, struct schemas with validation, and a
//! quality/timestamp wrapper. No wire format, transport, or broker
//! dependency; higher layers map these types onto protobuf, JSON, or CAN as
//! they see fit.

mod convert;
mod error;
mod quality;
mod structs;
mod value;
mod value_type;

/// Error and result aliases.
pub use error::{Result, TypesError};
/// Signal quality tag and qualified value wrappers.
pub use quality::{DynamicQualifiedValue, QualifiedValue, SignalQuality, ThresholdCompare};
/// Struct schema, instance, registry, and validation entry points.
pub use structs::{
	FieldDefinition, StructDefinition, StructRegistry, StructValue, create_default_struct,
	validate_struct,
};
/// Runtime value union and the compile-time payload tag trait.
pub use value::{TaggedType, Value};
/// Tag enumeration with stable codes and textual forms.
pub use value_type::ValueType;
