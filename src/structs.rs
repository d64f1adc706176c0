use std::collections::BTreeMap;

use crate::error::{Result, TypesError};
use crate::value::Value;
use crate::value_type::ValueType;

/// Schema of a single field within a struct type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
	/// Field name, unique within its struct.
	pub name: String,
	/// Declared tag of the field payload.
	pub value_type: ValueType,
	/// Human-readable description.
	pub description: Option<String>,
	/// Default payload used when an instance omits the field. Its tag must
	/// be compatible with [`FieldDefinition::value_type`].
	pub default_value: Option<Value>,
	/// Referenced struct type name when the tag is [`ValueType::Struct`] or
	/// [`ValueType::StructArray`]. Weak reference: names a registry entry
	/// without owning it.
	pub struct_type_name: Option<String>,
}

impl FieldDefinition {
	/// Definition with the given name and tag and no metadata.
	pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
		Self {
			name: name.into(),
			value_type,
			description: None,
			default_value: None,
			struct_type_name: None,
		}
	}

	/// Attach a description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Attach a default payload.
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default_value = Some(default.into());
		self
	}

	/// Name the referenced struct type for composite fields.
	pub fn with_struct_type(mut self, struct_type_name: impl Into<String>) -> Self {
		self.struct_type_name = Some(struct_type_name.into());
		self
	}
}

/// Schema of one struct type: a name and its field definitions.
///
/// Field iteration order carries no meaning; validation and
/// default-construction results are independent of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructDefinition {
	type_name: String,
	description: Option<String>,
	fields: BTreeMap<String, FieldDefinition>,
}

impl StructDefinition {
	/// Empty schema with the given type name.
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			description: None,
			fields: BTreeMap::new(),
		}
	}

	/// Attach a description.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Chaining form of [`StructDefinition::add_field`].
	pub fn with_field(mut self, field: FieldDefinition) -> Self {
		self.add_field(field);
		self
	}

	/// Insert a field definition, replacing any previous one of the same name.
	pub fn add_field(&mut self, field: FieldDefinition) {
		self.fields.insert(field.name.clone(), field);
	}

	/// Struct type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Description, if one was attached.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Look up one field definition.
	pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
		self.fields.get(name)
	}

	/// Whether the schema declares a field of this name.
	pub fn has_field(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Iterate over all field definitions.
	pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
		self.fields.values()
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether the schema declares no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// Runtime instance of a struct type: a type name and named field payloads.
///
/// An instance may carry fields its schema does not declare (strict
/// validation rejects them) and may omit fields that have defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
	type_name: String,
	fields: BTreeMap<String, Value>,
}

impl StructValue {
	/// Empty instance of the given struct type.
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			fields: BTreeMap::new(),
		}
	}

	/// Struct type name identifying the schema.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Replace the struct type name.
	pub fn set_type_name(&mut self, type_name: impl Into<String>) {
		self.type_name = type_name.into();
	}

	/// Set a field payload, replacing any previous one.
	pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.fields.insert(name.into(), value.into());
	}

	/// Look up one field payload.
	pub fn get_field(&self, name: &str) -> Option<&Value> {
		self.fields.get(name)
	}

	/// Whether a field of this name is set.
	pub fn has_field(&self, name: &str) -> bool {
		self.fields.contains_key(name)
	}

	/// Remove a field. Returns whether it existed.
	pub fn remove_field(&mut self, name: &str) -> bool {
		self.fields.remove(name).is_some()
	}

	/// Remove all fields.
	pub fn clear(&mut self) {
		self.fields.clear();
	}

	/// Iterate over field names and payloads.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.fields.iter().map(|(name, value)| (name.as_str(), value))
	}

	/// Number of set fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Whether no fields are set.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// Lookup from struct type name to schema.
///
/// Registration is one-shot per name. Callers treat the registry as
/// immutable once initialization is done; concurrent mutation needs
/// external synchronization.
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
	structs: BTreeMap<String, StructDefinition>,
}

impl StructRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a schema. Returns false and leaves the registry unchanged
	/// when the type name is already taken.
	pub fn register(&mut self, definition: StructDefinition) -> bool {
		if self.structs.contains_key(definition.type_name()) {
			return false;
		}
		self.structs.insert(definition.type_name().to_owned(), definition);
		true
	}

	/// Look up a schema by type name.
	pub fn get(&self, type_name: &str) -> Option<&StructDefinition> {
		self.structs.get(type_name)
	}

	/// Whether a schema of this type name is registered.
	pub fn contains(&self, type_name: &str) -> bool {
		self.structs.contains_key(type_name)
	}

	/// Iterate over all registered schemas.
	pub fn iter(&self) -> impl Iterator<Item = &StructDefinition> {
		self.structs.values()
	}

	/// Number of registered schemas.
	pub fn len(&self) -> usize {
		self.structs.len()
	}

	/// Whether no schemas are registered.
	pub fn is_empty(&self) -> bool {
		self.structs.is_empty()
	}

	/// Remove all registered schemas.
	pub fn clear(&mut self) {
		self.structs.clear();
	}
}

/// Validate a struct instance against its registered schema.
///
/// Checks that the type name is registered, that every schema field without
/// a default is present, that present fields carry compatible tags, and that
/// nested struct fields (and struct array elements) recursively validate.
/// Strict mode additionally rejects instance fields the schema does not
/// declare. The first failure found is returned; its display string names
/// the offending field, prefixed with the nesting path for nested failures.
pub fn validate_struct(value: &StructValue, registry: &StructRegistry, strict: bool) -> Result<()> {
	let Some(definition) = registry.get(value.type_name()) else {
		return Err(TypesError::StructTypeNotFound {
			type_name: value.type_name().to_owned(),
		});
	};

	for field_def in definition.fields() {
		let Some(field_value) = value.get_field(&field_def.name) else {
			if field_def.default_value.is_none() {
				return Err(TypesError::RequiredFieldMissing {
					field: field_def.name.clone(),
					type_name: value.type_name().to_owned(),
				});
			}
			continue;
		};

		let actual = field_value.value_type();
		if !field_def.value_type.is_compatible_with(actual) {
			return Err(TypesError::FieldTypeMismatch {
				field: field_def.name.clone(),
				type_name: value.type_name().to_owned(),
				expected: field_def.value_type,
				actual,
			});
		}

		match field_def.value_type {
			ValueType::Struct => {
				if let Some(nested) = field_value.as_struct() {
					check_referenced_type(field_def, &field_def.name, nested, value.type_name())?;
					validate_nested(&field_def.name, nested, registry, strict)?;
				}
			}
			ValueType::StructArray => {
				if let Some(elements) = field_value.as_struct_array() {
					for (idx, element) in elements.iter().enumerate() {
						let label = format!("{}[{idx}]", field_def.name);
						check_referenced_type(field_def, &label, element, value.type_name())?;
						validate_nested(&label, element, registry, strict)?;
					}
				}
			}
			_ => {}
		}
	}

	if strict {
		for (field_name, _) in value.fields() {
			if !definition.has_field(field_name) {
				return Err(TypesError::ExtraField {
					field: field_name.to_owned(),
					type_name: value.type_name().to_owned(),
				});
			}
		}
	}

	Ok(())
}

/// Build an instance of a registered type holding exactly the schema's
/// defaulted fields, each bound to a copy of its default. `None` when the
/// type name is not registered.
pub fn create_default_struct(type_name: &str, registry: &StructRegistry) -> Option<StructValue> {
	let definition = registry.get(type_name)?;
	let mut value = StructValue::new(type_name);
	for field_def in definition.fields() {
		if let Some(default) = &field_def.default_value {
			value.set_field(field_def.name.clone(), default.clone());
		}
	}
	Some(value)
}

fn check_referenced_type(
	field_def: &FieldDefinition,
	label: &str,
	nested: &StructValue,
	parent_type: &str,
) -> Result<()> {
	if let Some(expected) = &field_def.struct_type_name {
		if nested.type_name() != expected {
			return Err(TypesError::StructTypeMismatch {
				field: label.to_owned(),
				type_name: parent_type.to_owned(),
				expected: expected.clone(),
				actual: nested.type_name().to_owned(),
			});
		}
	}
	Ok(())
}

fn validate_nested(
	label: &str,
	nested: &StructValue,
	registry: &StructRegistry,
	strict: bool,
) -> Result<()> {
	validate_struct(nested, registry, strict).map_err(|source| TypesError::NestedField {
		field: label.to_owned(),
		source: Box::new(source),
	})
}
