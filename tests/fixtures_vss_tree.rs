#![allow(missing_docs)]

//! Loads a VSS JSON tree into a registry and drives end-to-end struct
//! scenarios through it. JSON parsing lives here only; the library itself
//! stays serialization-free.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use vss_types::{
	FieldDefinition, StructDefinition, StructRegistry, StructValue, Value, ValueType,
	create_default_struct, validate_struct,
};

#[derive(Debug, Deserialize)]
struct VssNode {
	#[serde(rename = "type")]
	node_type: Option<String>,
	datatype: Option<String>,
	description: Option<String>,
	struct_type: Option<String>,
	default: Option<serde_json::Value>,
	#[serde(default)]
	children: BTreeMap<String, VssNode>,
}

fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn load_registry() -> StructRegistry {
	let text = fs::read_to_string(fixture_path("vss_test.json")).expect("fixture reads");
	let tree: BTreeMap<String, VssNode> = serde_json::from_str(&text).expect("fixture parses");
	let root = tree.get("Vehicle").expect("Vehicle root node present");

	let mut registry = StructRegistry::new();
	register_structs(root, "Vehicle", &mut registry);
	registry
}

fn register_structs(node: &VssNode, path: &str, registry: &mut StructRegistry) {
	if node.node_type.as_deref() == Some("struct") {
		register_struct(node, path, registry);
	}
	for (child_name, child) in &node.children {
		register_structs(child, &format!("{path}.{child_name}"), registry);
	}
}

fn register_struct(node: &VssNode, path: &str, registry: &mut StructRegistry) {
	let mut definition = StructDefinition::new(path);
	if let Some(description) = &node.description {
		definition = definition.with_description(description.clone());
	}

	for (field_name, field_node) in &node.children {
		let Some(datatype) = &field_node.datatype else {
			continue;
		};
		let Some(value_type) = ValueType::parse(datatype) else {
			continue;
		};

		let mut field = FieldDefinition::new(field_name.clone(), value_type);
		if let Some(description) = &field_node.description {
			field = field.with_description(description.clone());
		}
		if let Some(struct_type) = &field_node.struct_type {
			field = field.with_struct_type(struct_type.clone());
		}
		if let Some(default) = &field_node.default {
			if let Some(value) = json_default_to_value(default, value_type) {
				field = field.with_default(value);
			}
		}
		definition.add_field(field);
	}

	assert!(registry.register(definition), "duplicate struct type {path}");
}

fn json_default_to_value(default: &serde_json::Value, value_type: ValueType) -> Option<Value> {
	Some(match value_type {
		ValueType::Bool => Value::from(default.as_bool()?),
		ValueType::Int32 => Value::from(i32::try_from(default.as_i64()?).ok()?),
		ValueType::Int64 => Value::from(default.as_i64()?),
		ValueType::Uint32 => Value::from(u32::try_from(default.as_u64()?).ok()?),
		ValueType::Uint64 => Value::from(default.as_u64()?),
		ValueType::Float => Value::from(default.as_f64()? as f32),
		ValueType::Double => Value::from(default.as_f64()?),
		ValueType::String => Value::from(default.as_str()?),
		_ => return None,
	})
}

fn position_value() -> StructValue {
	let mut position = StructValue::new("Vehicle.Test.Position");
	position.set_field("Latitude", 37.7749_f64);
	position.set_field("Longitude", -122.4194_f64);
	position.set_field("Altitude", 16.0_f64);
	position
}

#[test]
fn vss_datatype_strings_map_onto_tags() {
	let expectations = [
		("boolean", ValueType::Bool),
		("int32", ValueType::Int32),
		("uint32", ValueType::Uint32),
		("int64", ValueType::Int64),
		("uint64", ValueType::Uint64),
		("float", ValueType::Float),
		("double", ValueType::Double),
		("string", ValueType::String),
		("boolean[]", ValueType::BoolArray),
		("int32[]", ValueType::Int32Array),
		("uint32[]", ValueType::Uint32Array),
		("int64[]", ValueType::Int64Array),
		("uint64[]", ValueType::Uint64Array),
		("float[]", ValueType::FloatArray),
		("double[]", ValueType::DoubleArray),
		("string[]", ValueType::StringArray),
		("struct", ValueType::Struct),
		("struct[]", ValueType::StructArray),
	];
	for (datatype, expected) in expectations {
		assert_eq!(ValueType::parse(datatype), Some(expected), "datatype {datatype}");
	}
	assert_eq!(ValueType::FloatArray.as_str(), "FLOAT_ARRAY");
}

#[test]
fn only_struct_nodes_become_registry_entries() {
	let registry = load_registry();
	assert_eq!(registry.len(), 4);
	assert!(registry.contains("Vehicle.Test.Position"));
	assert!(registry.contains("Vehicle.Test.DeliveryInfo"));
	assert!(registry.contains("Vehicle.Test.Waypoint"));
	assert!(registry.contains("Vehicle.Test.Route"));
	assert!(!registry.contains("Vehicle.Speed"));
	assert!(!registry.contains("Vehicle"));
}

#[test]
fn position_struct_loads_with_double_fields() {
	let registry = load_registry();
	let position = registry.get("Vehicle.Test.Position").expect("Position registered");

	assert_eq!(position.type_name(), "Vehicle.Test.Position");
	assert!(position.description().is_some());
	for field_name in ["Latitude", "Longitude", "Altitude"] {
		let field = position.get_field(field_name).expect("field declared");
		assert_eq!(field.value_type, ValueType::Double, "field {field_name}");
	}
}

#[test]
fn delivery_info_struct_loads_with_nested_reference_and_default() {
	let registry = load_registry();
	let delivery = registry.get("Vehicle.Test.DeliveryInfo").expect("DeliveryInfo registered");

	assert_eq!(delivery.get_field("Address").map(|f| f.value_type), Some(ValueType::String));
	assert_eq!(delivery.get_field("Receiver").map(|f| f.value_type), Some(ValueType::String));

	let priority = delivery.get_field("Priority").expect("Priority declared");
	assert_eq!(priority.value_type, ValueType::Int32);
	assert_eq!(priority.default_value, Some(Value::from(1_i32)));

	let location = delivery.get_field("Location").expect("Location declared");
	assert_eq!(location.value_type, ValueType::Struct);
	assert_eq!(location.struct_type_name.as_deref(), Some("Vehicle.Test.Position"));
}

#[test]
fn route_struct_loads_with_struct_array_reference() {
	let registry = load_registry();
	let route = registry.get("Vehicle.Test.Route").expect("Route registered");

	let waypoints = route.get_field("Waypoints").expect("Waypoints declared");
	assert_eq!(waypoints.value_type, ValueType::StructArray);
	assert_eq!(waypoints.struct_type_name.as_deref(), Some("Vehicle.Test.Waypoint"));
}

#[test]
fn position_instance_validates() {
	let registry = load_registry();
	validate_struct(&position_value(), &registry, true).expect("position validates");
}

#[test]
fn delivery_info_with_nested_position_validates() {
	let registry = load_registry();

	let mut delivery = StructValue::new("Vehicle.Test.DeliveryInfo");
	delivery.set_field("Address", "123 Main St");
	delivery.set_field("Receiver", "John Doe");
	delivery.set_field("Priority", 5_i32);
	delivery.set_field("Location", Value::from(position_value()));

	validate_struct(&delivery, &registry, true).expect("delivery validates");
}

#[test]
fn missing_receiver_is_reported_by_name() {
	let registry = load_registry();

	// Priority has a default, so the only unresolved field is Receiver.
	let mut delivery = StructValue::new("Vehicle.Test.DeliveryInfo");
	delivery.set_field("Address", "123 Main St");
	delivery.set_field("Location", Value::from(position_value()));

	let err = validate_struct(&delivery, &registry, true).expect_err("Receiver is required");
	assert!(err.to_string().contains("Receiver"), "message: {err}");
}

#[test]
fn default_delivery_info_carries_only_the_priority() {
	let registry = load_registry();
	let value = create_default_struct("Vehicle.Test.DeliveryInfo", &registry)
		.expect("DeliveryInfo registered");
	assert_eq!(value.get_field("Priority"), Some(&Value::from(1_i32)));
	assert!(!value.has_field("Address"));
	assert!(!value.has_field("Receiver"));
	assert!(!value.has_field("Location"));
}

#[test]
fn route_with_waypoints_validates() {
	let registry = load_registry();

	let mut waypoints = Vec::new();
	for (name, lat, lon) in [
		("San Francisco", 37.7749, -122.4194),
		("Los Angeles", 34.0522, -118.2437),
		("New York", 40.7128, -74.0060),
	] {
		let mut wp = StructValue::new("Vehicle.Test.Waypoint");
		wp.set_field("Latitude", lat);
		wp.set_field("Longitude", lon);
		wp.set_field("Name", name);
		waypoints.push(Arc::new(wp));
	}

	let mut route = StructValue::new("Vehicle.Test.Route");
	route.set_field("Name", "California Tour");
	route.set_field("Waypoints", waypoints);

	validate_struct(&route, &registry, true).expect("route validates");
}

#[test]
fn route_with_mistyped_waypoint_element_fails() {
	let registry = load_registry();

	let mut route = StructValue::new("Vehicle.Test.Route");
	route.set_field("Name", "Detour");
	route.set_field("Waypoints", vec![Arc::new(position_value())]);

	let err = validate_struct(&route, &registry, true).expect_err("element type must match");
	let message = err.to_string();
	assert!(message.contains("Waypoints[0]"), "message: {message}");
	assert!(message.contains("Vehicle.Test.Waypoint"), "message: {message}");
}
