//! Integration tests for model registration and wiring

use poi_tags::error::SchemaError;
use poi_tags::models::{self, poi, tag};
use poi_tags::schema::{ColumnType, ModelRegistry};

#[test]
fn test_registry_wires_tag_to_poi() {
    let registry = models::registry().unwrap();

    let tag = registry.get("Tag").unwrap();
    assert_eq!(tag.attribute_names(), vec!["name", "image", "color", "group", "creatorId"]);
    assert_eq!(tag.column("group").unwrap().column_type, ColumnType::Integer);

    let joins = registry.join_tables();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].through, "POITag");
    assert_eq!(joins[0].source, "Tag");
    assert_eq!(joins[0].target, "POI");
}

#[test]
fn test_wiring_without_poi_fails() {
    let mut registry = ModelRegistry::new();
    registry.register(tag::descriptor()).unwrap();

    let err = registry.wire(&[tag::associate]).unwrap_err();
    assert_eq!(err, SchemaError::ModelNotFound("POI".to_string()));
}

#[test]
fn test_registry_serializes_to_json() {
    let registry = models::registry().unwrap();
    let json = serde_json::to_value(&registry).unwrap();

    assert_eq!(json["models"]["Tag"]["table_name"], "Tags");
    assert_eq!(json["models"]["Tag"]["columns"][3]["column_type"], "integer");
    assert_eq!(json["models"][poi::MODEL]["associations"], serde_json::json!([]));
}
