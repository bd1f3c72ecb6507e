use std::fs;

use serde_json::json;

use reqres_contract::schema::{validate_json, SchemaName, SchemaSet, SchemaValidationError};

#[test]
fn json_schema_harness_validates_instance() {
    let schema = r#"{
      "$schema": "https://json-schema.org/draft/2020-12/schema",
      "type": "object",
      "required": ["error"],
      "additionalProperties": false,
      "properties": {
        "error": { "type": "string", "minLength": 1 }
      }
    }"#;

    validate_json(schema, r#"{ "error": "Missing password" }"#).expect("schema validation failed");

    let err = validate_json(schema, r#"{ "error": "" }"#).unwrap_err();
    assert!(matches!(err, SchemaValidationError::ValidationFailed { .. }));
}

#[test]
fn builtin_schemas_accept_service_shapes() {
    let schemas = SchemaSet::builtin().unwrap();

    let resources = json!({
        "page": 1, "per_page": 6, "total": 12, "total_pages": 2,
        "data": [{ "id": 1, "name": "cerulean", "year": 2000, "color": "#98B2D1", "pantone_value": "15-4020" }],
        "support": { "url": "https://reqres.in/#support-heading", "text": "support" }
    });
    schemas.validate(SchemaName::Resources, &resources).unwrap();

    let users = json!({
        "page": 2, "per_page": 6, "total": 12, "total_pages": 2,
        "data": [{
            "id": 7, "email": "michael.lawson@reqres.in", "first_name": "Michael",
            "last_name": "Lawson", "avatar": "https://reqres.in/img/faces/7-image.jpg"
        }]
    });
    schemas.validate(SchemaName::Users, &users).unwrap();

    let created = json!({ "name": "morpheus", "job": "leader", "id": "640", "createdAt": "2024-05-01T10:00:00.000Z" });
    schemas.validate(SchemaName::CreatedUser, &created).unwrap();

    let updated = json!({ "name": "morpheus", "job": "zion resident", "updatedAt": "2024-05-01T10:00:01.000Z" });
    schemas.validate(SchemaName::UpdatedUser, &updated).unwrap();

    schemas.validate(SchemaName::Login, &json!({ "token": "QpwL5tke4Pnpja7X4" })).unwrap();
    schemas
        .validate(SchemaName::Register, &json!({ "id": 4, "token": "QpwL5tke4Pnpja7X4" }))
        .unwrap();
}

#[test]
fn violations_are_all_reported() {
    let schemas = SchemaSet::builtin().unwrap();

    // `id` must be a string and `createdAt` is missing.
    let created = json!({ "name": "morpheus", "job": "leader", "id": 640 });
    let err = schemas.validate(SchemaName::CreatedUser, &created).unwrap_err();

    match &err {
        SchemaValidationError::ValidationFailed { schema, violations } => {
            assert_eq!(schema, "created_user");
            assert_eq!(violations.len(), 2, "{violations:?}");
            assert!(violations.iter().any(|v| v.contains("createdAt")), "{violations:?}");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Response does not match schema `created_user`"));
}

#[test]
fn register_schema_rejects_string_id() {
    let schemas = SchemaSet::builtin().unwrap();
    let err = schemas
        .validate(SchemaName::Register, &json!({ "id": "4", "token": "t" }))
        .unwrap_err();
    assert!(matches!(err, SchemaValidationError::ValidationFailed { .. }));
}

#[test]
fn override_directory_replaces_named_schema_only() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("login.json"),
        r#"{ "type": "object", "required": ["session"] }"#,
    )
    .unwrap();

    let schemas = SchemaSet::load(Some(tmp.path())).unwrap();

    assert!(schemas
        .validate(SchemaName::Login, &json!({ "token": "QpwL5tke4Pnpja7X4" }))
        .is_err());
    schemas
        .validate(SchemaName::Register, &json!({ "id": 4, "token": "QpwL5tke4Pnpja7X4" }))
        .unwrap();
}

#[test]
fn malformed_override_is_a_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("users.json"), "not valid json").unwrap();

    let err = SchemaSet::load(Some(tmp.path())).unwrap_err();
    assert!(matches!(err, SchemaValidationError::SchemaParse(_)), "{err:?}");
}

#[test]
fn missing_override_directory_falls_back_to_builtin() {
    let tmp = tempfile::tempdir().unwrap();
    let schemas = SchemaSet::load(Some(&tmp.path().join("absent"))).unwrap();
    schemas.validate(SchemaName::Login, &json!({ "token": "t" })).unwrap();
}
