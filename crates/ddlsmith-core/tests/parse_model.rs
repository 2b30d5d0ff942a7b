use ddlsmith_core::{Error, parse_model_str};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn load_fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/models")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture at {}", path.display()))
}

#[test]
fn parses_sales_fixture_in_declaration_order() {
    let model = parse_model_str(&load_fixture("sales.json")).expect("parse sales model");

    assert_eq!(model.model_id, Some(27679));
    assert_eq!(model.display_name(), "Customers and sales orders");

    let entity_names: Vec<&str> = model.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(entity_names, vec!["Customer", "Sales Order"]);

    let customer = &model.entities[0];
    assert_eq!(customer.description.as_deref(), Some("People who place orders"));
    let column_names: Vec<&str> = customer.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(column_names, vec!["Customer ID", "Full name", "signupDate"]);

    let id = &customer.columns[0];
    assert!(id.is_primary_key && id.is_not_null && id.is_unique);
    assert!(!id.is_foreign_key);
    assert_eq!(id.data_type, "INTEGER");

    let signup = &customer.columns[2];
    assert!(!signup.is_not_null);
    assert_eq!(signup.description, None);

    assert_eq!(model.relationships.len(), 2);
    let rel = &model.relationships[0];
    assert_eq!(rel.source.name, "Sales Order");
    assert_eq!(rel.source.cardinality.as_deref(), Some("many"));
    assert_eq!(rel.target.columns, vec!["Customer ID".to_string()]);
    assert_eq!(rel.describe(), "Sales Order(Customer ID) -> Customer(Customer ID)");
}

#[test]
fn duplicate_entity_names_are_kept() {
    let input = r#"{"model":{"entities":[{"name":"A"},{"name":"A"}]}}"#;
    let model = parse_model_str(input).expect("parse");
    assert_eq!(model.entities.len(), 2);
}

#[test]
fn empty_entity_name_is_rejected() {
    let input = r#"{"model":{"entities":[{"name":""}]}}"#;
    let err = parse_model_str(input).expect_err("empty name should fail");
    assert!(matches!(err, Error::ModelFormat(_)));
    assert!(err.to_string().starts_with("invalid model format"));
}
