use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Column, Entity, EntityRef, Model, Relationship};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModel {
    model_id: Option<Value>,
    name: Option<String>,
    description: Option<String>,
    entities: Option<Vec<RawEntity>>,
    relationships: Option<Vec<RawRelationship>>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    id: Option<Value>,
    name: Option<String>,
    metadata: Option<RawEntityMetadata>,
    attributes: Option<Vec<RawAttribute>>,
}

#[derive(Debug, Deserialize)]
struct RawEntityMetadata {
    #[serde(rename = "Description")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAttribute {
    id: Option<Value>,
    name: Option<String>,
    metadata: Option<RawAttributeMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributeMetadata {
    #[serde(rename = "PK")]
    pk: Option<bool>,
    #[serde(rename = "FK")]
    fk: Option<bool>,
    #[serde(rename = "Not null")]
    not_null: Option<bool>,
    #[serde(rename = "Unique")]
    unique: Option<bool>,
    #[serde(rename = "Data type")]
    data_type: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRelationship {
    source_entity: Option<RawEndpoint>,
    target_entity: Option<RawEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndpoint {
    id: Option<Value>,
    name: Option<String>,
    start_type: Option<Value>,
    end_type: Option<Value>,
    attribute_names: Option<Vec<String>>,
}

/// Parse a physical model from JSON text.
pub fn parse_model_str(input: &str) -> Result<Model> {
    let value: Value = serde_json::from_str(input)?;
    parse_model(value)
}

/// Normalize a JSON document into a typed [`Model`].
///
/// Fails when the top-level `model` object or an entity name is missing.
/// Missing `entities` or `relationships` arrays are treated as empty.
pub fn parse_model(mut document: Value) -> Result<Model> {
    let raw = match document.get_mut("model").map(Value::take) {
        Some(raw @ Value::Object(_)) => raw,
        Some(_) => {
            return Err(Error::ModelFormat(
                "top-level `model` must be an object".to_string(),
            ));
        }
        None => {
            return Err(Error::ModelFormat(
                "missing top-level `model` key".to_string(),
            ));
        }
    };

    let raw: RawModel =
        serde_json::from_value(raw).map_err(|err| Error::ModelFormat(err.to_string()))?;

    let entities = raw
        .entities
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, entity)| map_entity(index, entity))
        .collect::<Result<Vec<_>>>()?;

    let relationships = raw
        .relationships
        .unwrap_or_default()
        .into_iter()
        .map(map_relationship)
        .collect();

    Ok(Model {
        model_id: raw.model_id.and_then(loose_i64),
        name: raw.name,
        description: raw.description,
        entities,
        relationships,
    })
}

fn map_entity(index: usize, raw: RawEntity) -> Result<Entity> {
    let name = match raw.name {
        Some(name) if !name.is_empty() => name,
        _ => {
            return Err(Error::ModelFormat(format!(
                "entity at index {index} has no name"
            )));
        }
    };

    let columns = raw
        .attributes
        .unwrap_or_default()
        .into_iter()
        .map(map_column)
        .collect();

    Ok(Entity {
        id: raw.id.and_then(loose_string),
        name,
        description: raw.metadata.and_then(|metadata| metadata.description),
        columns,
    })
}

fn map_column(raw: RawAttribute) -> Column {
    let metadata = raw.metadata.unwrap_or_default();
    Column {
        id: raw.id.and_then(loose_string),
        name: raw.name.unwrap_or_default(),
        is_primary_key: metadata.pk.unwrap_or(false),
        is_foreign_key: metadata.fk.unwrap_or(false),
        is_not_null: metadata.not_null.unwrap_or(false),
        is_unique: metadata.unique.unwrap_or(false),
        data_type: metadata.data_type.unwrap_or_default(),
        description: metadata.description,
    }
}

fn map_relationship(raw: RawRelationship) -> Relationship {
    Relationship {
        source: map_endpoint(raw.source_entity),
        target: map_endpoint(raw.target_entity),
    }
}

fn map_endpoint(raw: Option<RawEndpoint>) -> EntityRef {
    match raw {
        Some(endpoint) => EntityRef {
            id: endpoint.id.and_then(loose_string),
            name: endpoint.name.unwrap_or_default(),
            cardinality: endpoint
                .start_type
                .and_then(loose_string)
                .or_else(|| endpoint.end_type.and_then(loose_string)),
            columns: endpoint.attribute_names.unwrap_or_default(),
        },
        None => EntityRef {
            id: None,
            name: String::new(),
            cardinality: None,
            columns: Vec::new(),
        },
    }
}

// Identifiers and cardinality are informational: exports write them as
// strings or numbers, and anything else is dropped.
fn loose_string(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn loose_i64(value: Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
