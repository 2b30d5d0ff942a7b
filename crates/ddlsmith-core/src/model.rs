use serde::{Deserialize, Serialize};

/// Display name used when a model does not carry one.
pub const UNNAMED_MODEL: &str = "Unnamed Model";

/// Parsed physical data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    /// Numeric identifier assigned by the modelling tool.
    pub model_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Entities in declaration order; emission follows this order.
    pub entities: Vec<Entity>,
    /// Relationships in declaration order.
    pub relationships: Vec<Relationship>,
}

impl Model {
    /// Name used for banners, database names and output files.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNNAMED_MODEL,
        }
    }

    /// Look up an entity by raw name. Duplicate names resolve to the last one.
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().rev().find(|entity| entity.name == name)
    }
}

/// A table in the physical model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub columns: Vec<Column>,
}

impl Entity {
    /// Look up a column by raw name (last wins).
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().rev().find(|column| column.name == name)
    }

    /// Primary key columns in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.is_primary_key)
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|column| column.is_primary_key)
    }
}

/// A table attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Option<String>,
    pub name: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_not_null: bool,
    pub is_unique: bool,
    /// Raw data type as written in the model; empty when unset.
    pub data_type: String,
    pub description: Option<String>,
}

/// One side of a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: Option<String>,
    pub name: String,
    /// Cardinality label (`one`, `many`, ...).
    pub cardinality: Option<String>,
    pub columns: Vec<String>,
}

/// Foreign key link between two entities, possibly over a composite key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: EntityRef,
    pub target: EntityRef,
}

impl Relationship {
    /// Short human-readable form used in warnings.
    pub fn describe(&self) -> String {
        format!(
            "{}({}) -> {}({})",
            self.source.name,
            self.source.columns.join(", "),
            self.target.name,
            self.target.columns.join(", ")
        )
    }
}
