use std::collections::{HashMap, HashSet};

use ddlsmith_core::{CommaStyle, ConstraintApproach, DdlConfig, Entity, Model, Relationship};

use crate::format::join_inline;
use crate::model::GenerationIssue;
use crate::naming::Identifiers;

/// Kind of relational constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
}

/// One rendered constraint, either an `ALTER TABLE` statement or a comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStatement {
    pub kind: ConstraintKind,
    /// Qualified table the constraint belongs to.
    pub table: String,
    pub sql: String,
}

/// Ordered constraint output plus the relationships that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintPlan {
    pub statements: Vec<ConstraintStatement>,
    /// Resolved relationships, whether or not foreign keys are emitted.
    pub foreign_keys: Vec<ResolvedForeignKey>,
    pub warnings: Vec<GenerationIssue>,
}

impl ConstraintPlan {
    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.statements.iter().filter(|s| s.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements one per line, in plan order.
    pub fn render(&self) -> String {
        self.statements
            .iter()
            .map(|statement| statement.sql.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A relationship whose entities and columns all exist, with sanitized names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedForeignKey {
    pub source_table: String,
    pub source_qualified: String,
    pub source_columns: Vec<String>,
    pub target_table: String,
    pub target_qualified: String,
    pub target_columns: Vec<String>,
}

/// Resolve relationships against the model.
///
/// Relationships naming an unknown entity or column, or with mismatched
/// column lists, are skipped and reported as warnings. Identical foreign keys
/// are returned once, in first-declaration order.
pub fn resolve_relationships(
    model: &Model,
    ids: &Identifiers<'_>,
) -> (Vec<ResolvedForeignKey>, Vec<GenerationIssue>) {
    let mut resolved = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();

    for relationship in &model.relationships {
        let (source, target) = match check_relationship(model, relationship) {
            Ok(pair) => pair,
            Err(reason) => {
                warnings.push(
                    GenerationIssue::warning(
                        GenerationIssue::UNRESOLVED_RELATIONSHIP,
                        format!("skipping {}: {reason}", relationship.describe()),
                    )
                    .with_entity(relationship.source.name.clone()),
                );
                continue;
            }
        };

        let fk = ResolvedForeignKey {
            source_table: ids.table(&source.name),
            source_qualified: ids.qualified_table(&source.name),
            source_columns: sanitize_all(ids, &relationship.source.columns),
            target_table: ids.table(&target.name),
            target_qualified: ids.qualified_table(&target.name),
            target_columns: sanitize_all(ids, &relationship.target.columns),
        };

        if seen.insert(fk.clone()) {
            resolved.push(fk);
        }
    }

    (resolved, warnings)
}

fn check_relationship<'m>(
    model: &'m Model,
    relationship: &Relationship,
) -> Result<(&'m Entity, &'m Entity), String> {
    let (source_ref, target_ref) = (&relationship.source, &relationship.target);

    if source_ref.columns.is_empty() || target_ref.columns.is_empty() {
        return Err("relationship has no key columns".to_string());
    }
    if source_ref.columns.len() != target_ref.columns.len() {
        return Err(format!(
            "column count mismatch ({} vs {})",
            source_ref.columns.len(),
            target_ref.columns.len()
        ));
    }

    let source = model
        .entity(&source_ref.name)
        .ok_or_else(|| format!("source entity '{}' not found", source_ref.name))?;
    let target = model
        .entity(&target_ref.name)
        .ok_or_else(|| format!("target entity '{}' not found", target_ref.name))?;

    for (entity, columns) in [(source, &source_ref.columns), (target, &target_ref.columns)] {
        if let Some(missing) = columns.iter().find(|name| entity.column(name).is_none()) {
            return Err(format!(
                "column '{missing}' not found in entity '{}'",
                entity.name
            ));
        }
    }

    Ok((source, target))
}

fn sanitize_all(ids: &Identifiers<'_>, columns: &[String]) -> Vec<String> {
    columns.iter().map(|column| ids.column(column)).collect()
}

/// Plan primary and foreign key constraints for a model.
///
/// Primary keys come first in entity order, then foreign keys in
/// relationship order.
pub fn plan_constraints(model: &Model, config: &DdlConfig) -> ConstraintPlan {
    let ids = Identifiers::new(config);
    let (foreign_keys, warnings) = resolve_relationships(model, &ids);
    let style = config.comma_style;
    let mut statements = Vec::new();

    if config.include_primary_keys {
        for entity in &model.entities {
            let columns: Vec<String> = entity
                .primary_key()
                .map(|column| ids.column(&column.name))
                .collect();
            if columns.is_empty() {
                continue;
            }

            let table = ids.qualified_table(&entity.name);
            let sql = match config.constraint_approach {
                ConstraintApproach::AlterTable => format!(
                    "ALTER TABLE {table} ADD CONSTRAINT pk_{} PRIMARY KEY ({});",
                    ids.table(&entity.name),
                    join_inline(&columns, style)
                ),
                ConstraintApproach::CommentOnly => {
                    format!("-- Primary Key: {table}({})", join_inline(&columns, style))
                }
            };
            statements.push(ConstraintStatement {
                kind: ConstraintKind::PrimaryKey,
                table,
                sql,
            });
        }
    }

    if config.include_foreign_keys {
        let mut name_counts: HashMap<String, usize> = HashMap::new();
        for fk in &foreign_keys {
            let sql = match config.constraint_approach {
                ConstraintApproach::AlterTable => {
                    let base = format!("fk_{}_{}", fk.source_table, fk.target_table);
                    let count = name_counts.entry(base.clone()).or_insert(0);
                    *count += 1;
                    let name = if *count == 1 {
                        base
                    } else {
                        format!("{base}_{count}")
                    };
                    format!(
                        "ALTER TABLE {} ADD CONSTRAINT {name} FOREIGN KEY ({}) REFERENCES {}({});",
                        fk.source_qualified,
                        join_inline(&fk.source_columns, style),
                        fk.target_qualified,
                        join_inline(&fk.target_columns, style)
                    )
                }
                ConstraintApproach::CommentOnly => format!(
                    "-- Foreign Key Relationship: {} references {}",
                    endpoint(&fk.source_qualified, &fk.source_columns, style),
                    endpoint(&fk.target_qualified, &fk.target_columns, style)
                ),
            };
            statements.push(ConstraintStatement {
                kind: ConstraintKind::ForeignKey,
                table: fk.source_qualified.clone(),
                sql,
            });
        }
    }

    ConstraintPlan {
        statements,
        foreign_keys,
        warnings,
    }
}

fn endpoint(table: &str, columns: &[String], style: CommaStyle) -> String {
    format!("{table}({})", join_inline(columns, style))
}
