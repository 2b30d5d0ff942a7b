//! Data quality queries for constraints the engine does not enforce.

use ddlsmith_core::{CommaStyle, Model};

use crate::constraints::ResolvedForeignKey;
use crate::format::join_inline;
use crate::naming::Identifiers;

const BLOCK_HEADER: &str = "-- Example data validation queries for maintaining data integrity\n\
-- These queries find rows that violate declared but unenforced constraints";

/// Build the validation block: a duplicate check per entity with a primary
/// key, then an orphan check per resolved foreign key.
pub fn validation_queries(
    model: &Model,
    ids: &Identifiers<'_>,
    foreign_keys: &[ResolvedForeignKey],
    style: CommaStyle,
) -> Vec<String> {
    let mut queries = Vec::new();

    for entity in &model.entities {
        let columns: Vec<String> = entity
            .primary_key()
            .map(|column| ids.column(&column.name))
            .collect();
        if columns.is_empty() {
            continue;
        }
        queries.push(duplicate_check(&ids.qualified_table(&entity.name), &columns, style));
    }

    queries.extend(foreign_keys.iter().map(orphan_check));
    queries
}

/// Render queries as one document block with a leading explanation.
pub fn render_validation_block(queries: &[String]) -> Option<String> {
    if queries.is_empty() {
        return None;
    }
    let mut parts = vec![BLOCK_HEADER.to_string()];
    parts.extend(queries.iter().cloned());
    Some(parts.join("\n\n"))
}

fn duplicate_check(table: &str, columns: &[String], style: CommaStyle) -> String {
    let key = join_inline(columns, style);
    let mut select = columns.to_vec();
    select.push("COUNT(*) AS duplicate_count".to_string());
    let select = join_inline(&select, style);
    format!(
        "-- Validate primary key uniqueness in {table}\n\
         SELECT {select}\n\
         FROM {table}\n\
         GROUP BY {key}\n\
         HAVING COUNT(*) > 1;"
    )
}

fn orphan_check(fk: &ResolvedForeignKey) -> String {
    let join = fk
        .source_columns
        .iter()
        .zip(&fk.target_columns)
        .map(|(source, target)| format!("s.{source} = t.{target}"))
        .collect::<Vec<_>>()
        .join(" AND ");
    let present = fk
        .source_columns
        .iter()
        .map(|source| format!("s.{source} IS NOT NULL"))
        .collect::<Vec<_>>()
        .join("\n  AND ");
    // Any target key column being NULL after the join means no match.
    let missing = fk
        .target_columns
        .first()
        .map(|target| format!("t.{target} IS NULL"))
        .unwrap_or_default();

    format!(
        "-- Validate foreign key integrity between {source} and {target}\n\
         SELECT s.*\n\
         FROM {source} s\n\
         LEFT JOIN {target} t ON {join}\n\
         WHERE {present}\n  AND {missing};",
        source = fk.source_qualified,
        target = fk.target_qualified,
    )
}
