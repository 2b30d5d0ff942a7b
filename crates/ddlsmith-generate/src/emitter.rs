use ddlsmith_core::{Column, DdlConfig, Entity};

use crate::format::{comment_lines, escape_literal, format_comma_separated_list, join_inline};
use crate::naming::Identifiers;
use crate::types::map_type;

const ENFORCEMENT_NOTE: &str =
    "-- Note: In Databricks, primary key and foreign key constraints are declarative and not enforced";

const CONSTRAINT_INFO: &str = "\
-- Important information about Databricks constraints:
-- 1. Primary and foreign key constraints are informational only and not enforced
-- 2. They document relationships between tables for tools and readers
-- 3. Databricks does not validate that existing or new rows satisfy them
-- 4. Data validation has to happen in the ETL processes that load the tables
-- For more information, see: https://docs.databricks.com/en/tables/constraints.html";

/// Renders the individual blocks of a DDL document.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    config: &'a DdlConfig,
    ids: Identifiers<'a>,
}

impl<'a> Emitter<'a> {
    pub fn new(config: &'a DdlConfig) -> Self {
        Self {
            config,
            ids: Identifiers::new(config),
        }
    }

    pub fn identifiers(&self) -> Identifiers<'a> {
        self.ids
    }

    pub fn header(&self, model_name: &str) -> String {
        let title = comment_lines(&format!("DDL for {model_name}"));
        format!("{title}\n{ENFORCEMENT_NOTE}")
    }

    pub fn constraint_info(&self) -> &'static str {
        CONSTRAINT_INFO
    }

    pub fn create_database(&self, model_name: &str) -> String {
        format!("CREATE DATABASE {};", self.ids.database(model_name))
    }

    /// `CREATE TABLE` statement for one entity, preceded by its description
    /// when comments are enabled.
    pub fn table(&self, entity: &Entity) -> String {
        let mut out = String::new();

        if self.config.include_comments {
            if let Some(description) = non_blank(entity.description.as_deref()) {
                out.push_str(&comment_lines(description));
                out.push('\n');
            }
        }

        let columns: Vec<String> = entity.columns.iter().map(|c| self.column(c)).collect();
        out.push_str(&format!(
            "CREATE TABLE {} (\n{}\n)",
            self.ids.qualified_table(&entity.name),
            format_comma_separated_list(&columns, self.config.comma_style)
        ));

        if self.config.use_delta {
            out.push_str("\nUSING DELTA");
        }

        if self.config.add_clustering {
            let key: Vec<String> = entity
                .primary_key()
                .map(|column| self.ids.column(&column.name))
                .collect();
            if !key.is_empty() {
                out.push_str(&format!(
                    "\nCLUSTER BY ({})",
                    join_inline(&key, self.config.comma_style)
                ));
            }
        }

        out.push(';');
        out
    }

    /// `<name> <type>[ NOT NULL][ COMMENT '...']`
    pub fn column(&self, column: &Column) -> String {
        let mut line = format!(
            "{} {}",
            self.ids.column(&column.name),
            map_type(&column.data_type)
        );
        if column.is_not_null {
            line.push_str(" NOT NULL");
        }
        if self.config.include_comments {
            if let Some(description) = non_blank(column.description.as_deref()) {
                line.push_str(&format!(" COMMENT '{}'", escape_literal(description)));
            }
        }
        line
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Join non-empty blocks with a blank line between them.
pub fn render_document(blocks: &[String]) -> String {
    blocks
        .iter()
        .filter(|block| !block.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}
