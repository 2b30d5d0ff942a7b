use ddlsmith_core::{DdlConfig, Model, parse_model_str};
use tracing::{debug, info, warn};

use crate::constraints::{ConstraintKind, plan_constraints};
use crate::emitter::{Emitter, render_document};
use crate::errors::GenerationError;
use crate::model::{GenerationIssue, GenerationReport};
use crate::types::lookup_type;
use crate::validation::{render_validation_block, validation_queries};

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// SQL document, without a trailing newline.
    pub ddl: String,
    pub report: GenerationReport,
}

/// Entry point for generating DDL from a physical model.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: DdlConfig,
}

impl GenerationEngine {
    pub fn new(config: DdlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DdlConfig {
        &self.config
    }

    /// Parse `json` and generate DDL for it.
    pub fn generate_str(&self, json: &str) -> Result<GenerationResult, GenerationError> {
        let model = parse_model_str(json)?;
        Ok(self.generate(&model))
    }

    /// Generate DDL for an already parsed model. Never fails; problems in the
    /// model end up in the report.
    pub fn generate(&self, model: &Model) -> GenerationResult {
        let config = &self.config;
        let model_name = model.display_name();
        let emitter = Emitter::new(config);
        let mut report = GenerationReport::new(model_name);

        info!(
            event = "generation_started",
            model = %model_name,
            entities = model.entities.len(),
            relationships = model.relationships.len(),
            "generation started"
        );

        let mut blocks = Vec::new();
        if config.include_header {
            blocks.push(emitter.header(model_name));
        }
        if config.include_constraint_info {
            blocks.push(emitter.constraint_info().to_string());
        }
        if config.create_database {
            blocks.push(emitter.create_database(model_name));
        }

        for entity in &model.entities {
            if entity.columns.is_empty() {
                let issue = GenerationIssue::warning(
                    GenerationIssue::EMPTY_ENTITY,
                    format!("entity '{}' has no columns and was skipped", entity.name),
                )
                .with_entity(entity.name.clone());
                warn!(event = "entity_skipped", entity = %entity.name, "entity has no columns");
                report.record(issue);
                continue;
            }

            for column in &entity.columns {
                if lookup_type(&column.data_type).is_none() {
                    debug!(
                        event = "type_unmapped",
                        entity = %entity.name,
                        column = %column.name,
                        data_type = %column.data_type,
                        "data type passed through"
                    );
                    report.record(
                        GenerationIssue::note(
                            GenerationIssue::UNMAPPED_TYPE,
                            format!("data type '{}' passed through unchanged", column.data_type),
                        )
                        .with_entity(entity.name.clone())
                        .with_column(column.name.clone()),
                    );
                }
            }

            blocks.push(emitter.table(entity));
            report.tables += 1;
            report.columns += entity.columns.len();
        }

        let plan = plan_constraints(model, config);
        for issue in &plan.warnings {
            warn!(event = "relationship_skipped", reason = %issue.message, "relationship skipped");
        }
        report.primary_keys = plan.count(ConstraintKind::PrimaryKey);
        report.foreign_keys = plan.count(ConstraintKind::ForeignKey);
        if !plan.is_empty() {
            blocks.push(plan.render());
        }

        if config.include_validation_queries {
            let queries = validation_queries(
                model,
                &emitter.identifiers(),
                &plan.foreign_keys,
                config.comma_style,
            );
            report.validation_queries = queries.len();
            if let Some(block) = render_validation_block(&queries) {
                blocks.push(block);
            }
        }

        for issue in plan.warnings {
            report.record(issue);
        }

        let ddl = render_document(&blocks);

        info!(
            event = "generation_finished",
            model = %model_name,
            tables = report.tables,
            primary_keys = report.primary_keys,
            foreign_keys = report.foreign_keys,
            warnings = report.warnings.len(),
            "generation finished"
        );

        GenerationResult { ddl, report }
    }
}

/// Parse a JSON document and generate DDL for it.
pub fn generate_ddl(json: &str, config: &DdlConfig) -> Result<GenerationResult, GenerationError> {
    GenerationEngine::new(config.clone()).generate_str(json)
}

/// Generate DDL for an already parsed model.
pub fn generate_from_model(model: &Model, config: &DdlConfig) -> GenerationResult {
    GenerationEngine::new(config.clone()).generate(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_documents_fail_without_output() {
        let err = generate_ddl("{\"entities\": []}", &DdlConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("invalid model format"));

        let err = generate_ddl("not json", &DdlConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("invalid json"));
    }

    #[test]
    fn report_counts_and_issues() {
        let json = json!({
            "model": {
                "name": "Stores",
                "entities": [
                    {"name": "Store", "attributes": [
                        {"name": "id", "metadata": {"PK": true, "Data type": "INT"}},
                        {"name": "location", "metadata": {"Data type": "GEOGRAPHY"}}
                    ]},
                    {"name": "Placeholder", "attributes": []}
                ],
                "relationships": [
                    {"sourceEntity": {"name": "Store", "attributeNames": ["id"]},
                     "targetEntity": {"name": "Region", "attributeNames": ["id"]}}
                ]
            }
        })
        .to_string();

        let result = generate_ddl(&json, &DdlConfig::recommended()).expect("generate");
        let report = &result.report;
        assert_eq!(report.model_name, "Stores");
        assert_eq!(report.tables, 1);
        assert_eq!(report.columns, 2);
        assert_eq!(report.primary_keys, 1);
        assert_eq!(report.foreign_keys, 0);
        assert_eq!(report.issues_by_code.get("empty_entity"), Some(&1));
        assert_eq!(report.issues_by_code.get("unresolved_relationship"), Some(&1));
        assert_eq!(report.notes.len(), 1);
        assert_eq!(report.notes[0].column.as_deref(), Some("location"));
        assert!(result.ddl.contains("  location GEOGRAPHY"));
        assert!(!result.ddl.contains("placeholder"));
    }

    #[test]
    fn validation_queries_follow_their_own_flag() {
        let json = json!({
            "model": {
                "entities": [{"name": "t", "attributes": [{"name": "id", "metadata": {"PK": true}}]}]
            }
        })
        .to_string();
        let config = DdlConfig {
            include_validation_queries: true,
            ..DdlConfig::default()
        };
        let result = generate_ddl(&json, &config).expect("generate");
        assert_eq!(result.report.validation_queries, 1);
        assert_eq!(result.report.primary_keys, 0);
        assert!(result.ddl.contains("HAVING COUNT(*) > 1;"));
        assert!(!result.ddl.contains("ALTER TABLE"));
    }
}
