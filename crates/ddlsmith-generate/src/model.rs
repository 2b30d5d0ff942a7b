use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity of a generation issue. Neither level aborts generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLevel {
    Warning,
    Note,
}

/// Structured generation issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationIssue {
    pub level: IssueLevel,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl GenerationIssue {
    pub const UNRESOLVED_RELATIONSHIP: &'static str = "unresolved_relationship";
    pub const UNMAPPED_TYPE: &'static str = "unmapped_type";
    pub const EMPTY_ENTITY: &'static str = "empty_entity";

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            code: code.to_string(),
            message: message.into(),
            entity: None,
            column: None,
        }
    }

    pub fn note(code: &str, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Note,
            ..Self::warning(code, message)
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub model_name: String,
    pub tables: usize,
    pub columns: usize,
    pub primary_keys: usize,
    pub foreign_keys: usize,
    pub validation_queries: usize,
    pub issues_by_code: BTreeMap<String, u64>,
    pub warnings: Vec<GenerationIssue>,
    pub notes: Vec<GenerationIssue>,
}

impl GenerationReport {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, issue: GenerationIssue) {
        *self.issues_by_code.entry(issue.code.clone()).or_insert(0) += 1;
        match issue.level {
            IssueLevel::Warning => self.warnings.push(issue),
            IssueLevel::Note => self.notes.push(issue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_issues_by_level_and_code() {
        let mut report = GenerationReport::new("Sales");
        report.record(GenerationIssue::warning(
            GenerationIssue::UNRESOLVED_RELATIONSHIP,
            "target entity 'Shipment' not found",
        ));
        report.record(
            GenerationIssue::note(GenerationIssue::UNMAPPED_TYPE, "GEOGRAPHY passed through")
                .with_entity("Store")
                .with_column("location"),
        );
        report.record(GenerationIssue::note(GenerationIssue::UNMAPPED_TYPE, "JSON passed through"));

        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.notes.len(), 2);
        assert_eq!(report.issues_by_code.get("unmapped_type"), Some(&2));
        assert_eq!(report.notes[0].column.as_deref(), Some("location"));
    }

    #[test]
    fn serializes_without_empty_locations() {
        let issue = GenerationIssue::warning("empty_entity", "no columns");
        let json = serde_json::to_value(&issue).expect("serialize issue");
        assert_eq!(
            json,
            serde_json::json!({"level": "warning", "code": "empty_entity", "message": "no columns"})
        );
    }
}
