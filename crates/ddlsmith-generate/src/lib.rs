//! DDL synthesis engine for ddlsmith.
//!
//! Turns a parsed physical model plus a [`DdlConfig`] into deterministic
//! Databricks SQL. Every stage is a pure function; the engine only wires
//! them together and collects a report.

pub mod constraints;
pub mod emitter;
pub mod engine;
pub mod errors;
pub mod format;
pub mod model;
pub mod naming;
pub mod types;
pub mod validation;

pub use constraints::{
    ConstraintKind, ConstraintPlan, ConstraintStatement, ResolvedForeignKey, plan_constraints,
    resolve_relationships,
};
pub use ddlsmith_core::DdlConfig;
pub use engine::{GenerationEngine, GenerationResult, generate_ddl, generate_from_model};
pub use errors::GenerationError;
pub use format::format_comma_separated_list;
pub use model::{GenerationIssue, GenerationReport, IssueLevel};
pub use naming::{Identifiers, transform};
pub use types::{lookup_type, map_type};
