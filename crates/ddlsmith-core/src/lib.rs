//! Core contracts for ddlsmith.
//!
//! This crate defines the physical data model, the strict parser that builds
//! it from JSON, and the output policy configuration shared by the generator
//! and the CLI.

pub mod config;
pub mod error;
pub mod model;
pub mod parse;

pub use config::{CommaStyle, ConstraintApproach, DdlConfig, NamingConvention};
pub use error::{Error, Result};
pub use model::{Column, Entity, EntityRef, Model, Relationship, UNNAMED_MODEL};
pub use parse::{parse_model, parse_model_str};
