use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How relational constraints are expressed in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintApproach {
    /// `ALTER TABLE ... ADD CONSTRAINT` statements after the tables.
    #[default]
    AlterTable,
    /// Documentation-only comment lines.
    CommentOnly,
}

/// Casing and separator rule applied to every identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NamingConvention {
    #[default]
    Snake,
    Kebab,
    Camel,
    Pascal,
    Upper,
    Lower,
    /// Keep the raw name, replacing only characters the dialect rejects.
    Original,
}

/// Punctuation used between items of a multi-line list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommaStyle {
    #[default]
    Trailing,
    LeadingSpace,
    LeadingNoSpace,
}

/// Output policies for one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DdlConfig {
    /// Emit a `CREATE DATABASE` preamble named after the model.
    pub create_database: bool,
    /// Catalog prefix for table names.
    pub catalog: Option<String>,
    /// Schema prefix for table names.
    pub schema: Option<String>,
    pub include_primary_keys: bool,
    pub include_foreign_keys: bool,
    /// Append `USING DELTA` to every `CREATE TABLE`.
    pub use_delta: bool,
    pub constraint_approach: ConstraintApproach,
    pub naming_convention: NamingConvention,
    pub comma_style: CommaStyle,
    /// Emit entity comment blocks and column `COMMENT` clauses.
    pub include_comments: bool,
    /// Emit duplicate-key and orphan-row check queries.
    pub include_validation_queries: bool,
    /// Emit a banner naming the model.
    pub include_header: bool,
    /// Emit a comment block explaining that constraints are not enforced.
    pub include_constraint_info: bool,
    /// Add a `CLUSTER BY` clause over the primary key columns.
    pub add_clustering: bool,
}

impl Default for DdlConfig {
    fn default() -> Self {
        Self {
            create_database: false,
            catalog: None,
            schema: None,
            include_primary_keys: false,
            include_foreign_keys: false,
            use_delta: false,
            constraint_approach: ConstraintApproach::AlterTable,
            naming_convention: NamingConvention::Snake,
            comma_style: CommaStyle::Trailing,
            include_comments: false,
            include_validation_queries: false,
            include_header: false,
            include_constraint_info: false,
            add_clustering: false,
        }
    }
}

impl DdlConfig {
    /// Defaults offered to interactive users.
    pub fn recommended() -> Self {
        Self {
            create_database: true,
            include_primary_keys: true,
            include_foreign_keys: true,
            use_delta: true,
            include_comments: true,
            include_header: true,
            include_constraint_info: true,
            ..Self::default()
        }
    }
}

fn normalize_token(value: &str) -> String {
    value.trim().to_ascii_uppercase().replace('-', "_")
}

impl ConstraintApproach {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AlterTable => "ALTER_TABLE",
            Self::CommentOnly => "COMMENT_ONLY",
        }
    }
}

impl FromStr for ConstraintApproach {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_token(value).as_str() {
            "ALTER_TABLE" | "ALTER" => Ok(Self::AlterTable),
            "COMMENT_ONLY" | "COMMENTS" | "COMMENT" => Ok(Self::CommentOnly),
            _ => Err(format!("unknown constraint approach '{value}'")),
        }
    }
}

impl NamingConvention {
    pub const ALL: [NamingConvention; 7] = [
        Self::Snake,
        Self::Kebab,
        Self::Camel,
        Self::Pascal,
        Self::Upper,
        Self::Lower,
        Self::Original,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Snake => "SNAKE",
            Self::Kebab => "KEBAB",
            Self::Camel => "CAMEL",
            Self::Pascal => "PASCAL",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Original => "ORIGINAL",
        }
    }
}

impl FromStr for NamingConvention {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|convention| convention.as_str() == normalize_token(value))
            .ok_or_else(|| format!("unknown naming convention '{value}'"))
    }
}

impl CommaStyle {
    pub const ALL: [CommaStyle; 3] = [Self::Trailing, Self::LeadingSpace, Self::LeadingNoSpace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trailing => "TRAILING",
            Self::LeadingSpace => "LEADING_SPACE",
            Self::LeadingNoSpace => "LEADING_NO_SPACE",
        }
    }
}

impl FromStr for CommaStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == normalize_token(value))
            .ok_or_else(|| format!("unknown comma style '{value}'"))
    }
}

impl fmt::Display for ConstraintApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CommaStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
