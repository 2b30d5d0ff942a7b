//! Source data type to Databricks type mapping.

/// Type used for columns whose model omits a data type.
const DEFAULT_TYPE: &str = "STRING";

/// Map a raw data type to the dialect type, passing unknown types through.
pub fn map_type(raw: &str) -> String {
    lookup_type(raw).unwrap_or_else(|| raw.to_string())
}

/// Map a raw data type, returning `None` when it is not in the mapping table.
///
/// Lookup is case-insensitive. Parameterised string types collapse to
/// `STRING`. Decimal precision and scale are kept but normalized: the type is
/// upper-cased and spaces are dropped, so `decimal(12, 2)` maps to
/// `DECIMAL(12,2)`.
pub fn lookup_type(raw: &str) -> Option<String> {
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Some(DEFAULT_TYPE.to_string());
    }

    let (base, params) = split_params(&normalized);
    let base = base.split_whitespace().collect::<Vec<_>>().join(" ");

    let mapped = match (base.as_str(), params) {
        ("INT" | "INTEGER", None) => "INT".to_string(),
        ("VARCHAR" | "CHAR" | "NVARCHAR" | "NCHAR" | "CHARACTER VARYING", _) => {
            "STRING".to_string()
        }
        ("TEXT" | "STRING", None) => "STRING".to_string(),
        ("FLOAT" | "DOUBLE" | "DOUBLE PRECISION", None) => "DOUBLE".to_string(),
        ("NUMBER" | "NUMERIC" | "DECIMAL", None) => "DECIMAL".to_string(),
        ("NUMBER" | "NUMERIC" | "DECIMAL", Some(params)) => {
            format!("DECIMAL({})", params.replace(' ', ""))
        }
        ("TIMESTAMP_TZ" | "TIMESTAMPTZ" | "DATETIME", None) => "TIMESTAMP".to_string(),
        ("TIMESTAMP" | "DATE" | "BOOLEAN" | "BIGINT" | "SMALLINT" | "TINYINT", None) => base.clone(),
        ("BOOL", None) => "BOOLEAN".to_string(),
        _ => return None,
    };

    Some(mapped)
}

/// Split `NAME(args)` into `NAME` and `args`.
fn split_params(normalized: &str) -> (&str, Option<&str>) {
    match (normalized.find('('), normalized.strip_suffix(')')) {
        (Some(open), Some(inner)) => (normalized[..open].trim_end(), Some(&inner[open + 1..])),
        _ => (normalized, None),
    }
}
