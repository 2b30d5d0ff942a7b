use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use serde_json::json;

use ddlsmith_core::{CommaStyle, ConstraintApproach, NamingConvention};
use ddlsmith_generate::{DdlConfig, GenerationIssue, generate_ddl};

fn manifest_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).to_path_buf()
}

fn sales_model() -> String {
    let path = manifest_dir().join("../../fixtures/models/sales.json");
    std::fs::read_to_string(path).expect("read sales fixture")
}

fn golden(name: &str) -> String {
    let path = manifest_dir().join("tests/golden").join(name);
    std::fs::read_to_string(path).expect("read golden file")
}

#[test]
fn recommended_settings_match_golden_file() {
    let result = generate_ddl(&sales_model(), &DdlConfig::recommended()).expect("generate");
    assert_eq!(format!("{}\n", result.ddl), golden("sales.recommended.sql"));

    let report = result.report;
    assert_eq!(report.tables, 2);
    assert_eq!(report.columns, 6);
    assert_eq!(report.primary_keys, 2);
    assert_eq!(report.foreign_keys, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, GenerationIssue::UNRESOLVED_RELATIONSHIP);
    assert!(report.warnings[0].message.contains("Shipment"));
}

#[test]
fn comment_only_settings_match_golden_file() {
    let config = DdlConfig {
        catalog: Some("main".to_string()),
        schema: Some("crm".to_string()),
        include_primary_keys: true,
        include_foreign_keys: true,
        constraint_approach: ConstraintApproach::CommentOnly,
        comma_style: CommaStyle::LeadingNoSpace,
        include_validation_queries: true,
        ..DdlConfig::default()
    };
    let result = generate_ddl(&sales_model(), &config).expect("generate");
    assert_eq!(format!("{}\n", result.ddl), golden("sales.comment_only.sql"));
    assert!(!result.ddl.contains("ALTER TABLE"));
    assert_eq!(result.report.validation_queries, 3);
}

#[test]
fn single_column_table_with_everything_off() {
    let json = r#"{"model":{"entities":[{"name":"Customer Order","attributes":[{"name":"Customer ID","metadata":{"PK":true,"Not null":true,"Data type":"BIGINT"}}]}],"relationships":[]}}"#;

    let result = generate_ddl(json, &DdlConfig::default()).expect("generate");
    assert_eq!(
        result.ddl,
        "CREATE TABLE customer_order (\n  customer_id BIGINT NOT NULL\n);"
    );

    let camel = json!({
        "model": {
            "entities": [{
                "name": "Customer Order",
                "attributes": [{
                    "name": "customerId",
                    "metadata": {"Data type": "bigint", "Not null": true, "description": "ignored"}
                }]
            }]
        }
    })
    .to_string();
    let result = generate_ddl(&camel, &DdlConfig::default()).expect("generate");
    assert_eq!(result.ddl, "CREATE TABLE customer_order (\n  customer_id BIGINT NOT NULL\n);");
}

#[test]
fn empty_model_output() {
    let json = json!({"model": {"name": "Nothing Here", "entities": []}}).to_string();

    let result = generate_ddl(&json, &DdlConfig::default()).expect("generate");
    assert_eq!(result.ddl, "");

    let config = DdlConfig {
        create_database: true,
        ..DdlConfig::default()
    };
    let result = generate_ddl(&json, &config).expect("generate");
    assert_eq!(result.ddl, "CREATE DATABASE nothing_here;");

    let unnamed = json!({"model": {}}).to_string();
    let result = generate_ddl(&unnamed, &config).expect("generate");
    assert_eq!(result.ddl, "CREATE DATABASE unnamed_model;");
}

#[test]
fn unresolved_target_yields_no_foreign_keys() {
    let json = json!({
        "model": {
            "entities": [{"name": "a", "attributes": [{"name": "b_id"}]}],
            "relationships": [{
                "sourceEntity": {"name": "a", "attributeNames": ["b_id"]},
                "targetEntity": {"name": "b", "attributeNames": ["id"]}
            }]
        }
    })
    .to_string();
    let config = DdlConfig {
        include_foreign_keys: true,
        ..DdlConfig::default()
    };

    let result = generate_ddl(&json, &config).expect("generate");
    assert_eq!(result.report.foreign_keys, 0);
    assert!(!result.ddl.contains("FOREIGN KEY"));
    assert_eq!(result.report.warnings.len(), 1);
}

#[test]
fn kebab_output_has_no_hyphens() {
    let config = DdlConfig {
        naming_convention: NamingConvention::Kebab,
        ..DdlConfig::recommended()
    };
    let result = generate_ddl(&sales_model(), &config).expect("generate");
    let statements: String = result
        .ddl
        .lines()
        .filter(|line| !line.starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(!statements.contains('-'), "{statements}");
    assert!(statements.contains("CREATE TABLE sales_order ("));
}

#[test]
fn comma_styles_produce_the_same_statements() {
    let render = |style: CommaStyle| {
        let config = DdlConfig {
            comma_style: style,
            ..DdlConfig::recommended()
        };
        generate_ddl(&sales_model(), &config).expect("generate").ddl
    };
    let normalize = |ddl: String| -> Vec<String> {
        ddl.lines()
            .map(|line| {
                line.trim()
                    .trim_start_matches(',')
                    .trim_end_matches(',')
                    .trim()
                    .replace(" ,", ",")
                    .replace(", ", ",")
            })
            .collect()
    };

    let trailing = normalize(render(CommaStyle::Trailing));
    assert_eq!(normalize(render(CommaStyle::LeadingSpace)), trailing);
    assert_eq!(normalize(render(CommaStyle::LeadingNoSpace)), trailing);
}

#[test]
fn composite_keys_follow_comma_style_everywhere() {
    let json = json!({
        "model": {
            "entities": [{
                "name": "Order Line",
                "attributes": [
                    {"name": "Order ID", "metadata": {"PK": true, "Data type": "BIGINT"}},
                    {"name": "Line No", "metadata": {"PK": true, "Data type": "INT"}}
                ]
            }]
        }
    })
    .to_string();

    for (style, key) in [
        (CommaStyle::Trailing, "order_id, line_no"),
        (CommaStyle::LeadingSpace, "order_id , line_no"),
        (CommaStyle::LeadingNoSpace, "order_id ,line_no"),
    ] {
        let config = DdlConfig {
            comma_style: style,
            add_clustering: true,
            include_validation_queries: true,
            ..DdlConfig::recommended()
        };
        let ddl = generate_ddl(&json, &config).expect("generate").ddl;
        assert!(ddl.contains(&format!("CLUSTER BY ({key});")), "{ddl}");
        assert!(ddl.contains(&format!("PRIMARY KEY ({key});")), "{ddl}");
        assert!(ddl.contains(&format!("GROUP BY {key}\n")), "{ddl}");
    }
}

#[test]
fn output_is_deterministic() {
    let config = DdlConfig {
        include_validation_queries: true,
        add_clustering: true,
        ..DdlConfig::recommended()
    };
    let first = generate_ddl(&sales_model(), &config).expect("generate");
    let second = generate_ddl(&sales_model(), &config).expect("generate");
    assert_eq!(first.ddl, second.ddl);
    assert!(first.ddl.contains("USING DELTA\nCLUSTER BY (customer_id);"));
}
