use std::path::{Path, PathBuf};

/// File name used when writing DDL into a directory.
pub fn ddl_file_name(model_name: &str) -> String {
    let stem: String = model_name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_databricks_ddl.sql")
}

/// Where a command writes its main output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// Resolve `--out` / `--out-dir`; the directory form needs the model name.
    pub fn resolve(out: Option<&Path>, out_dir: Option<&Path>, model_name: &str) -> Self {
        match (out, out_dir) {
            (Some(path), _) => Destination::File(path.to_path_buf()),
            (None, Some(dir)) => Destination::File(dir.join(ddl_file_name(model_name))),
            (None, None) => Destination::Stdout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_files_after_the_model() {
        assert_eq!(ddl_file_name("Logistics Hub"), "logistics_hub_databricks_ddl.sql");
        assert_eq!(ddl_file_name("Sales/EU 2024"), "sales_eu_2024_databricks_ddl.sql");
        assert_eq!(ddl_file_name("Café"), "caf__databricks_ddl.sql");
        assert_eq!(ddl_file_name(""), "_databricks_ddl.sql");
    }

    #[test]
    fn resolves_destinations() {
        assert_eq!(Destination::resolve(None, None, "m"), Destination::Stdout);
        assert_eq!(
            Destination::resolve(None, Some(Path::new("out")), "Unnamed Model"),
            Destination::File(PathBuf::from("out/unnamed_model_databricks_ddl.sql"))
        );
        assert_eq!(
            Destination::resolve(Some(Path::new("a.sql")), None, "m"),
            Destination::File(PathBuf::from("a.sql"))
        );
    }
}
