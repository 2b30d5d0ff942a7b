use std::path::{Path, PathBuf};

use ddlsmith_core::DdlConfig;
use thiserror::Error;

use crate::atomic::write_bytes_atomic;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "ddlsmith.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("settings encoding error: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("settings file {0} already exists (use --force to overwrite)")]
    AlreadyExists(PathBuf),
}

/// Settings in effect plus the file they came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub config: DdlConfig,
    pub source: Option<PathBuf>,
}

/// Load settings from `explicit`, else from `ddlsmith.toml` in the working
/// directory, else fall back to [`DdlConfig::recommended`].
///
/// Keys missing from a settings file take their [`DdlConfig::default`] value.
pub fn load_settings(explicit: Option<&Path>) -> Result<LoadedSettings, SettingsError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
            if !fallback.exists() {
                return Ok(LoadedSettings {
                    config: DdlConfig::recommended(),
                    source: None,
                });
            }
            fallback
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    let config = parse_settings(&content).map_err(|source| SettingsError::Parse {
        path: path.clone(),
        source,
    })?;

    Ok(LoadedSettings {
        config,
        source: Some(path),
    })
}

pub fn parse_settings(content: &str) -> Result<DdlConfig, toml::de::Error> {
    toml::from_str(content)
}

pub fn encode_settings(config: &DdlConfig) -> Result<String, SettingsError> {
    Ok(toml::to_string_pretty(config)?)
}

pub fn save_settings(path: &Path, config: &DdlConfig, force: bool) -> Result<(), SettingsError> {
    if path.exists() && !force {
        return Err(SettingsError::AlreadyExists(path.to_path_buf()));
    }
    let encoded = encode_settings(config)?;
    write_bytes_atomic(path, encoded.as_bytes()).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ddlsmith_core::{CommaStyle, ConstraintApproach, NamingConvention};
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_through_toml() {
        let config = DdlConfig {
            catalog: Some("main".to_string()),
            constraint_approach: ConstraintApproach::CommentOnly,
            naming_convention: NamingConvention::Pascal,
            comma_style: CommaStyle::LeadingSpace,
            ..DdlConfig::recommended()
        };
        let encoded = encode_settings(&config).expect("encode");
        assert!(encoded.contains("constraint_approach = \"COMMENT_ONLY\""));
        assert!(encoded.contains("comma_style = \"LEADING_SPACE\""));
        assert!(!encoded.contains("schema"));
        assert_eq!(parse_settings(&encoded).expect("parse"), config);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let config = parse_settings("use_delta = true\nnaming_convention = \"CAMEL\"\n")
            .expect("parse");
        assert!(config.use_delta);
        assert_eq!(config.naming_convention, NamingConvention::Camel);
        assert!(!config.include_primary_keys);
        assert_eq!(config.comma_style, CommaStyle::Trailing);
    }

    #[test]
    fn rejects_unknown_enum_values() {
        assert!(parse_settings("comma_style = \"SIDEWAYS\"").is_err());
    }

    #[test]
    fn save_refuses_to_overwrite_without_force() {
        let dir = std::env::temp_dir().join(format!("ddlsmith_settings_{}", std::process::id()));
        let path = dir.join(DEFAULT_SETTINGS_FILE);

        save_settings(&path, &DdlConfig::recommended(), false).expect("first save");
        let err = save_settings(&path, &DdlConfig::default(), false).unwrap_err();
        assert!(matches!(err, SettingsError::AlreadyExists(_)));
        save_settings(&path, &DdlConfig::default(), true).expect("forced save");

        let loaded = load_settings(Some(&path)).expect("load");
        assert_eq!(loaded.config, DdlConfig::default());
        assert_eq!(loaded.source.as_deref(), Some(path.as_path()));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_settings(Some(Path::new("/no/such/ddlsmith.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
