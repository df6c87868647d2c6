//! Report configuration loaded from an optional TOML file

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use logtally_logs::CasePolicy;

/// Narrowest usable column: one space of padding plus one character
const MIN_COLUMN_WIDTH: usize = 2;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Count level labels case-insensitively
    pub fold_case: bool,

    /// Summary table layout
    pub table: TableConfig,
}

/// Summary table layout
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub level_header: String,
    pub count_header: String,

    /// Total width of the label column, padding included
    pub level_width: usize,

    /// Total width of the count column, padding included
    pub count_width: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            level_header: "Level".to_string(),
            count_header: "Count".to_string(),
            level_width: 20,
            count_width: 12,
        }
    }
}

impl ReportConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_width("level_width", self.table.level_width)?;
        validate_width("count_width", self.table.count_width)?;
        Ok(())
    }

    pub fn case_policy(&self) -> CasePolicy {
        if self.fold_case {
            CasePolicy::Fold
        } else {
            CasePolicy::Preserve
        }
    }
}

fn validate_width(name: &str, width: usize) -> Result<(), ConfigError> {
    if width < MIN_COLUMN_WIDTH {
        return Err(ConfigError::Invalid(format!(
            "table.{name} must be at least {MIN_COLUMN_WIDTH}, got {width}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ReportConfig::default();
        assert!(!config.fold_case);
        assert_eq!(config.case_policy(), CasePolicy::Preserve);
        assert_eq!(config.table.level_width, 20);
        assert_eq!(config.table.count_width, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config("fold_case = true\n\n[table]\nlevel_width = 12\n");
        let config = ReportConfig::load(file.path()).unwrap();

        assert_eq!(config.case_policy(), CasePolicy::Fold);
        assert_eq!(config.table.level_width, 12);
        assert_eq!(config.table.count_width, 12);
        assert_eq!(config.table.level_header, "Level");
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let file = write_config("[table]\ncolour = \"red\"\n");
        assert!(matches!(
            ReportConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_rejects_narrow_columns() {
        let file = write_config("[table]\ncount_width = 1\n");
        match ReportConfig::load(file.path()) {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("count_width")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ReportConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
