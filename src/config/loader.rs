// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Centralized configuration loading with automatic environment variable interpolation.
//!
//! Loading is a single pass: parse the YAML document, interpolate every string
//! value, and freeze the result into a [`ConfigTree`].

use super::env_interpolation::{self, interpolate_value, process_env};
use super::tree::ConfigTree;
use log::warn;
use serde::de::Error as _;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML in '{origin}': {source}")]
    ParseError {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Invalid '{section}' section: {source}")]
    InvalidSection {
        section: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Build a [`ConfigTree`] from a YAML string, interpolating against the process environment.
///
/// # Examples
///
/// ```
/// use graphrag_api::config::from_yaml_str;
///
/// let tree = from_yaml_str("server:\n  host: \"${UNSET_DOC_HOST:0.0.0.0}\"\n").unwrap();
/// assert_eq!(tree.get("server", Some("host")).and_then(|v| v.as_str()), Some("0.0.0.0"));
/// ```
pub fn from_yaml_str(s: &str) -> Result<ConfigTree, ConfigError> {
    from_yaml_str_with(s, &process_env)
}

/// Build a [`ConfigTree`] from a YAML string, resolving variables with `lookup`.
pub fn from_yaml_str_with<F>(s: &str, lookup: &F) -> Result<ConfigTree, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    resolve_document(s, "<string>", lookup)
}

/// Load a [`ConfigTree`] from a YAML file.
///
/// # Errors
///
/// - [`ConfigError::NotFound`] if the file does not exist
/// - [`ConfigError::ParseError`] if the file is not valid YAML or its top
///   level is not a mapping of sections
/// - [`ConfigError::IoError`] if the file exists but cannot be read
///
/// Variables that are unset and have no default are not errors: the
/// placeholder stays in the value and a warning is logged.
///
/// # Examples
///
/// ```no_run
/// use graphrag_api::config::load_config_file;
///
/// let config = load_config_file("config.yaml").unwrap();
/// let host = config.get("server", Some("host"));
/// ```
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<ConfigTree, ConfigError> {
    let path_ref = path.as_ref();
    let content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path_ref.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    resolve_document(&content, &path_ref.display().to_string(), &process_env)
}

fn resolve_document<F>(content: &str, origin: &str, lookup: &F) -> Result<ConfigTree, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let parse_error = |source: serde_yaml::Error| ConfigError::ParseError {
        origin: origin.to_string(),
        source,
    };

    if content.trim().is_empty() {
        return Ok(ConfigTree::default());
    }

    let document: Value = serde_yaml::from_str(content).map_err(parse_error)?;
    let root = match document {
        Value::Null => Mapping::new(),
        Value::Mapping(root) => root,
        _ => {
            return Err(parse_error(serde_yaml::Error::custom(
                "expected a mapping of configuration sections at the top level",
            )))
        }
    };

    let (resolved, unresolved) = interpolate_value(Value::Mapping(root), lookup)?;
    for var in &unresolved {
        warn!(
            "Environment variable '{}' referenced at '{}' is not set and has no default; leaving the placeholder in place",
            var.name, var.path
        );
    }

    let root = match resolved {
        Value::Mapping(root) => root,
        _ => Mapping::new(),
    };
    Ok(ConfigTree::new(root, unresolved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn host_env(name: &str) -> Option<String> {
        (name == "HOST").then(|| "10.0.0.5".to_string())
    }

    const SCENARIO: &str = r#"
server:
  host: "${HOST:0.0.0.0}"
  port: 9090
"#;

    #[test]
    fn test_default_used_when_variable_unset() {
        let tree = from_yaml_str_with(SCENARIO, &no_env).unwrap();

        assert_eq!(
            tree.get("server", Some("host")),
            Some(&Value::String("0.0.0.0".to_string()))
        );
        assert_eq!(tree.get("server", Some("port")), Some(&Value::from(9090)));
    }

    #[test]
    fn test_variable_value_used_when_set() {
        let tree = from_yaml_str_with(SCENARIO, &host_env).unwrap();

        assert_eq!(
            tree.get("server", Some("host")),
            Some(&Value::String("10.0.0.5".to_string()))
        );
        assert_eq!(tree.get("server", Some("port")), Some(&Value::from(9090)));
    }

    #[test]
    fn test_unresolved_variable_is_recorded_not_fatal() {
        let tree = from_yaml_str_with("database:\n  url: \"${DB_URL}\"\n", &no_env).unwrap();

        assert_eq!(
            tree.get("database", Some("url")),
            Some(&Value::String("${DB_URL}".to_string()))
        );
        assert_eq!(tree.unresolved().len(), 1);
        assert_eq!(tree.unresolved()[0].name, "DB_URL");
        assert_eq!(tree.unresolved()[0].path, "database.url");
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = from_yaml_str_with("server: [unclosed\n", &no_env);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_non_mapping_document_is_parse_error() {
        let result = from_yaml_str_with("- just\n- a list\n", &no_env);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_empty_document_is_empty_tree() {
        let tree = from_yaml_str_with("  \n", &no_env).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_load_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let result = load_config_file(&path);
        match result {
            Err(ConfigError::NotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_file_reads_and_resolves() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            r#"
app:
  title: "${GRAPHRAG_LOADER_TEST_UNSET_TITLE:GraphRAG API}"
  version: "0.1.0"
"#,
        )
        .unwrap();

        let tree = load_config_file(temp_file.path()).unwrap();
        assert_eq!(
            tree.get("app", Some("title")).and_then(Value::as_str),
            Some("GraphRAG API")
        );
    }

    #[test]
    fn test_load_config_file_parse_error_names_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "server:\n  host: [\n").unwrap();

        let err = load_config_file(temp_file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err
            .to_string()
            .contains(&temp_file.path().display().to_string()));
    }
}
