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

//! Sanity checks for the sections the service itself consumes.
//!
//! Other sections pass through opaquely and are not checked.

use super::loader::ConfigError;
use super::settings::{APP_SECTION, LOGGING_SECTION, LOG_LEVELS, SERVER_SECTION};
use super::tree::ConfigTree;

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid server port: 0")]
    InvalidPort,

    #[error("Server host cannot be empty")]
    EmptyHost,

    #[error("Unknown log level '{level}'. Valid levels are: {valid_levels}")]
    UnknownLogLevel { level: String, valid_levels: String },

    #[error("Invalid '{section}' section: {message}")]
    InvalidSection { section: String, message: String },

    #[error("Multiple validation errors:\n{}", .0.join("\n"))]
    Multiple(Vec<String>),
}

/// Validate the `server`, `app` and `logging` sections, reporting every problem at once.
pub fn validate_settings(tree: &ConfigTree) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    match tree.server_settings() {
        Ok(server) => {
            if server.port == 0 {
                errors.push(ValidationError::InvalidPort);
            }
            if server.host.trim().is_empty() {
                errors.push(ValidationError::EmptyHost);
            }
        }
        Err(e) => errors.push(invalid_section(SERVER_SECTION, e)),
    }

    if let Err(e) = tree.app_settings() {
        errors.push(invalid_section(APP_SECTION, e));
    }

    match tree.logging_settings() {
        Ok(logging) if logging.filter_level().is_none() => {
            errors.push(ValidationError::UnknownLogLevel {
                level: logging.level,
                valid_levels: LOG_LEVELS.join(", "),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(invalid_section(LOGGING_SECTION, e)),
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(
            errors.iter().map(ToString::to_string).collect(),
        )),
    }
}

fn invalid_section(section: &str, err: ConfigError) -> ValidationError {
    let message = match err {
        ConfigError::InvalidSection { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    ValidationError::InvalidSection {
        section: section.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::from_yaml_str_with;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn validate(yaml: &str) -> Result<(), ValidationError> {
        let tree = from_yaml_str_with(yaml, &no_env).unwrap();
        validate_settings(&tree)
    }

    #[test]
    fn test_valid_config() {
        let yaml = r#"
server:
  host: 0.0.0.0
  port: 8000
  debug: false
app:
  title: GraphRAG API
logging:
  level: INFO
  format: "%(asctime)s - %(levelname)s - %(message)s"
"#;
        assert!(validate(yaml).is_ok());
    }

    #[test]
    fn test_empty_config_uses_valid_defaults() {
        assert!(validate("{}").is_ok());
    }

    #[test]
    fn test_port_zero() {
        assert!(matches!(
            validate("server:\n  port: 0\n"),
            Err(ValidationError::InvalidPort)
        ));
    }

    #[test]
    fn test_unknown_log_level() {
        let err = validate("logging:\n  level: loud\n").unwrap_err();
        assert!(matches!(err, ValidationError::UnknownLogLevel { .. }));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_multiple_errors_reported_together() {
        let yaml = r#"
server:
  host: ""
  port: 0
logging:
  level: loud
"#;
        match validate(yaml) {
            Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_section() {
        let err = validate("server:\n  port: \"${PORT}\"\n").unwrap_err();
        match err {
            ValidationError::InvalidSection { section, .. } => assert_eq!(section, "server"),
            other => panic!("expected invalid section, got {other:?}"),
        }
    }
}
