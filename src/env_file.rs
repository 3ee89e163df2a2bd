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

//! `.env` file support.
//!
//! Variables from the file are exported into the process environment before
//! the configuration is loaded, so they are visible to `${...}` references.
//! Variables that are already set are never overwritten.

use log::warn;
use std::env;
use std::path::{Path, PathBuf};

/// What happened when loading an env file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileOutcome {
    /// The file does not exist.
    Missing,
    Loaded {
        /// Variables exported into the environment.
        applied: usize,
        /// Variables skipped because they were already set.
        skipped_existing: usize,
        /// Lines that could not be parsed.
        malformed: usize,
    },
}

/// The env file used when none is given explicitly: `.env` beside the config file.
pub fn default_env_file(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(".env"),
        _ => PathBuf::from(".env"),
    }
}

/// Load `KEY=value` lines from `path` into the process environment.
///
/// A missing file is not an error. Malformed lines are skipped with a
/// warning. Only a failure to read an existing file is reported as an error.
///
/// Values containing whitespace must be quoted (`TITLE="My Service"`). An
/// unquoted `TITLE=My Service` is a malformed line and leaves `TITLE` unset.
///
/// This writes to the process environment, so call it before any other
/// thread is started, including the async runtime's workers.
pub fn load_env_file(path: &Path) -> Result<EnvFileOutcome, dotenvy::Error> {
    if !path.exists() {
        return Ok(EnvFileOutcome::Missing);
    }

    let mut applied = 0;
    let mut skipped_existing = 0;
    let mut malformed = 0;

    for item in dotenvy::from_path_iter(path)? {
        match item {
            Ok((key, value)) => {
                if env::var_os(&key).is_some() {
                    skipped_existing += 1;
                } else {
                    env::set_var(&key, value);
                    applied += 1;
                }
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                warn!(
                    "Skipping malformed line in {} at position {index}: {line}",
                    path.display()
                );
                malformed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(EnvFileOutcome::Loaded {
        applied,
        skipped_existing,
        malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_env_file_beside_config() {
        assert_eq!(
            default_env_file(Path::new("config/app.yaml")),
            PathBuf::from("config/.env")
        );
        assert_eq!(default_env_file(Path::new("config.yaml")), PathBuf::from(".env"));
    }

    #[test]
    #[serial]
    fn test_missing_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let outcome = load_env_file(&dir.path().join(".env")).unwrap();
        assert_eq!(outcome, EnvFileOutcome::Missing);
    }

    #[test]
    #[serial]
    fn test_loads_variables_without_overwriting() {
        env::remove_var("GRAPHRAG_ENVFILE_NEW");
        env::set_var("GRAPHRAG_ENVFILE_EXISTING", "from-process");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# comment\nGRAPHRAG_ENVFILE_NEW=from-file\nGRAPHRAG_ENVFILE_EXISTING=from-file\n",
        )
        .unwrap();

        let outcome = load_env_file(&path).unwrap();

        assert_eq!(
            outcome,
            EnvFileOutcome::Loaded {
                applied: 1,
                skipped_existing: 1,
                malformed: 0
            }
        );
        assert_eq!(env::var("GRAPHRAG_ENVFILE_NEW").unwrap(), "from-file");
        assert_eq!(env::var("GRAPHRAG_ENVFILE_EXISTING").unwrap(), "from-process");

        env::remove_var("GRAPHRAG_ENVFILE_NEW");
        env::remove_var("GRAPHRAG_ENVFILE_EXISTING");
    }

    #[test]
    #[serial]
    fn test_malformed_lines_are_skipped() {
        env::remove_var("GRAPHRAG_ENVFILE_AFTER_BAD");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "NOT A VALID LINE\nGRAPHRAG_ENVFILE_AFTER_BAD=ok\n").unwrap();

        let outcome = load_env_file(&path).unwrap();

        assert_eq!(
            outcome,
            EnvFileOutcome::Loaded {
                applied: 1,
                skipped_existing: 0,
                malformed: 1
            }
        );
        assert_eq!(env::var("GRAPHRAG_ENVFILE_AFTER_BAD").unwrap(), "ok");

        env::remove_var("GRAPHRAG_ENVFILE_AFTER_BAD");
    }

    #[test]
    #[serial]
    fn test_values_with_spaces_need_quotes() {
        env::remove_var("GRAPHRAG_ENVFILE_UNQUOTED");
        env::remove_var("GRAPHRAG_ENVFILE_QUOTED");

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "GRAPHRAG_ENVFILE_UNQUOTED=Graph From Dotenv\nGRAPHRAG_ENVFILE_QUOTED=\"Graph From Dotenv\"\n",
        )
        .unwrap();

        let outcome = load_env_file(&path).unwrap();

        assert_eq!(
            outcome,
            EnvFileOutcome::Loaded {
                applied: 1,
                skipped_existing: 0,
                malformed: 1
            }
        );
        assert!(env::var_os("GRAPHRAG_ENVFILE_UNQUOTED").is_none());
        assert_eq!(
            env::var("GRAPHRAG_ENVFILE_QUOTED").unwrap(),
            "Graph From Dotenv"
        );

        env::remove_var("GRAPHRAG_ENVFILE_QUOTED");
    }
}
