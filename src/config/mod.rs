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

//! Configuration management for the GraphRAG API.
//!
//! This module provides:
//! - YAML file loading into an immutable [`ConfigTree`]
//! - Automatic environment variable interpolation of every string value
//! - Section/key lookups that fall back to a default instead of failing
//! - Typed views of the `server`, `app` and `logging` sections
//!
//! # Environment Variable Interpolation
//!
//! - `${VAR_NAME}` - Replaced by the variable's value; left as-is (with a warning) when unset
//! - `${VAR_NAME:default}` - Variable with default value
//!
//! # Examples
//!
//! ```no_run
//! use graphrag_api::config;
//!
//! let config = config::load_config_file("config.yaml").unwrap();
//! let server = config.server_settings().unwrap();
//! println!("Binding to {}:{}", server.host, server.port);
//! ```
//!
//! ## Configuration File Example
//!
//! ```yaml
//! server:
//!   host: "${HOST:0.0.0.0}"
//!   port: "${PORT:8000}"
//!   debug: false
//!
//! app:
//!   title: "GraphRAG API"
//!   description: "API for GraphRAG"
//!   version: "0.1.0"
//!
//! logging:
//!   level: "${LOG_LEVEL:info}"
//!   format: text
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod settings;
pub mod tree;
pub mod validation;

// Re-export commonly used types
pub use env_interpolation::UnresolvedVariable;
pub use loader::{from_yaml_str, from_yaml_str_with, load_config_file, ConfigError};
pub use settings::{AppSettings, LogFormat, LoggingSettings, ServerSettings};
pub use tree::ConfigTree;
pub use validation::{validate_settings, ValidationError};
