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

//! Typed views of the `server`, `app` and `logging` sections.
//!
//! Interpolation never changes a value's type, so `port: "${PORT:8000}"`
//! arrives here as the string `"8000"`. Numeric and boolean fields therefore
//! accept either native YAML scalars or strings that parse as them.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use super::loader::ConfigError;
use super::tree::ConfigTree;

pub const SERVER_SECTION: &str = "server";
pub const APP_SECTION: &str = "app";
pub const LOGGING_SECTION: &str = "logging";

/// Bind settings for the HTTP server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host", deserialize_with = "scalar_to_string")]
    pub host: String,
    #[serde(default = "default_port", deserialize_with = "native_or_parsed")]
    pub port: u16,
    #[serde(default, deserialize_with = "native_or_parsed")]
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Application metadata, published in the OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_title", deserialize_with = "scalar_to_string")]
    pub title: String,
    #[serde(default = "default_description", deserialize_with = "scalar_to_string")]
    pub description: String,
    #[serde(default = "default_version", deserialize_with = "scalar_to_string")]
    pub version: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
            version: default_version(),
        }
    }
}

fn default_title() -> String {
    "GraphRAG API".to_string()
}

fn default_description() -> String {
    "API for GraphRAG".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level", deserialize_with = "scalar_to_string")]
    pub level: String,
    #[serde(default = "default_log_format", deserialize_with = "scalar_to_string")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Output layout of the process logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Levels understood by [`LoggingSettings::filter_level`].
pub const LOG_LEVELS: &[&str] = &[
    "trace", "debug", "info", "warn", "warning", "error", "critical", "fatal", "off",
];

impl LoggingSettings {
    /// `json` selects structured output. Any other value, including a
    /// printf-style pattern carried over from another logging system, selects
    /// the plain text formatter.
    pub fn log_format(&self) -> LogFormat {
        if self.format.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    /// The configured level as a filter directive, or `None` if it is not a known level.
    pub fn filter_level(&self) -> Option<&'static str> {
        match self.level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some("trace"),
            "debug" => Some("debug"),
            "info" => Some("info"),
            "warn" | "warning" => Some("warn"),
            "error" | "critical" | "fatal" => Some("error"),
            "off" => Some("off"),
            _ => None,
        }
    }
}

impl ConfigTree {
    /// The `server` section, with defaults for anything missing.
    pub fn server_settings(&self) -> Result<ServerSettings, ConfigError> {
        typed_section(self, SERVER_SECTION)
    }

    /// The `app` section, with defaults for anything missing.
    pub fn app_settings(&self) -> Result<AppSettings, ConfigError> {
        typed_section(self, APP_SECTION)
    }

    /// The `logging` section, with defaults for anything missing.
    pub fn logging_settings(&self) -> Result<LoggingSettings, ConfigError> {
        typed_section(self, LOGGING_SECTION)
    }
}

fn typed_section<T>(tree: &ConfigTree, section: &str) -> Result<T, ConfigError>
where
    T: de::DeserializeOwned + Default,
{
    tree.section_as::<T>(section)
        .map(Option::unwrap_or_default)
        .map_err(|source| ConfigError::InvalidSection {
            section: section.to_string(),
            source,
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NativeOrText<T> {
    Native(T),
    Text(String),
}

fn native_or_parsed<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match NativeOrText::<T>::deserialize(deserializer)? {
        NativeOrText::Native(value) => Ok(value),
        NativeOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|e| de::Error::custom(format!("invalid value '{text}': {e}"))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Bool(b) => b.to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
    })
}
