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

//! Environment variable interpolation for configuration values.
//!
//! String values in the parsed configuration may reference environment
//! variables with two forms:
//! - `${VAR_NAME}` - replaced by the variable's value; left in place when unset
//! - `${VAR_NAME:default}` - replaced by the variable's value, or `default` when unset
//!
//! Variable names consist of ASCII letters, digits and underscores. Anything
//! that does not form a complete token (`${` without a closing `}`, an empty
//! name, a name with other characters) is copied through as literal text.
//!
//! Substitution is single-pass: replacement text is never scanned again, so a
//! value containing `${...}` cannot trigger further expansion.
//!
//! # Examples
//!
//! ```
//! use graphrag_api::config::env_interpolation::interpolate_with;
//!
//! let lookup = |name: &str| (name == "DB_HOST").then(|| "localhost".to_string());
//!
//! let result = interpolate_with("${DB_HOST}:${DB_PORT:5432}/${DB_NAME}", &lookup).unwrap();
//! assert_eq!(result.value, "localhost:5432/${DB_NAME}");
//! assert_eq!(result.unresolved, vec!["DB_NAME".to_string()]);
//! ```

use log::debug;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::env;

/// Maximum length for interpolated strings to prevent DoS attacks
pub const MAX_INTERPOLATED_LENGTH: usize = 10_000_000; // 10MB

/// Errors that can occur during environment variable interpolation.
///
/// An unset variable without a default is not an error; it is reported
/// through [`Interpolated::unresolved`] instead.
#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Result of interpolating a single string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpolated {
    /// The string with every resolvable token replaced.
    pub value: String,
    /// Names of variables that were unset and had no default, in order of appearance.
    pub unresolved: Vec<String>,
}

/// A variable reference left in place because it could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedVariable {
    /// Name of the environment variable.
    pub name: String,
    /// Dotted location of the value in the configuration (e.g. `server.host`, `hosts[1]`).
    pub path: String,
}

/// A `${NAME}` or `${NAME:default}` occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EnvToken<'a> {
    name: &'a str,
    default: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Literal,
    /// Inside `${`; `start` is the index of the `$`.
    Name { start: usize },
    /// After `${NAME:`; `colon` is the index of the separator.
    Default { start: usize, colon: usize },
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Look up a variable in the process environment.
///
/// Values that are not valid Unicode are treated as unset.
pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Interpolate environment variables in `input` using the process environment.
///
/// # Examples
///
/// ```
/// use graphrag_api::config::env_interpolation::interpolate;
///
/// let result = interpolate("plain text").unwrap();
/// assert_eq!(result.value, "plain text");
/// assert!(result.unresolved.is_empty());
/// ```
pub fn interpolate(input: &str) -> Result<Interpolated, InterpolationError> {
    interpolate_with(input, &process_env)
}

/// Interpolate environment variables in `input`, resolving names with `lookup`.
///
/// The scanner walks the input once, switching between literal text, the
/// variable name and the default literal. Every delimiter it looks for is
/// ASCII, so byte offsets it records are always valid `str` boundaries.
pub fn interpolate_with<F>(input: &str, lookup: &F) -> Result<Interpolated, InterpolationError>
where
    F: Fn(&str) -> Option<String>,
{
    let bytes = input.as_bytes();
    let mut value = String::with_capacity(input.len());
    let mut unresolved = Vec::new();
    let mut literal_start = 0;
    let mut state = ScanState::Literal;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match state {
            ScanState::Literal => {
                if b == b'$' && bytes.get(i + 1) == Some(&b'{') {
                    state = ScanState::Name { start: i };
                    i += 2;
                } else {
                    i += 1;
                }
            }
            ScanState::Name { start } => {
                if is_name_byte(b) {
                    i += 1;
                    continue;
                }

                let name = &input[start + 2..i];
                match b {
                    b'}' if !name.is_empty() => {
                        value.push_str(&input[literal_start..start]);
                        let token = EnvToken { name, default: None };
                        substitute(token, &input[start..=i], lookup, &mut value, &mut unresolved);
                        literal_start = i + 1;
                        state = ScanState::Literal;
                        i += 1;
                    }
                    b':' if !name.is_empty() => {
                        state = ScanState::Default { start, colon: i };
                        i += 1;
                    }
                    // Not a token; rescan this byte as literal text since it may open one.
                    _ => state = ScanState::Literal,
                }
            }
            ScanState::Default { start, colon } => {
                if b == b'}' {
                    value.push_str(&input[literal_start..start]);
                    let token = EnvToken {
                        name: &input[start + 2..colon],
                        default: Some(&input[colon + 1..i]),
                    };
                    substitute(token, &input[start..=i], lookup, &mut value, &mut unresolved);
                    literal_start = i + 1;
                    state = ScanState::Literal;
                }
                i += 1;
            }
        }

        if value.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }

    // Unterminated tokens fall through here as literal text
    value.push_str(&input[literal_start..]);
    if value.len() > MAX_INTERPOLATED_LENGTH {
        return Err(InterpolationError::ResultTooLarge);
    }

    Ok(Interpolated { value, unresolved })
}

fn substitute<F>(
    token: EnvToken<'_>,
    raw: &str,
    lookup: &F,
    out: &mut String,
    unresolved: &mut Vec<String>,
) where
    F: Fn(&str) -> Option<String>,
{
    match (lookup(token.name), token.default) {
        (Some(val), _) => out.push_str(&val),
        (None, Some(default)) => out.push_str(default),
        (None, None) => {
            out.push_str(raw);
            unresolved.push(token.name.to_string());
        }
    }
}

/// Interpolate every string leaf of a parsed YAML value.
///
/// Mappings keep their keys and entry order, sequences keep their element
/// order, and non-string scalars are returned untouched. Only string leaves
/// change. Returns the rewritten value along with every unresolved reference.
pub fn interpolate_value<F>(
    value: Value,
    lookup: &F,
) -> Result<(Value, Vec<UnresolvedVariable>), InterpolationError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut unresolved = Vec::new();
    let mut path = Vec::new();
    let value = walk(value, lookup, &mut path, &mut unresolved)?;
    Ok((value, unresolved))
}

fn walk<F>(
    value: Value,
    lookup: &F,
    path: &mut Vec<String>,
    unresolved: &mut Vec<UnresolvedVariable>,
) -> Result<Value, InterpolationError>
where
    F: Fn(&str) -> Option<String>,
{
    match value {
        Value::String(s) => {
            let result = interpolate_with(&s, lookup)?;
            if !result.unresolved.is_empty() {
                let location = render_path(path);
                unresolved.extend(result.unresolved.into_iter().map(|name| UnresolvedVariable {
                    name,
                    path: location.clone(),
                }));
            }
            if result.value != s {
                debug!("Interpolated environment variables at '{}'", render_path(path));
            }
            Ok(Value::String(result.value))
        }
        Value::Mapping(mapping) => {
            let mut resolved = Mapping::with_capacity(mapping.len());
            for (key, entry) in mapping {
                path.push(key_label(&key));
                let entry = walk(entry, lookup, path, unresolved);
                path.pop();
                resolved.insert(key, entry?);
            }
            Ok(Value::Mapping(resolved))
        }
        Value::Sequence(items) => {
            let mut resolved = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                path.push(format!("[{index}]"));
                let item = walk(item, lookup, path, unresolved);
                path.pop();
                resolved.push(item?);
            }
            Ok(Value::Sequence(resolved))
        }
        Value::Tagged(tagged) => {
            let TaggedValue { tag, value } = *tagged;
            let value = walk(value, lookup, path, unresolved)?;
            Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
        }
        other => Ok(other),
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "~".to_string(),
        _ => "?".to_string(),
    }
}

fn render_path(path: &[String]) -> String {
    let mut rendered = String::new();
    for segment in path {
        if !rendered.is_empty() && !segment.starts_with('[') {
            rendered.push('.');
        }
        rendered.push_str(segment);
    }
    rendered
}
