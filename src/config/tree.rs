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

//! The resolved configuration tree.
//!
//! A [`ConfigTree`] is built once by the loader and never mutated afterwards:
//! it exposes lookups only. Consumers receive it (or typed views of its
//! sections) by reference instead of reaching for a global.

use serde::de::DeserializeOwned;
use serde_yaml::{Mapping, Value};

use super::env_interpolation::UnresolvedVariable;

/// Immutable mapping of section name to section contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    root: Mapping,
    unresolved: Vec<UnresolvedVariable>,
}

impl ConfigTree {
    pub(crate) fn new(root: Mapping, unresolved: Vec<UnresolvedVariable>) -> Self {
        Self { root, unresolved }
    }

    /// Look up a section, or a key within a section.
    ///
    /// With `key` set to `None` the whole section is returned. Returns `None`
    /// when the section is missing, when the key is missing, or when a key is
    /// requested from a section that is not a mapping.
    pub fn get(&self, section: &str, key: Option<&str>) -> Option<&Value> {
        let section_value = self.root.get(section)?;
        match key {
            None => Some(section_value),
            Some(key) => section_value.as_mapping()?.get(key),
        }
    }

    /// Like [`ConfigTree::get`], falling back to `default` whenever the lookup misses.
    ///
    /// ```
    /// use graphrag_api::config::from_yaml_str;
    /// use serde_yaml::Value;
    ///
    /// let tree = from_yaml_str("server:\n  port: 9090\n").unwrap();
    /// let fallback = Value::String("Default Value".into());
    ///
    /// assert_eq!(tree.get_or("server", Some("port"), fallback.clone()), Value::from(9090));
    /// assert_eq!(tree.get_or("server", Some("missing"), fallback.clone()), fallback);
    /// assert_eq!(tree.get_or("missing", None, fallback.clone()), fallback);
    /// ```
    pub fn get_or(&self, section: &str, key: Option<&str>, default: Value) -> Value {
        self.get(section, key).cloned().unwrap_or(default)
    }

    /// The named section as a mapping, or an empty mapping when it is absent
    /// or not a mapping.
    pub fn section_or_empty(&self, section: &str) -> Mapping {
        self.get(section, None)
            .and_then(Value::as_mapping)
            .cloned()
            .unwrap_or_default()
    }

    /// Deserialize a section into a typed value. Returns `Ok(None)` when the
    /// section is absent or null.
    pub fn section_as<T: DeserializeOwned>(&self, section: &str) -> Result<Option<T>, serde_yaml::Error> {
        match self.get(section, None) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_yaml::from_value(value.clone()).map(Some),
        }
    }

    pub fn contains_section(&self, section: &str) -> bool {
        self.root.contains_key(section)
    }

    /// Names of the top-level sections, in document order. Non-string keys are skipped.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Variable references that were left in place while loading.
    pub fn unresolved(&self) -> &[UnresolvedVariable] {
        &self.unresolved
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Render the resolved tree back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.root)
    }
}
