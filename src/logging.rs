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

//! Process logger setup driven by the `logging` section.
//!
//! Library code logs through the `log` facade; the subscriber installed here
//! also picks up those records.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSettings};

/// The filter directive to use when `RUST_LOG` is not set.
///
/// `debug` forces at least debug output; an unrecognized level falls back to `info`.
pub fn default_directive(settings: &LoggingSettings, debug: bool) -> &'static str {
    match settings.filter_level() {
        Some("trace") => "trace",
        _ if debug => "debug",
        Some(level) => level,
        None => "info",
    }
}

/// Install the global logger. `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init_logging(settings: &LoggingSettings, debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings, debug)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = match settings.log_format() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
