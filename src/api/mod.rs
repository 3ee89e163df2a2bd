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

//! HTTP API for the GraphRAG service.
//!
//! ```text
//! /health        - Liveness probe
//! /openapi.json  - OpenAPI document
//! ```

pub mod handlers;
pub mod openapi;
pub mod responses;

pub use handlers::{health_check, openapi_json};
pub use openapi::{build_openapi, ApiDoc};
pub use responses::{HealthResponse, HEALTHY};
