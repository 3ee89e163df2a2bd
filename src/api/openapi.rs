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

//! OpenAPI documentation.
//!
//! The document is served at `/openapi.json`. Its title, description and
//! version come from the `app` configuration section.

use utoipa::OpenApi;

use super::responses::HealthResponse;
use crate::config::AppSettings;

#[derive(OpenApi)]
#[openapi(
    paths(super::handlers::health_check),
    components(schemas(HealthResponse)),
    tags((name = "Health", description = "Health check endpoints"))
)]
pub struct ApiDoc;

/// Build the OpenAPI document, taking its info block from the `app` section.
pub fn build_openapi(app: &AppSettings) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.title = app.title.clone();
    doc.info.description = Some(app.description.clone());
    doc.info.version = app.version.clone();
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_comes_from_app_settings() {
        let app = AppSettings {
            title: "Graph Service".to_string(),
            description: "Knowledge graph".to_string(),
            version: "2.0.0".to_string(),
        };

        let doc = build_openapi(&app);

        assert_eq!(doc.info.title, "Graph Service");
        assert_eq!(doc.info.description.as_deref(), Some("Knowledge graph"));
        assert_eq!(doc.info.version, "2.0.0");
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
