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

use anyhow::Result;
use axum::{extract::Extension, routing::get, Router};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::OpenApi;

use crate::api;
use crate::config::{AppSettings, ServerSettings};

pub struct ApiServer {
    host: String,
    port: u16,
    debug: bool,
    openapi: Arc<OpenApi>,
}

impl ApiServer {
    /// Create a server from the `server` and `app` sections.
    pub fn new(server: &ServerSettings, app: &AppSettings) -> Self {
        Self {
            host: server.host.clone(),
            port: server.port,
            debug: server.debug,
            openapi: Arc::new(api::build_openapi(app)),
        }
    }

    /// Override the configured port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The `host:port` bind address. IPv6 hosts are bracketed.
    pub fn address(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .route("/health", get(api::health_check))
            .route("/openapi.json", get(api::openapi_json))
            .layer(Extension(self.openapi.clone()))
            .layer(CorsLayer::permissive());

        if self.debug {
            app = app.layer(TraceLayer::new_for_http());
        }

        app
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let addr = self.address();
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting web API on {addr}");
        info!("Health check available at http://{addr}/health");
        if self.debug {
            info!("Debug mode enabled: request tracing is on");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Shutting down GraphRAG API");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(host: &str) -> ApiServer {
        let settings = ServerSettings {
            host: host.to_string(),
            ..Default::default()
        };
        ApiServer::new(&settings, &AppSettings::default())
    }

    #[test]
    fn test_address() {
        assert_eq!(server("0.0.0.0").address(), "0.0.0.0:8000");
        assert_eq!(server("::").with_port(9090).address(), "[::]:9090");
        assert_eq!(server("[::1]").address(), "[::1]:8000");
    }
}
