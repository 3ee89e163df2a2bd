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

// Allow println! in main.rs for CLI user-facing output (validate command)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use graphrag_api::config::validate_settings;
use graphrag_api::env_file::{default_env_file, load_env_file, EnvFileOutcome};
use graphrag_api::{load_config_file, logging, ApiServer};

#[derive(Parser)]
#[command(name = "graphrag-api")]
#[command(about = "GraphRAG API service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// Path to a .env file (defaults to .env beside the configuration file)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,

    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_file = cli
        .env_file
        .clone()
        .unwrap_or_else(|| default_env_file(&cli.config));

    // Still single-threaded: the runtime is built afterwards
    let env_outcome = load_env(&env_file);

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Run) | None => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(run_server(&cli.config, &env_file, env_outcome, cli.port)),
    }
}

/// Load the .env file before anything reads the environment.
fn load_env(env_file: &Path) -> Option<EnvFileOutcome> {
    match load_env_file(env_file) {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            // The logger is not installed yet
            eprintln!("Warning: Failed to load .env file: {e}");
            None
        }
    }
}

/// Run the GraphRAG API server
async fn run_server(
    config_path: &Path,
    env_file: &Path,
    env_outcome: Option<EnvFileOutcome>,
    port_override: Option<u16>,
) -> Result<()> {
    let config = load_config_file(config_path)?;
    let server_settings = config.server_settings()?;
    let app_settings = config.app_settings()?;
    let logging_settings = config.logging_settings()?;

    logging::init_logging(&logging_settings, server_settings.debug)?;

    info!("Starting {} v{}", app_settings.title, app_settings.version);
    debug!("Debug logging is enabled");

    if let Some(EnvFileOutcome::Loaded {
        applied,
        skipped_existing,
        malformed,
    }) = env_outcome
    {
        info!(
            "Loaded {applied} environment variable(s) from {} ({skipped_existing} already set, {malformed} malformed line(s) skipped)",
            env_file.display()
        );
    }

    info!("Config file: {}", config_path.display());
    // Logged again here because the loader ran before the logger was installed
    for var in config.unresolved() {
        warn!(
            "Environment variable '{}' referenced at '{}' is not set and has no default",
            var.name, var.path
        );
    }

    validate_settings(&config)?;

    let mut server = ApiServer::new(&server_settings, &app_settings);
    if let Some(port) = port_override {
        info!("Using command line port {port}");
        server = server.with_port(port);
    }
    debug!("Server configuration: {server_settings:?}");

    server.run().await
}

/// Validate a configuration file
fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    let config = match load_config_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_settings(&config) {
        println!("[ERROR] Configuration is invalid:");
        println!("  {e}");
        std::process::exit(1);
    }

    println!("[OK] Configuration file is valid");
    println!();

    println!("Summary:");
    let sections: Vec<&str> = config.sections().collect();
    println!("  Sections: {}", sections.join(", "));

    if !config.unresolved().is_empty() {
        println!();
        println!("[WARN] Unresolved environment variables:");
        for var in config.unresolved() {
            println!("  ${{{}}} at {}", var.name, var.path);
        }
    }

    if show_resolved {
        let server = config.server_settings()?;
        let logging = config.logging_settings()?;
        println!();
        println!("Resolved server settings:");
        println!("  Host: {}", server.host);
        println!("  Port: {}", server.port);
        println!("  Debug: {}", server.debug);
        println!("  Log Level: {}", logging.level);
        println!();
        println!("Resolved configuration:");
        print!("{}", config.to_yaml_string()?);
    }

    Ok(())
}
