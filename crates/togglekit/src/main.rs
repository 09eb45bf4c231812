// SPDX-FileCopyrightText: 2026 Togglekit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Togglekit - feature toggles with dependency-aware cascading state.
//!
//! Binary entry point. Loads configuration, opens the option store,
//! assembles the feature registry (built-ins plus TOML manifests), runs
//! a dependency consistency pass, and dispatches the subcommand.

mod apply;
mod features;
mod list;
mod settings;
mod toggle;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use togglekit_config::TogglekitConfig;
use togglekit_registry::{load_manifest_dir, FeatureRegistry, RegistryBuilder, SyncBus};
use togglekit_store::JsonFileStore;
use tracing_subscriber::EnvFilter;

/// Togglekit - feature toggles with dependency-aware cascading state.
#[derive(Parser, Debug)]
#[command(name = "togglekit", version, about, long_about = None)]
struct Cli {
    /// Path to a togglekit.toml, overriding the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List features with their state and dependencies.
    List {
        /// Emit machine-readable JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
    /// Enable features by id.
    Enable {
        /// Feature ids to enable, in order.
        ids: Vec<String>,
    },
    /// Disable features by id (dependents cascade off).
    Disable {
        /// Feature ids to disable, in order.
        ids: Vec<String>,
    },
    /// Force-disable features whose dependencies are no longer met.
    Check,
    /// Show the settings schema and current values.
    Settings {
        /// Emit machine-readable JSON instead of the table view.
        #[arg(long)]
        json: bool,
    },
    /// Sanitize and apply a JSON submission of toggles and settings.
    Apply {
        /// Path to the JSON submission file.
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            togglekit_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.app.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut registry = match build_registry(&config) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    // Consistency pass before any command runs, so views and toggles
    // never see an enabled feature with unmet dependencies.
    for warning in registry.check_dependencies() {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    let outcome = match cli.command {
        Commands::List { json } => list::run(&registry, json),
        Commands::Enable { ids } => toggle::run(&mut registry, &ids, true),
        Commands::Disable { ids } => toggle::run(&mut registry, &ids, false),
        Commands::Check => Ok(()),
        Commands::Settings { json } => settings::run(&registry, json),
        Commands::Apply { file } => apply::run(&mut registry, &file),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn load_config(
    explicit: Option<&Path>,
) -> Result<TogglekitConfig, Vec<togglekit_config::ConfigError>> {
    match explicit {
        Some(path) => {
            let config = togglekit_config::load_config_from_path(path).map_err(|err| {
                let sources = std::fs::read_to_string(path)
                    .map(|content| vec![(path.display().to_string(), content)])
                    .unwrap_or_default();
                togglekit_config::diagnostic::figment_to_config_errors(err, &sources)
            })?;
            togglekit_config::validation::validate_config(&config)?;
            Ok(config)
        }
        None => togglekit_config::load_and_validate(),
    }
}

fn build_registry(
    config: &TogglekitConfig,
) -> Result<FeatureRegistry, togglekit_core::TogglekitError> {
    let store = JsonFileStore::open(Path::new(&config.store.path))?;

    let mut builder = RegistryBuilder::new()
        .store(Arc::new(store))
        .bus(Arc::new(SyncBus::new()));

    for feature in features::builtin_features() {
        builder = builder.register(feature);
    }

    if let Some(dir) = &config.features.manifest_dir {
        for feature in load_manifest_dir(Path::new(dir))? {
            builder = builder.register(Arc::new(feature));
        }
    }

    builder.build()
}
