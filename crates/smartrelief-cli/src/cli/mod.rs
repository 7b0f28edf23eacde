pub mod commands;
pub mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smartrelief_assess::{AssessmentPipeline, Config};
use std::path::PathBuf;
use tracing::debug;

/// SmartRelief - disaster damage assessment from site photographs
#[derive(Parser, Debug)]
#[command(
    name = "smartrelief",
    version,
    about = "Score disaster damage from site photographs",
    long_about = "Assess damage severity, response priority, resource demand and recommended actions \
                  from a photograph of a disaster site.\n\n\
                  Supports single images and parallel batch assessment of a directory."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "SMARTRELIEF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Trained classifier artifact; overrides `model.path`
    #[arg(short, long, global = true, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess a single image
    Assess(commands::assess::AssessArgs),

    /// Assess every supported image in a directory
    Batch(commands::batch::BatchArgs),

    /// Inspect or create configuration
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full report as JSON
    Json,
}

impl Cli {
    /// Effective configuration: file or defaults, then `SMARTRELIEF_*`
    /// overrides, then `--model`.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Config::default(),
        };
        config
            .apply_overrides(std::env::vars())
            .context("Invalid SMARTRELIEF_* override")?;
        if let Some(model) = &self.model {
            config.model.path = Some(model.clone());
        }
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Pipeline built from the effective configuration
    pub fn pipeline(&self) -> Result<AssessmentPipeline> {
        let config = self.load_config()?;
        AssessmentPipeline::new(config).context("Failed to build assessment pipeline")
    }
}
