use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use smartrelief_assess::Config;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::Cli;

/// Inspect or create configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Destination path
        #[arg(default_value = "smartrelief.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn execute(args: ConfigArgs, cli: &Cli) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = cli.load_config()?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Init { path, force } => {
            init(&path, force)?;
            info!(path = %path.display(), "wrote default configuration");
        }
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists; pass --force to overwrite", path.display());
    }
    Config::default()
        .to_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartrelief.toml");

        init(&path, false).unwrap();
        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(
            loaded.to_toml_string().unwrap(),
            Config::default().to_toml_string().unwrap()
        );
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("smartrelief.toml");
        std::fs::write(&path, "# keep me\n").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# keep me\n");

        init(&path, true).unwrap();
        assert!(Config::from_file(&path).is_ok());
    }
}
