use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use smartrelief_assess::config::LimitsConfig;
use smartrelief_assess::{validate_file_name, AssessmentReport, AssessmentRequest};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cli::{output, Cli, OutputFormat};

/// Assess every supported image in a directory
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Directory containing images
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Disaster type applied to every image
    #[arg(short, long)]
    pub disaster_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One line of batch output.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<AssessmentReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn execute(args: BatchArgs, cli: &Cli) -> Result<()> {
    let pipeline = cli.pipeline()?;
    let files = collect_files(&args.dir, &pipeline.config().limits)?;
    if files.is_empty() {
        anyhow::bail!("No supported images found in {}", args.dir.display());
    }
    info!(count = files.len(), dir = %args.dir.display(), "starting batch assessment");

    let mut entries = Vec::with_capacity(files.len());
    let mut requests = Vec::with_capacity(files.len());
    let mut readable = Vec::with_capacity(files.len());
    for file in files {
        match AssessmentRequest::from_file(&file) {
            Ok(request) => {
                let request = match &args.disaster_type {
                    Some(d) => request.with_disaster_type(d.as_str()),
                    None => request,
                };
                requests.push(request);
                readable.push(file);
            }
            Err(err) => {
                warn!(file = %file.display(), error = %err, "skipping unreadable file");
                entries.push(BatchEntry {
                    file,
                    report: None,
                    error: Some(err.to_string()),
                });
            }
        }
    }

    let results = tokio::task::spawn_blocking(move || pipeline.assess_batch(&requests))
        .await
        .context("Batch worker failed")?;

    for (file, result) in readable.into_iter().zip(results) {
        entries.push(match result {
            Ok(report) => BatchEntry {
                file,
                report: Some(report),
                error: None,
            },
            Err(err) => BatchEntry {
                file,
                report: None,
                error: Some(err.to_string()),
            },
        });
    }
    entries.sort_by(|a, b| a.file.cmp(&b.file));

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text if !cli.quiet => output::print_batch_summary(&entries),
        OutputFormat::Text => {}
    }
    Ok(())
}

/// Supported image files directly inside `dir`, sorted by path.
pub fn collect_files(dir: &Path, limits: &LimitsConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match validate_file_name(&path, limits) {
            Ok(()) => files.push(path),
            Err(err) => debug!(file = %path.display(), reason = %err, "skipping file"),
        }
    }
    files.sort();
    Ok(files)
}
