use anyhow::{Context, Result};
use clap::Args;
use smartrelief_assess::{validate_file_name, AssessmentRequest};
use std::path::PathBuf;
use tracing::info;

use crate::cli::{output, Cli, OutputFormat};

/// Assess a single image
#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Image file (jpg, jpeg, png, bmp, tiff)
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Site latitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Site longitude in degrees
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lon: Option<f64>,

    /// Disaster type (earthquake, flood, fire, hurricane, tornado, ...)
    #[arg(short, long)]
    pub disaster_type: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn execute(args: AssessArgs, cli: &Cli) -> Result<()> {
    let pipeline = cli.pipeline()?;
    validate_file_name(&args.image, &pipeline.config().limits)?;

    let mut request = AssessmentRequest::from_file(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        request = request.with_location(lat, lon);
    }
    if let Some(disaster_type) = &args.disaster_type {
        request = request.with_disaster_type(disaster_type.as_str());
    }

    info!(image = %args.image.display(), "assessing image");
    let report = pipeline.assess_async(request).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if !cli.quiet => output::print_report(&args.image, &report),
        OutputFormat::Text => {}
    }
    Ok(())
}
