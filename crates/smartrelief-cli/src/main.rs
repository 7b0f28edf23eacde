mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{commands, Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = if cli.quiet {
        tracing::Level::ERROR
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("smartrelief_cli={log_level},smartrelief_assess={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &cli.command {
        Commands::Assess(args) => commands::assess::execute(args.clone(), &cli).await?,
        Commands::Batch(args) => commands::batch::execute(args.clone(), &cli).await?,
        Commands::Config(args) => commands::config::execute(args.clone(), &cli)?,
        Commands::Version => {
            println!("smartrelief v{}", smartrelief_assess::VERSION);
            println!("Disaster damage assessment from site photographs");
        }
    }

    Ok(())
}
