mod cli;
mod context;
mod handlers;
mod output;
mod source;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use timeline_core::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TIMELINE_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        output::exit_with_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    match cli.command {
        Commands::Replay(args) => handlers::replay::handle(config, args).await?,
        Commands::Tokens { ids } => handlers::tokens::handle(&ids)?,
        Commands::Views(cmd) => {
            let path = cmd
                .catalog
                .or_else(AppConfig::catalog_path)
                .ok_or_else(|| anyhow::anyhow!("--catalog is required on this platform"))?;
            let mut ctx = CliContext::load(&path).await?;
            handlers::views::handle(&mut ctx, cmd.action).await?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "timeline", &mut std::io::stdout());
        }
    }
    Ok(())
}
