use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use topicpush::cli::Commands;
use topicpush::connector::api::{Container, ContainerConfig, Router};
use topicpush::connector::http;

#[derive(Parser)]
#[command(name = "topicpush")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.topicpush")]
    data_dir: String,

    /// Use an in-process messaging backend instead of Firebase
    #[arg(long, global = true)]
    mock_messaging: bool,

    /// Keep the notification lock in memory instead of DuckDB
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Print "Subscribed!" even when the subscribe request fails
    #[arg(long, global = true)]
    legacy_diagnostics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    if !cli.memory_storage {
        std::fs::create_dir_all(&data_dir)?;
    }

    let container = Container::new(ContainerConfig {
        data_dir,
        mock_messaging: cli.mock_messaging,
        memory_storage: cli.memory_storage,
        legacy_diagnostics: cli.legacy_diagnostics,
    })
    .await?;

    if let Commands::Serve { port } = cli.command {
        let port = port.unwrap_or_else(http::port_from_env);
        info!(
            "Starting job server (backend: {}, data dir: {})",
            container.messaging_backend(),
            container.data_dir()
        );
        return http::serve(Arc::new(container), port).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
