use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use api_ingress::{ApiIngress, ApiIngressConfig};
use clap::{Parser, Subcommand};
use modkit::runtime::cancel_on_signal;
use runtime::{AppConfig, CliArgs};
use tokio_util::sync::CancellationToken;
use users::UsersModule;

/// Users Server - in-memory user directory over HTTP
#[derive(Parser)]
#[command(name = "users-server")]
#[command(about = "Users Server - in-memory user directory over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    let home_dir = Path::new(&config.server.home_dir);
    runtime::logging::init_logging_from_config(&logging_config, home_dir);

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!(app = %config.server.app_name, "Users server starting");

    let mut ingress = ApiIngress::new(ApiIngressConfig::from_app_config(&config));
    ingress.register_module(Arc::new(UsersModule::new()));

    let cancel = CancellationToken::new();
    let signals = cancel_on_signal(cancel.clone());

    let result = ingress.serve(cancel).await;
    signals.abort();

    tracing::info!("Users server stopped");
    result
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // AppConfig::load already normalized & created home_dir
    ApiIngressConfig::from_app_config(&config).cors_layer()?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
