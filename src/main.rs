//! Punting Form API connectivity test service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use algorate_api_test::api::{create_router, AppState};
use algorate_api_test::clock::{Clock, SystemClock};
use algorate_api_test::config::Config;
use algorate_api_test::metrics;
use algorate_api_test::present::{classify, ApiTestResponse};
use algorate_api_test::probe::Prober;
use algorate_api_test::utils::shutdown_signal;
use algorate_api_test::AppError;

/// Punting Form API connectivity test service.
#[derive(Parser, Debug)]
#[command(name = "algorate-api-test")]
#[command(about = "Checks whether this deployment region can reach the Punting Form API")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the test page and API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one probe, print the JSON result and exit.
    Probe,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("algorate_api_test=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if args.log_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Probe) => cmd_probe().await,
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration.
fn load_config() -> Result<Config, AppError> {
    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("ALGORATE API TEST - CONFIGURATION CHECK");
    println!("======================================================================");

    let config = load_config()?;
    let settings = config.probe_settings(&SystemClock);
    let prober = Prober::new(settings)?;

    println!("Configuration Summary:");
    println!("  Endpoint:      {}", prober.endpoint());
    println!("  API Key:       {}", config.masked_api_key());
    println!("  Test Date:     {}", prober.settings().formatted_test_date());
    println!("  Timeout:       {}s", config.probe_timeout_secs);
    println!("  User-Agent:    {}", config.probe_user_agent);
    println!("  Location:      {}", config.test_location);
    println!("  Region:        {}", config.test_region);
    println!("  Port:          {}", config.port);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run a single probe and print the JSON payload.
async fn cmd_probe() -> anyhow::Result<()> {
    let config = load_config()?;
    let clock = SystemClock;
    let prober = Prober::new(config.probe_settings(&clock))?;

    let result = prober.probe().await;
    let verdict = classify(&result);
    info!("{} - {}", verdict.title, verdict.message);

    let response = ApiTestResponse {
        result,
        timestamp: clock.now().to_rfc3339(),
        test_location: config.test_location.clone(),
        test_date: prober.settings().formatted_test_date(),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Serve the test page, JSON endpoint and health check.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let mut config = load_config()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let prober = Prober::new(config.probe_settings(&*clock))?;

    info!("Configuration loaded successfully");
    info!("Probe endpoint: {}", prober.endpoint());
    info!("Test date: {}", prober.settings().formatted_test_date());
    info!("Test location: {}", config.test_location);

    let mut app_state = AppState::new(&config, prober, clock);
    match metrics::init_metrics() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
