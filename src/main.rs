//! textops HTTP service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;

use textops::api::docs::{OPENAPI_PATH, SWAGGER_UI_PATH};
use textops::api::{create_router, ApiDoc, AppState};
use textops::config::Config;
use textops::metrics;
use textops::utils::shutdown_signal;
use textops::ServiceError;

/// Text transformation HTTP service.
#[derive(Parser, Debug)]
#[command(name = "textops")]
#[command(about = "HTTP service that uppercases and generates text, with OpenAPI docs")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind (overrides TEXTOPS_HOST).
    #[arg(long)]
    host: Option<String>,

    /// HTTP server port (overrides TEXTOPS_PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// Address to bind (overrides TEXTOPS_HOST).
        #[arg(long)]
        host: Option<String>,

        /// HTTP server port (overrides TEXTOPS_PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    let (host, port) = match &args.command {
        Some(Command::Serve { host, port }) => (host.clone(), *port),
        _ => (args.host.clone(), args.port),
    };

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(host, port),
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::Serve { .. }) | None => {
            let config = load_config(host, port)?;
            init_logging(args.verbose || config.debug, &config);
            cmd_serve(config).await
        }
    }
}

/// Load configuration and apply CLI overrides.
fn load_config(host: Option<String>, port: Option<u16>) -> textops::Result<Config> {
    let mut config = Config::load()?;

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    config.validate().map_err(ServiceError::InvalidConfig)?;
    Ok(config)
}

/// Initialize the tracing subscriber.
fn init_logging(verbose: bool, config: &Config) {
    let filter = if verbose {
        EnvFilter::new("textops=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    let (json, plain) = if config.log_json {
        (Some(fmt::layer().json().with_writer(std::io::stderr)), None)
    } else {
        (None, Some(fmt::layer().with_writer(std::io::stderr)))
    };

    tracing_subscriber::registry()
        .with(json)
        .with(plain)
        .with(filter)
        .init();
}

/// Run the HTTP server until Ctrl-C or SIGTERM.
async fn cmd_serve(config: Config) -> anyhow::Result<()> {
    let prometheus = if config.metrics_enabled {
        let handle = metrics::install_recorder().map_err(ServiceError::from)?;
        metrics::init_metrics();
        Some(handle)
    } else {
        None
    };

    let addr = config.socket_addr().map_err(ServiceError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("API docs at http://{}{} ({})", addr, SWAGGER_UI_PATH, OPENAPI_PATH);

    let router = create_router(AppState::from_config(&config, prometheus));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TEXTOPS - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(host, port) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Debug: {}", config.debug);
    println!("  Log Level: {}", config.log_level);
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("  Max Generated Bytes: {}", config.max_generated_bytes);
    println!("  CORS: {}", if config.cors_permissive { "Permissive" } else { "Disabled" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(ServiceError::from)?;
    println!("{}", json);
    Ok(())
}
