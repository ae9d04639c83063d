//! Activity Roster API server binary
//!
//! Seeds the in-memory roster store (built-in catalog or a YAML seed file)
//! and serves the REST API plus the static front-end.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use activity_roster::{ApiServer, ApiServerConfig, Error, Result, RosterStore};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Activity Roster API - Extracurricular signups for Mergington High School
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address for the HTTP server
    #[arg(long, env = "ADDR", default_value = "0.0.0.0:8000")]
    addr: String,

    /// Directory holding the static front-end assets
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// YAML file replacing the built-in activity catalog
    #[arg(long, env = "SEED_FILE")]
    seed_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting Activity Roster API");
    info!("  Version: {}", activity_roster::VERSION);
    info!("  Bind address: {}", args.addr);
    info!("  Static assets: {}", args.static_dir.display());

    // Seed the roster catalog
    let catalog = match &args.seed_file {
        Some(path) => {
            info!("  Seed file: {}", path.display());
            activity_roster::load_seed_file(path)?
        }
        None => activity_roster::default_catalog(),
    };
    info!("Seeded {} activities", catalog.len());

    let store = RosterStore::new(catalog);

    let addr: SocketAddr = args
        .addr
        .parse()
        .map_err(|e| Error::Configuration(format!("Invalid bind address: {}", e)))?;

    let config = ApiServerConfig {
        addr,
        static_dir: args.static_dir,
    };

    let server = ApiServer::new(config, store);
    server.run().await?;

    info!("Server shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("hyper=warn".parse().unwrap())
        .add_directive("tower=warn".parse().unwrap())
        .add_directive("axum=info".parse().unwrap());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}
