//! quotes server binary.
//!
//! ```bash
//! # in-memory store
//! cargo run
//!
//! # DynamoDB table `quotes`
//! AWS_REGION=eu-west-1 cargo run --features dynamodb
//! ```
//!
//! `RUST_LOG` controls verbosity (default `info`).

use std::net::IpAddr;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use quotes::config::{DEFAULT_PORT, DEFAULT_REGION};
use quotes::{Backend, Config, QuotesApp, Server};

/// Attributed quotes over HTTP
#[derive(Parser, Debug)]
#[command(name = "quotes-server")]
#[command(version)]
struct Args {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// AWS region of the quotes table
    #[arg(short, long, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// Quote store backend
    #[arg(short, long, env = "QUOTES_BACKEND", value_enum, default_value_t = Backend::default())]
    backend: Backend,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            region: args.region,
            backend: args.backend,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = Config::from(Args::parse());
    info!(backend = ?config.backend, region = %config.region, "starting quotes v{}", env!("CARGO_PKG_VERSION"));

    let store = match config.open_store().await {
        Ok(store) => store,
        Err(e) => {
            error!("failed to open store: {e}");
            return ExitCode::FAILURE;
        }
    };

    let app = QuotesApp::router(store);
    if let Err(e) = Server::bind(config.socket_addr()).serve(app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
