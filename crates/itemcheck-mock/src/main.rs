use clap::Parser;
use itemcheck_mock::api::{AppState, ItemApiServer};
use itemcheck_mock::config::{ConfigOverrides, ServerConfig};
use itemcheck_mock::logging::{self, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "itemcheck-mock")]
#[command(author, version, about = "Mock REST item service", long_about = None)]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "ITEMCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Listen host
    #[arg(long, env = "ITEMCHECK_HOST")]
    host: Option<String>,

    /// Listen port
    #[arg(short, long, env = "ITEMCHECK_PORT")]
    port: Option<u16>,

    /// Item data file
    #[arg(short, long, env = "ITEMCHECK_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Fixed bearer token (random if unset)
    #[arg(long, env = "ITEMCHECK_TOKEN")]
    token: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            data_file: self.data_file.clone(),
            token: self.token.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level, args.log_format);

    let config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    }
    .with_overrides(args.overrides());
    config.validate()?;

    let addr = config.listen.socket_addr()?;
    let state = Arc::new(AppState::from_config(&config));
    if config.auth.token.is_none() {
        info!("Generated session token {}", state.auth.token());
    }

    let server = ItemApiServer::new(addr, state);
    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down"),
    }
    Ok(())
}
