use std::env;
use std::process;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use ripta_tracker::api;
use ripta_tracker::config::{Config, ConfigError};
use ripta_tracker::gtfs::GtfsError;
use ripta_tracker::index::Index;
use ripta_tracker::logger;
use ripta_tracker::proxy::ProxyError;

#[derive(Error, Debug)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Gtfs(#[from] GtfsError),
    #[error(transparent)]
    Upstream(#[from] ProxyError),
    #[error("cannot listen on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

fn run() -> Result<(), StartupError> {
    let args: Vec<String> = env::args().collect();
    let config = Config::load_or_default(args.get(1).map(|s| s.as_str()))?;
    info!("loading static data from {:?}", config.gtfs_path);
    let index = Arc::new(Index::load(&config.gtfs_path)?);
    let state = api::AppState::new(&config, index)?;

    let server = rouille::Server::new(config.listen_addr.as_str(), move |request| {
        api::handle(&state, request)
    }).map_err(|e| StartupError::Bind { addr: config.listen_addr.clone(), reason: e.to_string() })?;
    info!("listening on {}", server.server_addr());
    server.run();
    Ok(())
}

fn main() {
    if let Err(e) = logger::init_logger() {
        eprintln!("cannot install logger: {}", e);
    }
    if let Err(e) = run() {
        error!("{}", e);
        process::exit(1);
    }
}
