use std::path::PathBuf;
use std::sync::Arc;

use pagegate::config::{self, Config, Credential, CredentialSource, SiteSettings};
use pagegate::handler::{Router, StaticFileServer};
use pagegate::{logger, server};

fn main() {
    if let Err(e) = run() {
        logger::log_error(&format!("Startup failed: {e}"));
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path without extension
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;

    let (credential, credential_source) = config::load_credential(&cfg.auth)?;
    let cwd = std::env::current_dir().map_err(config::ConfigError::WorkingDir)?;
    let public_dir = config::find_public_dir(&cfg.site.public_dir_candidates, &cwd)?;

    // Tokio runtime sized by the workers setting
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, public_dir, credential, credential_source))
}

async fn async_main(
    cfg: Config,
    public_dir: PathBuf,
    credential: Credential,
    credential_source: CredentialSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let site = SiteSettings::from_config(&cfg, public_dir.clone(), credential)?;
    let router = Router::new(site, Arc::new(StaticFileServer::new()));

    logger::log_server_start(&addr, &cfg, &public_dir, credential_source);

    let state = Arc::new(config::AppState::new(cfg, router));
    server::signal::start_signal_handler(Arc::clone(&state));
    server::run_server(listener, state).await;

    Ok(())
}
