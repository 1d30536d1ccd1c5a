use std::env;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use hr_policy_engine::api::{AppState, create_router};
use hr_policy_engine::config::ConfigLoader;
use hr_policy_engine::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("Usage: hr-policy-engine [CONFIG_DIR]");
        println!("  CONFIG_DIR  Directory holding server.yaml and companies/ (default: ./config)");
        return Ok(());
    }

    let config_dir = args.get(1).cloned().unwrap_or_else(|| "./config".to_string());

    // Load configuration first (before logging init)
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("Could not load configuration from {}", config_dir))?;

    // Priority: RUST_LOG env var > config file > default "info"
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server().log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .init();

    info!(config_dir = %config_dir, "Starting HR policy engine");
    for company in config.companies() {
        info!(
            company_id = %company.id,
            leave_policies = company.leave_policies.len(),
            "Loaded company"
        );
    }

    let store = Store::with_companies(config.companies().to_vec());
    let router = create_router(AppState::new(store));

    let addr = &config.server().addr;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
