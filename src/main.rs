use anyhow::{Context, Result};
use log::{error, info, warn};
use std::path::Path;

use launch_dashboard::config::DEFAULT_CONFIG_PATH;
use launch_dashboard::server::{router, AppState};
use launch_dashboard::{load_config, Dataset};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    println!("🚀 Launch Records Dashboard v{}", launch_dashboard::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // 1. Config (optional file)
    let config = load_config(Path::new(DEFAULT_CONFIG_PATH))?;
    info!(
        "payload bounds: {:?}, slider: {}..{} step {}",
        config.payload_bounds, config.slider.min, config.slider.max, config.slider.step
    );

    // 2. Dataset - missing or malformed file stops here
    let dataset = Dataset::load_csv(&config.data_path)?;
    info!(
        "loaded {} launch records across {} sites from {}",
        dataset.len(),
        dataset.site_names().len(),
        dataset.source()
    );
    if dataset.is_empty() {
        warn!("dataset has no records; charts will show placeholders");
    }

    // 3. Router
    let state = AppState::new(dataset, config.payload_bounds, config.slider);
    let app = router(state);

    // 4. Serve
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    println!("\n🌐 Dashboard running on http://{}", config.bind_addr);
    println!("   API: http://{}/api/charts/pie?site=ALL", config.bind_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
