mod action;
mod app;
mod app_state;
mod bus;
mod component;
mod components;
mod mood_selector;
mod player;
mod theme;
mod weather_poller;
mod widgets;

use mood_proto::config::Config;
use mood_proto::{platform, ApiClient, Mood};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_file();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; keep HTTP client internals at warn.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("moodtunes log: {}", log_path.display());

    tracing::info!("moodtunes starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });

    let client = ApiClient::from_config(&config.backend)?;
    tracing::info!("backend: {}", client.base_url());

    // Reachability is informational only; the UI works against a dead backend.
    let probe = client.clone();
    tokio::spawn(async move {
        if !probe.health().await {
            tracing::warn!("backend health check failed; songs and weather may be unavailable");
            return;
        }
        let advertised = probe.fetch_moods().await;
        let missing: Vec<Mood> = Mood::ALL
            .into_iter()
            .filter(|m| !advertised.contains(m))
            .collect();
        if missing.is_empty() {
            tracing::info!("backend serves all {} moods", advertised.len());
        } else {
            tracing::warn!("backend does not list moods {:?}", missing);
        }
    });

    // ── Run TUI ──────────────────────────────────────────────────────────────
    app::App::new(client, &config).run().await?;

    Ok(())
}
