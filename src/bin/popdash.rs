use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use popdash::api::{serve, AppState};
use popdash::config::DashboardConfig;
use popdash::io::census::load_census_csv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,popdash=info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cfg = DashboardConfig::from_env()?;
    info!(data = %cfg.data_path.display(), policy = %cfg.stale_policy, "startup");

    // A bad table is fatal: never bind without data.
    let dataset = load_census_csv(&cfg.data_path, &cfg.load_options())
        .with_context(|| format!("failed to load census data from {}", cfg.data_path.display()))?;

    let state = AppState::new(Arc::new(dataset), cfg.stale_policy, cfg.queue_depth, cfg.chart_size);

    let addr = cfg.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr} failed"))?;
    serve(listener, state).await
}
