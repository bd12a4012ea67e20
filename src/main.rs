use mimalloc::MiMalloc;
use routine::config::{CONFIG, DEFAULT_ROUTINE_KEY};
use routine::db::RoutineStorage;
use routine::router::{RoutineState, routine_router};
use routine::service::{Dashboard, MarkerClassifier};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &*CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        loglevel = %cfg.loglevel,
        salary_item_id = %cfg.markers.salary_item_id,
        income_category_id = %cfg.markers.income_category_id,
        salary_cutoff_day = cfg.markers.salary_cutoff_day,
    );
    if cfg.routine_key == DEFAULT_ROUTINE_KEY {
        warn!("routine_key is still the default; set ROUTINE_ROUTINE_KEY before exposing the server");
    }

    let storage = RoutineStorage::connect(&cfg.database_url).await?;
    let classifier = Arc::new(MarkerClassifier::new(cfg.markers.clone()));
    let dashboard = Dashboard::new(storage.clone(), classifier);
    let state = RoutineState::new(storage, dashboard, Arc::from(cfg.routine_key.as_str()));
    let app = routine_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
