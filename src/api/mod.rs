use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::automation::Automation;
use crate::config::Config;
use crate::services::{GeneratorService, SeedService, StatsService};
use crate::state::SharedState;

mod analytics;
mod automation;
mod dashboard;
mod error;
mod products;
mod scripts;
mod system;
mod types;
mod videos;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub automation: Automation,

    pub stats: StatsService,

    pub generator: GeneratorService,

    pub seeder: SeedService,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    let config = shared.config.read().await;

    let stats = StatsService::new(shared.store.clone(), config.products.clone());
    drop(config);

    let generator = GeneratorService::new(shared.store.clone(), shared.openai.clone());
    let seeder = SeedService::new(shared.store.clone());
    let automation = Automation::new(Arc::clone(&shared));

    Arc::new(AppState {
        shared,
        automation,
        stats,
        generator,
        seeder,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared).await)
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = {
        let config = state.shared.config.read().await;
        config.server.cors_allowed_origins.clone()
    };

    let api_router = Router::new()
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route("/videos", get(videos::list_videos))
        .route("/videos", post(videos::add_video))
        .route("/videos/{id}/analyze", post(videos::analyze_video))
        .route("/products", get(products::list_products))
        .route("/scripts", get(scripts::list_scripts))
        .route("/scripts", post(scripts::add_script))
        .route("/scripts/generate", post(scripts::generate_script))
        .route("/scripts/{id}/status", put(scripts::update_script_status))
        .route("/analytics", get(analytics::list_analytics))
        .route("/analytics", post(analytics::add_analytics))
        .route("/automation/start", post(automation::start_automation))
        .route("/automation/stop", post(automation::stop_automation))
        .route("/automation/status", get(automation::automation_status))
        .route("/system/status", get(system::get_status))
        .route("/system/seed", post(system::seed_store))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
