//! Server mode
//!
//! Builds the shared [`AppState`] from config and runs the actix-web server
//! until it stops or Ctrl+C arrives.

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::api::services::{AppStartTime, health_routes, page_routes};
use crate::backend::{BackendApi, HttpBackend};
use crate::config::StaticConfig;
use crate::handlers::AppState;
use crate::runtime::lifetime;
use crate::session::SessionStore;

/// Form bodies are a handful of short fields
const MAX_FORM_BYTES: usize = 16 * 1024;

/// Handler dependencies built once from config
pub fn build_state(config: &StaticConfig) -> AppState {
    let backend: Arc<dyn BackendApi> = Arc::new(HttpBackend::new(&config.backend));
    AppState::new(backend, SessionStore::new(&config.session))
}

/// Routes shared by the server and the integration tests
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(MAX_FORM_BYTES))
        .service(health_routes())
        .configure(page_routes);
}

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();
    let state = build_state(config);

    info!("Proxying to backend API at {}", state.backend.base_url());
    if config.backend.timeout_secs.is_none() {
        warn!("backend.timeout_secs is not set; a hung backend call blocks its request");
    }

    let workers = config.server.workers.clamp(1, 32);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TimingMiddleware) // 位于 request span 内，日志带 request_id
            .wrap(RequestIdMiddleware) // 为每个请求生成 request_id
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(configure_app)
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .workers(workers)
    .bind(&bind_address)?
    .run();

    info!(
        "Starting server at http://{} with {} workers",
        bind_address, workers
    );

    tokio::select! {
        res = server => {
            res?;
        }
        _ = lifetime::shutdown::listen_for_shutdown() => {
            warn!("Server stopped by shutdown signal");
        }
    }

    Ok(())
}
