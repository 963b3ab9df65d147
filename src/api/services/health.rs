use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use tracing::trace;

use crate::handlers::AppState;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub backend: String,
    pub timestamp: String,
    pub uptime: u64,
}

/// Health Service
///
/// 只报告本进程状态，不探测上游 API。
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        state: web::Data<AppState>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");

        let now = chrono::Utc::now();
        let uptime = (now - app_start_time.start_datetime).num_seconds().max(0) as u64;

        HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            backend: state.backend.base_url().to_string(),
            timestamp: now.to_rfc3339(),
            uptime,
        })
    }

    // 活跃性检查
    pub async fn liveness_check() -> impl Responder {
        trace!("Received liveness check request");

        HttpResponse::NoContent().finish()
    }
}

/// Health 路由配置
pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
        .route("/live", web::get().to(HealthService::liveness_check))
        .route("/live", web::head().to(HealthService::liveness_check))
}
