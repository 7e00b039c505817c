use actix_web::{HttpResponse, Responder, http::StatusCode, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, trace};

use super::helpers::{error_response, success_response};
use super::types::HealthData;
use crate::storage::SeaOrmStorage;

/// 数据库探测超时
const PING_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HealthService;

impl HealthService {
    /// 就绪检查，只返回 200 与空响应体
    pub async fn readiness_check() -> impl Responder {
        trace!("Received readiness check request");
        HttpResponse::Ok().finish()
    }

    /// 健康检查：探测数据库连通性
    pub async fn health_check(storage: web::Data<Arc<SeaOrmStorage>>) -> impl Responder {
        trace!("Received health check request");

        match tokio::time::timeout(PING_TIMEOUT, storage.ping()).await {
            Ok(Ok(())) => success_response(HealthData {
                database: storage.backend_name().to_string(),
            }),
            Ok(Err(e)) => {
                error!("Storage health check failed: {}", e);
                error_response(StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
            }
            Err(_) => {
                error!("Storage health check timeout");
                error_response(StatusCode::SERVICE_UNAVAILABLE, "database timeout")
            }
        }
    }
}

/// 探针路由
pub fn health_routes() -> actix_web::Scope {
    web::scope("")
        .route("/ready", web::get().to(HealthService::readiness_check))
        .route("/ready", web::head().to(HealthService::readiness_check))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check))
}
