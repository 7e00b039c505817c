pub mod health;
pub mod helpers;
pub mod orders;
pub mod types;

use actix_web::web;

use crate::api::middleware::cors::{ORDERS_METHODS, PROBE_METHODS, cors_headers};

pub use health::{HealthService, health_routes};
pub use orders::orders_routes;
pub use types::{CommonResp, RevenueRequest};

/// 注册全部路由
///
/// `health_routes` 的作用域前缀为空，必须最后注册。
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(orders_routes().wrap(cors_headers(ORDERS_METHODS)))
        .service(health_routes().wrap(cors_headers(PROBE_METHODS)));
}
