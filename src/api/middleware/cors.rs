//! 宽松 CORS 响应头
//!
//! 所有响应都带 `Access-Control-Allow-Origin: *` 和允许凭证，
//! 方法白名单按路由作用域区分。

use actix_web::middleware::DefaultHeaders;

pub const ALLOW_HEADERS: &str =
    "Accept,Content-Type,Content-Length,Accept-Encoding,X-CSRF-Token,Authorization";

/// `/orders` 作用域的方法白名单
pub const ORDERS_METHODS: &str = "POST,OPTIONS";

/// 探针路由的方法白名单
pub const PROBE_METHODS: &str = "GET";

/// 构造 CORS 头中间件；已由处理器设置的同名头不会被覆盖
pub fn cors_headers(methods: &'static str) -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Credentials", "true"))
        .add(("Access-Control-Allow-Methods", methods))
        .add(("Access-Control-Allow-Headers", ALLOW_HEADERS))
}
