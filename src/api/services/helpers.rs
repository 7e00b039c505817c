//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::error;

use super::types::CommonResp;
use crate::errors::OrderlensError;

/// JSON 请求体解析失败时返回给客户端的固定消息
pub const BAD_REQUEST_DATA: &str = "Error In request Data";

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(status: StatusCode, body: CommonResp<T>) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(body)
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, CommonResp::success(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: impl Into<String>) -> HttpResponse {
    json_response::<()>(status, CommonResp::error(message))
}

/// 从 OrderlensError 构建错误响应
///
/// 校验错误原样返回；数据库等内部错误只返回错误码，详情写日志。
pub fn error_from_orderlens(err: &OrderlensError) -> HttpResponse {
    let message = if err.is_client_safe() {
        err.message().to_string()
    } else {
        error!(code = err.code(), "Revenue request failed: {}", err);
        format!("Error while fetching revenue ({})", err.code())
    };
    error_response(err.http_status(), message)
}

/// 解析 JSON 请求体，失败时返回 400 响应
pub fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, HttpResponse> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("{}: {}", BAD_REQUEST_DATA, e);
        error_response(StatusCode::BAD_REQUEST, BAD_REQUEST_DATA)
    })
}
