//! `/orders` 收入查询接口
//!
//! 所有接口都是 POST，请求体 `{fromDate, toDate, rangeType}`，
//! 响应体为 `{respData, status, errMsg}` 包络。

use actix_web::{HttpResponse, Responder, http::Method, web};
use std::sync::Arc;
use tracing::{info, trace};

use super::helpers::{error_from_orderlens, parse_body, success_response};
use super::types::{GroupField, GroupedRevenueJson, RevenueBucketJson, RevenueJson, RevenueRequest};
use crate::errors::{OrderlensError, Result};
use crate::services::{DateRange, RangeType, ReportKind, RevenueReport, RevenueService};

/// 将分发结果转换为 respData
fn report_to_json(report: RevenueReport) -> Result<serde_json::Value> {
    let value = match report {
        RevenueReport::Total(agg) => serde_json::to_value(RevenueJson::from(agg))?,
        RevenueReport::ByProduct(rows) => grouped_json(rows, GroupField::Product)?,
        RevenueReport::ByCategory(rows) => grouped_json(rows, GroupField::Category)?,
        RevenueReport::ByRegion(rows) => grouped_json(rows, GroupField::Region)?,
    };
    Ok(value)
}

fn grouped_json(
    rows: Vec<crate::services::GroupedRevenue>,
    field: GroupField,
) -> Result<serde_json::Value> {
    let rows: Vec<GroupedRevenueJson> = rows
        .into_iter()
        .map(|g| GroupedRevenueJson::new(g, field))
        .collect();
    Ok(serde_json::to_value(rows)?)
}

/// 解析 -> 校验 -> 查询 -> 封包
async fn handle_report(
    service: &RevenueService,
    body: &[u8],
    kind: ReportKind,
) -> HttpResponse {
    let request: RevenueRequest = match parse_body(body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    let result = async {
        let range = DateRange::parse(&request.from_date, &request.to_date)?;
        let report = service.communicate_with_db(&range, kind).await?;
        report_to_json(report)
    }
    .await;

    match result {
        Ok(data) => {
            info!("{} served for {} ..= {}", kind, request.from_date, request.to_date);
            success_response(data)
        }
        Err(e) => error_from_orderlens(&e),
    }
}

pub async fn total_revenue(
    service: web::Data<Arc<RevenueService>>,
    body: web::Bytes,
) -> impl Responder {
    handle_report(&service, &body, ReportKind::GetTotalRevenue).await
}

pub async fn product_revenue(
    service: web::Data<Arc<RevenueService>>,
    body: web::Bytes,
) -> impl Responder {
    handle_report(&service, &body, ReportKind::GetProductRevenue).await
}

pub async fn category_revenue(
    service: web::Data<Arc<RevenueService>>,
    body: web::Bytes,
) -> impl Responder {
    handle_report(&service, &body, ReportKind::GetCategoryRevenue).await
}

pub async fn region_revenue(
    service: web::Data<Arc<RevenueService>>,
    body: web::Bytes,
) -> impl Responder {
    handle_report(&service, &body, ReportKind::GetRegionRevenue).await
}

/// 收入趋势，`rangeType` 必填（month / quarter / year）
pub async fn revenue_trend(
    service: web::Data<Arc<RevenueService>>,
    body: web::Bytes,
) -> impl Responder {
    let request: RevenueRequest = match parse_body(&body) {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    let result = async {
        let range = DateRange::parse(&request.from_date, &request.to_date)?;
        let range_type = parse_range_type(request.range_type.as_deref())?;
        let buckets = service.get_revenue_trend(&range, range_type).await?;
        let rows: Vec<RevenueBucketJson> = buckets.into_iter().map(Into::into).collect();
        Ok::<_, OrderlensError>(rows)
    }
    .await;

    match result {
        Ok(rows) => success_response(rows),
        Err(e) => error_from_orderlens(&e),
    }
}

fn parse_range_type(raw: Option<&str>) -> Result<RangeType> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        OrderlensError::validation(
            "The field 'RangeType' failed validation: it must satisfy the 'required' rule.",
        )
    })?;
    raw.parse().map_err(|_| {
        OrderlensError::validation(format!(
            "invalid RangeType '{}', expected month, quarter or year",
            raw
        ))
    })
}

/// CORS 预检，响应头由作用域上的 DefaultHeaders 补齐
pub async fn preflight() -> impl Responder {
    trace!("Received CORS preflight");
    HttpResponse::Ok().finish()
}

/// 订单路由 `/orders`
pub fn orders_routes() -> actix_web::Scope {
    web::scope("/orders")
        .route("/totalrevenue", web::post().to(total_revenue))
        .route("/prodrevenue", web::post().to(product_revenue))
        .route("/categrevenue", web::post().to(category_revenue))
        .route("/regionrevenue", web::post().to(region_revenue))
        .route("/revenuetrend", web::post().to(revenue_trend))
        .route("/{tail:.*}", web::method(Method::OPTIONS).to(preflight))
}
