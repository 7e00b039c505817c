//! 请求 / 响应类型定义

use serde::{Deserialize, Serialize};

use crate::services::{GroupedRevenue, RevenueAggregate, RevenueBucket, format_amount};

/// 响应状态：成功
pub const STATUS_SUCCESS: &str = "S";
/// 响应状态：失败
pub const STATUS_ERROR: &str = "E";

/// 收入查询请求体
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRequest {
    #[serde(default)]
    pub from_date: String,
    #[serde(default)]
    pub to_date: String,
    #[serde(default)]
    pub range_type: Option<String>,
}

/// 统一响应包络 `{respData, status, errMsg}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommonResp<T> {
    #[serde(rename = "respData")]
    pub resp_data: Option<T>,
    pub status: String,
    #[serde(rename = "errMsg")]
    pub err_msg: String,
}

impl<T> CommonResp<T> {
    pub fn success(data: T) -> Self {
        Self {
            resp_data: Some(data),
            status: STATUS_SUCCESS.to_string(),
            err_msg: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            resp_data: None,
            status: STATUS_ERROR.to_string(),
            err_msg: message.into(),
        }
    }
}

/// 金额以字符串输出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueJson {
    #[serde(rename = "totalRevenueWithDis")]
    pub with_discount: String,
    #[serde(rename = "totalRevenueWithoutDis")]
    pub without_discount: String,
}

impl From<RevenueAggregate> for RevenueJson {
    fn from(agg: RevenueAggregate) -> Self {
        Self {
            with_discount: format_amount(agg.with_discount),
            without_discount: format_amount(agg.without_discount),
        }
    }
}

/// 分组收入行，按报表类型只输出一个名称字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedRevenueJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    pub revenue: RevenueJson,
}

/// 分组名称字段
#[derive(Debug, Clone, Copy)]
pub enum GroupField {
    Product,
    Category,
    Region,
}

impl GroupedRevenueJson {
    pub fn new(group: GroupedRevenue, field: GroupField) -> Self {
        let mut row = Self {
            product_name: None,
            category_name: None,
            region_name: None,
            revenue: group.revenue.into(),
        };
        match field {
            GroupField::Product => row.product_name = Some(group.key),
            GroupField::Category => row.category_name = Some(group.key),
            GroupField::Region => row.region_name = Some(group.key),
        }
        row
    }
}

/// 趋势中的一个时间桶
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueBucketJson {
    pub period: String,
    pub revenue: RevenueJson,
}

impl From<RevenueBucket> for RevenueBucketJson {
    fn from(bucket: RevenueBucket) -> Self {
        Self {
            period: bucket.period,
            revenue: bucket.revenue.into(),
        }
    }
}

/// `/health` 的数据部分
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthData {
    pub database: String,
}
