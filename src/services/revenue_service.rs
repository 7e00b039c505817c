//! Revenue service layer
//!
//! 在已校验的日期区间上执行四种聚合查询（总计 / 分类 / 产品 / 区域），
//! 以及按月、季、年分桶的收入趋势。

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use super::validation::DateRange;
use crate::errors::{OrderlensError, Result};
use crate::storage::{DayRevenueRow, GroupRevenueRow, SeaOrmStorage};

// ============ 公共类型定义 ============

/// 折扣后 / 折扣前收入
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueAggregate {
    pub with_discount: f64,
    pub without_discount: f64,
}

impl RevenueAggregate {
    /// SQL 的 NULL 求和（无匹配行）视为 0
    pub fn from_sums(with_discount: Option<f64>, without_discount: Option<f64>) -> Self {
        Self {
            with_discount: with_discount.unwrap_or(0.0),
            without_discount: without_discount.unwrap_or(0.0),
        }
    }

    pub fn add(&mut self, other: RevenueAggregate) {
        self.with_discount += other.with_discount;
        self.without_discount += other.without_discount;
    }
}

/// 分组收入
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRevenue {
    pub key: String,
    pub revenue: RevenueAggregate,
}

impl From<GroupRevenueRow> for GroupedRevenue {
    fn from(row: GroupRevenueRow) -> Self {
        Self {
            key: row.label,
            revenue: RevenueAggregate::from_sums(row.with_discount, row.without_discount),
        }
    }
}

/// 报表类型，取值为请求分发使用的固定令牌
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum ReportKind {
    GetTotalRevenue,
    GetCategoryRevenue,
    GetProductRevenue,
    GetRegionRevenue,
}

impl ReportKind {
    /// 解析报表令牌，未知令牌返回 Validation 错误
    pub fn from_token(token: &str) -> Result<Self> {
        token
            .parse()
            .map_err(|_| OrderlensError::validation(format!("unknown report kind '{}'", token)))
    }
}

/// 分发结果
#[derive(Debug, Clone, PartialEq)]
pub enum RevenueReport {
    Total(RevenueAggregate),
    ByCategory(Vec<GroupedRevenue>),
    ByProduct(Vec<GroupedRevenue>),
    ByRegion(Vec<GroupedRevenue>),
}

/// 趋势分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RangeType {
    Month,
    Quarter,
    Year,
}

impl RangeType {
    /// 桶标签：`2024-01` / `2024-Q1` / `2024`
    pub fn bucket_label(&self, date: NaiveDate) -> String {
        match self {
            RangeType::Month => format!("{:04}-{:02}", date.year(), date.month()),
            RangeType::Quarter => format!("{:04}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
            RangeType::Year => format!("{:04}", date.year()),
        }
    }
}

/// 趋势中的一个时间桶
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueBucket {
    pub period: String,
    pub revenue: RevenueAggregate,
}

/// 金额输出格式：保留两位小数并去掉末尾的 0（`18`、`18.5`、`18.25`）
pub fn format_amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // 消除 -0
    (rounded + 0.0).to_string()
}

/// 将按日汇总的行合并为时间桶（输入需按日期升序）
pub fn bucket_days(rows: Vec<DayRevenueRow>, range_type: RangeType) -> Vec<RevenueBucket> {
    let mut buckets: Vec<RevenueBucket> = Vec::new();

    for row in rows {
        let label = range_type.bucket_label(row.day);
        let revenue = RevenueAggregate::from_sums(row.with_discount, row.without_discount);

        match buckets.last_mut() {
            Some(last) if last.period == label => last.revenue.add(revenue),
            _ => buckets.push(RevenueBucket {
                period: label,
                revenue,
            }),
        }
    }

    buckets
}

// ============ RevenueService ============

/// Revenue 服务
pub struct RevenueService {
    storage: Arc<SeaOrmStorage>,
}

impl RevenueService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn get_total_revenue(&self, range: &DateRange) -> Result<RevenueAggregate> {
        let row = self.storage.total_revenue(range.from, range.to).await?;
        Ok(RevenueAggregate::from_sums(
            row.with_discount,
            row.without_discount,
        ))
    }

    pub async fn get_category_revenue(&self, range: &DateRange) -> Result<Vec<GroupedRevenue>> {
        let rows = self.storage.revenue_by_category(range.from, range.to).await?;
        Ok(rows.into_iter().map(GroupedRevenue::from).collect())
    }

    pub async fn get_product_revenue(&self, range: &DateRange) -> Result<Vec<GroupedRevenue>> {
        let rows = self.storage.revenue_by_product(range.from, range.to).await?;
        Ok(rows.into_iter().map(GroupedRevenue::from).collect())
    }

    pub async fn get_region_revenue(&self, range: &DateRange) -> Result<Vec<GroupedRevenue>> {
        let rows = self.storage.revenue_by_region(range.from, range.to).await?;
        Ok(rows.into_iter().map(GroupedRevenue::from).collect())
    }

    /// 按报表类型分发到对应查询
    pub async fn communicate_with_db(
        &self,
        range: &DateRange,
        kind: ReportKind,
    ) -> Result<RevenueReport> {
        debug!("Running {} for {} ..= {}", kind, range.from, range.to);

        let report = match kind {
            ReportKind::GetTotalRevenue => RevenueReport::Total(self.get_total_revenue(range).await?),
            ReportKind::GetCategoryRevenue => {
                RevenueReport::ByCategory(self.get_category_revenue(range).await?)
            }
            ReportKind::GetProductRevenue => {
                RevenueReport::ByProduct(self.get_product_revenue(range).await?)
            }
            ReportKind::GetRegionRevenue => {
                RevenueReport::ByRegion(self.get_region_revenue(range).await?)
            }
        };
        Ok(report)
    }

    /// 收入趋势，按 `range_type` 分桶，升序返回
    pub async fn get_revenue_trend(
        &self,
        range: &DateRange,
        range_type: RangeType,
    ) -> Result<Vec<RevenueBucket>> {
        let rows = self.storage.revenue_by_day(range.from, range.to).await?;
        Ok(bucket_days(rows, range_type))
    }
}
