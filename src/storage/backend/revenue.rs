//! Revenue 聚合查询
//!
//! 所有查询都以 order_items 为主表，关联 orders 按 `date_of_sale` 闭区间过滤，
//! 供 RevenueService 调用。空结果集的 SUM 为 NULL，由上层映射为 0。

use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, sea_query::Expr,
};

use crate::errors::Result;
use migration::entities::{order, order_item, product};

const WITH_DISCOUNT_SQL: &str =
    "SUM(order_items.quantity_sold * order_items.unit_price * (1 - order_items.discount))";
const WITHOUT_DISCOUNT_SQL: &str = "SUM(order_items.quantity_sold * order_items.unit_price)";

// ============ 查询结果类型 ============

/// 区间汇总结果行
#[derive(Debug, FromQueryResult)]
pub struct TotalRevenueRow {
    pub with_discount: Option<f64>,
    pub without_discount: Option<f64>,
}

/// 分组汇总结果行（分类 / 产品 / 区域）
#[derive(Debug, FromQueryResult)]
pub struct GroupRevenueRow {
    pub label: String,
    pub with_discount: Option<f64>,
    pub without_discount: Option<f64>,
}

/// 按销售日期汇总的结果行
#[derive(Debug, FromQueryResult)]
pub struct DayRevenueRow {
    pub day: NaiveDate,
    pub with_discount: Option<f64>,
    pub without_discount: Option<f64>,
}

/// order_items JOIN orders，并按日期闭区间过滤
fn items_in_range(from: NaiveDate, to: NaiveDate) -> Select<order_item::Entity> {
    order_item::Entity::find()
        .select_only()
        .join(JoinType::InnerJoin, order_item::Relation::Order.def())
        .filter(order::Column::DateOfSale.between(from, to))
}

fn with_sums(select: Select<order_item::Entity>) -> Select<order_item::Entity> {
    select
        .column_as(Expr::cust(WITH_DISCOUNT_SQL), "with_discount")
        .column_as(Expr::cust(WITHOUT_DISCOUNT_SQL), "without_discount")
}

// ============ SeaOrmStorage Revenue 方法 ============

impl super::SeaOrmStorage {
    /// 区间内全部订单行的收入汇总
    pub async fn total_revenue(&self, from: NaiveDate, to: NaiveDate) -> Result<TotalRevenueRow> {
        let row = with_sums(items_in_range(from, to))
            .into_model::<TotalRevenueRow>()
            .one(&self.db)
            .await?;

        Ok(row.unwrap_or(TotalRevenueRow {
            with_discount: None,
            without_discount: None,
        }))
    }

    /// 按产品分类汇总
    pub async fn revenue_by_category(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GroupRevenueRow>> {
        let rows = with_sums(
            items_in_range(from, to)
                .join(JoinType::InnerJoin, order_item::Relation::Product.def())
                .column_as(product::Column::Category, "label"),
        )
        .group_by(product::Column::Category)
        .order_by_asc(product::Column::Category)
        .into_model::<GroupRevenueRow>()
        .all(&self.db)
        .await?;
        Ok(rows)
    }

    /// 按产品汇总，同名产品按 product_id 区分
    pub async fn revenue_by_product(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GroupRevenueRow>> {
        let rows = with_sums(
            items_in_range(from, to)
                .join(JoinType::InnerJoin, order_item::Relation::Product.def())
                .column_as(product::Column::Name, "label"),
        )
        .group_by(product::Column::ProductId)
        .group_by(product::Column::Name)
        .order_by_asc(product::Column::Name)
        .order_by_asc(product::Column::ProductId)
        .into_model::<GroupRevenueRow>()
        .all(&self.db)
        .await?;
        Ok(rows)
    }

    /// 按订单区域汇总
    pub async fn revenue_by_region(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GroupRevenueRow>> {
        let rows = with_sums(items_in_range(from, to).column_as(order::Column::Region, "label"))
            .group_by(order::Column::Region)
            .order_by_asc(order::Column::Region)
            .into_model::<GroupRevenueRow>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// 按销售日期汇总（月/季/年分桶在服务层完成，避免依赖各数据库的日期函数）
    pub async fn revenue_by_day(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<DayRevenueRow>> {
        let rows = with_sums(items_in_range(from, to).column_as(order::Column::DateOfSale, "day"))
            .group_by(order::Column::DateOfSale)
            .order_by_asc(order::Column::DateOfSale)
            .into_model::<DayRevenueRow>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }
}
