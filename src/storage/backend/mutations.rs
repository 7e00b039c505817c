//! Mutation operations for SeaOrmStorage
//!
//! 每个 CSV 行在一个事务内依次写入 Customer -> Order -> OrderItem -> Product，
//! 全部使用 ON CONFLICT 覆盖，重复加载同一文件结果不变。

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, TransactionTrait, sea_query::OnConflict};
use tracing::{debug, warn};

use super::SeaOrmStorage;
use super::converters::{
    customer_to_active_model, order_item_to_active_model, order_to_active_model,
    product_to_active_model,
};
use crate::errors::{OrderlensError, Result};
use crate::storage::{Customer, Order, OrderItem, Product};

use migration::entities::{customer, order, order_item, product};

impl SeaOrmStorage {
    /// 在单个事务内写入一行 CSV 拆分出的四个实体
    ///
    /// 任一 upsert 失败时整行回滚，返回的 Upsert 错误带实体名和主键。
    pub async fn persist_row(
        &self,
        customer: &Customer,
        order: &Order,
        item: &OrderItem,
        product: &Product,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| OrderlensError::upsert(format!("failed to begin transaction: {}", e)))?;

        let written = async {
            upsert_customer(&txn, customer)
                .await
                .map_err(|e| upsert_failed("Customer", &customer.customer_id, e))?;
            upsert_order(&txn, order)
                .await
                .map_err(|e| upsert_failed("Order", &order.order_id, e))?;
            upsert_order_item(&txn, item).await.map_err(|e| {
                upsert_failed(
                    "OrderItem",
                    &format!("{}/{}", item.order_id, item.product_id),
                    e,
                )
            })?;
            upsert_product(&txn, product)
                .await
                .map_err(|e| upsert_failed("Product", &product.product_id, e))?;
            Ok::<(), OrderlensError>(())
        }
        .await;

        match written {
            Ok(()) => {
                txn.commit()
                    .await
                    .map_err(|e| OrderlensError::upsert(format!("commit failed: {}", e)))?;
                debug!("Row persisted: order {} / product {}", item.order_id, item.product_id);
                Ok(())
            }
            Err(e) => {
                if let Err(rb) = txn.rollback().await {
                    warn!("Rollback failed after upsert error: {}", rb);
                }
                Err(e)
            }
        }
    }
}

fn upsert_failed(entity: &str, key: &str, err: DbErr) -> OrderlensError {
    OrderlensError::upsert(format!("{} upsert failed (key {}): {}", entity, key, err))
}

pub(super) async fn upsert_customer<C: ConnectionTrait>(db: &C, c: &Customer) -> std::result::Result<(), DbErr> {
    customer::Entity::insert(customer_to_active_model(c))
        .on_conflict(
            OnConflict::column(customer::Column::CustomerId)
                .update_columns([
                    customer::Column::CustomerName,
                    customer::Column::CustomerEmail,
                    customer::Column::CustomerAddress,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map(|_| ())
}

pub(super) async fn upsert_order<C: ConnectionTrait>(db: &C, o: &Order) -> std::result::Result<(), DbErr> {
    order::Entity::insert(order_to_active_model(o))
        .on_conflict(
            OnConflict::column(order::Column::OrderId)
                .update_columns([
                    order::Column::CustomerId,
                    order::Column::Region,
                    order::Column::DateOfSale,
                    order::Column::ShippingCost,
                    order::Column::PaymentMethod,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map(|_| ())
}

pub(super) async fn upsert_order_item<C: ConnectionTrait>(
    db: &C,
    i: &OrderItem,
) -> std::result::Result<(), DbErr> {
    order_item::Entity::insert(order_item_to_active_model(i))
        .on_conflict(
            OnConflict::columns([order_item::Column::OrderId, order_item::Column::ProductId])
                .update_columns([
                    order_item::Column::QuantitySold,
                    order_item::Column::UnitPrice,
                    order_item::Column::Discount,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map(|_| ())
}

pub(super) async fn upsert_product<C: ConnectionTrait>(db: &C, p: &Product) -> std::result::Result<(), DbErr> {
    product::Entity::insert(product_to_active_model(p))
        .on_conflict(
            OnConflict::column(product::Column::ProductId)
                .update_columns([product::Column::Name, product::Column::Category])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .map(|_| ())
}
