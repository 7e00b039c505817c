//! Point lookups for SeaOrmStorage

use sea_orm::{EntityTrait, PaginatorTrait};

use super::SeaOrmStorage;
use super::converters::model_to_order;
use crate::errors::Result;
use crate::storage::{Customer, Order, OrderItem, Product};

use migration::entities::{customer, order, order_item, product};

impl SeaOrmStorage {
    pub async fn find_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        Ok(customer::Entity::find_by_id(customer_id.to_string())
            .one(&self.db)
            .await?
            .map(|m| Customer {
                customer_id: m.customer_id,
                name: m.customer_name,
                email: m.customer_email,
                address: m.customer_address,
            }))
    }

    pub async fn find_product(&self, product_id: &str) -> Result<Option<Product>> {
        Ok(product::Entity::find_by_id(product_id.to_string())
            .one(&self.db)
            .await?
            .map(|m| Product {
                product_id: m.product_id,
                name: m.name,
                category: m.category,
            }))
    }

    pub async fn find_order(&self, order_id: &str) -> Result<Option<Order>> {
        Ok(order::Entity::find_by_id(order_id.to_string())
            .one(&self.db)
            .await?
            .map(model_to_order))
    }

    pub async fn find_order_item(&self, order_id: &str, product_id: &str) -> Result<Option<OrderItem>> {
        Ok(
            order_item::Entity::find_by_id((order_id.to_string(), product_id.to_string()))
                .one(&self.db)
                .await?
                .map(|m| OrderItem {
                    order_id: m.order_id,
                    product_id: m.product_id,
                    quantity_sold: m.quantity_sold,
                    unit_price: m.unit_price,
                    discount: m.discount,
                }),
        )
    }

    /// 订单行总数
    pub async fn count_order_items(&self) -> Result<u64> {
        Ok(order_item::Entity::find().count(&self.db).await?)
    }
}
