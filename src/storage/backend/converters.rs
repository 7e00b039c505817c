use sea_orm::ActiveValue::Set;

use crate::storage::{Customer, Order, OrderItem, Product};
use migration::entities::{customer, order, order_item, product};

pub fn customer_to_active_model(c: &Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        customer_id: Set(c.customer_id.clone()),
        customer_name: Set(c.name.clone()),
        customer_email: Set(c.email.clone()),
        customer_address: Set(c.address.clone()),
    }
}

pub fn product_to_active_model(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        product_id: Set(p.product_id.clone()),
        name: Set(p.name.clone()),
        category: Set(p.category.clone()),
    }
}

pub fn order_to_active_model(o: &Order) -> order::ActiveModel {
    order::ActiveModel {
        order_id: Set(o.order_id.clone()),
        customer_id: Set(o.customer_id.clone()),
        region: Set(o.region.clone()),
        date_of_sale: Set(o.date_of_sale),
        shipping_cost: Set(o.shipping_cost),
        payment_method: Set(o.payment_method.clone()),
    }
}

pub fn order_item_to_active_model(i: &OrderItem) -> order_item::ActiveModel {
    order_item::ActiveModel {
        order_id: Set(i.order_id.clone()),
        product_id: Set(i.product_id.clone()),
        quantity_sold: Set(i.quantity_sold),
        unit_price: Set(i.unit_price),
        discount: Set(i.discount),
    }
}

/// 将 Sea-ORM Model 转换回领域结构（测试与排查用）
pub fn model_to_order(model: order::Model) -> Order {
    Order {
        order_id: model.order_id,
        customer_id: model.customer_id,
        region: model.region,
        date_of_sale: model.date_of_sale,
        shipping_cost: model.shipping_cost,
        payment_method: model.payment_method,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::ActiveValue;

    fn sample_order() -> Order {
        Order {
            order_id: "O1".to_string(),
            customer_id: "C1".to_string(),
            region: "North".to_string(),
            date_of_sale: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            shipping_cost: 3.5,
            payment_method: "Card".to_string(),
        }
    }

    #[test]
    fn test_order_active_model_sets_every_column() {
        let am = order_to_active_model(&sample_order());
        assert_eq!(am.order_id, ActiveValue::Set("O1".to_string()));
        assert_eq!(am.region, ActiveValue::Set("North".to_string()));
        assert_eq!(am.shipping_cost, ActiveValue::Set(3.5));
    }

    #[test]
    fn test_model_to_order() {
        let model = order::Model {
            order_id: "O1".to_string(),
            customer_id: "C1".to_string(),
            region: "North".to_string(),
            date_of_sale: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            shipping_cost: 3.5,
            payment_method: "Card".to_string(),
        };
        assert_eq!(model_to_order(model), sample_order());
    }

    #[test]
    fn test_order_item_active_model() {
        let item = OrderItem {
            order_id: "O1".to_string(),
            product_id: "P1".to_string(),
            quantity_sold: 2,
            unit_price: 10.0,
            discount: 0.1,
        };
        let am = order_item_to_active_model(&item);
        assert_eq!(am.quantity_sold, ActiveValue::Set(2));
        assert_eq!(am.discount, ActiveValue::Set(0.1));
    }
}
