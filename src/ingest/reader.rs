//! 订单明细 CSV 读取
//!
//! 每行是一条反规范化的订单行，同时携带客户、订单、产品信息。

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::{OrderlensError, Result};
use crate::storage::{Customer, Order, OrderItem, Product};
use crate::utils::parse_iso_date;

/// CSV 行数据结构，列名与导出文件表头一致
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvRecord {
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Region")]
    pub region: String,
    #[serde(rename = "DateOfSale", deserialize_with = "deserialize_date")]
    pub date_of_sale: NaiveDate,
    #[serde(rename = "ShippingCost")]
    pub shipping_cost: f64,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
    #[serde(rename = "Quantity Sold")]
    pub quantity_sold: i32,
    #[serde(rename = "Unit Price")]
    pub unit_price: f64,
    #[serde(rename = "Discount")]
    pub discount: f64,
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Customer Email")]
    pub customer_email: String,
    #[serde(rename = "Customer Address")]
    pub customer_address: String,

    /// CSV 行号（1-based，含表头行）
    #[serde(skip)]
    pub line: u64,
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_iso_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid DateOfSale '{}', expected YYYY-MM-DD", raw))
    })
}

impl CsvRecord {
    /// 拆分为四个实体
    pub fn split(&self) -> (Customer, Order, OrderItem, Product) {
        let customer = Customer {
            customer_id: self.customer_id.clone(),
            name: self.customer_name.clone(),
            email: self.customer_email.clone(),
            address: self.customer_address.clone(),
        };
        let order = Order {
            order_id: self.order_id.clone(),
            customer_id: self.customer_id.clone(),
            region: self.region.clone(),
            date_of_sale: self.date_of_sale,
            shipping_cost: self.shipping_cost,
            payment_method: self.payment_method.clone(),
        };
        let item = OrderItem {
            order_id: self.order_id.clone(),
            product_id: self.product_id.clone(),
            quantity_sold: self.quantity_sold,
            unit_price: self.unit_price,
            discount: self.discount,
        };
        let product = Product {
            product_id: self.product_id.clone(),
            name: self.product_name.clone(),
            category: self.category.clone(),
        };
        (customer, order, item, product)
    }

    fn check_keys(&self) -> std::result::Result<(), String> {
        for (column, value) in [
            ("Order ID", &self.order_id),
            ("Product ID", &self.product_id),
            ("Customer ID", &self.customer_id),
        ] {
            if value.is_empty() {
                return Err(format!("empty {}", column));
            }
        }
        Ok(())
    }
}

/// 读取整个 CSV 文件
///
/// 任意一行解析失败即返回 CsvParse 错误（带行号），不返回部分结果。
/// 文件无法打开或读取时返回 FileOperation 错误。
pub fn read_records<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Vec<CsvRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        OrderlensError::file_operation(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let raw: StringRecord = result?;
        let line = raw.position().map(|p| p.line()).unwrap_or_default();

        let mut record: CsvRecord = raw
            .deserialize(Some(&headers))
            .map_err(|e| OrderlensError::csv_parse(format!("line {}: {}", line, e)))?;
        record
            .check_keys()
            .map_err(|msg| OrderlensError::csv_parse(format!("line {}: {}", line, msg)))?;
        record.line = line;
        records.push(record);
    }

    Ok(records)
}
