//! 订单相关表迁移
//!
//! 创建 customers / products / orders / order_items 四张表。
//! 不建外键：加载器按 Customer → Order → OrderItem → Product 顺序写入，
//! 同一事务内 order_items 会先于 products 落库。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 customers 表
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::CustomerId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Customers::CustomerName).string().not_null())
                    .col(ColumnDef::new(Customers::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Customers::CustomerAddress).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建 products 表
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::ProductId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null())
                    .col(ColumnDef::new(Products::Category).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建 orders 表
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Orders::OrderId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Orders::CustomerId).string_len(64).not_null())
                    .col(ColumnDef::new(Orders::Region).string().not_null())
                    .col(ColumnDef::new(Orders::DateOfSale).date().not_null())
                    .col(
                        ColumnDef::new(Orders::ShippingCost)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Orders::PaymentMethod).string().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建 order_items 表（复合主键）
        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderItems::OrderId).string_len(64).not_null())
                    .col(
                        ColumnDef::new(OrderItems::ProductId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrderItems::QuantitySold)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderItems::UnitPrice).double().not_null())
                    .col(
                        ColumnDef::new(OrderItems::Discount)
                            .double()
                            .not_null()
                            .default(0.0)
                            .check(
                                Expr::col(OrderItems::Discount)
                                    .gte(0)
                                    .and(Expr::col(OrderItems::Discount).lte(1)),
                            ),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_order_items")
                            .col(OrderItems::OrderId)
                            .col(OrderItems::ProductId),
                    )
                    .to_owned(),
            )
            .await?;

        // 按销售日期过滤是所有报表的公共条件
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_date_of_sale")
                    .table(Orders::Table)
                    .col(Orders::DateOfSale)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_region")
                    .table(Orders::Table)
                    .col(Orders::Region)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_items_product_id")
                    .table(OrderItems::Table)
                    .col(OrderItems::ProductId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .col(Products::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_products_category")
                    .table(Products::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_order_items_product_id")
                    .table(OrderItems::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_region")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_orders_date_of_sale")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Customers {
    #[sea_orm(iden = "customers")]
    Table,
    CustomerId,
    CustomerName,
    CustomerEmail,
    CustomerAddress,
}

#[derive(DeriveIden)]
enum Products {
    #[sea_orm(iden = "products")]
    Table,
    ProductId,
    Name,
    Category,
}

#[derive(DeriveIden)]
enum Orders {
    #[sea_orm(iden = "orders")]
    Table,
    OrderId,
    CustomerId,
    Region,
    DateOfSale,
    ShippingCost,
    PaymentMethod,
}

#[derive(DeriveIden)]
enum OrderItems {
    #[sea_orm(iden = "order_items")]
    Table,
    OrderId,
    ProductId,
    QuantitySold,
    UnitPrice,
    Discount,
}
