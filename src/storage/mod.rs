use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use backend::revenue::{DayRevenueRow, GroupRevenueRow, TotalRevenueRow};
pub use models::{Customer, Order, OrderItem, Product};

pub struct StorageFactory;

impl StorageFactory {
    /// 按数据库配置建立连接池并执行迁移
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let database_url = config.connection_url()?;

        // 从 URL 自动推断数据库类型
        let backend_type = backend::infer_backend_from_url(&database_url)?;

        let storage = backend::SeaOrmStorage::new(&database_url, &backend_type, config).await?;
        Ok(Arc::new(storage))
    }
}
