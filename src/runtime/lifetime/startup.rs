use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::StaticConfig;
use crate::ingest::Loader;
use crate::services::RevenueService;
use crate::storage::{SeaOrmStorage, StorageFactory};

/// 显式构造的应用上下文：配置快照 + 连接池，启动后只读
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<StaticConfig>,
    pub storage: Arc<SeaOrmStorage>,
    pub revenue_service: Arc<RevenueService>,
}

impl AppContext {
    /// 连接数据库（含迁移）并组装服务
    pub async fn build(config: StaticConfig) -> Result<Self> {
        let storage = StorageFactory::create(&config.database)
            .await
            .context("Failed to create storage backend")?;
        info!("Using storage backend: {}", storage.backend_name());

        Ok(Self::from_parts(Arc::new(config), storage))
    }

    pub fn from_parts(config: Arc<StaticConfig>, storage: Arc<SeaOrmStorage>) -> Self {
        let revenue_service = Arc::new(RevenueService::new(storage.clone()));
        Self {
            config,
            storage,
            revenue_service,
        }
    }

    /// 启动后台 CSV 导入；`ingest.enabled = false` 时返回 None
    pub fn spawn_loader(&self) -> Result<Option<JoinHandle<()>>> {
        let ingest = &self.config.ingest;
        if !ingest.enabled {
            warn!("CSV ingestion is disabled");
            return Ok(None);
        }

        let delimiter = ingest
            .delimiter_byte()
            .context("Invalid ingest configuration")?;

        let handle = Loader::new(self.storage.clone()).spawn(
            PathBuf::from(&ingest.csv_path),
            delimiter,
            ingest.interval(),
        );
        Ok(Some(handle))
    }
}

/// 准备服务器启动的上下文
pub async fn prepare_server_startup(config: StaticConfig) -> Result<(AppContext, Option<JoinHandle<()>>)> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    // sqlx 的 rustls 连接需要进程级 crypto provider
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let ctx = AppContext::build(config).await?;
    let loader = ctx.spawn_loader()?;

    debug!("Pre-startup processing completed in {:?}", start_time.elapsed());
    Ok((ctx, loader))
}
