use sea_orm::DatabaseConnection;
use std::time::Duration;
use tokio::signal;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// 等待 Ctrl+C；无法注册信号监听时永不返回
pub async fn wait_for_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping...");
        }
        Err(e) => {
            warn!("Failed to listen for Ctrl+C: {}. Signal shutdown disabled.", e);
            std::future::pending::<()>().await;
        }
    }
}

/// 停止后台导入并关闭连接池，整体受超时约束
pub async fn shutdown(db: DatabaseConnection, loader: Option<JoinHandle<()>>) {
    let shutdown_result = timeout(
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS),
        perform_shutdown_tasks(db, loader),
    )
    .await;

    match shutdown_result {
        Ok(()) => {
            info!("All shutdown tasks completed successfully");
        }
        Err(_) => {
            error!(
                "Shutdown tasks timed out after {} seconds!",
                SHUTDOWN_TIMEOUT_SECS
            );
        }
    }
}

/// 执行所有关闭任务（在超时内调用）
pub async fn perform_shutdown_tasks(db: DatabaseConnection, loader: Option<JoinHandle<()>>) {
    // 进行中的导入在当前 await 点中止，未提交的行事务随之回滚
    if let Some(handle) = loader {
        handle.abort();
        match handle.await {
            Err(e) if e.is_cancelled() => info!("CSV loader stopped"),
            Err(e) => error!("CSV loader task failed: {}", e),
            Ok(()) => info!("CSV loader exited"),
        }
    }

    match db.close().await {
        Ok(()) => info!("Database connections closed"),
        Err(e) => error!("Failed to close database connections: {}", e),
    }
}
