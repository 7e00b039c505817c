use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use super::reader::read_records;
use crate::errors::{OrderlensError, Result};
use crate::storage::SeaOrmStorage;

/// 单次加载结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_persisted: usize,
    pub elapsed: Duration,
}

/// 加载失败时写入日志的步骤代码
///
/// - `LD-001`: 文件读取或解析失败
/// - `LD-002`: 写库失败
pub fn step_code(err: &OrderlensError) -> &'static str {
    match err {
        OrderlensError::FileOperation(_) | OrderlensError::CsvParse(_) => "LD-001",
        _ => "LD-002",
    }
}

/// CSV -> 数据库的导入器
#[derive(Clone)]
pub struct Loader {
    storage: Arc<SeaOrmStorage>,
}

impl Loader {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 读取整个文件并逐行写入
    ///
    /// 解析在阻塞线程池上进行，任何一行解析失败都不会写库。
    /// 每行一个事务；某行失败时该行回滚并中止本轮，之前已提交的行保留。
    pub async fn run_once(&self, path: &Path, delimiter: u8) -> Result<LoadReport> {
        let started = Instant::now();

        let owned_path = path.to_path_buf();
        let records = tokio::task::spawn_blocking(move || read_records(&owned_path, delimiter))
            .await
            .map_err(|e| OrderlensError::file_operation(format!("CSV reader task failed: {}", e)))??;

        let rows_read = records.len();
        let mut rows_persisted = 0;

        for record in &records {
            let (customer, order, item, product) = record.split();
            self.storage
                .persist_row(&customer, &order, &item, &product)
                .await
                .map_err(|e| match e {
                    OrderlensError::Upsert(msg) => {
                        OrderlensError::upsert(format!("line {}: {}", record.line, msg))
                    }
                    other => other,
                })?;
            rows_persisted += 1;
        }

        let report = LoadReport {
            rows_read,
            rows_persisted,
            elapsed: started.elapsed(),
        };
        info!(
            "CSV load completed: {} rows from {} in {:?}",
            report.rows_persisted,
            path.display(),
            report.elapsed
        );
        Ok(report)
    }

    /// 立即执行一次，之后每隔 `interval` 执行一次，永不返回
    ///
    /// 单轮失败只记录日志，上一次成功写入的数据保持不变。
    pub async fn schedule_loop(self, path: PathBuf, delimiter: u8, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // 第一次 tick 立即返回
            ticker.tick().await;

            match self.run_once(&path, delimiter).await {
                Ok(report) if report.rows_read == 0 => {
                    warn!("CSV file {} contained no data rows", path.display());
                }
                Ok(_) => {}
                Err(e) => {
                    error!(
                        step = step_code(&e),
                        code = e.code(),
                        "CSV load cycle failed: {}",
                        e
                    );
                }
            }
        }
    }

    /// 在后台任务中运行调度循环，返回的句柄用于关闭时 abort
    pub fn spawn(self, path: PathBuf, delimiter: u8, interval: Duration) -> JoinHandle<()> {
        info!(
            "CSV loader scheduled: {} every {:?}",
            path.display(),
            interval
        );
        tokio::spawn(self.schedule_loop(path, delimiter, interval))
    }
}
