use serde::{Deserialize, Serialize};

use crate::errors::{OrderlensError, Result};

/// 静态配置（启动时加载一次，之后只读）
///
/// 包含：
/// - server: 监听地址、端口、worker 数量
/// - database: 数据库连接与连接池配置
/// - ingest: CSV 定时导入配置
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_cpu_count")]
    pub cpu_count: usize,
}

/// 数据库连接配置
///
/// `url` 非空时直接使用；否则按 `driver` 由各分项拼接连接串。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_database_driver")]
    pub driver: String,
    #[serde(default = "default_database_server")]
    pub server: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_database_name")]
    pub database: String,
    #[serde(default = "default_max_open_conns")]
    pub max_open_conns: u32,
    #[serde(default = "default_max_idle_conns")]
    pub max_idle_conns: u32,
    #[serde(default = "default_max_idle_time_secs")]
    pub max_idle_time_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// CSV 定时导入配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_ingest_enabled")]
    pub enabled: bool,
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

impl DatabaseConfig {
    /// 生成数据库连接 URL
    pub fn connection_url(&self) -> Result<String> {
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }

        let user = urlencoding::encode(&self.user);
        let password = urlencoding::encode(&self.password);

        match self.driver.to_lowercase().as_str() {
            "sqlite" => {
                if self.database == ":memory:" {
                    Ok("sqlite::memory:".to_string())
                } else {
                    Ok(format!("sqlite://{}?mode=rwc", self.database))
                }
            }
            "mysql" | "mariadb" => Ok(format!(
                "mysql://{}:{}@{}:{}/{}",
                user,
                password,
                self.server,
                self.port.unwrap_or(3306),
                self.database
            )),
            "postgres" | "postgresql" => Ok(format!(
                "postgres://{}:{}@{}:{}/{}",
                user,
                password,
                self.server,
                self.port.unwrap_or(5432),
                self.database
            )),
            other => Err(OrderlensError::database_config(format!(
                "unsupported DB type: {}. Supported: sqlite, mysql, postgres",
                other
            ))),
        }
    }
}

impl IngestConfig {
    /// 解析字段分隔符，只接受单个 ASCII 字符（`\t` / `tab` 表示制表符）
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_str() {
            "\\t" | "tab" => Ok(b'\t'),
            d if d.len() == 1 && d.is_ascii() => Ok(d.as_bytes()[0]),
            d => Err(OrderlensError::validation(format!(
                "ingest.delimiter must be a single ASCII character, got '{}'",
                d
            ))),
        }
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.interval_secs.max(1))
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    26301
}

fn default_cpu_count() -> usize {
    num_cpus::get()
}

fn default_database_driver() -> String {
    "sqlite".to_string()
}

fn default_database_server() -> String {
    "127.0.0.1".to_string()
}

fn default_database_name() -> String {
    "orders.db".to_string()
}

fn default_max_open_conns() -> u32 {
    10
}

fn default_max_idle_conns() -> u32 {
    2
}

fn default_max_idle_time_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn default_ingest_enabled() -> bool {
    true
}

fn default_csv_path() -> String {
    "./uploadedfiles/orderManagement/OrderDetails.csv".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_interval_secs() -> u64 {
    24 * 60 * 60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cpu_count: default_cpu_count(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            driver: default_database_driver(),
            server: default_database_server(),
            port: None,
            user: String::new(),
            password: String::new(),
            database: default_database_name(),
            max_open_conns: default_max_open_conns(),
            max_idle_conns: default_max_idle_conns(),
            max_idle_time_secs: default_max_idle_time_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            enabled: default_ingest_enabled(),
            csv_path: default_csv_path(),
            delimiter: default_delimiter(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
