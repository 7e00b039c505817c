use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum OrderlensError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    FileOperation(String),
    CsvParse(String),
    Upsert(String),
    Query(String),
    Validation(String),
    Serialization(String),
}

impl OrderlensError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            OrderlensError::DatabaseConfig(_) => "E101",
            OrderlensError::DatabaseConnection(_) => "E102",
            OrderlensError::FileOperation(_) => "E103",
            OrderlensError::CsvParse(_) => "E104",
            OrderlensError::Upsert(_) => "E105",
            OrderlensError::Query(_) => "E106",
            OrderlensError::Validation(_) => "E107",
            OrderlensError::Serialization(_) => "E108",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            OrderlensError::DatabaseConfig(_) => "Database Configuration Error",
            OrderlensError::DatabaseConnection(_) => "Database Connection Error",
            OrderlensError::FileOperation(_) => "File Operation Error",
            OrderlensError::CsvParse(_) => "CSV Parse Error",
            OrderlensError::Upsert(_) => "Upsert Error",
            OrderlensError::Query(_) => "Query Error",
            OrderlensError::Validation(_) => "Validation Error",
            OrderlensError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            OrderlensError::DatabaseConfig(msg)
            | OrderlensError::DatabaseConnection(msg)
            | OrderlensError::FileOperation(msg)
            | OrderlensError::CsvParse(msg)
            | OrderlensError::Upsert(msg)
            | OrderlensError::Query(msg)
            | OrderlensError::Validation(msg)
            | OrderlensError::Serialization(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码：校验失败 400，其余均视为服务端错误
    pub fn http_status(&self) -> StatusCode {
        match self {
            OrderlensError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 错误信息是否可以原样返回给客户端
    ///
    /// 数据库驱动的原始报错只写日志，不透传。
    pub fn is_client_safe(&self) -> bool {
        matches!(self, OrderlensError::Validation(_))
    }

    /// 格式化为彩色输出（用于启动失败时的终端提示）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for OrderlensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OrderlensError {}

// 便捷的构造函数
impl OrderlensError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        OrderlensError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        OrderlensError::DatabaseConnection(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        OrderlensError::FileOperation(msg.into())
    }

    pub fn csv_parse<T: Into<String>>(msg: T) -> Self {
        OrderlensError::CsvParse(msg.into())
    }

    pub fn upsert<T: Into<String>>(msg: T) -> Self {
        OrderlensError::Upsert(msg.into())
    }

    pub fn query<T: Into<String>>(msg: T) -> Self {
        OrderlensError::Query(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        OrderlensError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        OrderlensError::Serialization(msg.into())
    }
}

// 读路径占绝大多数，DbErr 默认归为查询错误；写路径显式构造 Upsert
impl From<sea_orm::DbErr> for OrderlensError {
    fn from(err: sea_orm::DbErr) -> Self {
        OrderlensError::Query(err.to_string())
    }
}

impl From<std::io::Error> for OrderlensError {
    fn from(err: std::io::Error) -> Self {
        OrderlensError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for OrderlensError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            OrderlensError::FileOperation(err.to_string())
        } else {
            OrderlensError::CsvParse(err.to_string())
        }
    }
}

impl From<serde_json::Error> for OrderlensError {
    fn from(err: serde_json::Error) -> Self {
        OrderlensError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for OrderlensError {
    fn from(err: chrono::ParseError) -> Self {
        OrderlensError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrderlensError>;
