//! CSV 定时导入
//!
//! - `reader`: 读取并校验整个 CSV 文件（全部成功才返回）
//! - `loader`: 逐行事务写入，以及按固定间隔重复执行的调度循环

pub mod loader;
pub mod reader;

pub use loader::{LoadReport, Loader, step_code};
pub use reader::{CsvRecord, read_records};
