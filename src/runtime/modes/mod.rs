//! Mode routing
//!
//! 只有 HTTP 服务一种运行模式，后台 CSV 导入随服务一起启动。

pub mod server;

pub use server::run_server;
