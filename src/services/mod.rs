//! Service layer for business logic
//!
//! HTTP 处理器只负责解包 / 封包，查询与校验逻辑都在这里。

mod revenue_service;
pub mod validation;

pub use revenue_service::*;
pub use validation::DateRange;
