//! 请求参数校验

use chrono::NaiveDate;

use crate::errors::{OrderlensError, Result};
use crate::utils::parse_iso_date;

/// 已校验的日期闭区间，保证 `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// 校验 `fromDate` / `toDate`
    ///
    /// 依次检查：必填、`YYYY-MM-DD` 格式、起止顺序。任何一步失败都返回 Validation 错误，
    /// 不会触达数据库。
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        let from = from.trim();
        let to = to.trim();

        if from.is_empty() {
            return Err(required("FromDate"));
        }
        if to.is_empty() {
            return Err(required("ToDate"));
        }

        let from_date = parse_iso_date(from)
            .ok_or_else(|| OrderlensError::validation("invalid FromDate format"))?;
        let to_date =
            parse_iso_date(to).ok_or_else(|| OrderlensError::validation("invalid ToDate format"))?;

        if from_date > to_date {
            return Err(OrderlensError::validation(
                "ToDate should be greater than FromDate",
            ));
        }

        Ok(Self {
            from: from_date,
            to: to_date,
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

fn required(field: &str) -> OrderlensError {
    OrderlensError::validation(format!(
        "The field '{}' failed validation: it must satisfy the 'required' rule.",
        field
    ))
}
