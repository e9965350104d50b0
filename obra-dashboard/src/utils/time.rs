//! 时间工具函数: 业务时区日期
//!
//! 所有日期都以本地日历字段 (年/月/日) 构造，输出固定为零填充的
//! `YYYY-MM-DD`，不经过 UTC 偏移。

use chrono::{Datelike, Duration, Local, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult, ErrorCode};

/// Stored date format (`fecha`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidDateFormat,
            format!("Invalid date format: {}", date),
        )
        .with_detail("value", date)
    })
}

/// 格式化为 YYYY-MM-DD
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// 今天 (业务时区)；未配置时使用主机本地时区
pub fn today(tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Local::now().date_naive(),
    }
}

/// 解析 IANA 时区名，失败返回 None
pub fn parse_timezone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().map_or_else(
        |e| {
            tracing::warn!("Failed to parse timezone '{}': {}, using host local time", name, e);
            None
        },
        Some,
    )
}

/// 所在周的周一
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// 该年 1 月 1 日当天或之后的第一个周一
pub fn first_monday_of_year(year: i32) -> Option<NaiveDate> {
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let offset = (7 - jan1.weekday().num_days_from_monday()) % 7;
    Some(jan1 + Duration::days(offset as i64))
}

/// 当月最后一天 (考虑闰年)
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}
