//! 时间类型模块
//!
//! 后端 (FastAPI + SQLAlchemy) 输出的时间通常不带时区，例如
//! `2024-01-15T10:30:00.123456`，但也可能是 RFC 3339 或单纯的日期。
//! `Timestamp` 统一解析这几种格式，并按 UTC 语义保存。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// 可序列化的时间戳
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    #[inline]
    pub const fn new(inner: NaiveDateTime) -> Self {
        Self(inner)
    }

    /// 宽松解析
    ///
    /// 返回 None 如果所有格式都不匹配
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.naive_utc()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Self(dt));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }

    #[inline]
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// (年, 月) 用于按月聚合
    pub fn year_month(&self) -> (i32, u32) {
        (self.0.year(), self.0.month())
    }

    /// `Jan 15, 2024`
    pub fn short_date(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// `Jan 15, 10:30 AM`
    pub fn short_date_time(&self) -> String {
        self.0.format("%b %-d, %I:%M %p").to_string()
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(inner: NaiveDateTime) -> Self {
        Self(inner)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_with_fraction() {
        let ts = Timestamp::parse("2024-01-15T10:30:00.123456").unwrap();
        assert_eq!(ts.year_month(), (2024, 1));
        assert_eq!(ts.short_date_time(), "Jan 15, 10:30 AM");
    }

    #[test]
    fn test_parse_rfc3339_is_normalized_to_utc() {
        let ts = Timestamp::parse("2024-03-01T01:00:00+02:00").unwrap();
        assert_eq!(ts.year_month(), (2024, 2));
    }

    #[test]
    fn test_parse_plain_date() {
        let ts = Timestamp::parse("2023-11-20").unwrap();
        assert_eq!(ts.short_date(), "Nov 20, 2023");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
        assert!(serde_json::from_str::<Timestamp>("\"not a date\"").is_err());
    }
}
