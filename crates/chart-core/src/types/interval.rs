//! 차트 시간 간격 정의.
//!
//! 일봉/주봉/월봉의 세 가지 간격만 지원하며, 그 외의 토큰은
//! 파싱 단계에서 `UnsupportedIntervalError`로 거부됩니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 지원하지 않는 시간 간격 토큰.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("지원하지 않는 시간 간격: '{0}' (daily, weekly, monthly 중 하나여야 합니다)")]
pub struct UnsupportedIntervalError(pub String);

/// 차트 시간 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum Interval {
    /// 일봉
    Daily,
    /// 주봉 (금요일 마감 기준)
    Weekly,
    /// 월봉 (월말 기준)
    Monthly,
}

impl Interval {
    /// 간격 토큰 문자열을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = UnsupportedIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Interval::Daily),
            "weekly" => Ok(Interval::Weekly),
            "monthly" => Ok(Interval::Monthly),
            _ => Err(UnsupportedIntervalError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_from_str() {
        assert_eq!("daily".parse::<Interval>().unwrap(), Interval::Daily);
        assert_eq!("weekly".parse::<Interval>().unwrap(), Interval::Weekly);
        assert_eq!("monthly".parse::<Interval>().unwrap(), Interval::Monthly);
    }

    #[test]
    fn test_interval_rejects_unknown_token() {
        let err = "hourly".parse::<Interval>().unwrap_err();
        assert_eq!(err, UnsupportedIntervalError("hourly".to_string()));

        // 대문자 토큰도 허용하지 않음 (리터럴 매칭)
        assert!("Daily".parse::<Interval>().is_err());
    }

    #[test]
    fn test_interval_display_roundtrip() {
        for interval in [Interval::Daily, Interval::Weekly, Interval::Monthly] {
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
    }
}
