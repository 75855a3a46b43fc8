//! OHLCV 바(봉) 데이터 타입.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 하나의 거래 구간을 나타내는 OHLCV 바.
///
/// 하나의 시퀀스 안에서 날짜는 엄격하게 증가하며, 같은 날짜의 바는
/// 존재하지 않습니다. 일봉뿐 아니라 집계된 주봉/월봉도 같은 타입을
/// 사용합니다 (이때 `date`는 구간의 마감일).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 거래일 (집계 바의 경우 구간 마감일)
    pub date: NaiveDate,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}

impl Bar {
    /// 새 바를 생성합니다.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 양봉(종가 >= 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// 바 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
