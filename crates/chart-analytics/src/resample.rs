//! 시간 간격 집계 (Timeframe Aggregation).
//!
//! 일봉 시퀀스를 주봉/월봉으로 집계합니다.
//!
//! # 집계 규칙
//!
//! - **Open**: 구간 첫 거래일의 시가
//! - **High**: 구간 내 최고가
//! - **Low**: 구간 내 최저가
//! - **Close**: 구간 마지막 거래일의 종가
//! - **Volume**: 구간 거래량 합계
//!
//! 주봉 경계는 금요일 마감(W-FRI) 기준이며 출력 날짜는 해당 구간의
//! 금요일입니다. 월봉의 출력 날짜는 해당 월의 말일입니다. 경계 규칙이
//! 동작 계약이므로 달력 계산은 명시적으로 수행합니다.

use chart_core::{Bar, Interval};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// 일봉 시퀀스를 지정한 시간 간격으로 집계합니다.
///
/// 입력은 날짜 오름차순이어야 하며 출력도 오름차순을 유지합니다.
/// `daily`는 입력을 그대로 복사해 반환합니다. 바가 없는 구간은
/// 생성되지 않습니다.
pub fn aggregate(bars: &[Bar], interval: Interval) -> Vec<Bar> {
    match interval {
        Interval::Daily => bars.to_vec(),
        Interval::Weekly => resample(bars, week_close_date),
        Interval::Monthly => resample(bars, month_close_date),
    }
}

/// 같은 마감일을 공유하는 연속 구간을 하나의 바로 합칩니다.
fn resample(bars: &[Bar], close_date: fn(NaiveDate) -> NaiveDate) -> Vec<Bar> {
    let mut result = Vec::new();
    let mut bucket: Vec<&Bar> = Vec::new();
    let mut current_close: Option<NaiveDate> = None;

    for bar in bars {
        let key = close_date(bar.date);
        if current_close != Some(key) {
            if let Some(done) = current_close {
                if let Some(merged) = merge_bucket(&bucket, done) {
                    result.push(merged);
                }
            }
            bucket.clear();
            current_close = Some(key);
        }
        bucket.push(bar);
    }

    // 마지막 구간 처리
    if let Some(done) = current_close {
        if let Some(merged) = merge_bucket(&bucket, done) {
            result.push(merged);
        }
    }

    result
}

/// 구간 내 바들을 하나의 바로 병합합니다.
fn merge_bucket(bars: &[&Bar], date: NaiveDate) -> Option<Bar> {
    let first = bars.first()?;
    let last = bars.last()?;

    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let volume = bars.iter().map(|b| b.volume).sum();

    Some(Bar::new(date, first.open, high, low, last.close, volume))
}

/// 바가 속한 주의 마감 금요일.
///
/// 토/일 바는 다음 금요일 구간에 속합니다 (W-FRI 라벨링과 동일).
fn week_close_date(date: NaiveDate) -> NaiveDate {
    let days_ahead = (Weekday::Fri.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    date + Duration::days(days_ahead)
}

/// 바가 속한 월의 말일.
fn month_close_date(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // 다음 달 1일의 전날 = 이번 달 말일
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}
