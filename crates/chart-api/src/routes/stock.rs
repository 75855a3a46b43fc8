//! 주가 데이터 endpoint.
//!
//! 심볼별 OHLCV 데이터와 요청된 기술적 지표를 반환합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/stock/{symbol}` - 주가 데이터 + 지표 조회
//! - `GET /api/v1/symbols` - 사용 가능한 심볼 목록

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chart_analytics::{aggregate, IndicatorCalculator, IndicatorParser, NamedSeries};
use chart_core::{Bar, ChartError, Interval};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{chart_error_response, error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 상승봉 거래량 색 (반투명 빨강).
const VOLUME_UP_COLOR: &str = "#ef535080";
/// 하락봉 거래량 색 (반투명 청록).
const VOLUME_DOWN_COLOR: &str = "#26a69a80";

// ==================== 요청/응답 타입 ====================

/// 주가 데이터 조회 쿼리.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StockQuery {
    /// 시작일 (YYYY-MM-DD, 포함)
    pub start_date: Option<NaiveDate>,
    /// 종료일 (YYYY-MM-DD, 포함)
    pub end_date: Option<NaiveDate>,
    /// 시간 간격 (daily/weekly/monthly, 기본 daily)
    pub interval: Option<String>,
    /// 지표 설정 문자열 (예: "ma:sma:5,20,60;kdj:9-3-3")
    pub indicators: Option<String>,
}

/// K선 데이터 포인트.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CandleData {
    /// 날짜
    pub time: NaiveDate,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
}

/// 거래량 데이터 포인트.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VolumeData {
    /// 날짜
    pub time: NaiveDate,
    /// 거래량
    pub value: f64,
    /// 표시 색상 (상승/하락)
    pub color: String,
}

/// 지표 값 데이터 포인트.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ValueData {
    /// 날짜
    pub time: NaiveDate,
    /// 지표 값
    pub value: f64,
}

/// 주가 데이터 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StockDataResponse {
    /// 심볼
    pub symbol: String,
    /// 적용된 시간 간격
    pub interval: Interval,
    /// K선 데이터
    pub candlestick: Vec<CandleData>,
    /// 거래량 데이터
    pub volume: Vec<VolumeData>,
    /// 컬럼명 → (날짜, 값) 시리즈. 값이 정확히 0인 포인트는
    /// 워밍업 인코딩과 함께 제외됩니다.
    pub indicators: BTreeMap<String, Vec<ValueData>>,
}

// ==================== Handler ====================

/// 주가 데이터 + 지표 조회.
///
/// `indicators` 파라미터가 없으면 지표 없이 OHLCV만 반환합니다.
/// 날짜 범위 필터는 집계 전의 일봉에 적용됩니다.
#[utoipa::path(
    get,
    path = "/api/v1/stock/{symbol}",
    params(
        ("symbol" = String, Path, description = "심볼 (예: 000155.sz)"),
        StockQuery,
    ),
    responses(
        (status = 200, description = "주가 데이터와 지표", body = StockDataResponse),
        (status = 400, description = "잘못된 쿼리 파라미터", body = ApiErrorResponse),
        (status = 404, description = "심볼 또는 데이터 없음", body = ApiErrorResponse),
    ),
    tag = "stock"
)]
pub async fn get_stock_data(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<StockDataResponse>> {
    // 시간 간격 해석
    let interval = match query.interval.as_deref() {
        Some(token) => token.parse::<Interval>().map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, "UNSUPPORTED_INTERVAL", e.to_string())
        })?,
        None => Interval::Daily,
    };

    // 지표 설정 해석 (없으면 빈 목록 — 기본 지표를 채우지 않음)
    let requests = match query.indicators.as_deref() {
        Some(raw) => IndicatorParser::parse(raw).map_err(|e| {
            error_response(StatusCode::BAD_REQUEST, "INVALID_INDICATORS", e.to_string())
        })?,
        None => Vec::new(),
    };

    // 일봉 로드 + 날짜 범위 필터 (양 끝 포함)
    let mut bars = state
        .store
        .load(&symbol)
        .await
        .map_err(|e| chart_error_response(ChartError::from(e)))?;

    if let Some(start) = query.start_date {
        bars.retain(|b| b.date >= start);
    }
    if let Some(end) = query.end_date {
        bars.retain(|b| b.date <= end);
    }
    if bars.is_empty() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            "NO_DATA",
            format!("조회 구간에 데이터가 없습니다: {symbol}"),
        ));
    }

    // 집계 후 지표 계산
    let bars = aggregate(&bars, interval);
    let series = IndicatorCalculator::new().calculate(&bars, &requests);

    Ok(Json(build_response(symbol, interval, &bars, &series)))
}

/// 사용 가능한 심볼 목록.
#[utoipa::path(
    get,
    path = "/api/v1/symbols",
    responses(
        (status = 200, description = "심볼 목록", body = Vec<String>),
    ),
    tag = "stock"
)]
pub async fn list_symbols(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let symbols = state
        .store
        .list_symbols()
        .await
        .map_err(|e| chart_error_response(ChartError::from(e)))?;

    Ok(Json(symbols))
}

/// 응답 본문 구성.
///
/// 지표 시리즈에서는 값이 정확히 0인 포인트를 걸러냅니다. 워밍업
/// 구간이 0으로 인코딩되므로 실제 0 값도 함께 빠집니다.
fn build_response(
    symbol: String,
    interval: Interval,
    bars: &[Bar],
    series: &NamedSeries,
) -> StockDataResponse {
    let candlestick = bars
        .iter()
        .map(|b| CandleData {
            time: b.date,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
        })
        .collect();

    let volume = bars
        .iter()
        .map(|b| VolumeData {
            time: b.date,
            value: b.volume,
            color: if b.is_bullish() {
                VOLUME_UP_COLOR
            } else {
                VOLUME_DOWN_COLOR
            }
            .to_string(),
        })
        .collect();

    let dates = series.dates();
    let indicators = series
        .iter()
        .map(|(name, values)| {
            let points = dates
                .iter()
                .zip(values)
                .filter(|(_, value)| **value != 0.0)
                .map(|(date, value)| ValueData {
                    time: *date,
                    value: *value,
                })
                .collect();
            (name.to_string(), points)
        })
        .collect();

    StockDataResponse {
        symbol,
        interval,
        candlestick,
        volume,
        indicators,
    }
}

/// 주가 데이터 라우터 생성.
pub fn stock_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stock/{symbol}", get(get_stock_data))
        .route("/symbols", get(list_symbols))
}
