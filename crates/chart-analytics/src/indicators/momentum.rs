//! 모멘텀 지표 (Momentum Indicators).
//!
//! 가격 모멘텀과 과매수/과매도 상태를 측정하는 지표들을 제공합니다.
//! - RSI (Relative Strength Index)
//! - KDJ (스토캐스틱 기반, K/D/J 3선)

use serde::{Deserialize, Serialize};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// KDJ 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KdjParams {
    /// RSV 계산 기간 (기본: 9).
    pub fastk_period: usize,
    /// K선 평활 기간 (기본: 3).
    pub slowk_period: usize,
    /// D선 평활 기간 (기본: 3).
    pub slowd_period: usize,
}

impl Default for KdjParams {
    fn default() -> Self {
        Self {
            fastk_period: 9,
            slowk_period: 3,
            slowd_period: 3,
        }
    }
}

/// KDJ 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KdjResult {
    /// K선 (RSV의 이동평균).
    pub k: f64,
    /// D선 (K의 이동평균).
    pub d: f64,
    /// J선 (3K - 2D, 0-100 범위를 벗어날 수 있음).
    pub j: f64,
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI (Relative Strength Index) 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS))
    /// RS = 평균 상승폭 / 평균 하락폭
    ///
    /// Wilder 평활 방식을 사용합니다: 첫 평균은 최초 period개
    /// 상승/하락폭의 단순 평균이며, 이후는
    /// avg = (이전 avg × (period - 1) + 현재값) / period 로 이어집니다.
    /// 평균 하락폭이 0이면 RSI는 100입니다.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터 (종가)
    /// * `params` - RSI 파라미터
    ///
    /// # 반환
    /// 각 시점의 RSI 값 (첫 차분이 필요하므로 앞 period개는 NaN)
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> Vec<f64> {
        let period = params.period;
        let mut result = vec![f64::NAN; prices.len()];
        if period == 0 || prices.len() < period + 1 {
            return result;
        }

        // 첫 평균: 최초 period개 차분의 단순 평균
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=period {
            let delta = prices[i] - prices[i - 1];
            if delta > 0.0 {
                avg_gain += delta;
            } else {
                avg_loss += -delta;
            }
        }
        avg_gain /= period as f64;
        avg_loss /= period as f64;
        result[period] = rsi_value(avg_gain, avg_loss);

        // 이후는 Wilder 평활
        for i in (period + 1)..prices.len() {
            let delta = prices[i] - prices[i - 1];
            let (gain, loss) = if delta > 0.0 { (delta, 0.0) } else { (0.0, -delta) };
            avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
            avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
            result[i] = rsi_value(avg_gain, avg_loss);
        }

        result
    }

    /// KDJ 계산.
    ///
    /// RSV = (종가 - N일 최저가) / (N일 최고가 - N일 최저가) × 100
    /// K = SMA(RSV, slowk), D = SMA(K, slowd), J = 3K - 2D
    ///
    /// 구간의 최고가와 최저가가 같아 분모가 0이면 RSV는 0으로
    /// 정의합니다. J는 0-100 범위를 벗어날 수 있습니다.
    ///
    /// # 인자
    /// * `high` - 고가 데이터
    /// * `low` - 저가 데이터
    /// * `close` - 종가 데이터
    /// * `params` - KDJ 파라미터
    ///
    /// # 반환
    /// 각 시점의 K, D, J 값
    pub fn kdj(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
        params: KdjParams,
    ) -> Vec<KdjResult> {
        let len = high.len().min(low.len()).min(close.len());
        let fastk = params.fastk_period;

        let mut rsv = vec![f64::NAN; len];
        if fastk >= 1 {
            for i in (fastk - 1)..len {
                let start = i + 1 - fastk;
                let highest = high[start..=i].iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let lowest = low[start..=i].iter().copied().fold(f64::INFINITY, f64::min);
                let range = highest - lowest;
                rsv[i] = if range == 0.0 {
                    0.0
                } else {
                    (close[i] - lowest) / range * 100.0
                };
            }
        }

        let k = rolling_mean(&rsv, params.slowk_period);
        let d = rolling_mean(&k, params.slowd_period);

        (0..len)
            .map(|i| KdjResult {
                k: k[i],
                d: d[i],
                // 어느 한쪽이 NaN이면 J도 NaN
                j: 3.0 * k[i] - 2.0 * d[i],
            })
            .collect()
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// NaN 프리픽스를 건너뛰는 롤링 평균.
///
/// 입력의 앞쪽 NaN 구간(워밍업)을 지나 처음 정의된 위치부터
/// period 크기의 구간 평균을 계산합니다.
fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if period == 0 {
        return result;
    }
    let Some(first) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };
    let defined = &values[first..];
    if defined.len() < period {
        return result;
    }

    for i in (period - 1)..defined.len() {
        let window = &defined[i + 1 - period..=i];
        result[first + i] = window.iter().sum::<f64>() / period as f64;
    }

    result
}
