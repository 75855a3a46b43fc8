//! 변동성 지표 (Volatility Indicators).
//!
//! 가격 변동성을 측정하는 지표를 제공합니다.
//! - Bollinger Bands (볼린저 밴드)

use serde::{Deserialize, Serialize};

/// 볼린저 밴드 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsParams {
    /// 이동평균 기간 (기본: 20).
    pub period: usize,
    /// 상단 밴드 표준편차 배수 (기본: 2.0).
    pub nbdev_up: f64,
    /// 하단 밴드 표준편차 배수 (기본: 2.0).
    pub nbdev_down: f64,
}

impl Default for BollingerBandsParams {
    fn default() -> Self {
        Self {
            period: 20,
            nbdev_up: 2.0,
            nbdev_down: 2.0,
        }
    }
}

/// 볼린저 밴드 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerBandsResult {
    /// 상단 밴드 (MA + k × σ).
    pub upper: f64,
    /// 중간 밴드 (이동평균).
    pub middle: f64,
    /// 하단 밴드 (MA - k × σ).
    pub lower: f64,
}

/// 변동성 지표 계산기.
#[derive(Debug, Default)]
pub struct VolatilityIndicators;

impl VolatilityIndicators {
    /// 새로운 변동성 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 볼린저 밴드 계산.
    ///
    /// 중간 밴드 = SMA(period)
    /// 상단 밴드 = 중간 + nbdev_up × σ
    /// 하단 밴드 = 중간 - nbdev_down × σ
    ///
    /// σ는 구간의 모집단 표준편차입니다.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터 (종가)
    /// * `params` - 볼린저 밴드 파라미터
    ///
    /// # 반환
    /// 각 시점의 상단, 중간, 하단 밴드 값 (앞 period-1개는 NaN)
    pub fn bollinger_bands(
        &self,
        prices: &[f64],
        params: BollingerBandsParams,
    ) -> Vec<BollingerBandsResult> {
        let period = params.period;
        let undefined = BollingerBandsResult {
            upper: f64::NAN,
            middle: f64::NAN,
            lower: f64::NAN,
        };
        let mut result = vec![undefined; prices.len()];
        if period == 0 || prices.len() < period {
            return result;
        }

        for i in (period - 1)..prices.len() {
            let window = &prices[i + 1 - period..=i];
            let mean = window.iter().sum::<f64>() / period as f64;
            let variance = window
                .iter()
                .map(|price| {
                    let diff = price - mean;
                    diff * diff
                })
                .sum::<f64>()
                / period as f64;
            let std_dev = variance.sqrt();

            result[i] = BollingerBandsResult {
                upper: mean + params.nbdev_up * std_dev,
                middle: mean,
                lower: mean - params.nbdev_down * std_dev,
            };
        }

        result
    }
}
