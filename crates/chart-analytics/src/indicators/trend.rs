//! 추세 지표 (Trend Indicators).
//!
//! 이동평균 기반의 추세 지표들을 제공합니다.
//! - SMA (Simple Moving Average)
//! - EMA (Exponential Moving Average)
//! - WMA (Weighted Moving Average)
//! - MACD (Moving Average Convergence Divergence)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 이동평균 계산 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaType {
    /// 단순 이동평균
    Sma,
    /// 지수 이동평균
    Ema,
    /// 가중 이동평균
    Wma,
}

impl fmt::Display for MaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MaType::Sma => "sma",
            MaType::Ema => "ema",
            MaType::Wma => "wma",
        })
    }
}

impl FromStr for MaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sma" => Ok(MaType::Sma),
            "ema" => Ok(MaType::Ema),
            "wma" => Ok(MaType::Wma),
            _ => Err(format!("Unknown MA type: {}", s)),
        }
    }
}

/// SMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for SmaParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// EMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for EmaParams {
    fn default() -> Self {
        Self { period: 12 }
    }
}

/// WMA 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WmaParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for WmaParams {
    fn default() -> Self {
        Self { period: 10 }
    }
}

/// MACD 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdParams {
    /// 단기 EMA 기간 (기본: 12).
    pub fast_period: usize,
    /// 장기 EMA 기간 (기본: 26).
    pub slow_period: usize,
    /// 시그널 라인 기간 (기본: 9).
    pub signal_period: usize,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

/// MACD 결과.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacdResult {
    /// MACD 라인 (DIF, 단기 EMA - 장기 EMA).
    pub macd: f64,
    /// 시그널 라인 (DEA, DIF의 EMA).
    pub signal: f64,
    /// 히스토그램 ((DIF - DEA) × 2).
    pub histogram: f64,
}

/// 추세 지표 계산기.
#[derive(Debug, Default)]
pub struct TrendIndicators;

impl TrendIndicators {
    /// 새로운 추세 지표 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// 단순 이동평균 (SMA) 계산.
    ///
    /// SMA = (P1 + P2 + ... + Pn) / n
    ///
    /// # 인자
    /// * `prices` - 가격 데이터
    /// * `params` - SMA 파라미터
    ///
    /// # 반환
    /// 각 시점의 SMA 값 (앞 period-1개는 NaN)
    pub fn sma(&self, prices: &[f64], params: SmaParams) -> Vec<f64> {
        let period = params.period;
        let mut result = vec![f64::NAN; prices.len()];
        if period == 0 || prices.len() < period {
            return result;
        }

        for i in (period - 1)..prices.len() {
            let window = &prices[i + 1 - period..=i];
            result[i] = window.iter().sum::<f64>() / period as f64;
        }

        result
    }

    /// 지수 이동평균 (EMA) 계산.
    ///
    /// EMA = (현재가 × k) + (이전 EMA × (1 - k))
    /// k = 2 / (period + 1)
    ///
    /// 첫 EMA는 같은 시점의 SMA 값으로 시작합니다.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터
    /// * `params` - EMA 파라미터
    ///
    /// # 반환
    /// 각 시점의 EMA 값 (앞 period-1개는 NaN)
    pub fn ema(&self, prices: &[f64], params: EmaParams) -> Vec<f64> {
        let period = params.period;
        let mut result = vec![f64::NAN; prices.len()];
        if period == 0 || prices.len() < period {
            return result;
        }

        let k = 2.0 / (period as f64 + 1.0);

        // 첫 EMA는 SMA로 시작
        let seed = prices[..period].iter().sum::<f64>() / period as f64;
        result[period - 1] = seed;

        let mut prev = seed;
        for i in period..prices.len() {
            let ema = prices[i] * k + prev * (1.0 - k);
            result[i] = ema;
            prev = ema;
        }

        result
    }

    /// 가중 이동평균 (WMA) 계산.
    ///
    /// WMA = (1×P1 + 2×P2 + ... + n×Pn) / (1 + 2 + ... + n)
    ///
    /// 최근 값일수록 큰 선형 가중치를 부여합니다 (가장 최근 값의
    /// 가중치가 period).
    ///
    /// # 인자
    /// * `prices` - 가격 데이터
    /// * `params` - WMA 파라미터
    ///
    /// # 반환
    /// 각 시점의 WMA 값 (앞 period-1개는 NaN)
    pub fn wma(&self, prices: &[f64], params: WmaParams) -> Vec<f64> {
        let period = params.period;
        let mut result = vec![f64::NAN; prices.len()];
        if period == 0 || prices.len() < period {
            return result;
        }

        let denominator = (period * (period + 1)) as f64 / 2.0;

        for i in (period - 1)..prices.len() {
            let window = &prices[i + 1 - period..=i];
            let weighted: f64 = window
                .iter()
                .enumerate()
                .map(|(offset, price)| price * (offset + 1) as f64)
                .sum();
            result[i] = weighted / denominator;
        }

        result
    }

    /// MACD 계산.
    ///
    /// DIF (MACD 라인) = 단기 EMA - 장기 EMA
    /// DEA (시그널 라인) = DIF의 EMA
    /// 히스토그램 = (DIF - DEA) × 2
    ///
    /// DIF는 장기 EMA가 정의되는 시점부터, DEA와 히스토그램은
    /// 거기에 시그널 기간이 더 지난 시점부터 정의됩니다.
    ///
    /// # 인자
    /// * `prices` - 가격 데이터
    /// * `params` - MACD 파라미터
    ///
    /// # 반환
    /// 각 시점의 MACD, 시그널, 히스토그램 값
    pub fn macd(&self, prices: &[f64], params: MacdParams) -> Vec<MacdResult> {
        let fast = self.ema(
            prices,
            EmaParams {
                period: params.fast_period,
            },
        );
        let slow = self.ema(
            prices,
            EmaParams {
                period: params.slow_period,
            },
        );

        // DIF = 단기 EMA - 장기 EMA (둘 중 하나라도 NaN이면 NaN)
        let dif: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();

        // DEA = DIF의 EMA. 정의된 구간만 압축해 계산한 뒤 원위치에 전개
        let defined: Vec<f64> = dif.iter().copied().filter(|v| !v.is_nan()).collect();
        let signal_compact = self.ema(
            &defined,
            EmaParams {
                period: params.signal_period,
            },
        );

        let mut result = Vec::with_capacity(prices.len());
        let mut defined_idx = 0usize;
        for &macd in &dif {
            if macd.is_nan() {
                result.push(MacdResult {
                    macd: f64::NAN,
                    signal: f64::NAN,
                    histogram: f64::NAN,
                });
            } else {
                let signal = signal_compact
                    .get(defined_idx)
                    .copied()
                    .unwrap_or(f64::NAN);
                result.push(MacdResult {
                    macd,
                    signal,
                    histogram: (macd - signal) * 2.0,
                });
                defined_idx += 1;
            }
        }

        result
    }
}
