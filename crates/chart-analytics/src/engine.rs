//! 지표 계산 엔진.
//!
//! 파싱된 지표 요청 목록을 바 시퀀스에 순서대로 적용해 이름 붙은
//! 출력 컬럼들을 생성합니다.

use chart_core::Bar;
use chrono::NaiveDate;
use tracing::debug;

use crate::indicators::{
    BollingerBandsParams, EmaParams, KdjParams, MaType, MacdParams, MomentumCalculator,
    RsiParams, SmaParams, TrendIndicators, VolatilityIndicators, WmaParams,
};
use crate::request::IndicatorRequest;

/// 이름 붙은 출력 시리즈.
///
/// 원본 바 시퀀스와 1:1로 정렬된 날짜 축과, 삽입 순서를 유지하는
/// 이름 → 값 컬럼들의 모음입니다. 모든 컬럼은 날짜 축과 같은
/// 길이를 가집니다. 같은 이름으로 다시 삽입하면 기존 컬럼을
/// 제자리에서 덮어씁니다 (last-write-wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedSeries {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

impl NamedSeries {
    /// 주어진 날짜 축으로 빈 시리즈를 생성합니다.
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            columns: Vec::new(),
        }
    }

    /// 컬럼을 삽입합니다. 같은 이름이 이미 있으면 그 자리에서
    /// 값을 덮어씁니다.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.dates.len());
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name, values)),
        }
    }

    /// 이름으로 컬럼을 조회합니다.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// 날짜 축을 반환합니다.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 컬럼 이름들을 삽입 순서대로 반환합니다.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// (이름, 값) 쌍을 삽입 순서대로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// 시리즈 길이 (날짜 축 길이).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 날짜 축이 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// 컬럼 개수.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 모든 컬럼의 NaN을 0으로 치환합니다.
    ///
    /// 전송 형식에는 NaN이 없으므로 워밍업 구간을 0으로 인코딩합니다.
    /// 이후에는 실제 0 값과 워밍업 위치를 구분할 수 없습니다.
    fn finalize(&mut self) {
        for (_, values) in &mut self.columns {
            for value in values {
                if value.is_nan() {
                    *value = 0.0;
                }
            }
        }
    }
}

/// 통합 지표 계산기.
///
/// 추세/모멘텀/변동성 계산기를 묶어 요청 단위의 계산을 수행합니다.
#[derive(Debug, Default)]
pub struct IndicatorCalculator {
    trend: TrendIndicators,
    momentum: MomentumCalculator,
    volatility: VolatilityIndicators,
}

impl IndicatorCalculator {
    /// 새로운 지표 계산기 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 요청 목록을 순서대로 적용해 이름 붙은 시리즈를 생성합니다.
    ///
    /// - `ma` 요청은 계산 방식과 무관하게 `MA{기간}` 컬럼명을
    ///   사용합니다. 같은 기간을 요청한 나중 절이 앞선 절의 컬럼을
    ///   덮어씁니다.
    /// - 나머지 지표는 고정 컬럼명을 사용합니다: `MACD`,
    ///   `MACD_signal`, `MACD_hist`, `K`, `D`, `J`, `RSI`,
    ///   `BOLL_upper`, `BOLL_middle`, `BOLL_lower`.
    /// - 모든 요청 적용 후 워밍업 구간의 NaN은 0으로 치환됩니다.
    /// - 빈 요청 목록은 컬럼 없는 시리즈를 반환합니다.
    pub fn calculate(&self, bars: &[Bar], requests: &[IndicatorRequest]) -> NamedSeries {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let mut series = NamedSeries::new(bars.iter().map(|b| b.date).collect());

        for request in requests {
            match request {
                IndicatorRequest::Ma(req) => {
                    for &period in &req.periods {
                        let values = match req.ma_type {
                            MaType::Sma => self.trend.sma(&closes, SmaParams { period }),
                            MaType::Ema => self.trend.ema(&closes, EmaParams { period }),
                            MaType::Wma => self.trend.wma(&closes, WmaParams { period }),
                        };
                        series.insert(format!("MA{period}"), values);
                    }
                }
                IndicatorRequest::Macd(req) => {
                    let macd = self.trend.macd(
                        &closes,
                        MacdParams {
                            fast_period: req.fast_period,
                            slow_period: req.slow_period,
                            signal_period: req.signal_period,
                        },
                    );
                    series.insert("MACD", macd.iter().map(|r| r.macd).collect());
                    series.insert("MACD_signal", macd.iter().map(|r| r.signal).collect());
                    series.insert("MACD_hist", macd.iter().map(|r| r.histogram).collect());
                }
                IndicatorRequest::Kdj(req) => {
                    let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
                    let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
                    let kdj = self.momentum.kdj(
                        &highs,
                        &lows,
                        &closes,
                        KdjParams {
                            fastk_period: req.fastk_period,
                            slowk_period: req.slowk_period,
                            slowd_period: req.slowd_period,
                        },
                    );
                    series.insert("K", kdj.iter().map(|r| r.k).collect());
                    series.insert("D", kdj.iter().map(|r| r.d).collect());
                    series.insert("J", kdj.iter().map(|r| r.j).collect());
                }
                IndicatorRequest::Rsi(req) => {
                    series.insert(
                        "RSI",
                        self.momentum.rsi(&closes, RsiParams { period: req.period }),
                    );
                }
                IndicatorRequest::Boll(req) => {
                    let bands = self.volatility.bollinger_bands(
                        &closes,
                        BollingerBandsParams {
                            period: req.period,
                            nbdev_up: req.nbdev_up,
                            nbdev_down: req.nbdev_down,
                        },
                    );
                    series.insert("BOLL_upper", bands.iter().map(|b| b.upper).collect());
                    series.insert("BOLL_middle", bands.iter().map(|b| b.middle).collect());
                    series.insert("BOLL_lower", bands.iter().map(|b| b.lower).collect());
                }
            }
        }

        series.finalize();

        debug!(
            requests = requests.len(),
            columns = series.column_count(),
            rows = series.len(),
            "indicator calculation complete"
        );

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::IndicatorParser;

    fn make_bars(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64);
                Bar::new(date, close - 0.5, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect()
    }

    fn rising_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn test_ma_columns_are_type_agnostic() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(40));

        let requests = IndicatorParser::parse("ma:ema:12,26").unwrap();
        let series = calculator.calculate(&bars, &requests);

        let names: Vec<&str> = series.names().collect();
        assert_eq!(names, vec!["MA12", "MA26"]);
        assert!(series.get("EMA12").is_none());
        assert!(series.get("EMA26").is_none());
    }

    #[test]
    fn test_ma_last_write_wins_on_same_period() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(40));

        let requests = IndicatorParser::parse("ma:sma:20;ma:ema:20").unwrap();
        let series = calculator.calculate(&bars, &requests);

        // MA20 컬럼은 하나만 남고, 값은 EMA(20)여야 함
        assert_eq!(series.column_count(), 1);

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let trend = TrendIndicators::new();
        let mut expected = trend.ema(&closes, EmaParams { period: 20 });
        for v in &mut expected {
            if v.is_nan() {
                *v = 0.0;
            }
        }
        assert_eq!(series.get("MA20").unwrap(), expected.as_slice());
    }

    #[test]
    fn test_fixed_column_names() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(60));

        let requests =
            IndicatorParser::parse("macd:12-26-9;kdj:9-3-3;rsi:14;boll:20-2.0").unwrap();
        let series = calculator.calculate(&bars, &requests);

        let names: Vec<&str> = series.names().collect();
        assert_eq!(
            names,
            vec![
                "MACD",
                "MACD_signal",
                "MACD_hist",
                "K",
                "D",
                "J",
                "RSI",
                "BOLL_upper",
                "BOLL_middle",
                "BOLL_lower",
            ]
        );
    }

    #[test]
    fn test_warmup_positions_become_zero() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(30));

        let requests = IndicatorParser::parse("ma:sma:5").unwrap();
        let series = calculator.calculate(&bars, &requests);

        let ma5 = series.get("MA5").unwrap();
        // 워밍업 구간(앞 4개)은 0으로 인코딩
        assert_eq!(&ma5[..4], &[0.0, 0.0, 0.0, 0.0]);
        assert!(ma5[4] > 0.0);
        assert!(ma5.iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn test_empty_requests_yield_empty_series() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(10));

        let series = calculator.calculate(&bars, &[]);

        assert_eq!(series.column_count(), 0);
        assert_eq!(series.len(), 10);
    }

    #[test]
    fn test_series_alignment_with_bars() {
        let calculator = IndicatorCalculator::new();
        let bars = make_bars(&rising_closes(25));

        let requests = IndicatorParser::parse("rsi:14").unwrap();
        let series = calculator.calculate(&bars, &requests);

        assert_eq!(series.len(), bars.len());
        assert_eq!(series.dates()[0], bars[0].date);
        assert_eq!(series.dates()[24], bars[24].date);
        assert_eq!(series.get("RSI").unwrap().len(), bars.len());
    }

    #[test]
    fn test_named_series_overwrite_keeps_position() {
        let mut series = NamedSeries::new(vec![
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        ]);

        series.insert("A", vec![1.0, 2.0]);
        series.insert("B", vec![3.0, 4.0]);
        series.insert("A", vec![5.0, 6.0]);

        let names: Vec<&str> = series.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(series.get("A").unwrap(), &[5.0, 6.0]);
    }
}
