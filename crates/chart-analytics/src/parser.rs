//! 지표 설정 문자열 파서.
//!
//! URL 쿼리 파라미터로 전달되는 지표 설정 문자열을 해석해
//! `IndicatorRequest` 목록으로 변환합니다.
//!
//! # 지원 형식
//!
//! - MA: `ma:sma:5,20,60` (방식:기간 목록) 또는 `ma:5,20,60` (기본 sma)
//! - KDJ: `kdj:9-3-3` (fastk-slowk-slowd, 하이픈 구분)
//! - MACD: `macd:12-26-9` (fast-slow-signal)
//! - RSI: `rsi:14` (단일 기간)
//! - BOLL: `boll:20-2.0` (period-nbdev)
//!
//! 절은 `;`로 구분하며, 문자열에 `;`가 전혀 없으면 `|`를 구분자로
//! 사용합니다 (두 구분자를 한 호출에서 혼용하지 않습니다).
//! 빈 문자열 또는 공백뿐인 문자열은 빈 목록으로 해석합니다.
//!
//! # 예시
//!
//! ```
//! use chart_analytics::parser::IndicatorParser;
//!
//! let requests = IndicatorParser::parse("ma:sma:5,20,60;kdj:9-3-3;rsi:14").unwrap();
//! assert_eq!(requests.len(), 3);
//! ```

use thiserror::Error;

use crate::indicators::MaType;
use crate::request::{
    BollRequest, IndicatorRequest, KdjRequest, MaRequest, MacdRequest, RsiRequest,
};

/// 지표 설정 문자열 파싱 에러.
///
/// 절 내부에서 발생한 실패는 어느 지표의 어떤 파라미터 문자열이
/// 문제였는지 함께 담아 올라갑니다.
#[derive(Debug, PartialEq, Error)]
pub enum ConfigParseError {
    /// `id:params` 형식이 아닌 절
    #[error("잘못된 지표 형식: '{0}' ('id:params' 형식이어야 합니다)")]
    InvalidClause(String),

    /// 절 내부 파싱 실패
    #[error("'{id}' 파라미터 '{params}' 해석 실패: {source}")]
    Clause {
        /// 지표 id
        id: String,
        /// 원본 파라미터 부분 문자열
        params: String,
        /// 실패 원인
        #[source]
        source: ClauseError,
    },
}

/// 절 단위 파싱 실패 원인.
#[derive(Debug, PartialEq, Error)]
pub enum ClauseError {
    /// 알 수 없는 지표 id
    #[error("알 수 없는 지표: {0}")]
    UnknownIndicator(String),

    /// 알 수 없는 MA 유형
    #[error("알 수 없는 MA 유형: {0} (sma, ema, wma 중 하나여야 합니다)")]
    InvalidMaType(String),

    /// 파라미터 개수 불일치
    #[error("{indicator}에는 {expected}개의 파라미터가 필요합니다 (입력 {actual}개)")]
    Arity {
        /// 지표 이름
        indicator: &'static str,
        /// 기대 파라미터 수
        expected: usize,
        /// 실제 파라미터 수
        actual: usize,
    },

    /// 기간 파싱 실패
    #[error("유효하지 않은 기간: '{0}' (양의 정수여야 합니다)")]
    InvalidPeriod(String),

    /// 표준편차 배수 파싱 실패
    #[error("유효하지 않은 표준편차 배수: '{0}' (0 이상의 실수여야 합니다)")]
    InvalidBandWidth(String),
}

/// 지표 설정 파서.
pub struct IndicatorParser;

impl IndicatorParser {
    /// 지표 설정 문자열을 파싱합니다.
    ///
    /// 실패는 원자적입니다: 어느 절이든 파싱에 실패하면 전체가
    /// 실패하며 부분 결과를 반환하지 않습니다.
    pub fn parse(input: &str) -> Result<Vec<IndicatorRequest>, ConfigParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        // 세미콜론이 하나라도 있으면 `;`, 아니면 `|`를 구분자로 사용
        let separator = if trimmed.contains(';') { ';' } else { '|' };

        let mut requests = Vec::new();
        for clause in trimmed.split(separator) {
            let clause = clause.trim();
            if clause.is_empty() {
                continue;
            }

            let Some((id_raw, params_raw)) = clause.split_once(':') else {
                return Err(ConfigParseError::InvalidClause(clause.to_string()));
            };
            let id = id_raw.trim().to_lowercase();
            let params = params_raw.trim();

            let wrap = |source: ClauseError| ConfigParseError::Clause {
                id: id.clone(),
                params: params.to_string(),
                source,
            };

            let request = match id.as_str() {
                "ma" => Self::parse_ma(params).map_err(wrap)?,
                "kdj" => Self::parse_kdj(params).map_err(wrap)?,
                "macd" => Self::parse_macd(params).map_err(wrap)?,
                "rsi" => Self::parse_rsi(params).map_err(wrap)?,
                "boll" => Self::parse_boll(params).map_err(wrap)?,
                _ => return Err(wrap(ClauseError::UnknownIndicator(id.clone()))),
            };
            requests.push(request);
        }

        Ok(requests)
    }

    /// MA 파라미터 파싱.
    ///
    /// `sma:5,20,60` 형식 또는 유형을 생략한 구형 `5,20,60` 형식
    /// (기본 SMA)을 지원합니다.
    fn parse_ma(params: &str) -> Result<IndicatorRequest, ClauseError> {
        let (ma_type, periods_raw) = match params.split_once(':') {
            Some((type_raw, rest)) => {
                let type_token = type_raw.trim().to_lowercase();
                let ma_type = type_token
                    .parse::<MaType>()
                    .map_err(|_| ClauseError::InvalidMaType(type_token.clone()))?;
                (ma_type, rest)
            }
            None => (MaType::Sma, params),
        };

        let periods = periods_raw
            .split(',')
            .map(|p| parse_period(p.trim()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(IndicatorRequest::Ma(MaRequest { ma_type, periods }))
    }

    /// KDJ 파라미터 파싱: `9-3-3` → fastk/slowk/slowd.
    fn parse_kdj(params: &str) -> Result<IndicatorRequest, ClauseError> {
        let parts: Vec<&str> = params.split('-').collect();
        if parts.len() != 3 {
            return Err(ClauseError::Arity {
                indicator: "KDJ",
                expected: 3,
                actual: parts.len(),
            });
        }

        Ok(IndicatorRequest::Kdj(KdjRequest {
            fastk_period: parse_period(parts[0].trim())?,
            slowk_period: parse_period(parts[1].trim())?,
            slowd_period: parse_period(parts[2].trim())?,
        }))
    }

    /// MACD 파라미터 파싱: `12-26-9` → fast/slow/signal.
    fn parse_macd(params: &str) -> Result<IndicatorRequest, ClauseError> {
        let parts: Vec<&str> = params.split('-').collect();
        if parts.len() != 3 {
            return Err(ClauseError::Arity {
                indicator: "MACD",
                expected: 3,
                actual: parts.len(),
            });
        }

        Ok(IndicatorRequest::Macd(MacdRequest {
            fast_period: parse_period(parts[0].trim())?,
            slow_period: parse_period(parts[1].trim())?,
            signal_period: parse_period(parts[2].trim())?,
        }))
    }

    /// RSI 파라미터 파싱: `14` → 단일 기간.
    fn parse_rsi(params: &str) -> Result<IndicatorRequest, ClauseError> {
        Ok(IndicatorRequest::Rsi(RsiRequest {
            period: parse_period(params)?,
        }))
    }

    /// BOLL 파라미터 파싱: `20-2.0` → period와 배수.
    ///
    /// 상단/하단 배수를 따로 지정하는 문법은 없으므로 둘 다 같은
    /// 값으로 채웁니다. 세 번째 이후 필드는 무시합니다.
    fn parse_boll(params: &str) -> Result<IndicatorRequest, ClauseError> {
        let parts: Vec<&str> = params.split('-').collect();
        if parts.len() < 2 {
            return Err(ClauseError::Arity {
                indicator: "BOLL",
                expected: 2,
                actual: parts.len(),
            });
        }

        let period = parse_period(parts[0].trim())?;
        let nbdev = parse_band_width(parts[1].trim())?;

        Ok(IndicatorRequest::Boll(BollRequest {
            period,
            nbdev_up: nbdev,
            nbdev_down: nbdev,
        }))
    }
}

/// 양의 정수 기간 파싱.
fn parse_period(raw: &str) -> Result<usize, ClauseError> {
    match raw.parse::<usize>() {
        Ok(period) if period >= 1 => Ok(period),
        _ => Err(ClauseError::InvalidPeriod(raw.to_string())),
    }
}

/// 0 이상의 표준편차 배수 파싱.
fn parse_band_width(raw: &str) -> Result<f64, ClauseError> {
    match raw.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.is_finite() => Ok(value),
        _ => Err(ClauseError::InvalidBandWidth(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_is_empty_list() {
        assert_eq!(IndicatorParser::parse("").unwrap(), vec![]);
        assert_eq!(IndicatorParser::parse("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_ma_with_type() {
        let requests = IndicatorParser::parse("ma:ema:12,26").unwrap();

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].indicator_id(), "ma");
        assert_eq!(
            requests[0],
            IndicatorRequest::Ma(MaRequest {
                ma_type: MaType::Ema,
                periods: vec![12, 26],
            })
        );
    }

    #[test]
    fn test_parse_ma_default_type_is_sma() {
        let requests = IndicatorParser::parse("ma:5,20,60").unwrap();

        assert_eq!(
            requests[0],
            IndicatorRequest::Ma(MaRequest {
                ma_type: MaType::Sma,
                periods: vec![5, 20, 60],
            })
        );
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let requests = IndicatorParser::parse("MA:WMA:10;RSI:14").unwrap();

        assert_eq!(
            requests[0],
            IndicatorRequest::Ma(MaRequest {
                ma_type: MaType::Wma,
                periods: vec![10],
            })
        );
        assert_eq!(requests[1], IndicatorRequest::Rsi(RsiRequest { period: 14 }));
    }

    #[test]
    fn test_parse_multiple_clauses_in_order() {
        let requests = IndicatorParser::parse("kdj:9-3-3;rsi:14").unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0],
            IndicatorRequest::Kdj(KdjRequest {
                fastk_period: 9,
                slowk_period: 3,
                slowd_period: 3,
            })
        );
        assert_eq!(requests[1], IndicatorRequest::Rsi(RsiRequest { period: 14 }));
    }

    #[test]
    fn test_parse_pipe_separator_fallback() {
        let requests = IndicatorParser::parse("macd:12-26-9|boll:20-2.5").unwrap();

        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0],
            IndicatorRequest::Macd(MacdRequest {
                fast_period: 12,
                slow_period: 26,
                signal_period: 9,
            })
        );
        assert_eq!(
            requests[1],
            IndicatorRequest::Boll(BollRequest {
                period: 20,
                nbdev_up: 2.5,
                nbdev_down: 2.5,
            })
        );
    }

    #[test]
    fn test_parse_skips_empty_clauses() {
        let requests = IndicatorParser::parse("rsi:14;;kdj:9-3-3;").unwrap();
        assert_eq!(requests.len(), 2);
    }

    #[test]
    fn test_parse_missing_colon_fails() {
        let err = IndicatorParser::parse("rsi14").unwrap_err();
        assert_eq!(err, ConfigParseError::InvalidClause("rsi14".to_string()));
    }

    #[test]
    fn test_parse_unknown_indicator_fails() {
        let err = IndicatorParser::parse("obv:14").unwrap_err();
        match err {
            ConfigParseError::Clause { id, source, .. } => {
                assert_eq!(id, "obv");
                assert_eq!(source, ClauseError::UnknownIndicator("obv".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_invalid_ma_type_fails() {
        let err = IndicatorParser::parse("ma:hma:20").unwrap_err();
        match err {
            ConfigParseError::Clause { id, params, source } => {
                assert_eq!(id, "ma");
                assert_eq!(params, "hma:20");
                assert_eq!(source, ClauseError::InvalidMaType("hma".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_kdj_arity_error() {
        let err = IndicatorParser::parse("kdj:9-3").unwrap_err();
        match err {
            ConfigParseError::Clause { source, .. } => {
                assert_eq!(
                    source,
                    ClauseError::Arity {
                        indicator: "KDJ",
                        expected: 3,
                        actual: 2,
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_positive_periods() {
        assert!(IndicatorParser::parse("rsi:0").is_err());
        assert!(IndicatorParser::parse("rsi:-5").is_err());
        assert!(IndicatorParser::parse("rsi:abc").is_err());
        assert!(IndicatorParser::parse("ma:sma:5,x").is_err());
    }

    #[test]
    fn test_parse_boll_requires_two_fields() {
        let err = IndicatorParser::parse("boll:20").unwrap_err();
        match err {
            ConfigParseError::Clause { source, .. } => {
                assert_eq!(
                    source,
                    ClauseError::Arity {
                        indicator: "BOLL",
                        expected: 2,
                        actual: 1,
                    }
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_boll_ignores_extra_fields() {
        let requests = IndicatorParser::parse("boll:20-2.0-9.9").unwrap();
        assert_eq!(
            requests[0],
            IndicatorRequest::Boll(BollRequest {
                period: 20,
                nbdev_up: 2.0,
                nbdev_down: 2.0,
            })
        );
    }

    #[test]
    fn test_parse_error_message_carries_id_and_params() {
        let err = IndicatorParser::parse("kdj:9-3").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("kdj"));
        assert!(message.contains("9-3"));
    }
}
