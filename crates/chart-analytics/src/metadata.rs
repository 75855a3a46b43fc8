//! 지표 메타데이터 레지스트리.
//!
//! 차트 클라이언트가 설정 패널을 자동 생성할 때 사용하는 지표별
//! 파라미터 스키마를 제공합니다. 지표 집합은 고정되어 있으므로
//! 런타임 등록 없이 정적 테이블로 관리합니다.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// 파라미터 컨트롤 유형.
///
/// 프런트엔드가 어떤 폼 컨트롤을 렌더링할지 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum ParameterType {
    /// 숫자 입력
    Number,
    /// 색상 선택
    Color,
    /// 드롭다운
    Select,
    /// 체크박스
    Boolean,
    /// 다중 기간 선택 (MA 전용)
    MultiPeriod,
}

/// 드롭다운/다중 선택 옵션.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct ParameterOption {
    /// 옵션 값
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Object))]
    pub value: Value,
    /// 표시 라벨
    pub label: String,
}

/// 지표 파라미터 정의.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct IndicatorParameter {
    /// 파라미터 이름 (코드에서 참조하는 키)
    pub name: String,
    /// 컨트롤 유형
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// 표시 라벨
    pub label: String,
    /// 기본값
    #[cfg_attr(feature = "utoipa-support", schema(value_type = Object))]
    pub default: Value,
    /// 숫자형 최소값
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// 숫자형 최대값
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// 숫자형 증감 단위
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// 드롭다운 옵션 목록
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ParameterOption>>,
    /// 파라미터 설명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 지표 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub enum IndicatorCategory {
    /// 주가 차트에 겹쳐 그리는 지표
    Overlay,
    /// 별도 영역의 오실레이터 지표
    Oscillator,
    /// 거래량 지표
    Volume,
}

impl FromStr for IndicatorCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overlay" => Ok(IndicatorCategory::Overlay),
            "oscillator" => Ok(IndicatorCategory::Oscillator),
            "volume" => Ok(IndicatorCategory::Volume),
            _ => Err(format!("알 수 없는 지표 분류: {}", s)),
        }
    }
}

/// 지표 메타데이터.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct IndicatorMetadata {
    /// 지표 고유 id
    pub id: String,
    /// 표시 이름
    pub name: String,
    /// 지표 분류
    pub category: IndicatorCategory,
    /// 지표 설명
    pub description: String,
    /// 프런트엔드 표시 템플릿
    pub display_template: String,
    /// 다중 인스턴스 지원 여부
    pub supports_multiple: bool,
    /// 파라미터 목록
    pub parameters: Vec<IndicatorParameter>,
}

static REGISTRY: Lazy<Vec<IndicatorMetadata>> = Lazy::new(|| {
    vec![
        ma_metadata(),
        kdj_metadata(),
        macd_metadata(),
        rsi_metadata(),
        boll_metadata(),
    ]
});

/// 모든 지표 메타데이터.
pub fn all_indicators() -> &'static [IndicatorMetadata] {
    &REGISTRY
}

/// id로 지표 메타데이터를 조회합니다.
pub fn get_indicator(indicator_id: &str) -> Option<&'static IndicatorMetadata> {
    REGISTRY.iter().find(|m| m.id == indicator_id)
}

/// 분류별 지표 메타데이터.
pub fn indicators_by_category(category: IndicatorCategory) -> Vec<&'static IndicatorMetadata> {
    REGISTRY.iter().filter(|m| m.category == category).collect()
}

fn number(
    name: &str,
    label: &str,
    default: i64,
    min: f64,
    max: f64,
    description: &str,
) -> IndicatorParameter {
    IndicatorParameter {
        name: name.to_string(),
        kind: ParameterType::Number,
        label: label.to_string(),
        default: json!(default),
        min: Some(min),
        max: Some(max),
        step: Some(1.0),
        options: None,
        description: Some(description.to_string()),
    }
}

fn color(name: &str, label: &str, default: &str) -> IndicatorParameter {
    IndicatorParameter {
        name: name.to_string(),
        kind: ParameterType::Color,
        label: label.to_string(),
        default: json!(default),
        min: None,
        max: None,
        step: None,
        options: None,
        description: None,
    }
}

fn ma_metadata() -> IndicatorMetadata {
    IndicatorMetadata {
        id: "ma".to_string(),
        name: "Moving Average".to_string(),
        category: IndicatorCategory::Overlay,
        description: "이동평균선. SMA/EMA/WMA 방식을 지원합니다.".to_string(),
        display_template: "ma-multi".to_string(),
        supports_multiple: true,
        parameters: vec![
            IndicatorParameter {
                name: "ma_type".to_string(),
                kind: ParameterType::Select,
                label: "MA 방식".to_string(),
                default: json!("sma"),
                min: None,
                max: None,
                step: None,
                options: Some(vec![
                    ParameterOption {
                        value: json!("sma"),
                        label: "SMA (단순 이동평균)".to_string(),
                    },
                    ParameterOption {
                        value: json!("ema"),
                        label: "EMA (지수 이동평균)".to_string(),
                    },
                    ParameterOption {
                        value: json!("wma"),
                        label: "WMA (가중 이동평균)".to_string(),
                    },
                ]),
                description: Some("이동평균 계산 방식".to_string()),
            },
            IndicatorParameter {
                name: "periods".to_string(),
                kind: ParameterType::MultiPeriod,
                label: "기간".to_string(),
                default: json!([5, 20, 60]),
                min: Some(1.0),
                max: Some(500.0),
                step: Some(1.0),
                options: None,
                description: Some("동시에 표시할 이동평균 기간들".to_string()),
            },
            color("color1", "Line 1 색상", "#2962FF"),
            color("color2", "Line 2 색상", "#E91E63"),
            color("color3", "Line 3 색상", "#FFA500"),
        ],
    }
}

fn kdj_metadata() -> IndicatorMetadata {
    IndicatorMetadata {
        id: "kdj".to_string(),
        name: "KDJ".to_string(),
        category: IndicatorCategory::Oscillator,
        description: "스토캐스틱 기반 KDJ. 과매수/과매도 판단에 사용합니다.".to_string(),
        display_template: "kdj-triple".to_string(),
        supports_multiple: false,
        parameters: vec![
            number("fastk_period", "K 기간", 9, 1.0, 100.0, "RSV 계산 기간"),
            number("slowk_period", "K 평활", 3, 1.0, 20.0, "K선 평활 기간"),
            number("slowd_period", "D 평활", 3, 1.0, 20.0, "D선 평활 기간"),
            color("k_color", "K선 색상", "#2962FF"),
            color("d_color", "D선 색상", "#FF6D00"),
            color("j_color", "J선 색상", "#00C853"),
        ],
    }
}

fn macd_metadata() -> IndicatorMetadata {
    IndicatorMetadata {
        id: "macd".to_string(),
        name: "MACD".to_string(),
        category: IndicatorCategory::Oscillator,
        description: "이동평균 수렴/확산. 추세와 모멘텀을 함께 보여줍니다.".to_string(),
        display_template: "macd".to_string(),
        supports_multiple: false,
        parameters: vec![
            number("fast_period", "단기 기간", 12, 1.0, 100.0, "단기 EMA 기간"),
            number("slow_period", "장기 기간", 26, 1.0, 200.0, "장기 EMA 기간"),
            number("signal_period", "시그널 기간", 9, 1.0, 50.0, "시그널 라인 기간"),
        ],
    }
}

fn rsi_metadata() -> IndicatorMetadata {
    IndicatorMetadata {
        id: "rsi".to_string(),
        name: "RSI".to_string(),
        category: IndicatorCategory::Oscillator,
        description: "상대강도지수. 과매수/과매도 판단에 사용합니다.".to_string(),
        display_template: "single-value".to_string(),
        supports_multiple: false,
        parameters: vec![
            number("period", "기간", 14, 1.0, 100.0, "RSI 계산 기간"),
            color("color", "선 색상", "#7E57C2"),
        ],
    }
}

fn boll_metadata() -> IndicatorMetadata {
    IndicatorMetadata {
        id: "boll".to_string(),
        name: "Bollinger Bands".to_string(),
        category: IndicatorCategory::Overlay,
        description: "볼린저 밴드. 상/중/하 3개 밴드를 표시합니다.".to_string(),
        display_template: "boll-triple".to_string(),
        supports_multiple: false,
        parameters: vec![
            number("period", "기간", 20, 1.0, 200.0, "이동평균 기간"),
            IndicatorParameter {
                name: "nbdev".to_string(),
                kind: ParameterType::Number,
                label: "표준편차 배수".to_string(),
                default: json!(2.0),
                min: Some(0.0),
                max: Some(5.0),
                step: Some(0.1),
                options: None,
                description: Some("상/하단 밴드 공통 배수".to_string()),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_all_five_indicators() {
        let ids: Vec<&str> = all_indicators().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["ma", "kdj", "macd", "rsi", "boll"]);
    }

    #[test]
    fn test_get_indicator() {
        let kdj = get_indicator("kdj").unwrap();
        assert_eq!(kdj.name, "KDJ");
        assert_eq!(kdj.category, IndicatorCategory::Oscillator);

        assert!(get_indicator("obv").is_none());
    }

    #[test]
    fn test_indicators_by_category() {
        let overlays = indicators_by_category(IndicatorCategory::Overlay);
        let ids: Vec<&str> = overlays.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["ma", "boll"]);

        assert!(indicators_by_category(IndicatorCategory::Volume).is_empty());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(
            "overlay".parse::<IndicatorCategory>().unwrap(),
            IndicatorCategory::Overlay
        );
        assert_eq!(
            "OSCILLATOR".parse::<IndicatorCategory>().unwrap(),
            IndicatorCategory::Oscillator
        );
        assert!("trend".parse::<IndicatorCategory>().is_err());
    }

    #[test]
    fn test_parameter_serialization_uses_type_key() {
        let rsi = get_indicator("rsi").unwrap();
        let value = serde_json::to_value(rsi).unwrap();

        let first = &value["parameters"][0];
        assert_eq!(first["type"], "number");
        assert_eq!(first["name"], "period");
        // None 필드는 직렬화에서 제외
        assert!(first.get("options").is_none());
    }
}
