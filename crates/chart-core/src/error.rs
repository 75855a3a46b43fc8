//! 차트 서버의 공통 에러 타입.
//!
//! 이 모듈은 서버 전반에서 사용되는 공통 에러 타입을 정의합니다.
//! 각 계층의 세부 에러(데이터, 파서 등)는 이 타입으로 수렴한 뒤
//! HTTP 응답으로 변환됩니다.

use thiserror::Error;

/// 핵심 차트 서버 에러.
#[derive(Debug, Error)]
pub enum ChartError {
    /// 데이터 에러
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 직렬화 에러
    #[error("직렬화 에러: {0}")]
    Serialization(String),

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 차트 서버 작업을 위한 Result 타입.
pub type ChartResult<T> = Result<T, ChartError>;

impl ChartError {
    /// 클라이언트 측 원인(4xx)에 해당하는 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ChartError::NotFound(_) | ChartError::InvalidInput(_)
        )
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ChartError {
    fn from(err: std::io::Error) -> Self {
        ChartError::Internal(err.to_string())
    }
}
