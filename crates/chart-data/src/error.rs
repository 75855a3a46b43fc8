//! 데이터 계층 에러 타입.

use chart_core::ChartError;
use thiserror::Error;

/// 바 저장소 에러.
#[derive(Debug, Error)]
pub enum DataError {
    /// 심볼 데이터 파일 없음
    #[error("심볼 데이터를 찾을 수 없습니다: {0}")]
    SymbolNotFound(String),

    /// 허용되지 않는 심볼 문자열
    #[error("유효하지 않은 심볼: {0}")]
    InvalidSymbol(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 파싱 에러
    #[error("CSV 파싱 에러: {0}")]
    Csv(#[from] csv::Error),

    /// 날짜 파싱 에러
    #[error("유효하지 않은 거래일: '{0}' (YYYYMMDD 형식이어야 합니다)")]
    InvalidDate(String),
}

/// 데이터 작업을 위한 Result 타입.
pub type DataResult<T> = Result<T, DataError>;

impl From<DataError> for ChartError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::SymbolNotFound(symbol) => ChartError::NotFound(format!("심볼: {symbol}")),
            DataError::InvalidSymbol(symbol) => {
                ChartError::InvalidInput(format!("심볼: {symbol}"))
            }
            other => ChartError::Data(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_client_error() {
        let err: ChartError = DataError::SymbolNotFound("000155.sz".to_string()).into();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_maps_to_data_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ChartError = DataError::Io(io).into();
        assert!(!err.is_client_error());
        assert!(matches!(err, ChartError::Data(_)));
    }
}
