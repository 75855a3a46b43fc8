//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//!
//! # 예시
//!
//! ```json
//! {
//!   "code": "SYMBOL_NOT_FOUND",
//!   "message": "찾을 수 없음: 심볼: 000155.sz"
//! }
//! ```

use axum::http::StatusCode;
use axum::Json;
use chart_core::ChartError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 통합 API 에러 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "NOT_FOUND", "INVALID_INDICATORS")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
}

impl ApiErrorResponse {
    /// 새 에러 응답을 생성합니다.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

/// API 핸들러 Result 타입.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 상태 코드와 에러 본문을 묶는 헬퍼.
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiErrorResponse>) {
    (status, Json(ApiErrorResponse::new(code, message)))
}

/// 공통 에러를 HTTP 응답으로 변환합니다.
///
/// 클라이언트 측 원인은 진단 메시지를 그대로 전달하고,
/// 그 외의 실패는 상세를 감춘 500 응답으로 변환합니다.
pub fn chart_error_response(err: ChartError) -> (StatusCode, Json<ApiErrorResponse>) {
    match &err {
        ChartError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        ChartError::InvalidInput(_) => {
            error_response(StatusCode::BAD_REQUEST, "INVALID_INPUT", err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "internal error");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            )
        }
    }
}
