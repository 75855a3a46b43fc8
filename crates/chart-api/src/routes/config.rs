//! 차트 클라이언트 설정 endpoint.
//!
//! 프런트엔드의 지표 설정 파일(indicators.config.json)을 저장하고
//! 로드합니다. 설정 내용은 프런트엔드가 정의하는 불투명한 JSON으로
//! 취급합니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/v1/config/indicators` - 설정 저장
//! - `GET /api/v1/config/indicators` - 설정 로드

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chart_core::ChartError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{chart_error_response, error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 지표 설정 파일 본문.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IndicatorConfigFile {
    /// 설정 스키마 버전
    pub version: String,
    /// 지표별 설정 (불투명한 JSON)
    #[schema(value_type = Object)]
    pub indicators: Value,
}

/// 설정 저장 결과.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveConfigResponse {
    /// 처리 결과
    pub status: String,
    /// 저장된 파일 경로
    pub path: String,
}

/// 지표 설정 저장.
#[utoipa::path(
    post,
    path = "/api/v1/config/indicators",
    request_body = IndicatorConfigFile,
    responses(
        (status = 200, description = "저장 완료", body = SaveConfigResponse),
        (status = 500, description = "저장 실패", body = ApiErrorResponse),
    ),
    tag = "config"
)]
pub async fn save_indicator_config(
    State(state): State<Arc<AppState>>,
    Json(config): Json<IndicatorConfigFile>,
) -> ApiResult<Json<SaveConfigResponse>> {
    let path = state.config.data.ui_config_path();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| chart_error_response(ChartError::from(e)))?;
    }

    let body = serde_json::to_vec_pretty(&config)
        .map_err(|e| chart_error_response(ChartError::from(e)))?;
    tokio::fs::write(&path, body)
        .await
        .map_err(|e| chart_error_response(ChartError::from(e)))?;

    info!(path = %path.display(), "indicator config saved");

    Ok(Json(SaveConfigResponse {
        status: "success".to_string(),
        path: path.display().to_string(),
    }))
}

/// 지표 설정 로드.
#[utoipa::path(
    get,
    path = "/api/v1/config/indicators",
    responses(
        (status = 200, description = "저장된 설정", body = IndicatorConfigFile),
        (status = 404, description = "설정 파일 없음", body = ApiErrorResponse),
    ),
    tag = "config"
)]
pub async fn get_indicator_config(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<IndicatorConfigFile>> {
    let path = state.config.data.ui_config_path();

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(error_response(
                StatusCode::NOT_FOUND,
                "CONFIG_NOT_FOUND",
                "저장된 설정 파일이 없습니다",
            ));
        }
        Err(err) => return Err(chart_error_response(ChartError::from(err))),
    };

    let config: IndicatorConfigFile = serde_json::from_slice(&bytes)
        .map_err(|e| chart_error_response(ChartError::from(e)))?;

    Ok(Json(config))
}

/// 설정 라우터 생성.
pub fn config_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/config/indicators", post(save_indicator_config))
        .route("/config/indicators", get(get_indicator_config))
}
