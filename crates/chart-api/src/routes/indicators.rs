//! 지표 메타데이터 endpoint.
//!
//! 차트 클라이언트가 지표 설정 패널을 자동 생성할 때 사용하는
//! 지표별 파라미터 스키마를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/v1/indicators` - 전체(또는 분류별) 지표 메타데이터
//! - `GET /api/v1/indicators/{indicator_id}` - 단일 지표 메타데이터

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chart_analytics::metadata::{self, IndicatorCategory, IndicatorMetadata};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 지표 목록 조회 쿼리.
#[derive(Debug, Deserialize, IntoParams)]
pub struct IndicatorListQuery {
    /// 분류 필터 (overlay/oscillator/volume)
    pub category: Option<String>,
}

/// 지표 메타데이터 목록 조회.
#[utoipa::path(
    get,
    path = "/api/v1/indicators",
    params(IndicatorListQuery),
    responses(
        (status = 200, description = "지표 메타데이터 목록", body = Vec<IndicatorMetadata>),
        (status = 400, description = "잘못된 분류", body = ApiErrorResponse),
    ),
    tag = "indicators"
)]
pub async fn list_indicators(
    Query(query): Query<IndicatorListQuery>,
) -> ApiResult<Json<Vec<IndicatorMetadata>>> {
    match query.category.as_deref() {
        Some(raw) => {
            let category = raw.parse::<IndicatorCategory>().map_err(|message| {
                error_response(StatusCode::BAD_REQUEST, "INVALID_CATEGORY", message)
            })?;
            Ok(Json(
                metadata::indicators_by_category(category)
                    .into_iter()
                    .cloned()
                    .collect(),
            ))
        }
        None => Ok(Json(metadata::all_indicators().to_vec())),
    }
}

/// 단일 지표 메타데이터 조회.
#[utoipa::path(
    get,
    path = "/api/v1/indicators/{indicator_id}",
    params(("indicator_id" = String, Path, description = "지표 id (예: ma, kdj)")),
    responses(
        (status = 200, description = "지표 메타데이터", body = IndicatorMetadata),
        (status = 404, description = "지표 없음", body = ApiErrorResponse),
    ),
    tag = "indicators"
)]
pub async fn get_indicator(
    Path(indicator_id): Path<String>,
) -> ApiResult<Json<IndicatorMetadata>> {
    metadata::get_indicator(&indicator_id)
        .map(|m| Json(m.clone()))
        .ok_or_else(|| {
            error_response(
                StatusCode::NOT_FOUND,
                "INDICATOR_NOT_FOUND",
                format!("지표를 찾을 수 없습니다: {indicator_id}"),
            )
        })
}

/// 지표 메타데이터 라우터 생성.
pub fn indicators_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/indicators", get(list_indicators))
        .route("/indicators/{indicator_id}", get(get_indicator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chart_core::AppConfig;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = Arc::new(crate::state::AppState::new(AppConfig::default()));
        Router::new().merge(indicators_router()).with_state(state)
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_list_all_indicators() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/indicators")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["ma", "kdj", "macd", "rsi", "boll"]);
    }

    #[tokio::test]
    async fn test_list_indicators_by_category() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/indicators?category=oscillator")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        let ids: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["kdj", "macd", "rsi"]);
    }

    #[tokio::test]
    async fn test_invalid_category_is_400() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/indicators?category=trend")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_single_indicator() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/indicators/kdj")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["id"], "kdj");
        assert_eq!(json["category"], "oscillator");
    }

    #[tokio::test]
    async fn test_unknown_indicator_is_404() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/indicators/obv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
