//! API 라우트 모듈.

pub mod config;
pub mod health;
pub mod indicators;
pub mod stock;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// `/api/v1` 아래에 마운트되는 API 라우터를 생성합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(stock::stock_router())
        .merge(indicators::indicators_router())
        .merge(config::config_router())
}
