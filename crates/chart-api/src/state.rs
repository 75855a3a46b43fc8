//! 애플리케이션 상태.

use std::sync::Arc;

use chart_core::AppConfig;
use chart_data::{BarStore, CsvBarStore};
use chrono::{DateTime, Utc};

/// 공유 애플리케이션 상태.
#[derive(Clone)]
pub struct AppState {
    /// 애플리케이션 설정
    pub config: AppConfig,
    /// 바 데이터 저장소
    pub store: Arc<dyn BarStore>,
    /// 서버 버전
    pub version: String,
    /// 서버 시작 시각
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 설정으로부터 상태를 생성합니다.
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(CsvBarStore::new(config.data.data_dir.clone()));
        Self {
            config,
            store,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 저장소를 교체합니다 (테스트용).
    pub fn with_store(mut self, store: Arc<dyn BarStore>) -> Self {
        self.store = store;
        self
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_default_config() {
        let state = AppState::new(AppConfig::default());
        assert!(!state.version.is_empty());
        assert!(state.uptime_secs() >= 0);
    }
}
