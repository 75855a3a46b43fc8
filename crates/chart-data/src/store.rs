//! CSV 기반 바 저장소.
//!
//! 심볼별 CSV 파일(`{data_dir}/{symbol}.csv`)에서 일봉 데이터를
//! 읽습니다. `trade_date` 컬럼은 `YYYYMMDD` 형식이며, 반환 전에
//! 날짜 오름차순으로 정렬합니다. 필요한 컬럼 외의 컬럼은 무시합니다.

use std::path::PathBuf;

use async_trait::async_trait;
use chart_core::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::error::{DataError, DataResult};

/// 바 데이터 공급자.
#[async_trait]
pub trait BarStore: Send + Sync {
    /// 심볼의 일봉 시퀀스를 날짜 오름차순으로 반환합니다.
    async fn load(&self, symbol: &str) -> DataResult<Vec<Bar>>;

    /// 사용 가능한 심볼 목록을 반환합니다.
    async fn list_symbols(&self) -> DataResult<Vec<String>>;
}

/// CSV 행 (tushare 형식 중 필요한 컬럼만).
#[derive(Debug, Deserialize)]
struct CsvRow {
    trade_date: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    vol: f64,
}

/// CSV 파일 기반 바 저장소.
#[derive(Debug, Clone)]
pub struct CsvBarStore {
    data_dir: PathBuf,
}

impl CsvBarStore {
    /// 데이터 디렉토리를 지정해 저장소를 생성합니다.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn csv_path(&self, symbol: &str) -> DataResult<PathBuf> {
        validate_symbol(symbol)?;
        Ok(self.data_dir.join(format!("{symbol}.csv")))
    }

    fn parse_rows(bytes: &[u8]) -> DataResult<Vec<Bar>> {
        let mut reader = csv::Reader::from_reader(bytes);
        let mut bars = Vec::new();

        for row in reader.deserialize::<CsvRow>() {
            let row = row?;
            // YYYYMMDD → 달력 날짜 정규화
            let date = NaiveDate::parse_from_str(&row.trade_date, "%Y%m%d")
                .map_err(|_| DataError::InvalidDate(row.trade_date.clone()))?;
            bars.push(Bar::new(date, row.open, row.high, row.low, row.close, row.vol));
        }

        // 오래된 날짜부터 정렬
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

#[async_trait]
impl BarStore for CsvBarStore {
    async fn load(&self, symbol: &str) -> DataResult<Vec<Bar>> {
        let path = self.csv_path(symbol)?;

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::SymbolNotFound(symbol.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        let bars = Self::parse_rows(&bytes)?;
        debug!(symbol = %symbol, rows = bars.len(), "bar data loaded");
        Ok(bars)
    }

    async fn list_symbols(&self) -> DataResult<Vec<String>> {
        let mut symbols = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.data_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    symbols.push(stem.to_string());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

/// 심볼은 영숫자와 `.`, `_`, `-`만 허용합니다.
fn validate_symbol(symbol: &str) -> DataResult<()> {
    let valid = !symbol.is_empty()
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(DataError::InvalidSymbol(symbol.to_string()))
    }
}
