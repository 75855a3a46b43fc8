//! OpenAPI 문서 정의.
//!
//! utoipa 기반 API 문서와 Swagger UI 라우터를 제공합니다.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// API 문서.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::stock::get_stock_data,
        crate::routes::stock::list_symbols,
        crate::routes::indicators::list_indicators,
        crate::routes::indicators::get_indicator,
        crate::routes::config::save_indicator_config,
        crate::routes::config::get_indicator_config,
    ),
    components(schemas(
        crate::error::ApiErrorResponse,
        crate::routes::stock::StockDataResponse,
        crate::routes::stock::CandleData,
        crate::routes::stock::VolumeData,
        crate::routes::stock::ValueData,
        crate::routes::config::IndicatorConfigFile,
        crate::routes::config::SaveConfigResponse,
        chart_core::Interval,
        chart_analytics::metadata::IndicatorMetadata,
        chart_analytics::metadata::IndicatorParameter,
        chart_analytics::metadata::ParameterOption,
        chart_analytics::metadata::ParameterType,
        chart_analytics::metadata::IndicatorCategory,
    )),
    tags(
        (name = "stock", description = "주가 데이터 및 지표"),
        (name = "indicators", description = "지표 메타데이터"),
        (name = "config", description = "차트 클라이언트 설정"),
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터.
pub fn swagger_ui_router() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).unwrap();

        assert!(json.contains("/api/v1/stock/{symbol}"));
        assert!(json.contains("/api/v1/indicators"));
        assert!(json.contains("/api/v1/config/indicators"));
    }
}
