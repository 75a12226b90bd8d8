// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`:
//   GET /api/v1/health          liveness probe
//   GET /api/v1/chart/:symbol   daily bars annotated with as-of indicators
//
// CORS is restricted to the configured browser origins.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::chart;
use crate::error::ApiError;
use crate::types::ChartResponse;

// =============================================================================
// Router construction
// =============================================================================

/// Build the REST API router with CORS, request tracing and shared state.
pub fn router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/chart/:symbol", get(chart_data))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)),
        )
        .with_state(state)
}

/// CORS policy for the configured origins. Unparseable origins are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    time: String,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

// =============================================================================
// Chart
// =============================================================================

async fn chart_data(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<ChartResponse>, ApiError> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(ApiError::BadRequest("Symbol is required".to_string()));
    }
    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ApiError::BadRequest(format!("Invalid symbol: '{symbol}'")));
    }

    let bars = state
        .source
        .daily_bars(symbol, state.lookback_days)
        .await
        .map_err(|e| {
            warn!(symbol, error = %e, "failed to fetch bars");
            ApiError::DataUnavailable(e)
        })?;

    let response = chart::evaluate(symbol, bars);
    info!(symbol, records = response.data.len(), "chart computed");

    Ok(Json(response))
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, TimeZone};
    use tower::ServiceExt;

    use crate::market_data::{BarSource, FetchError};
    use crate::types::Bar;

    /// In-memory source that records what it was asked for.
    struct StaticSource {
        bars: Vec<Bar>,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl StaticSource {
        fn new(bars: Vec<Bar>) -> Self {
            Self {
                bars,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BarSource for StaticSource {
        async fn daily_bars(&self, symbol: &str, lookback_days: u32) -> Result<Vec<Bar>, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((symbol.to_string(), lookback_days));
            Ok(self.bars.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl BarSource for FailingSource {
        async fn daily_bars(&self, _symbol: &str, _lookback_days: u32) -> Result<Vec<Bar>, FetchError> {
            Err(FetchError::Status {
                status: 401,
                body: "unauthorized".into(),
            })
        }
    }

    fn bars(n: usize) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap();
        // Newest first, the way some providers return them.
        (0..n)
            .rev()
            .map(|i| {
                let close = (i + 1) as f64;
                Bar {
                    timestamp: start + Duration::days(i as i64),
                    open: close,
                    high: close,
                    low: close,
                    close,
                    volume: 100,
                }
            })
            .collect()
    }

    fn origins() -> Vec<String> {
        vec!["http://localhost:3000".to_string()]
    }

    fn app(source: Arc<dyn BarSource>) -> Router {
        router(Arc::new(AppState::new(source, 100)), &origins())
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(app(Arc::new(StaticSource::new(vec![]))), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let time = body["time"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[tokio::test]
    async fn chart_returns_sorted_annotated_records() {
        let source = Arc::new(StaticSource::new(bars(30)));
        let (status, body) = get_json(app(source.clone()), "/api/v1/chart/AAPL").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "AAPL");
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 30);
        assert_eq!(data[0]["bar"]["close"], 1.0);
        assert_eq!(data[29]["bar"]["close"], 30.0);
        assert_eq!(data[0]["indicators"], serde_json::json!({}));
        assert_eq!(data[19]["indicators"]["sma_20"], 10.5);
        assert!(data[24]["indicators"].get("macd").is_none());
        assert_eq!(data[25]["indicators"]["macd"]["signal"], 0.0);

        let calls = source.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("AAPL".to_string(), 100)]);
    }

    #[tokio::test]
    async fn chart_with_no_bars_is_empty() {
        let (status, body) = get_json(app(Arc::new(StaticSource::new(vec![]))), "/api/v1/chart/TSLA").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "symbol": "TSLA", "data": [] }));
    }

    #[tokio::test]
    async fn blank_symbol_is_rejected() {
        let (status, body) = get_json(app(Arc::new(StaticSource::new(vec![]))), "/api/v1/chart/%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Symbol is required");
    }

    #[tokio::test]
    async fn invalid_symbol_is_rejected() {
        let (status, _) = get_json(app(Arc::new(StaticSource::new(vec![]))), "/api/v1/chart/AA%3FPL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn fetch_failure_is_data_unavailable() {
        let (status, body) = get_json(app(Arc::new(FailingSource)), "/api/v1/chart/AAPL").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"],
            "Error fetching data: API request failed with status: 401"
        );
    }

    #[tokio::test]
    async fn cors_allows_configured_origin_only() {
        let allowed = app(Arc::new(StaticSource::new(vec![])))
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );

        let denied = app(Arc::new(StaticSource::new(vec![])))
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }
}
