//! End-to-end tests for the weather stack using wiremock
//!
//! Wires the KMA adapter, the in-memory cache and the weather service
//! together against a mock provider.

use std::sync::Arc;

use application::{CurrentSection, DashboardOptions, DashboardView, OutlookSection, WeatherService};
use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{Region, RegionCatalog};
use infrastructure::{MemoryCache, WeatherAdapter};
use integration_weather::WeatherConfig;
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// 2024-01-01 01:15 UTC, 10:15 in Seoul
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 1, 15, 0)
        .single()
        .unwrap_or_default()
}

fn daegu() -> &'static Region {
    RegionCatalog::default_region()
}

fn envelope(items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "response": {
            "header": { "resultCode": "00", "resultMsg": "NORMAL_SERVICE" },
            "body": { "dataType": "JSON", "items": { "item": items }, "totalCount": 1 }
        }
    })
}

fn observation_response() -> serde_json::Value {
    envelope(serde_json::json!([
        { "category": "T1H", "obsrValue": "-2.4" },
        { "category": "REH", "obsrValue": "45" },
        { "category": "WSD", "obsrValue": "1.8" },
        { "category": "PTY", "obsrValue": "0" },
        { "category": "RN1", "obsrValue": "0" }
    ]))
}

fn forecast_response() -> serde_json::Value {
    envelope(serde_json::json!([
        { "fcstDate": "20240101", "fcstTime": "1200", "category": "TMP", "fcstValue": "4" },
        { "fcstDate": "20240101", "fcstTime": "1200", "category": "SKY", "fcstValue": "1" },
        { "fcstDate": "20240101", "fcstTime": "1200", "category": "PTY", "fcstValue": "0" },
        { "fcstDate": "20240102", "fcstTime": "0900", "category": "TMP", "fcstValue": "-3" },
        { "fcstDate": "20240102", "fcstTime": "0900", "category": "SKY", "fcstValue": "4" },
        { "fcstDate": "20240102", "fcstTime": "0900", "category": "PTY", "fcstValue": "3" }
    ]))
}

fn create_test_service(mock_server: &MockServer) -> WeatherService {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        service_key: SecretString::from("test-key".to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    let adapter = WeatherAdapter::with_config(config).expect("Failed to create adapter");
    WeatherService::new(Arc::new(adapter), Arc::new(MemoryCache::new()))
}

async fn mount(mock_server: &MockServer, endpoint: &str, response: ResponseTemplate, calls: u64) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .expect(calls)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn test_repeat_requests_within_ttl_hit_cache() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(observation_response()),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(forecast_response()),
        1,
    )
    .await;

    let service = create_test_service(&mock_server);
    let first = service.snapshot(daegu(), now()).await;
    let second = service.snapshot(daegu(), now() + Duration::minutes(9)).await;

    assert!(first.current.is_ok());
    assert!(second.forecast.is_ok());
    assert_eq!(service.cache_stats().hits, 2);
}

#[tokio::test]
async fn test_observation_expires_before_forecast() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(observation_response()),
        2,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(forecast_response()),
        1,
    )
    .await;

    let service = create_test_service(&mock_server);
    service.snapshot(daegu(), now()).await;
    service.snapshot(daegu(), now() + Duration::minutes(10)).await;
}

#[tokio::test]
async fn test_refresh_forces_new_requests() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(observation_response()),
        2,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(forecast_response()),
        2,
    )
    .await;

    let service = create_test_service(&mock_server);
    service.snapshot(daegu(), now()).await;
    let removed = service.refresh().await.expect("refresh");
    assert_eq!(removed, 2);
    service.snapshot(daegu(), now()).await;
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let mock_server = MockServer::start().await;
    mount(&mock_server, "/getUltraSrtNcst", ResponseTemplate::new(503), 2).await;
    mount(&mock_server, "/getVilageFcst", ResponseTemplate::new(503), 2).await;

    let service = create_test_service(&mock_server);
    service.snapshot(daegu(), now()).await;
    service.snapshot(daegu(), now()).await;

    assert_eq!(service.cache_stats().entries, 0);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_view_from_live_responses() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(observation_response()),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(forecast_response()),
        1,
    )
    .await;

    let service = create_test_service(&mock_server);
    let snapshot = service.snapshot(daegu(), now()).await;
    let view = DashboardView::build(&snapshot, &DashboardOptions::default());

    assert_eq!(view.region, "대구 (Daegu)");
    assert_eq!(view.local_time, "2024-01-01 10:15");

    match view.current {
        CurrentSection::Available {
            metrics, marker, ..
        } => {
            assert_eq!(metrics[0].value, "-2.4°C");
            assert_eq!(marker.color, "purple");
        },
        CurrentSection::Unavailable { message, .. } => panic!("unexpected: {message}"),
    }

    match view.outlook {
        OutlookSection::Available { days } => {
            assert_eq!(days.len(), 2);
            assert_eq!(days[0].date, "01/01");
            assert_eq!(days[0].time, "1200");
            assert_eq!(days[1].time, "0900");
        },
        OutlookSection::Unavailable { message, .. } => panic!("unexpected: {message}"),
    }
}

#[tokio::test]
async fn test_observation_failure_keeps_forecast() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "response": { "header": { "resultCode": "03", "resultMsg": "NO_DATA" } }
        })),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(forecast_response()),
        1,
    )
    .await;

    let service = create_test_service(&mock_server);
    let snapshot = service.snapshot(daegu(), now()).await;
    let view = DashboardView::build(&snapshot, &DashboardOptions::default());

    assert!(matches!(
        view.current,
        CurrentSection::Unavailable { ref message, no_data: false } if message.contains("NO_DATA")
    ));
    assert!(matches!(view.outlook, OutlookSection::Available { .. }));
}

#[tokio::test]
async fn test_empty_forecast_is_no_data() {
    let mock_server = MockServer::start().await;
    mount(
        &mock_server,
        "/getUltraSrtNcst",
        ResponseTemplate::new(200).set_body_json(observation_response()),
        1,
    )
    .await;
    mount(
        &mock_server,
        "/getVilageFcst",
        ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!([]))),
        1,
    )
    .await;

    let service = create_test_service(&mock_server);
    let snapshot = service.snapshot(daegu(), now()).await;
    let view = DashboardView::build(&snapshot, &DashboardOptions::default());

    assert!(matches!(
        view.outlook,
        OutlookSection::Unavailable { no_data: true, .. }
    ));
}

#[tokio::test]
async fn test_requests_use_seoul_local_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getUltraSrtNcst"))
        .and(query_param("base_date", "20240101"))
        .and(query_param("base_time", "0900"))
        .and(query_param("nx", "89"))
        .and(query_param("ny", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(observation_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = create_test_service(&mock_server);
    let result = service.current_observation(daegu(), now()).await;

    assert!(result.is_ok());
}
