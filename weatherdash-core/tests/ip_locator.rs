use weatherdash_core::{Coordinates, DashError, IpLocator, Locator};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn successful_lookup_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "lat": 59.9133,
            "lon": 10.7389
        })))
        .mount(&server)
        .await;

    let coords = IpLocator::new(&server.uri()).locate().await.unwrap();

    assert_eq!(coords, Coordinates { latitude: 59.9133, longitude: 10.7389 });
}

#[tokio::test]
async fn failed_lookup_carries_service_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range"
        })))
        .mount(&server)
        .await;

    let err = IpLocator::new(&server.uri()).locate().await.unwrap_err();

    assert!(matches!(err, DashError::Geolocation(ref m) if m == "private range"));
    assert_eq!(err.status_message(), "Location error: private range");
}

#[tokio::test]
async fn http_failure_is_a_geolocation_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = IpLocator::new(&server.uri()).locate().await.unwrap_err();

    assert!(matches!(err, DashError::Geolocation(_)));
}
