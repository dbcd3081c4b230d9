use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_check_reports_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/touch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("seeds@2.x.x"))
        .mount(&server)
        .await;

    let config = EndpointConfig::new(format!("{}/api", server.uri()));
    let base_url = check_connectivity(&config).await.unwrap();

    assert_eq!(base_url, format!("{}/api/", server.uri()));
}

#[tokio::test]
async fn test_check_rejects_non_seeds_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/touch"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let config = EndpointConfig::new(format!("{}/api", server.uri()));
    let error = check_connectivity(&config).await.unwrap_err();

    assert!(matches!(
        error,
        Error::Endpoint(seeds_endpoint::Error::NotSeedsApi { .. })
    ));
}

#[tokio::test]
async fn test_check_rejects_empty_base_url() {
    let error = check_connectivity(&EndpointConfig::new(""))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        Error::Endpoint(seeds_endpoint::Error::MissingBaseUrl)
    ));
}
