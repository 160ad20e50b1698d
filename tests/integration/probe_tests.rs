use crate::{catalog_body, create_test_config, refused_url};
use std::time::Duration;
use storefront_probe::prober::{build_http_client, probe, TransportErrorKind, MAX_CATALOG_BYTES};
use storefront_probe::report::{classify, StatusIcon};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(sample_limit: usize, timeout_secs: u64) -> reqwest::Client {
    let config = create_test_config(sample_limit, timeout_secs, 4);
    build_http_client(&config.probe, &config.user_agent).expect("Failed to build client")
}

#[tokio::test]
async fn test_probe_confirmed_storefront() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("limit", "3"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; ShopifyCheckerBot/2.0; +https://example.com/bot)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"products":[{"title":"Tee","variants":[{"price":"19.99"},{"price":"24.99"}]}]}"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let target = format!("{}/", mock_server.uri());
    let outcome = probe(&client_for(3, 5), &target, 3).await;

    assert_eq!(outcome.target(), target);
    assert_eq!(outcome.http_status_code(), Some(200));
    assert!(outcome.transport_error().is_none());
    assert!(!outcome.parse_ambiguous());
    assert_eq!(outcome.products().len(), 1);
    assert_eq!(outcome.products()[0].title, "Tee");
    assert_eq!(outcome.products()[0].price_range, "$19.99–$24.99");
    assert_eq!(classify(&outcome).icon, StatusIcon::Confirmed);
}

#[tokio::test]
async fn test_probe_caps_products_at_sample_limit() {
    let mock_server = MockServer::start().await;

    // Server ignores the limit parameter and returns everything
    let body = catalog_body(&[
        ("A", "1.00"),
        ("B", "2.00"),
        ("C", "3.00"),
        ("D", "4.00"),
        ("E", "5.00"),
    ]);
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(2, 5), &mock_server.uri(), 2).await;

    let titles: Vec<&str> = outcome.products().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}

#[tokio::test]
async fn test_probe_non_200_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(3, 5), &mock_server.uri(), 3).await;

    assert_eq!(outcome.http_status_code(), Some(404));
    assert!(outcome.products().is_empty());
    assert!(outcome.transport_error().is_none());
    assert!(!outcome.parse_ambiguous());
    assert_eq!(classify(&outcome).icon, StatusIcon::Unreachable);
}

#[tokio::test]
async fn test_probe_html_200_is_reachable_not_storefront() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body>Welcome</body></html>")
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(3, 5), &mock_server.uri(), 3).await;

    assert_eq!(outcome.http_status_code(), Some(200));
    assert!(outcome.products().is_empty());
    assert!(outcome.transport_error().is_none());
    assert!(outcome.parse_ambiguous());
    assert_eq!(classify(&outcome).icon, StatusIcon::ReachableNotStorefront);
}

#[tokio::test]
async fn test_probe_oversized_body_is_reachable_not_storefront() {
    let mock_server = MockServer::start().await;

    let oversized = "a".repeat(MAX_CATALOG_BYTES + 1);
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(oversized))
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(3, 5), &mock_server.uri(), 3).await;

    assert_eq!(outcome.http_status_code(), Some(200));
    assert!(outcome.products().is_empty());
    assert!(outcome.transport_error().is_none());
    assert!(outcome.parse_ambiguous());
    assert_eq!(classify(&outcome).icon, StatusIcon::ReachableNotStorefront);
}

#[tokio::test]
async fn test_probe_follows_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(301).insert_header(
                "location",
                format!("{}/store/products.json?limit=3", mock_server.uri()).as_str(),
            ),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/products.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(catalog_body(&[("Moved", "9.00")])),
        )
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(3, 5), &mock_server.uri(), 3).await;

    assert_eq!(outcome.http_status_code(), Some(200));
    assert_eq!(outcome.products()[0].title, "Moved");
    assert_eq!(outcome.products()[0].price_range, "$9.00");
}

#[tokio::test]
async fn test_probe_connection_refused() {
    let target = refused_url();
    let outcome = probe(&client_for(3, 5), &target, 3).await;

    assert_eq!(outcome.http_status_code(), None);
    assert!(outcome.products().is_empty());
    let error = outcome.transport_error().expect("transport error recorded");
    assert_eq!(error.kind, TransportErrorKind::Connect);
    assert_eq!(classify(&outcome).icon, StatusIcon::Unreachable);
}

#[tokio::test]
async fn test_probe_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(catalog_body(&[("Slow", "1.00")]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let outcome = probe(&client_for(3, 1), &mock_server.uri(), 3).await;

    assert_eq!(outcome.http_status_code(), None);
    assert!(outcome.products().is_empty());
    let error = outcome.transport_error().expect("transport error recorded");
    assert_eq!(error.kind, TransportErrorKind::Timeout);
}
