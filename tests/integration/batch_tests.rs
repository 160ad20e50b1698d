use crate::{catalog_body, create_test_config, refused_url};
use std::time::{Duration, Instant};
use storefront_probe::batch::{run_batch, Coordinator};
use storefront_probe::prober::TransportErrorKind;
use storefront_probe::BatchError;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_batch_preserves_input_order_with_mixed_outcomes() {
    let slow_shop = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(catalog_body(&[("Slow Tee", "10.00")]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&slow_shop)
        .await;

    let fast_shop = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(catalog_body(&[("Fast Mug", "5.00")])),
        )
        .mount(&fast_shop)
        .await;

    let not_found = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&not_found)
        .await;

    let targets = vec![
        slow_shop.uri(),
        refused_url(),
        "definitely not a url".to_string(),
        fast_shop.uri(),
        not_found.uri(),
        fast_shop.uri(),
    ];

    let config = create_test_config(3, 5, 4);
    let outcomes = run_batch(&config, &targets, &CancellationToken::new())
        .await
        .expect("Batch failed");

    assert_eq!(outcomes.len(), targets.len());
    for (outcome, target) in outcomes.iter().zip(&targets) {
        assert_eq!(outcome.target(), target);
    }

    assert_eq!(outcomes[0].products()[0].title, "Slow Tee");
    assert_eq!(
        outcomes[1].transport_error().map(|e| e.kind),
        Some(TransportErrorKind::Connect)
    );
    assert_eq!(
        outcomes[2].transport_error().map(|e| e.kind),
        Some(TransportErrorKind::InvalidUrl)
    );
    assert_eq!(outcomes[3].products()[0].title, "Fast Mug");
    assert_eq!(outcomes[4].http_status_code(), Some(404));
    assert_eq!(outcomes[5].products()[0].price_range, "$5.00");
}

#[tokio::test]
async fn test_batch_bounds_concurrency() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(catalog_body(&[("Item", "1.00")]))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(8)
        .mount(&mock_server)
        .await;

    let targets: Vec<String> = (0..8)
        .map(|i| format!("{}/shop{}", mock_server.uri(), i))
        .collect();

    let config = create_test_config(3, 10, 2);
    let start = Instant::now();
    let outcomes = Coordinator::from_config(&config)
        .run(&targets, &CancellationToken::new())
        .await
        .expect("Batch failed");
    let elapsed = start.elapsed();

    assert_eq!(outcomes.len(), 8);
    assert!(outcomes.iter().all(|o| o.is_storefront()));
    // Four waves of two requests, 200ms each
    assert!(
        elapsed >= Duration::from_millis(750),
        "Expected at least 750ms with concurrency 2, took {:?}",
        elapsed
    );
}

#[tokio::test]
async fn test_batch_cancellation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&mock_server)
        .await;

    let targets: Vec<String> = (0..4).map(|_| mock_server.uri()).collect();
    let config = create_test_config(3, 30, 4);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let result = run_batch(&config, &targets, &cancel).await;

    assert!(matches!(
        result,
        Err(BatchError::Cancelled { completed: 0, total: 4 })
    ));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_one_slow_target_does_not_fail_others() {
    let hanging = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&hanging)
        .await;

    let shop = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body(&[("Ok", "2.50")])))
        .mount(&shop)
        .await;

    let targets = vec![hanging.uri(), shop.uri()];
    let config = create_test_config(3, 1, 2);
    let outcomes = run_batch(&config, &targets, &CancellationToken::new())
        .await
        .expect("Batch failed");

    assert_eq!(
        outcomes[0].transport_error().map(|e| e.kind),
        Some(TransportErrorKind::Timeout)
    );
    assert_eq!(outcomes[1].products()[0].price_range, "$2.50");
}
