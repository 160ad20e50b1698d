use crate::{catalog_body, create_test_config, refused_url};
use storefront_probe::batch::run_batch;
use storefront_probe::report::{Report, PLACEHOLDER};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_batch_to_report_end_to_end() {
    let shop = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body(&[
            ("Tee", "19.99"),
            ("Hoodie", "49.00"),
        ])))
        .mount(&shop)
        .await;

    let blog = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"posts":[]}"#))
        .mount(&blog)
        .await;

    let targets = vec![shop.uri(), blog.uri(), refused_url()];
    let config = create_test_config(3, 5, 4);
    let outcomes = run_batch(&config, &targets, &CancellationToken::new())
        .await
        .expect("Batch failed");
    assert!(outcomes[1].parse_ambiguous());

    let report = Report::from_outcomes(&outcomes, config.probe.sample_limit);

    // Text blocks
    let blocks = report.blocks();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("✅ 127.0.0.1\nShopify: Yes\nCurrency: $\nProducts:"));
    assert!(blocks[0].contains("• Tee — $19.99"));
    assert!(blocks[0].contains("• Hoodie — $49.00"));
    assert!(blocks[1].starts_with("⚠️ 127.0.0.1\nShopify: No"));
    assert!(blocks[2].starts_with("❌ 127.0.0.1\nShopify: No"));

    let chunks = report.chunks(config.report.chunk_budget);
    assert_eq!(chunks.len(), 1);

    // Tabular rows: two products, then one placeholder row per empty outcome
    let rows = report.rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].url, shop.uri());
    assert_eq!(rows[1].url, shop.uri());
    assert_eq!(rows[0].storefront, "✅ Yes");
    assert_eq!(rows[2].url, blog.uri());
    assert_eq!(rows[2].title, PLACEHOLDER);
    assert_eq!(rows[3].price, PLACEHOLDER);

    // File-mode artifacts
    let output = tempfile::tempdir().expect("Failed to create temp dir");
    let paths = report
        .artifacts()
        .expect("Failed to build artifacts")
        .write_to(output.path())
        .expect("Failed to write artifacts");

    let text = std::fs::read_to_string(&paths.text).expect("Failed to read TXT");
    assert_eq!(text, blocks.join("\n\n"));

    let csv = std::fs::read_to_string(&paths.csv).expect("Failed to read CSV");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "URL,Shopify,Currency,Product Title,Price");
    assert_eq!(lines.len(), 5);
    assert!(lines[4].ends_with(",❌ No,$,—,—"));
}

#[tokio::test]
async fn test_large_batch_splits_into_bounded_chunks() {
    let shop = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_body(&[
            ("A very long product title that goes on and on beyond sixty characters", "1.00"),
            ("Second", "2.00"),
            ("Third", "3.00"),
        ])))
        .mount(&shop)
        .await;

    let targets: Vec<String> = (0..60).map(|i| format!("{}/s{}", shop.uri(), i)).collect();
    let config = create_test_config(3, 5, 16);
    let outcomes = run_batch(&config, &targets, &CancellationToken::new())
        .await
        .expect("Batch failed");

    let report = Report::from_outcomes(&outcomes, 3);
    let budget = 1000;
    let chunks = report.chunks(budget);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.text().chars().count() <= budget);
    }
    let total_blocks: usize = chunks.iter().map(|c| c.blocks.len()).sum();
    assert_eq!(total_blocks, 60);

    assert!(!report.blocks()[0].contains("sixty characters"));
}
