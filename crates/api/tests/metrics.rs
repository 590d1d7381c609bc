//! Operation counters exposed at `/metrics`
//!
//! Kept in its own test binary: the Prometheus recorder is process-global.

use api::{create_router, ApiConfig, AppState};
use metrics_exporter_prometheus::PrometheusBuilder;
use reqwest::StatusCode;
use std::sync::Arc;

#[tokio::test]
async fn test_operation_counters_are_rendered() {
    let handle = PrometheusBuilder::new().install_recorder().unwrap();
    let state = Arc::new(
        AppState::new(ApiConfig::default())
            .unwrap()
            .with_metrics(handle),
    );
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let base = format!("http://{}", addr);
    let client = reqwest::Client::new();

    let listed = client.get(format!("{}/users", base)).send().await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);

    let missing = client
        .delete(format!("{}/users?id=404", base))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let scrape = client.get(format!("{}/metrics", base)).send().await.unwrap();
    assert_eq!(scrape.status(), StatusCode::OK);
    let text = scrape.text().await.unwrap();

    assert!(text.contains("habits_api_operations_total"));
    assert!(text.contains(r#"resource="users""#));
    assert!(text.contains(r#"op="list""#));
    assert!(text.contains(r#"op="delete""#));
    assert!(text.contains(r#"outcome="ok""#));
    assert!(text.contains(r#"outcome="error""#));
}
