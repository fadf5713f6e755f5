use storefront_api::routes::health::health_check;

#[tokio::test]
async fn health_reports_ok() {
    let resp = health_check().await;
    assert_eq!(resp.0.status, "ok");
}
