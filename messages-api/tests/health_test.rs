mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use common::{setup_test_app, setup_test_store};
use messages_api::api::health;
use serde_json::Value;

#[tokio::test]
async fn test_health_check() -> anyhow::Result<()> {
    let test_app = setup_test_app().await?;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&test_app.app, req).await;

    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_health_check_reports_database_down() -> anyhow::Result<()> {
    let (store, _db_dir) = setup_test_store().await?;
    store.close().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(store))
            .route("/health", web::get().to(health::health_check)),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "down");

    Ok(())
}

#[tokio::test]
async fn test_version_info() {
    let app = test::init_service(
        App::new().route("/version", web::get().to(health::version_info)),
    )
    .await;

    let req = test::TestRequest::get().uri("/version").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["version"], "0.1.0");
    assert_eq!(body["service"], "messages-api");
}
