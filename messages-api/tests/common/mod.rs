#![allow(dead_code)]

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use messages_api::config::DatabaseConfig;
use messages_api::database::MessageStore;
use messages_api::middleware::CorsHeaders;
use messages_api::routes::configure_routes;
use tempfile::TempDir;

pub struct TestApp<S> {
    pub store: web::Data<MessageStore>,
    pub app: S,
    _db_dir: TempDir,
}

pub fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: None,
        username: None,
        password: None,
        host: None,
        port: None,
        name: None,
        table: "test".to_string(),
        max_connections: 4,
        create_table: true,
    }
}

/// Opens a store over a fresh SQLite file. The directory must outlive the store.
pub async fn setup_test_store() -> anyhow::Result<(MessageStore, TempDir)> {
    let db_dir = TempDir::new()?;
    let db_path = db_dir.path().join("messages.db");
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let store = MessageStore::connect(&test_database_config(), &database_url).await?;
    store.ensure_table().await?;

    Ok((store, db_dir))
}

pub async fn setup_test_app() -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse<EitherBody<BoxBody>>,
            Error = actix_web::Error,
        >,
    >,
> {
    setup_test_app_with_prefix("").await
}

pub async fn setup_test_app_with_prefix(
    path_prefix: &str,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse<EitherBody<BoxBody>>,
            Error = actix_web::Error,
        >,
    >,
> {
    let (store, db_dir) = setup_test_store().await?;
    let store = web::Data::new(store);

    let prefix = path_prefix.to_string();
    let app = test::init_service(
        App::new()
            .app_data(store.clone())
            .wrap(CorsHeaders)
            .configure(|cfg| configure_routes(cfg, &prefix)),
    )
    .await;

    Ok(TestApp {
        store,
        app,
        _db_dir: db_dir,
    })
}
