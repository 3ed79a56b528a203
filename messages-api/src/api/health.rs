use crate::database::MessageStore;
use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use message_types::{HealthResponse, VersionResponse};
use tracing::warn;

pub async fn health_check(store: web::Data<MessageStore>) -> Result<HttpResponse> {
    let timestamp = Utc::now().to_rfc3339();

    match store.ping().await {
        Ok(()) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            database: "up".to_string(),
            timestamp,
        })),
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "degraded".to_string(),
                database: "down".to_string(),
                timestamp,
            }))
        }
    }
}

pub async fn version_info() -> Result<HttpResponse> {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        service: "messages-api".to_string(),
    };
    Ok(HttpResponse::Ok().json(response))
}
