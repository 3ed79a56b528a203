//! Route table shared by the server binary and the integration tests.

use crate::api::{health, messages};
use crate::error::AppError;
use actix_web::web;

/// Registers the message and service routes below `path_prefix`, together with
/// the extractor settings that turn malformed input into `400` responses.
pub fn configure_routes(cfg: &mut web::ServiceConfig, path_prefix: &str) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .default_service(web::to(messages::route_not_found))
        .service(
            web::scope(path_prefix.trim_end_matches('/'))
                .route("/health", web::get().to(health::health_check))
                .route("/version", web::get().to(health::version_info))
                .service(
                    web::resource("/messages")
                        .route(web::get().to(messages::list_messages))
                        .route(web::post().to(messages::create_message))
                        .default_service(web::to(messages::method_not_allowed)),
                )
                .service(
                    web::resource("/messages/{id}")
                        .route(web::get().to(messages::get_message))
                        .route(web::put().to(messages::update_message))
                        .route(web::delete().to(messages::delete_message))
                        .default_service(web::to(messages::method_not_allowed)),
                ),
        );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| AppError::InvalidRequest(format!("invalid JSON: {err}")).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(format!("invalid message id: {err}")).into()
    })
}
