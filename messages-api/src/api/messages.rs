use crate::database::MessageStore;
use crate::error::{AppError, AppResult};
use actix_web::{web, HttpRequest, HttpResponse};
use message_types::{MessageCreated, MessagePayload, StatusResponse};
use tracing::{error, info, warn};

pub async fn list_messages(store: web::Data<MessageStore>) -> AppResult<HttpResponse> {
    let messages = store
        .list()
        .await
        .inspect_err(|e| error!(error = %e, "Failed to read messages"))?;

    Ok(HttpResponse::Ok().json(messages))
}

pub async fn get_message(
    path: web::Path<i64>,
    store: web::Data<MessageStore>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match store.get(id).await {
        Ok(Some(message)) => Ok(HttpResponse::Ok().json(message)),
        Ok(None) => {
            warn!(message_id = id, "Message not found");
            Err(not_found(id))
        }
        Err(e) => {
            error!(error = %e, message_id = id, "Failed to read message");
            Err(e.into())
        }
    }
}

pub async fn create_message(
    payload: web::Json<MessagePayload>,
    store: web::Data<MessageStore>,
) -> AppResult<HttpResponse> {
    let payload = payload.into_inner();

    let id = store
        .create(&payload.content)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to create message"))?;

    info!(message_id = id, "Created message");
    Ok(HttpResponse::Created().json(MessageCreated::new(id)))
}

pub async fn update_message(
    path: web::Path<i64>,
    payload: web::Json<MessagePayload>,
    store: web::Data<MessageStore>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = payload.into_inner();

    let updated = store
        .update(id, &payload.content)
        .await
        .inspect_err(|e| error!(error = %e, message_id = id, "Failed to update message"))?;

    if !updated {
        warn!(message_id = id, "Update target not found");
        return Err(not_found(id));
    }

    info!(message_id = id, "Updated message");
    Ok(HttpResponse::Ok().json(StatusResponse::updated()))
}

pub async fn delete_message(
    path: web::Path<i64>,
    store: web::Data<MessageStore>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let deleted = store
        .delete(id)
        .await
        .inspect_err(|e| error!(error = %e, message_id = id, "Failed to delete message"))?;

    if !deleted {
        warn!(message_id = id, "Delete target not found");
        return Err(not_found(id));
    }

    info!(message_id = id, "Deleted message");
    Ok(HttpResponse::Ok().json(StatusResponse::deleted()))
}

/// Fallback for methods a messages resource does not serve.
pub async fn method_not_allowed(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::MethodNotAllowed(format!(
        "{} {}",
        req.method(),
        req.path()
    )))
}

/// Fallback for paths no route matches.
pub async fn route_not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(format!("no route for {}", req.path())))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("message {id}"))
}
