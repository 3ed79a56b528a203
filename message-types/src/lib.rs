use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod message;
pub mod typescript_gen;

pub use message::{
    Message, MessageCreated, MessagePayload, StatusResponse, STATUS_CREATED, STATUS_DELETED,
    STATUS_UPDATED,
};
pub use typescript_gen::{generate_typescript_definitions, API_TYPE_NAMES};

// Records shared by the messages service and its web frontend

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct VersionResponse {
    pub version: String,
    pub service: String,
}
