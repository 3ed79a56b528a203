use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const STATUS_CREATED: &str = "Mensaje creado";
pub const STATUS_UPDATED: &str = "Mensaje actualizado";
pub const STATUS_DELETED: &str = "Mensaje eliminado";

/// A stored message. The `id` is assigned by the database on insert and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct Message {
    #[ts(type = "number")]
    pub id: i64,
    #[serde(rename = "message")]
    pub content: String,
}

/// Body accepted by create and update. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct MessagePayload {
    #[serde(rename = "message")]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct MessageCreated {
    pub status: String,
    #[ts(type = "number")]
    pub id: i64,
}

impl MessageCreated {
    pub fn new(id: i64) -> Self {
        Self {
            status: STATUS_CREATED.to_string(),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn updated() -> Self {
        Self {
            status: STATUS_UPDATED.to_string(),
        }
    }

    pub fn deleted() -> Self {
        Self {
            status: STATUS_DELETED.to_string(),
        }
    }
}
