use iso8601_timestamp::Timestamp;
use serde::{Deserialize, Serialize};

use quill_models::v0::{RemovedItemSnippet, ReportSnippet};

use crate::events::sink::Sink;
use crate::Report;

/// Topic every connected moderator session is subscribed to
pub static ADMIN_TOPIC: &str = "admin";

/// WebSocket Client Errors
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "error")]
pub enum WebSocketError {
    LabelMe,
    InternalError { at: String },
    InvalidSession,
    AlreadyAuthenticated,
    MalformedData { msg: String },
}

/// Ping Packet
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Ping {
    Binary(Vec<u8>),
    Number(usize),
}

/// Untagged Error
#[derive(Serialize)]
#[serde(untagged)]
pub enum ErrorEvent {
    Error(WebSocketError),
    APIError(quill_result::Error),
}

/// Protocol Events
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum EventV1 {
    /// Multiple events
    Bulk { v: Vec<EventV1> },

    /// Successfully authenticated
    Authenticated,

    /// Ping response
    Pong { data: Ping },

    /// A user flagged a post or comment
    NewReport {
        report: Report,
        message: String,
        timestamp: Timestamp,
    },

    /// A moderator removed this user's content from the community
    ItemRemoved {
        item_type: String,
        item_title: String,
        reason: String,
        admin_notes: String,
        timestamp: Timestamp,
    },

    /// A moderator removed reported content, summarised for other moderators
    ItemRemovedAdmin {
        report: ReportSnippet,
        removed_item: RemovedItemSnippet,
        message: String,
        timestamp: Timestamp,
    },
}

impl EventV1 {
    /// Deliver this event to every connected moderator session
    pub async fn admins(self, sink: &dyn Sink) {
        sink.publish(ADMIN_TOPIC.to_string(), self).await;
    }

    /// Deliver this event to every session belonging to the given user
    pub async fn private(self, sink: &dyn Sink, user_id: &str) {
        sink.publish(format!("{user_id}!"), self).await;
    }
}
