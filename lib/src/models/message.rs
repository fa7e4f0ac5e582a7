use super::bookmark::BookmarkNode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};
use std::fmt;
use uuid::Uuid;

/// Action tag that asks the responder for the bookmark tree.
pub const EXPORT_ACTION: &str = "exportBookmarks";

/// Type tag of the counting notification.
pub const COUNT_TYPE: &str = "COUNT";

/// Inbound message, classified from its JSON shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// `{ "action": "exportBookmarks" }`
    ExportBookmarks,
    /// `{ "type": "COUNT", "count": <number> }`
    Count { count: Option<Number> },
    /// Anything else, kept for diagnostics.
    Unrecognized(Value),
}

impl Message {
    /// Classify an arbitrary JSON value. The action tag wins over the type tag.
    pub fn from_value(value: Value) -> Self {
        if value.get("action").and_then(Value::as_str) == Some(EXPORT_ACTION) {
            return Message::ExportBookmarks;
        }

        if value.get("type").and_then(Value::as_str) == Some(COUNT_TYPE) {
            let count = match value.get("count") {
                Some(Value::Number(n)) => Some(n.clone()),
                _ => None,
            };
            return Message::Count { count };
        }

        Message::Unrecognized(value)
    }

    /// The wire shape of this message.
    pub fn to_value(&self) -> Value {
        match self {
            Message::ExportBookmarks => json!({ "action": EXPORT_ACTION }),
            Message::Count { count: Some(n) } => json!({ "type": COUNT_TYPE, "count": n }),
            Message::Count { count: None } => json!({ "type": COUNT_TYPE }),
            Message::Unrecognized(value) => value.clone(),
        }
    }

    /// Count notification carrying an integer payload.
    pub fn count(n: i64) -> Self {
        Message::Count {
            count: Some(Number::from(n)),
        }
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Message::from_value(value)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// A message together with the id the dispatcher assigned to it.
#[derive(Debug, Clone)]
pub struct Request {
    pub id: Uuid,
    pub message: Message,
}

impl Request {
    pub fn new(message: Message) -> Self {
        Self {
            id: Uuid::new_v4(),
            message,
        }
    }
}

/// Reply to an export request: the full tree, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub bookmark_tree: Vec<BookmarkNode>,
}
