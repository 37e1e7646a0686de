use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{TaskId, UserId};

/// Raw directory record as returned by `GET /users`. Only `id` and `name`
/// are consumed; the remainder (address, company, ...) is dropped at the
/// mapping step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDirectoryEntry {
    pub id: UserId,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub user_id: UserId,
    pub name: String,
}

impl From<UserDirectoryEntry> for UserSummary {
    fn from(entry: UserDirectoryEntry) -> Self {
        Self {
            user_id: entry.id,
            name: entry.name,
        }
    }
}

/// Task record as returned by `GET /users/{id}/todos` and as consumed by the
/// reconciler. `task_id` and `completed` are the semantically significant
/// fields; everything else (title, ...) rides along in `extra` and is passed
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "id")]
    pub task_id: TaskId,
    #[serde(rename = "userId")]
    pub owner_id: UserId,
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}
