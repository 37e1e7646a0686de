use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(TaskId);

/// Lifecycle of the task collection for the active selection.
///
/// `Reconciling` is a synchronous transient: entered and left within a single
/// `apply_task_update` call, observable only through event ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskListPhase {
    Empty,
    Loading,
    Loaded,
    Reconciling,
}
