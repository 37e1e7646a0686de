use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{TaskId, TaskListPhase, UserId},
    protocol::{TaskRecord, UserDirectoryEntry, UserSummary},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

pub mod reconcile;
pub mod rest;

/// Directory of selectable users. `GET /users` in the REST adapter.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserDirectoryEntry>>;
}

pub struct MissingDirectoryService;

#[async_trait]
impl DirectoryService for MissingDirectoryService {
    async fn list_users(&self) -> Result<Vec<UserDirectoryEntry>> {
        Err(anyhow!("directory service is unavailable"))
    }
}

/// Per-user task collection. `GET /users/{id}/todos` in the REST adapter.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn tasks_for_user(&self, user_id: UserId) -> Result<Vec<TaskRecord>>;
}

pub struct MissingTaskService;

#[async_trait]
impl TaskService for MissingTaskService {
    async fn tasks_for_user(&self, user_id: UserId) -> Result<Vec<TaskRecord>> {
        Err(anyhow!("task service is unavailable for user {}", user_id.0))
    }
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    UsersLoaded {
        users: Vec<UserSummary>,
    },
    SelectionChanged {
        user: UserSummary,
    },
    TasksUpdated {
        user_id: UserId,
        tasks: Vec<TaskRecord>,
        summary: String,
    },
    TaskReconciled {
        task_id: TaskId,
    },
}

struct ClientState {
    users: Vec<UserSummary>,
    selected: Option<UserSummary>,
    tasks: Vec<TaskRecord>,
    phase: TaskListPhase,
    // Bumped on every selection change; a task fetch carries the value it was
    // initiated under and its result is discarded once the counter has moved
    // on. Last-selected wins, never last-resolved.
    tasks_generation: u64,
}

/// Owns the user directory, the active selection and the task collection for
/// that selection. All mutation goes through this controller; the lock is
/// held only around state access, never across a network await.
pub struct TaskBoardClient {
    directory: Arc<dyn DirectoryService>,
    task_service: Arc<dyn TaskService>,
    inner: Mutex<ClientState>,
    events: broadcast::Sender<ClientEvent>,
}

impl TaskBoardClient {
    pub fn new() -> Arc<Self> {
        Self::new_with_services(Arc::new(MissingDirectoryService), Arc::new(MissingTaskService))
    }

    pub fn new_with_services(
        directory: Arc<dyn DirectoryService>,
        task_service: Arc<dyn TaskService>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            directory,
            task_service,
            inner: Mutex::new(ClientState {
                users: Vec::new(),
                selected: None,
                tasks: Vec::new(),
                phase: TaskListPhase::Empty,
                tasks_generation: 0,
            }),
            events,
        })
    }

    /// Loads the user directory, selects the first user in response order and
    /// runs the initial task fetch for that selection. A directory failure
    /// degrades silently: the user list stays empty, nothing is selected and
    /// the task fetch never triggers.
    pub async fn initialize(&self) -> Result<()> {
        let entries = match self.directory.list_users().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!("directory fetch failed; user list stays empty: {err:#}");
                return Ok(());
            }
        };

        let users: Vec<UserSummary> = entries.into_iter().map(UserSummary::from).collect();
        let selected = users.first().cloned();
        info!(user_count = users.len(), "user directory loaded");

        let generation = {
            let mut guard = self.inner.lock().await;
            guard.users = users.clone();
            guard.selected = selected.clone();
            if selected.is_some() {
                guard.tasks_generation += 1;
                guard.phase = TaskListPhase::Loading;
            }
            guard.tasks_generation
        };
        let _ = self.events.send(ClientEvent::UsersLoaded { users });

        if let Some(user) = selected {
            let _ = self
                .events
                .send(ClientEvent::SelectionChanged { user: user.clone() });
            self.load_tasks(user.user_id, generation).await;
        }
        Ok(())
    }

    /// Replaces the selection unconditionally (membership in the loaded
    /// directory is not validated) and fetches that user's tasks.
    pub async fn select_user(&self, user: UserSummary) {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.selected = Some(user.clone());
            guard.tasks_generation += 1;
            guard.phase = TaskListPhase::Loading;
            guard.tasks_generation
        };
        let _ = self
            .events
            .send(ClientEvent::SelectionChanged { user: user.clone() });
        self.load_tasks(user.user_id, generation).await;
    }

    async fn load_tasks(&self, user_id: UserId, generation: u64) {
        let mut fetched = match self.task_service.tasks_for_user(user_id).await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    user_id = user_id.0,
                    "task fetch failed; keeping previous collection: {err:#}"
                );
                let mut guard = self.inner.lock().await;
                if guard.tasks_generation == generation {
                    guard.phase = if guard.tasks.is_empty() {
                        TaskListPhase::Empty
                    } else {
                        TaskListPhase::Loaded
                    };
                }
                return;
            }
        };

        reconcile::sort_by_completion(&mut fetched);

        {
            let mut guard = self.inner.lock().await;
            if guard.tasks_generation != generation {
                debug!(
                    user_id = user_id.0,
                    stale_generation = generation,
                    current_generation = guard.tasks_generation,
                    "discarding task fetch result for a superseded selection"
                );
                return;
            }
            guard.tasks = fetched.clone();
            guard.phase = TaskListPhase::Loaded;
        }

        let summary = reconcile::progress_summary(&fetched);
        let _ = self.events.send(ClientEvent::TasksUpdated {
            user_id,
            tasks: fetched,
            summary,
        });
    }

    /// Folds a full replacement record into the current collection and
    /// restores the completion ordering. An update whose id is not present is
    /// a no-op; applying the same update twice is the same as applying it
    /// once.
    pub async fn apply_task_update(&self, update: TaskRecord) {
        let task_id = update.task_id;
        let (user_id, tasks) = {
            let mut guard = self.inner.lock().await;
            let Some(user_id) = guard.selected.as_ref().map(|user| user.user_id) else {
                return;
            };
            guard.phase = TaskListPhase::Reconciling;
            let current = std::mem::take(&mut guard.tasks);
            let mut next = reconcile::apply_update(current, update);
            reconcile::sort_by_completion(&mut next);
            guard.tasks = next.clone();
            guard.phase = if next.is_empty() {
                TaskListPhase::Empty
            } else {
                TaskListPhase::Loaded
            };
            (user_id, next)
        };

        let _ = self.events.send(ClientEvent::TaskReconciled { task_id });
        let summary = reconcile::progress_summary(&tasks);
        let _ = self.events.send(ClientEvent::TasksUpdated {
            user_id,
            tasks,
            summary,
        });
    }

    pub async fn users(&self) -> Vec<UserSummary> {
        self.inner.lock().await.users.clone()
    }

    pub async fn selected_user(&self) -> Option<UserSummary> {
        self.inner.lock().await.selected.clone()
    }

    pub async fn tasks(&self) -> Vec<TaskRecord> {
        self.inner.lock().await.tasks.clone()
    }

    pub async fn task_list_phase(&self) -> TaskListPhase {
        self.inner.lock().await.phase
    }

    /// `"<completed>/<total> tasks done"`, always in sync with the published
    /// collection.
    pub async fn progress_summary(&self) -> String {
        reconcile::progress_summary(&self.inner.lock().await.tasks)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
