//! In-memory task store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use elderease_core::result::AppResult;
use elderease_core::types::TaskId;
use elderease_entity::task::{NewTask, Task, TaskFilter, TaskStatus};

use super::IdSequence;
use crate::store::TaskStore;

/// Task store held in process memory.
#[derive(Debug)]
pub struct MemoryTaskStore {
    tasks: DashMap<TaskId, Task>,
    ids: IdSequence,
}

impl MemoryTaskStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            tasks: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, data: &NewTask) -> AppResult<Task> {
        let task = Task {
            id: TaskId::new(self.ids.next()),
            title: data.title.clone(),
            description: data.description.clone(),
            elderly_id: data.elderly_id,
            volunteer_id: None,
            status: TaskStatus::Open,
            image: data.image.clone(),
            created_at: Utc::now(),
            completed_at: None,
            elderly_confirmed: false,
            rating: None,
            archived: false,
        };
        self.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_by_id(&self, id: TaskId) -> AppResult<Option<Task>> {
        Ok(self.tasks.get(&id).map(|t| t.value().clone()))
    }

    async fn list(&self, filter: &TaskFilter) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(tasks)
    }

    async fn update_if_status(
        &self,
        task: &Task,
        expected: TaskStatus,
    ) -> AppResult<Option<Task>> {
        let Some(mut entry) = self.tasks.get_mut(&task.id) else {
            return Ok(None);
        };
        if entry.status != expected {
            return Ok(None);
        }
        // elderly_id and created_at are immutable.
        let stored = entry.value_mut();
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.volunteer_id = task.volunteer_id;
        stored.status = task.status;
        stored.image = task.image.clone();
        stored.completed_at = task.completed_at;
        stored.elderly_confirmed = task.elderly_confirmed;
        stored.rating = task.rating;
        stored.archived = task.archived;
        Ok(Some(stored.clone()))
    }
}
