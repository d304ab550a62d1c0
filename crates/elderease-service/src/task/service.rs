//! Task use cases: create, list, transition, archive.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use elderease_core::error::AppError;
use elderease_core::types::TaskId;
use elderease_database::{TaskStore, UserStore};
use elderease_entity::notification::NotificationEvent;
use elderease_entity::task::{NewTask, Task, TaskFilter};
use elderease_entity::user::UserType;

use super::lifecycle::{self, Effect, TaskCommand};
use super::update::TaskUpdate;
use crate::notification::NotificationDispatcher;
use crate::user::RatingService;

/// Drives tasks through their lifecycle.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    dispatcher: Arc<NotificationDispatcher>,
    ratings: Arc<RatingService>,
}

impl TaskService {
    /// Creates a new task service.
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        dispatcher: Arc<NotificationDispatcher>,
        ratings: Arc<RatingService>,
    ) -> Self {
        Self {
            tasks,
            users,
            dispatcher,
            ratings,
        }
    }

    /// Create an open task and announce it to every volunteer.
    pub async fn create(&self, mut data: NewTask) -> Result<Task, AppError> {
        data.title = data.title.trim().to_string();
        if data.title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        let owner = self
            .users
            .find_by_id(data.elderly_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.elderly_id)))?;
        if !owner.is_elderly() {
            return Err(AppError::validation(format!(
                "User {} is not an elderly user",
                owner.id
            )));
        }

        let task = self.tasks.create(&data).await?;
        info!(task_id = %task.id, elderly_id = %task.elderly_id, "Task created");

        // TODO: scope the broadcast once users carry a location.
        let notified = self
            .dispatcher
            .notify_role(
                UserType::Volunteer,
                Some(task.id),
                &NotificationEvent::TaskAvailable {
                    task_title: task.title.clone(),
                },
            )
            .await;
        info!(task_id = %task.id, notified, "Volunteers notified of new task");

        Ok(task)
    }

    /// List tasks matching the filter, newest first.
    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        self.tasks.list(filter).await
    }

    /// Fetch a task.
    pub async fn get(&self, id: TaskId) -> Result<Task, AppError> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {id} not found")))
    }

    /// Apply a client update body.
    pub async fn update(&self, id: TaskId, update: TaskUpdate) -> Result<Task, AppError> {
        let command = update.into_command()?;
        self.apply(id, command).await
    }

    /// Archive a confirmed, completed task.
    pub async fn archive(&self, id: TaskId) -> Result<Task, AppError> {
        self.apply(id, TaskCommand::Archive).await
    }

    /// Plan, commit, then run side effects.
    pub async fn apply(&self, id: TaskId, command: TaskCommand) -> Result<Task, AppError> {
        let current = self.get(id).await?;

        let volunteer = match &command {
            TaskCommand::Accept(volunteer_id) => self.users.find_by_id(*volunteer_id).await?,
            _ => None,
        };

        let transition = lifecycle::plan(&current, command, volunteer.as_ref(), Utc::now())?;
        let updated = self
            .tasks
            .update_if_status(&transition.task, transition.expected)
            .await?
            .ok_or_else(|| {
                warn!(task_id = %id, expected = %transition.expected, "Lost task update race");
                AppError::invalid_transition(format!("Task {id} changed state concurrently"))
            })?;

        info!(
            task_id = %id,
            from = %current.status,
            to = %updated.status,
            "Task updated"
        );

        for effect in transition.effects {
            match effect {
                Effect::RateVolunteer {
                    volunteer_id,
                    rating,
                } => {
                    // The task row already carries the rating; a failed append
                    // cannot be retried through the API and the rating is lost.
                    if let Err(e) = self.ratings.record(volunteer_id, rating).await {
                        warn!(
                            task_id = %id,
                            volunteer_id = %volunteer_id,
                            rating = rating.value(),
                            error = %e,
                            "Task rated but volunteer rating not recorded"
                        );
                        return Err(e);
                    }
                }
                Effect::Notify { recipient, event } => {
                    self.dispatcher
                        .notify(recipient, Some(updated.id), &event)
                        .await;
                }
            }
        }

        Ok(updated)
    }
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskService").finish_non_exhaustive()
    }
}
