//! Volunteer rating aggregation.

use std::sync::Arc;

use tracing::info;

use elderease_core::error::AppError;
use elderease_core::types::{TaskId, UserId};
use elderease_database::{TaskStore, UserStore};
use elderease_entity::notification::NotificationEvent;
use elderease_entity::user::{Rating, User};

use crate::notification::NotificationDispatcher;

/// Records ratings against volunteers.
#[derive(Clone)]
pub struct RatingService {
    users: Arc<dyn UserStore>,
    tasks: Arc<dyn TaskStore>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl RatingService {
    /// Creates a new rating service.
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            users,
            tasks,
            dispatcher,
        }
    }

    /// Append `rating` to a volunteer and recompute their average.
    pub async fn record(&self, volunteer_id: UserId, rating: Rating) -> Result<User, AppError> {
        let user = self.users.append_rating(volunteer_id, rating).await?;
        info!(
            user_id = %volunteer_id,
            rating = rating.value(),
            average = user.average_rating,
            "Rating recorded"
        );
        Ok(user)
    }

    /// Rate the volunteer of a confirmed task.
    ///
    /// The user must be the task's volunteer and the task must be confirmed
    /// and not rated yet. The rating is stored on the task first so it can
    /// be counted only once.
    pub async fn rate_for_task(
        &self,
        user_id: UserId,
        task_id: TaskId,
        raw_rating: i32,
    ) -> Result<User, AppError> {
        let rating = Rating::new(raw_rating)?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {task_id} not found")))?;

        if task.volunteer_id != Some(user_id) {
            return Err(AppError::validation(format!(
                "User {user_id} is not the volunteer of task {task_id}"
            )));
        }
        if !task.elderly_confirmed {
            return Err(AppError::invalid_transition(format!(
                "Task {task_id} has not been confirmed by its owner"
            )));
        }
        if task.rating.is_some() {
            return Err(AppError::invalid_transition(format!(
                "Task {task_id} has already been rated"
            )));
        }

        let mut rated = task.clone();
        rated.rating = Some(rating.value());
        self.tasks
            .update_if_status(&rated, task.status)
            .await?
            .ok_or_else(|| {
                AppError::invalid_transition(format!("Task {task_id} changed state concurrently"))
            })?;

        let user = self.record(user_id, rating).await?;
        self.dispatcher
            .notify(
                user_id,
                Some(task_id),
                &NotificationEvent::RatingReceived {
                    task_title: task.title.clone(),
                    rating: rating.value(),
                },
            )
            .await;
        Ok(user)
    }
}

impl std::fmt::Debug for RatingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingService").finish_non_exhaustive()
    }
}
