//! Posting and listing task messages.

use std::sync::Arc;

use tracing::info;

use elderease_core::error::AppError;
use elderease_core::types::TaskId;
use elderease_database::{MessageStore, TaskStore, UserStore};
use elderease_entity::message::{Message, NewMessage};
use elderease_entity::notification::NotificationEvent;
use elderease_entity::task::Task;

use crate::notification::NotificationDispatcher;

/// Handles the chat attached to each task.
#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    tasks: Arc<dyn TaskStore>,
    users: Arc<dyn UserStore>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl MessageService {
    /// Creates a new message service.
    pub fn new(
        messages: Arc<dyn MessageStore>,
        tasks: Arc<dyn TaskStore>,
        users: Arc<dyn UserStore>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            messages,
            tasks,
            users,
            dispatcher,
        }
    }

    async fn task(&self, task_id: TaskId) -> Result<Task, AppError> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Task {task_id} not found")))
    }

    /// Messages of a task, oldest first.
    pub async fn list(&self, task_id: TaskId) -> Result<Vec<Message>, AppError> {
        self.task(task_id).await?;
        self.messages.list_by_task(task_id).await
    }

    /// Post a message and notify the other participant, if assigned.
    pub async fn post(&self, mut data: NewMessage) -> Result<Message, AppError> {
        if data.content.trim().is_empty() {
            return Err(AppError::validation("Message content is required"));
        }
        let task = self.task(data.task_id).await?;
        if !task.is_participant(data.sender_id) {
            return Err(AppError::validation(format!(
                "User {} is not a participant of task {}",
                data.sender_id, task.id
            )));
        }

        let has_name = data
            .sender_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if !has_name {
            let sender = self.users.find_by_id(data.sender_id).await?.ok_or_else(|| {
                AppError::not_found(format!("User {} not found", data.sender_id))
            })?;
            data.sender_name = Some(sender.full_name());
        }

        let message = self.messages.create(&data).await?;
        info!(task_id = %task.id, message_id = %message.id, sender_id = %message.sender_id, "Message posted");

        if let Some(recipient) = task.counterpart_of(message.sender_id) {
            self.dispatcher
                .notify(
                    recipient,
                    Some(task.id),
                    &NotificationEvent::NewMessage {
                        task_title: task.title.clone(),
                    },
                )
                .await;
        }
        Ok(message)
    }
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService").finish_non_exhaustive()
    }
}
