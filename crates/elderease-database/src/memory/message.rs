//! In-memory message store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use elderease_core::result::AppResult;
use elderease_core::types::{MessageId, TaskId};
use elderease_entity::message::{Message, NewMessage};

use super::IdSequence;
use crate::store::MessageStore;

/// Message store held in process memory.
#[derive(Debug)]
pub struct MemoryMessageStore {
    messages: DashMap<MessageId, Message>,
    ids: IdSequence,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            messages: DashMap::new(),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn create(&self, data: &NewMessage) -> AppResult<Message> {
        let message = Message {
            id: MessageId::new(self.ids.next()),
            task_id: data.task_id,
            sender_id: data.sender_id,
            sender_name: data.sender_name.clone().unwrap_or_default(),
            content: data.content.clone(),
            timestamp: Utc::now(),
        };
        self.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn list_by_task(&self, task_id: TaskId) -> AppResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .messages
            .iter()
            .filter(|entry| entry.value().task_id == task_id)
            .map(|entry| entry.value().clone())
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(messages)
    }
}
