//! Polled notification and chat feeds.
//!
//! Each feed owns a [`PollHandle`]; dropping the feed stops polling. The
//! latest snapshot is published through a `watch` channel. A failed fetch
//! is logged and the previous snapshot stays in place.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::warn;

use elderease_core::types::{TaskId, UserId};
use elderease_entity::message::Message;
use elderease_entity::notification::Notification;

use crate::api::ApiClient;
use crate::poller::{PollHandle, Poller};

/// A user's notifications, newest first, plus the unread tally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSnapshot {
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

impl From<Vec<Notification>> for NotificationSnapshot {
    fn from(notifications: Vec<Notification>) -> Self {
        let unread = notifications.iter().filter(|n| !n.read).count();
        Self {
            notifications,
            unread,
        }
    }
}

/// Polls `GET /notifications` for one user.
#[derive(Debug)]
pub struct NotificationFeed {
    rx: watch::Receiver<NotificationSnapshot>,
    _handle: PollHandle,
}

impl NotificationFeed {
    /// Start polling every `interval` (30 s in the web client).
    pub fn start(api: ApiClient, user_id: UserId, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(NotificationSnapshot::default());
        let tx = Arc::new(tx);

        let handle = Poller::new("notifications", interval).spawn(move || {
            let api = api.clone();
            let tx = Arc::clone(&tx);
            async move {
                match api.notifications(user_id).await {
                    Ok(list) => {
                        tx.send_replace(NotificationSnapshot::from(list));
                    }
                    Err(e) => {
                        warn!(user_id = %user_id, error = %e, "Failed to fetch notifications")
                    }
                }
            }
        });

        Self {
            rx,
            _handle: handle,
        }
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> NotificationSnapshot {
        self.rx.borrow().clone()
    }

    /// A receiver that wakes on every new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<NotificationSnapshot> {
        self.rx.clone()
    }
}

/// Polls `GET /tasks/{id}/messages` for one task.
#[derive(Debug)]
pub struct MessageFeed {
    rx: watch::Receiver<Vec<Message>>,
    _handle: PollHandle,
}

impl MessageFeed {
    /// Start polling every `interval` (5 s in the web client).
    pub fn start(api: ApiClient, task_id: TaskId, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(Vec::new());
        let tx = Arc::new(tx);

        let handle = Poller::new("messages", interval).spawn(move || {
            let api = api.clone();
            let tx = Arc::clone(&tx);
            async move {
                match api.list_messages(task_id).await {
                    Ok(messages) => {
                        // Skip no-op updates so subscribers only wake on new messages.
                        tx.send_if_modified(|current| {
                            if *current == messages {
                                false
                            } else {
                                *current = messages;
                                true
                            }
                        });
                    }
                    Err(e) => warn!(task_id = %task_id, error = %e, "Failed to fetch messages"),
                }
            }
        });

        Self {
            rx,
            _handle: handle,
        }
    }

    pub fn latest(&self) -> Vec<Message> {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Message>> {
        self.rx.clone()
    }
}
