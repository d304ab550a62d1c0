//! The task state machine.
//!
//! [`plan`] is pure: given the current task and a command it either
//! refuses, or returns the task as it should be stored together with the
//! side effects to run once the write has been committed.

use chrono::{DateTime, Utc};

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_core::types::UserId;
use elderease_entity::notification::{CompletionAudience, NotificationEvent};
use elderease_entity::task::{Task, TaskEdit, TaskStatus};
use elderease_entity::user::{Rating, User};

/// A requested change to a task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskCommand {
    /// `Open → Accepted` by the given volunteer.
    Accept(UserId),
    /// `Accepted → Completed`.
    Complete,
    /// `Accepted → Open`, releasing the volunteer.
    Reset,
    /// Elderly confirmation of a completed task, optionally rated.
    Confirm(Option<Rating>),
    /// Confirm, rate, and archive in one step.
    ConfirmAndArchive(Rating),
    /// `Completed → Archived` after confirmation.
    Archive,
    /// Withdraw a task that is not finished yet.
    Cancel,
    /// Change title, description or image of an open task.
    Edit(TaskEdit),
}

/// Work to do after the task write succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Append a rating to the volunteer's history.
    RateVolunteer { volunteer_id: UserId, rating: Rating },
    /// Store a notification for one user.
    Notify {
        recipient: UserId,
        event: NotificationEvent,
    },
}

/// Outcome of a successful [`plan`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The task as it must be written.
    pub task: Task,
    /// Status the stored row must still have for the write to apply.
    pub expected: TaskStatus,
    /// Side effects, in execution order.
    pub effects: Vec<Effect>,
}

/// Decide how `command` changes `current`.
///
/// `volunteer` is the resolved user for [`TaskCommand::Accept`] and is
/// ignored otherwise.
pub fn plan(
    current: &Task,
    command: TaskCommand,
    volunteer: Option<&User>,
    now: DateTime<Utc>,
) -> AppResult<Transition> {
    let mut task = current.clone();
    let expected = current.status;
    let mut effects = Vec::new();

    match command {
        TaskCommand::Accept(volunteer_id) => {
            require_status(current, TaskStatus::Open, "accepted")?;
            let volunteer = volunteer
                .filter(|v| v.id == volunteer_id)
                .ok_or_else(|| AppError::not_found(format!("User {volunteer_id} not found")))?;
            if !volunteer.is_volunteer() {
                return Err(AppError::validation(format!(
                    "User {volunteer_id} is not a volunteer"
                )));
            }
            task.status = TaskStatus::Accepted;
            task.volunteer_id = Some(volunteer_id);
            effects.push(Effect::Notify {
                recipient: task.elderly_id,
                event: NotificationEvent::TaskAccepted {
                    task_title: task.title.clone(),
                    volunteer_name: volunteer.full_name(),
                },
            });
        }
        TaskCommand::Complete => {
            require_status(current, TaskStatus::Accepted, "completed")?;
            let volunteer_id = assigned_volunteer(current)?;
            task.status = TaskStatus::Completed;
            task.completed_at = Some(now);
            for (recipient, audience) in [
                (task.elderly_id, CompletionAudience::Elderly),
                (volunteer_id, CompletionAudience::Volunteer),
            ] {
                effects.push(Effect::Notify {
                    recipient,
                    event: NotificationEvent::TaskCompleted {
                        task_title: task.title.clone(),
                        audience,
                    },
                });
            }
        }
        TaskCommand::Reset => {
            require_status(current, TaskStatus::Accepted, "reopened")?;
            task.status = TaskStatus::Open;
            task.volunteer_id = None;
        }
        TaskCommand::Confirm(rating) => {
            require_status(current, TaskStatus::Completed, "confirmed")?;
            task.elderly_confirmed = true;
            if let Some(rating) = rating {
                apply_rating(&mut task, rating, &mut effects)?;
            }
        }
        TaskCommand::ConfirmAndArchive(rating) => {
            require_status(current, TaskStatus::Completed, "archived")?;
            task.elderly_confirmed = true;
            apply_rating(&mut task, rating, &mut effects)?;
            task.status = TaskStatus::Archived;
            task.archived = true;
        }
        TaskCommand::Archive => {
            if !current.is_archivable() {
                return Err(AppError::invalid_transition("Task cannot be archived"));
            }
            task.status = TaskStatus::Archived;
            task.archived = true;
        }
        TaskCommand::Cancel => {
            if !current.status.is_cancellable() {
                return Err(AppError::invalid_transition(format!(
                    "Task {} is {} and cannot be cancelled",
                    current.id, current.status
                )));
            }
            task.status = TaskStatus::Cancelled;
        }
        TaskCommand::Edit(edit) => {
            require_status(current, TaskStatus::Open, "edited")?;
            if edit.is_empty() {
                return Err(AppError::validation("No changes requested"));
            }
            if edit.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
                return Err(AppError::validation("Title must not be empty"));
            }
            edit.apply_to(&mut task);
        }
    }

    Ok(Transition {
        task,
        expected,
        effects,
    })
}

fn require_status(task: &Task, required: TaskStatus, action: &str) -> AppResult<()> {
    if task.status == required {
        Ok(())
    } else {
        Err(AppError::invalid_transition(format!(
            "Task {} is {} and cannot be {action}",
            task.id, task.status
        )))
    }
}

fn assigned_volunteer(task: &Task) -> AppResult<UserId> {
    task.volunteer_id.ok_or_else(|| {
        AppError::invalid_transition(format!("Task {} has no assigned volunteer", task.id))
    })
}

fn apply_rating(task: &mut Task, rating: Rating, effects: &mut Vec<Effect>) -> AppResult<()> {
    if task.rating.is_some() {
        return Err(AppError::invalid_transition(format!(
            "Task {} has already been rated",
            task.id
        )));
    }
    let volunteer_id = assigned_volunteer(task)?;
    task.rating = Some(rating.value());
    effects.push(Effect::RateVolunteer {
        volunteer_id,
        rating,
    });
    effects.push(Effect::Notify {
        recipient: volunteer_id,
        event: NotificationEvent::TaskRated {
            task_title: task.title.clone(),
            rating: rating.value(),
        },
    });
    Ok(())
}
