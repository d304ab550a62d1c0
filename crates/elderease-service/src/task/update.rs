//! Mapping of the partial-update body onto a lifecycle command.

use serde::{Deserialize, Serialize};

use elderease_core::error::AppError;
use elderease_core::result::AppResult;
use elderease_core::types::UserId;
use elderease_entity::task::{TaskEdit, TaskStatus};
use elderease_entity::user::Rating;

use super::lifecycle::TaskCommand;

/// Fields a client may send when updating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub volunteer_id: Option<UserId>,
    pub elderly_confirmed: Option<bool>,
    pub rating: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl TaskUpdate {
    fn edit(&self) -> TaskEdit {
        TaskEdit {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
        }
    }

    /// Interpret the update as exactly one lifecycle command.
    ///
    /// - `status: Accepted` needs `volunteerId`.
    /// - `status: Archived` with a rating confirms, rates and archives;
    ///   without one it is a plain archive.
    /// - `elderlyConfirmed: true` without a status confirms, optionally rated.
    /// - Title, description and image alone are an edit.
    pub fn into_command(self) -> AppResult<TaskCommand> {
        let edit = self.edit();
        if self.status.is_some() && !edit.is_empty() {
            return Err(AppError::validation(
                "Field edits cannot be combined with a status change",
            ));
        }
        let rating = self.rating.map(Rating::new).transpose()?;

        let command = match self.status {
            Some(TaskStatus::Accepted) => {
                let volunteer_id = self.volunteer_id.ok_or_else(|| {
                    AppError::validation("volunteerId is required to accept a task")
                })?;
                TaskCommand::Accept(volunteer_id)
            }
            Some(TaskStatus::Completed) => TaskCommand::Complete,
            Some(TaskStatus::Open) => TaskCommand::Reset,
            Some(TaskStatus::Cancelled) => TaskCommand::Cancel,
            Some(TaskStatus::Archived) => match rating {
                Some(rating) => return Ok(TaskCommand::ConfirmAndArchive(rating)),
                None => TaskCommand::Archive,
            },
            None if self.elderly_confirmed == Some(true) => {
                return Ok(TaskCommand::Confirm(rating));
            }
            None if rating.is_some() => {
                return Err(AppError::validation(
                    "A rating can only be given together with elderlyConfirmed",
                ));
            }
            None if edit.is_empty() => return Err(AppError::validation("No changes requested")),
            None => return Ok(TaskCommand::Edit(edit)),
        };

        if rating.is_some() {
            return Err(AppError::validation(
                "A rating can only be given when confirming completion",
            ));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elderease_core::error::ErrorKind;

    #[test]
    fn test_accept_requires_volunteer() {
        let update = TaskUpdate {
            status: Some(TaskStatus::Accepted),
            ..Default::default()
        };
        assert_eq!(update.into_command().unwrap_err().kind, ErrorKind::Validation);

        let update = TaskUpdate {
            status: Some(TaskStatus::Accepted),
            volunteer_id: Some(UserId::new(4)),
            ..Default::default()
        };
        assert_eq!(update.into_command().unwrap(), TaskCommand::Accept(UserId::new(4)));
    }

    #[test]
    fn test_archive_with_rating_from_client_body() {
        let update: TaskUpdate = serde_json::from_str(
            r#"{"status":"Archived","elderlyConfirmed":true,"rating":5}"#,
        )
        .unwrap();
        assert_eq!(
            update.into_command().unwrap(),
            TaskCommand::ConfirmAndArchive(Rating::new(5).unwrap())
        );
    }

    #[test]
    fn test_out_of_range_rating_is_validation_error() {
        let update = TaskUpdate {
            elderly_confirmed: Some(true),
            rating: Some(9),
            ..Default::default()
        };
        assert_eq!(update.into_command().unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_edit_and_empty_updates() {
        let update = TaskUpdate {
            description: Some("Two bags".into()),
            ..Default::default()
        };
        assert!(matches!(update.into_command().unwrap(), TaskCommand::Edit(_)));
        assert!(TaskUpdate::default().into_command().is_err());

        let mixed = TaskUpdate {
            status: Some(TaskStatus::Completed),
            title: Some("x".into()),
            ..Default::default()
        };
        assert!(mixed.into_command().is_err());
    }
}
