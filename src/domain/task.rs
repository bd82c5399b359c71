use super::{TaskId, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status assigned to every freshly created task. Updates accept any
/// caller-supplied status string; the workflow set is not enforced here.
pub const TASK_STATUS_TODO: &str = "TODO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "taskId")]
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub due: NaiveDate,
    pub status: String,
}

impl Task {
    pub fn new(title: String, description: Option<String>, due: NaiveDate) -> Self {
        Self {
            id: TaskId::default(),
            title,
            description,
            due,
            status: TASK_STATUS_TODO.to_string(),
        }
    }
}

/// Fields for creating a task. Title and due date are required; the engine
/// rejects their absence independently of the boundary layer.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
}

impl NewTask {
    pub fn parse(self) -> Result<(String, Option<String>, NaiveDate), ValidationError> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => {
                return Err(ValidationError::new(
                    "Missing required field: title".to_string(),
                ))
            }
        };
        let due = self.due.ok_or_else(|| {
            ValidationError::new("Missing required field: due".to_string())
        })?;

        Ok((title, self.description, due))
    }
}

/// Partial task update; unsupplied fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<NaiveDate>,
    pub status: Option<String>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due.is_none()
            && self.status.is_none()
    }
}
