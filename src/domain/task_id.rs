use super::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task identifiers only need to be unique within one member's task list,
/// but a v4 UUID keeps them unique outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn parse(id: &str) -> Result<Self, ValidationError> {
        let parsed = uuid::Uuid::try_parse(id)
            .map_err(|e| ValidationError::new(format!("Invalid task ID: {e}")))?;
        Ok(Self(parsed))
    }

    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl AsRef<Uuid> for TaskId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

#[test]
fn test_invalid_ids() {
    let invalid_id = "1234";
    let error = TaskId::parse(invalid_id).expect_err(invalid_id);
    assert!(error.as_ref().starts_with("Invalid task ID"));
}
