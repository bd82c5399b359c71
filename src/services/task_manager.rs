use color_eyre::eyre::eyre;

use crate::app_state::MemberStoreType;
use crate::domain::{
    Member, MemberAPIError, MemberId, MemberStoreError, NewTask, Task, TaskId,
    TaskUpdate, ValidationError,
};

/// CRUD over the task list embedded in one member record. The member
/// identity always comes from the caller's verified credential.
#[derive(Clone)]
pub struct TaskManager {
    member_store: MemberStoreType,
}

impl TaskManager {
    pub fn new(member_store: MemberStoreType) -> Self {
        Self { member_store }
    }

    #[tracing::instrument(name = "Creating task", skip_all)]
    pub async fn create_task(
        &self,
        member_id: &MemberId,
        new_task: NewTask,
    ) -> Result<Task, MemberAPIError> {
        let (title, description, due) = new_task.parse()?;

        let mut member = self.load_member(member_id).await?;
        let task = Task::new(title, description, due);
        member.tasks.push(task.clone());

        self.persist(&member).await?;
        Ok(task)
    }

    #[tracing::instrument(name = "Listing tasks", skip_all)]
    pub async fn list_tasks(
        &self,
        member_id: &MemberId,
    ) -> Result<Vec<Task>, MemberAPIError> {
        let member = self.load_member(member_id).await?;
        Ok(member.tasks)
    }

    #[tracing::instrument(name = "Retrieving task", skip_all)]
    pub async fn get_task(
        &self,
        member_id: &MemberId,
        task_id: &TaskId,
    ) -> Result<Task, MemberAPIError> {
        let member = self.load_member(member_id).await?;
        member
            .tasks
            .into_iter()
            .find(|t| &t.id == task_id)
            .ok_or(MemberAPIError::NotFound)
    }

    #[tracing::instrument(name = "Updating task", skip_all)]
    pub async fn update_task(
        &self,
        member_id: &MemberId,
        task_id: &TaskId,
        update: TaskUpdate,
    ) -> Result<Task, MemberAPIError> {
        if update.is_empty() {
            return Err(ValidationError::new(
                "No fields supplied for update".to_string(),
            )
            .into());
        }

        let mut member = self.load_member(member_id).await?;
        let task = member
            .tasks
            .iter_mut()
            .find(|t| &t.id == task_id)
            .ok_or(MemberAPIError::NotFound)?;

        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = Some(description);
        }
        if let Some(due) = update.due {
            task.due = due;
        }
        if let Some(status) = update.status {
            task.status = status;
        }

        let task = task.clone();
        self.persist(&member).await?;
        Ok(task)
    }

    /// Absence is detected by comparing sequence length after the removal
    /// pass, matching the persistence gateway's whole-array rewrite model.
    #[tracing::instrument(name = "Deleting task", skip_all)]
    pub async fn delete_task(
        &self,
        member_id: &MemberId,
        task_id: &TaskId,
    ) -> Result<(), MemberAPIError> {
        let mut member = self.load_member(member_id).await?;

        let before = member.tasks.len();
        member.tasks.retain(|t| &t.id != task_id);

        if member.tasks.len() == before {
            return Err(MemberAPIError::NotFound);
        }

        self.persist(&member).await?;
        Ok(())
    }

    async fn load_member(
        &self,
        member_id: &MemberId,
    ) -> Result<Member, MemberAPIError> {
        self.member_store
            .read()
            .await
            .get_member(member_id)
            .await
            .map_err(|e| match e {
                MemberStoreError::MemberNotFound => MemberAPIError::NotFound,
                err => MemberAPIError::UnexpectedError(eyre!(err)),
            })
    }

    async fn persist(&self, member: &Member) -> Result<(), MemberAPIError> {
        self.member_store
            .write()
            .await
            .update_member(member)
            .await
            .map_err(|e| MemberAPIError::UnexpectedError(eyre!(e)))
    }
}
