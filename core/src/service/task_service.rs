use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::model::task::{Status, Task};
use crate::quick_add::parse_quick_add;
use crate::repository::TaskRepository;
use crate::rollover::{rollover_on_completion, CompletionOutcome};

/// Wires the pure quick-add / rollover functions to a task store.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_from_quick_add<Tz: TimeZone>(&self, text: &str, now: &DateTime<Tz>) -> Result<Task> {
        let parsed = parse_quick_add(text, now);
        let task = parsed.into_task(now.with_timezone(&Utc));
        self.repo.create(task)
    }

    pub fn get_task(&self, id: &Uuid) -> Result<Task> {
        self.repo.get(id)
    }

    pub fn delete_task(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)
    }

    /// Open tasks sorted by due time, undated ones last.
    pub fn list_open(&self) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .repo
            .list()?
            .into_iter()
            .filter(|t| t.status == Status::Open)
            .collect();
        tasks.sort_by_key(|t| t.due.map(|d| d.timestamp()).unwrap_or(i64::MAX));
        Ok(tasks)
    }

    /// Completes a task, persisting the completed copy, any completed
    /// subtask copies, and the recurrence successor if one materializes.
    pub fn complete_task<Tz: TimeZone>(
        &self,
        id: &Uuid,
        now: &DateTime<Tz>,
    ) -> Result<CompletionOutcome> {
        let task = self.repo.get(id)?;
        let subtasks: Vec<Task> = self
            .repo
            .list()?
            .into_iter()
            .filter(|t| t.parent_id == Some(task.id))
            .collect();

        let outcome = rollover_on_completion(&task, &subtasks, now);

        self.repo.update(&outcome.completed)?;
        for sub in &outcome.completed_subtasks {
            self.repo.update(sub)?;
        }
        if let Some(successor) = &outcome.successor {
            self.repo.create(successor.clone())?;
        }
        Ok(outcome)
    }
}
