use anyhow::Result;
use uuid::Uuid;

use crate::model::task::Task;

pub trait TaskRepository {
    fn create(&self, task: Task) -> Result<Task>;
    fn get(&self, id: &Uuid) -> Result<Task>;
    fn update(&self, task: &Task) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;
    fn list(&self) -> Result<Vec<Task>>;
}
