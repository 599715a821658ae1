use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::model::task::Task;
use crate::repository::traits::TaskRepository;

const DEFAULT_FILE_NAME: &str = "tasks.json";

/// JSON-file backed task store under `~/.quickdo` by default.
#[derive(Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".quickdo")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Task>::new())?;
            writer.flush()?;
        }

        Ok(FileTaskRepository { file_path: path })
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let tasks = serde_json::from_reader(reader)?;
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn get(&self, id: &Uuid) -> Result<Task> {
        let tasks = self.read_tasks()?;
        tasks
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or_else(|| anyhow!("Task not found: {}", id))
    }

    fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let slot = tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| anyhow!("Task not found: {}", task.id))?;
        *slot = task.clone();
        self.write_tasks(&tasks)
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == before {
            return Err(anyhow!("Task not found: {}", id));
        }
        self.write_tasks(&tasks)
    }

    fn list(&self) -> Result<Vec<Task>> {
        self.read_tasks()
    }
}
