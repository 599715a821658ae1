use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    P1,
    P2,
    P3,
    P4,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::P4
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Open,
    Completed,
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

/// A reminder attached to a task. Either a concrete instant, or a number of
/// minutes before the task's due time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ReminderSpec {
    Absolute(DateTime<Utc>),
    Offset(i64),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub priority: Priority,
    pub status: Status,

    pub project: Option<String>,
    pub section: Option<String>,
    pub parent_id: Option<Uuid>,

    pub due: Option<DateTime<Utc>>,
    pub due_all_day: bool,
    pub deadline: Option<DateTime<Utc>>,
    pub deadline_all_day: bool,

    pub recurring_rule: Option<String>,
    pub deadline_recurring_rule: Option<String>,

    #[serde(default)]
    pub reminders: Vec<ReminderSpec>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            priority: Priority::default(),
            status: Status::default(),
            project: None,
            section: None,
            parent_id: None,
            due: None,
            due_all_day: false,
            deadline: None,
            deadline_all_day: false,
            recurring_rule: None,
            deadline_recurring_rule: None,
            reminders: Vec::new(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }
}
