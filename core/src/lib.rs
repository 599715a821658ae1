pub mod model;
pub mod quick_add;
pub mod recurrence;
pub mod repository;
pub mod rollover;
pub mod service;

pub use model::task::{Priority, ReminderSpec, Status, Task};
pub use quick_add::{parse_quick_add, QuickAddResult};
pub use recurrence::{next_occurrence, Frequency, RecurrenceRule};
pub use repository::{FileTaskRepository, TaskRepository};
pub use rollover::{rollover_on_completion, CompletionOutcome};
pub use service::task_service::TaskService;
