use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use clap::Parser;
use quickdo_core::{
    next_occurrence, parse_quick_add, FileTaskRepository, ReminderSpec, Task, TaskService,
};
use tabled::{Table, Tabled};

#[derive(Parser)]
#[command(name = "quickdo")]
#[command(about = "Quick-add task manager with recurrence-aware completion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task from one quick-add line (e.g. add "Pay rent tomorrow 8am p1 #Home")
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// List open tasks
    List,
    /// Complete a task by id prefix; recurring tasks roll over
    Done { id: String },
    /// Dry-run a quick-add line and print the structured result
    Parse {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Print the next occurrences of a recurrence rule
    Next {
        /// Rule string, e.g. "FREQ=WEEKLY;BYDAY=MO,FR"
        rule: String,
        /// Start date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        from: Option<String>,
        #[arg(long, default_value_t = 5)]
        count: u32,
    },
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Pri")]
    priority: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Repeats")]
    repeats: String,
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.to_string()[..8].to_string(),
            priority: format!("{:?}", task.priority),
            due: task
                .due
                .map(format_local)
                .unwrap_or_else(|| "-".to_string()),
            repeats: task.recurring_rule.clone().unwrap_or_else(|| "-".to_string()),
            project: task.project.clone().unwrap_or_else(|| "-".to_string()),
            title: task.title.clone(),
        }
    }
}

fn format_local(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn find_by_prefix(tasks: &[Task], prefix: &str) -> Result<Task> {
    let matches: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.id.to_string().starts_with(prefix))
        .collect();
    match matches.len() {
        1 => Ok(matches[0].clone()),
        0 => Err(anyhow!("No task with id prefix '{}'", prefix)),
        _ => Err(anyhow!("Ambiguous id prefix '{}'", prefix)),
    }
}

fn main() -> Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")?.start()?;
    let cli = Cli::parse();
    let service = TaskService::new(FileTaskRepository::new(None)?);

    match cli.command {
        Commands::Add { text } => {
            let line = text.join(" ");
            if line.trim().is_empty() {
                return Err(anyhow!("Task text is required"));
            }
            let task = service.add_from_quick_add(&line, &Local::now())?;
            println!("Added: {} (ID: {})", task.title, task.id);
            if let Some(due) = task.due {
                println!("  Due: {}", format_local(due));
            }
            if let Some(rule) = &task.recurring_rule {
                println!("  Repeats: {}", rule);
            }
        }
        Commands::List => {
            let tasks = service.list_open()?;
            if tasks.is_empty() {
                println!("No open tasks.");
            } else {
                let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from_task).collect();
                println!("{}", Table::new(rows));
            }
        }
        Commands::Done { id } => {
            let task = find_by_prefix(&service.list_open()?, &id)?;
            let outcome = service.complete_task(&task.id, &Local::now())?;
            println!("Completed: {}", outcome.completed.title);
            for sub in &outcome.completed_subtasks {
                println!("  Also completed subtask: {}", sub.title);
            }
            match outcome.successor {
                Some(next) => {
                    let due = next
                        .due
                        .map(format_local)
                        .unwrap_or_else(|| "-".to_string());
                    println!("  Next occurrence: {} (ID: {})", due, next.id);
                }
                None => println!("  No further occurrences."),
            }
        }
        Commands::Parse { text } => {
            let line = text.join(" ");
            let result = parse_quick_add(&line, &Local::now());
            println!("Title:    {}", result.title);
            println!("Priority: {:?}", result.priority);
            println!(
                "Project:  {}",
                result.project.as_deref().unwrap_or("-")
            );
            println!(
                "Section:  {}",
                result.section.as_deref().unwrap_or("-")
            );
            println!(
                "Due:      {}{}",
                result.due.map(format_local).unwrap_or_else(|| "-".to_string()),
                if result.due_all_day { " (all day)" } else { "" }
            );
            println!(
                "Deadline: {}{}",
                result
                    .deadline
                    .map(format_local)
                    .unwrap_or_else(|| "-".to_string()),
                if result.deadline_all_day { " (all day)" } else { "" }
            );
            println!(
                "Repeats:  {}",
                result.recurring_rule.as_deref().unwrap_or("-")
            );
            for reminder in &result.reminders {
                match reminder {
                    ReminderSpec::Absolute(at) => println!("Reminder: at {}", format_local(*at)),
                    ReminderSpec::Offset(minutes) => {
                        println!("Reminder: {} minutes before due", minutes)
                    }
                }
            }
        }
        Commands::Next { rule, from, count } => {
            let start = match from {
                Some(s) => {
                    let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                        .map_err(|e| anyhow!("Invalid --from date '{}': {}", s, e))?;
                    Local
                        .from_local_datetime(&date.and_hms_opt(9, 0, 0).unwrap())
                        .earliest()
                        .ok_or_else(|| anyhow!("Invalid local time for '{}'", s))?
                        .with_timezone(&Utc)
                }
                None => Utc::now(),
            };
            let mut current = start;
            for _ in 0..count {
                match next_occurrence(current, &rule, &Local, true) {
                    Some(next) => {
                        println!("{}", format_local(next));
                        current = next;
                    }
                    None => return Err(anyhow!("Invalid recurrence rule: {}", rule)),
                }
            }
        }
    }

    Ok(())
}
