use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use log::debug;
use uuid::Uuid;

use crate::model::task::{Status, Task};
use crate::recurrence::{next_occurrence, to_utc};

/// Result of completing a task: the completed copy, an optional successor
/// for recurring tasks, and completed copies of the open subtasks.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutcome {
    pub completed: Task,
    pub successor: Option<Task>,
    pub completed_subtasks: Vec<Task>,
}

/// Completes `task` at `now` and, when a recurrence rule applies, materializes
/// the next occurrence as a fresh open task.
///
/// The due and deadline axes advance independently. A deadline without a rule
/// of its own follows a recurring due at the original `deadline - due` offset.
/// Open subtasks in `subtasks` are completed alongside the parent; their own
/// recurrence rules are never rolled over. A malformed rule counts as no
/// rule, so completing the original task always succeeds.
pub fn rollover_on_completion<Tz: TimeZone>(
    task: &Task,
    subtasks: &[Task],
    now: &DateTime<Tz>,
) -> CompletionOutcome {
    let zone = now.timezone();
    let now_utc = now.with_timezone(&Utc);

    let mut completed = task.clone();
    completed.status = Status::Completed;
    completed.completed_at = Some(now_utc);
    completed.updated_at = now_utc;

    let next_due = advance_axis(
        task.due,
        task.recurring_rule.as_deref(),
        task.due_all_day,
        now,
        &zone,
    );
    let mut next_deadline = advance_axis(
        task.deadline,
        task.deadline_recurring_rule.as_deref(),
        task.deadline_all_day,
        now,
        &zone,
    );

    // A deadline with no recurrence of its own keeps its fixed offset from due.
    if next_deadline.is_none() {
        if let (Some(new_due), Some(due), Some(deadline)) = (next_due, task.due, task.deadline) {
            next_deadline = Some(new_due + (deadline - due));
        }
    }

    let successor = if next_due.is_some() || next_deadline.is_some() {
        let mut next = task.clone();
        next.id = Uuid::new_v4();
        next.status = Status::Open;
        next.completed_at = None;
        next.created_at = now_utc;
        next.updated_at = now_utc;
        next.due = next_due;
        next.due_all_day = next_due.is_some() && task.due_all_day;
        next.deadline = next_deadline;
        next.deadline_all_day = next_deadline.is_some() && task.deadline_all_day;
        debug!(
            "rollover: task {} -> successor due={:?} deadline={:?}",
            task.id, next.due, next.deadline
        );
        Some(next)
    } else {
        None
    };

    let completed_subtasks = subtasks
        .iter()
        .filter(|s| s.status == Status::Open)
        .map(|s| {
            let mut sub = s.clone();
            sub.status = Status::Completed;
            sub.completed_at = Some(now_utc);
            sub.updated_at = now_utc;
            sub
        })
        .collect();

    CompletionOutcome {
        completed,
        successor,
        completed_subtasks,
    }
}

/// Advances one timestamp/rule axis a single recurrence step.
///
/// When the task is completed late (`now` past the stored timestamp), the
/// anchor is rebuilt from now's calendar date with the original time-of-day,
/// so successors stop regenerating an already-overdue date.
fn advance_axis<Tz: TimeZone>(
    base: Option<DateTime<Utc>>,
    rule: Option<&str>,
    all_day: bool,
    now: &DateTime<Tz>,
    zone: &Tz,
) -> Option<DateTime<Utc>> {
    let base = base?;
    let rule = rule?;
    let now_utc = now.with_timezone(&Utc);

    let anchor = if now_utc > base {
        let time_of_day = if all_day {
            NaiveTime::MIN
        } else {
            base.with_timezone(zone).time()
        };
        to_utc(zone, now.date_naive().and_time(time_of_day))?
    } else {
        base
    };

    next_occurrence(anchor, rule, zone, !all_day)
}
