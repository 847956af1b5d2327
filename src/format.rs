//! Output formatting for task lists and history views.

use crate::types::{DayHistory, Task, TaskView};
use chrono::NaiveDate;
use serde_json::{Value, json};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        }
    }
}

/// Format a day's task list as text, open tasks first in manual order.
pub fn format_tasks_text(date: NaiveDate, tasks: &[Task]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Tasks on {} ({})\n", date, tasks.len()));

    if tasks.is_empty() {
        out.push_str("No tasks found.\n");
        return out;
    }

    for task in tasks {
        out.push_str(&format_task_line(task));
    }

    out
}

/// Format a single task in short form for lists.
fn format_task_line(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };

    let recurrence = if task.recurrence.is_recurring() {
        format!(" ({})", task.recurrence)
    } else {
        String::new()
    };

    format!(
        "- [{}] #{} {} [{}]{}\n",
        mark, task.id, task.description, task.category, recurrence,
    )
}

/// Format a day's history view as text: tasks plus the protein total.
pub fn format_history_text(history: &DayHistory) -> String {
    let mut out = format_tasks_text(history.date, &history.tasks);

    match history.protein {
        Some(grams) => out.push_str(&format!("Protein: {}g\n", grams)),
        None => out.push_str("Protein: not recorded\n"),
    }

    out
}

/// Convert a day's tasks to a JSON value of view records.
pub fn tasks_to_json(date: NaiveDate, tasks: &[Task]) -> Value {
    let views: Vec<TaskView> = tasks.iter().map(TaskView::from).collect();
    json!({
        "date": date,
        "tasks": views,
    })
}

/// Convert a day's history to a JSON value.
pub fn history_to_json(history: &DayHistory) -> Value {
    let views: Vec<TaskView> = history.tasks.iter().map(TaskView::from).collect();
    json!({
        "date": history.date,
        "tasks": views,
        "protein": history.protein,
    })
}
