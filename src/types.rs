//! Core types for the zen-checklist store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category assigned to tasks created without an explicit label.
pub const DEFAULT_CATEGORY: &str = "General";

/// Repeat rule for a task.
///
/// A task whose rule is not `None` acts as a template: the rollover pass
/// clones it onto any day the rule's schedule predicate holds for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized recurrence token.
#[derive(Debug, Error)]
#[error("unknown recurrence '{0}', expected none, daily, weekly, or monthly")]
pub struct ParseRecurrenceError(String);

impl FromStr for Recurrence {
    type Err = ParseRecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(ParseRecurrenceError(s.to_string())),
        }
    }
}

/// A task row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    /// Calendar day the task is scheduled for.
    pub date: NaiveDate,
    pub completed: bool,
    pub category: String,
    /// Manual position within the day's open list. Stale once completed.
    pub order_index: i64,
    pub recurrence: Recurrence,
    /// Reference date for the weekly schedule predicate. Set at creation for
    /// recurring tasks and copied unchanged to every materialized instance.
    pub anchor_date: Option<NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Compact task representation handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    pub id: i64,
    pub description: String,
    pub completed: bool,
    pub category: String,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            description: task.description.clone(),
            completed: task.completed,
            category: task.category.clone(),
        }
    }
}

/// Tasks and protein total for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHistory {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    /// Cumulative grams recorded for the day, if any were saved.
    pub protein: Option<u32>,
}

/// Counters from one startup rollover pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RolloverSummary {
    /// Unfinished tasks cloned from yesterday onto today.
    pub carried: usize,
    /// Recurring templates instantiated for today.
    pub materialized: usize,
}
