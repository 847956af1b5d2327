//! Task CRUD and manual ordering.

use super::{Database, now_ms};
use crate::error::ChecklistError;
use crate::types::{DEFAULT_CATEGORY, Recurrence, Task};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let date_str: String = row.get("date")?;
    let date = date_str.parse::<NaiveDate>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    // Unrecognized tokens in stored rows fall back to defaults rather than
    // failing the whole query.
    let recurrence_str: String = row.get("recurrence")?;
    let recurrence = recurrence_str.parse::<Recurrence>().unwrap_or_default();

    let anchor_str: Option<String> = row.get("anchor_date")?;
    let anchor_date = anchor_str.and_then(|s| s.parse::<NaiveDate>().ok());

    Ok(Task {
        id: row.get("id")?,
        description: row.get("description")?,
        date,
        completed: row.get::<_, i64>("completed")? != 0,
        category: row.get("category")?,
        order_index: row.get("order_index")?,
        recurrence,
        anchor_date,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Whether a task with this description already exists on the given day.
/// Engine-level task identity is the (description, date) pair, not the id.
pub(crate) fn task_exists_on(
    conn: &Connection,
    description: &str,
    date: NaiveDate,
) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE description = ?1 AND date = ?2",
        params![description, date.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Next order index for a new task on the given day: one past the current
/// maximum among open tasks, 0 when the day has none.
fn next_order_index(conn: &Connection, date: NaiveDate) -> Result<i64> {
    let next: i64 = conn.query_row(
        "SELECT COALESCE(MAX(order_index) + 1, 0) FROM tasks
         WHERE date = ?1 AND completed = 0",
        params![date.to_string()],
        |row| row.get(0),
    )?;
    Ok(next)
}

/// Insert a new open task row, appended to the end of the day's open list.
pub(crate) fn insert_task(
    conn: &Connection,
    description: &str,
    date: NaiveDate,
    category: &str,
    recurrence: Recurrence,
    anchor_date: Option<NaiveDate>,
) -> Result<Task> {
    let now = now_ms();
    let order_index = next_order_index(conn, date)?;

    conn.execute(
        "INSERT INTO tasks (
            description, date, completed, category, order_index,
            recurrence, anchor_date, created_at, updated_at
        ) VALUES (?1, ?2, 0, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            description,
            date.to_string(),
            category,
            order_index,
            recurrence.as_str(),
            anchor_date.map(|d| d.to_string()),
            now,
            now,
        ],
    )?;

    Ok(Task {
        id: conn.last_insert_rowid(),
        description: description.to_string(),
        date,
        completed: false,
        category: category.to_string(),
        order_index,
        recurrence,
        anchor_date,
        created_at: now,
        updated_at: now,
    })
}

/// Open tasks for a day in display order.
pub(crate) fn open_tasks_internal(conn: &Connection, date: NaiveDate) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM tasks WHERE date = ?1 AND completed = 0
         ORDER BY order_index, id",
    )?;

    let tasks = stmt
        .query_map(params![date.to_string()], parse_task_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tasks)
}

impl Database {
    /// Create a new task scheduled for the given day.
    ///
    /// The description must be non-empty after trimming. The new task is open,
    /// appended to the end of the day's open ordering; recurring tasks get
    /// their scheduled date as the recurrence anchor.
    pub fn add_task(
        &self,
        description: &str,
        date: NaiveDate,
        category: Option<&str>,
        recurrence: Recurrence,
    ) -> Result<Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ChecklistError::empty_description().into());
        }

        let category = category.unwrap_or(DEFAULT_CATEGORY);
        let anchor_date = recurrence.is_recurring().then_some(date);

        self.with_conn(|conn| insert_task(conn, description, date, category, recurrence, anchor_date))
    }

    /// Get a task by ID.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;

            let result = stmt.query_row(params![task_id], parse_task_row);

            match result {
                Ok(task) => Ok(Some(task)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
    }

    /// All tasks for a day: open tasks first in manual order, completed after.
    pub fn list_tasks(&self, date: NaiveDate) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM tasks WHERE date = ?1
                 ORDER BY completed, order_index, id",
            )?;

            let tasks = stmt
                .query_map(params![date.to_string()], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(tasks)
        })
    }

    /// Open tasks for a day in display order.
    pub fn open_tasks(&self, date: NaiveDate) -> Result<Vec<Task>> {
        self.with_conn(|conn| open_tasks_internal(conn, date))
    }

    /// Mark open tasks done. Returns the number of tasks actually mutated;
    /// ids that are unknown or already done are skipped. The transition is
    /// one-way: there is no way back to open.
    pub fn mark_done(&self, task_ids: &[i64]) -> Result<usize> {
        let now = now_ms();

        self.with_conn(|conn| {
            let mut mutated = 0;
            for task_id in task_ids {
                mutated += conn.execute(
                    "UPDATE tasks SET completed = 1, updated_at = ?1
                     WHERE id = ?2 AND completed = 0",
                    params![now, task_id],
                )?;
            }
            Ok(mutated)
        })
    }

    /// Delete tasks by ID, open or done. Returns the number removed.
    pub fn remove_tasks(&self, task_ids: &[i64]) -> Result<usize> {
        self.with_conn(|conn| {
            let mut removed = 0;
            for task_id in task_ids {
                removed += conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            }
            Ok(removed)
        })
    }

    /// Move an open task to a new position within its day's open list.
    ///
    /// Reassigns order indexes for every open task on the day so the stored
    /// sequence is 0-based, contiguous, and ascending in display order.
    /// Positions past the end move the task to the end. Completed tasks are
    /// outside the reordering domain entirely; their stale indexes are left
    /// untouched. Returns the fresh open sequence.
    pub fn move_task(
        &self,
        date: NaiveDate,
        task_id: i64,
        new_position: usize,
    ) -> Result<Vec<Task>> {
        let now = now_ms();

        self.with_conn(|conn| {
            let mut open = open_tasks_internal(conn, date)?;

            let from = open
                .iter()
                .position(|t| t.id == task_id)
                .ok_or_else(|| anyhow::Error::new(ChecklistError::task_not_found(task_id)))?;

            let task = open.remove(from);
            let to = new_position.min(open.len());
            open.insert(to, task);

            for (index, task) in open.iter().enumerate() {
                if task.order_index != index as i64 {
                    conn.execute(
                        "UPDATE tasks SET order_index = ?1, updated_at = ?2 WHERE id = ?3",
                        params![index as i64, now, task.id],
                    )?;
                }
            }

            // Re-read rather than fixing up in memory; the store is authoritative.
            open_tasks_internal(conn, date)
        })
    }
}
