//! Daily task lifecycle engine.
//!
//! Runs once per process start, before the task list is first displayed:
//! first carry-forward clones yesterday's unfinished tasks onto today, then
//! recurrence materialization instantiates recurring templates whose schedule
//! predicate holds. Both passes suppress duplicates on (description, date),
//! so rerunning within the same day is a no-op and neither pass re-creates a
//! task the other already produced.

use crate::db::tasks::{insert_task, open_tasks_internal, parse_task_row, task_exists_on};
use crate::db::Database;
use crate::types::{Recurrence, RolloverSummary, Task};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, params};
use tracing::{debug, info};

/// Run the full startup pass for `today`: carry-forward, then recurrence
/// materialization.
pub fn run_startup(db: &Database, today: NaiveDate) -> Result<RolloverSummary> {
    let yesterday = today
        .pred_opt()
        .ok_or_else(|| anyhow!("no previous day for {}", today))?;

    let carried = carry_forward(db, yesterday, today)?;
    let materialized = materialize_recurring(db, today)?;

    if carried > 0 || materialized > 0 {
        info!(carried, materialized, date = %today, "daily rollover applied");
    } else {
        debug!(date = %today, "daily rollover found nothing to do");
    }

    Ok(RolloverSummary {
        carried,
        materialized,
    })
}

/// Clone every unfinished task dated `yesterday` onto `today`.
///
/// Clones copy description and category, start open, and are appended to the
/// end of today's open ordering. Yesterday's rows are never mutated. A task
/// whose description already exists on today is skipped, which makes the
/// pass idempotent. Each insert is its own unit of work; there is no
/// cross-row transaction to roll back.
pub fn carry_forward(db: &Database, yesterday: NaiveDate, today: NaiveDate) -> Result<usize> {
    db.with_conn(|conn| {
        let unfinished = open_tasks_internal(conn, yesterday)?;

        let mut carried = 0;
        for task in &unfinished {
            if task_exists_on(conn, &task.description, today)? {
                continue;
            }
            insert_task(
                conn,
                &task.description,
                today,
                &task.category,
                Recurrence::None,
                None,
            )?;
            carried += 1;
        }

        Ok(carried)
    })
}

/// Instantiate recurring templates onto `today`.
///
/// The template for each description is the most recent recurring row dated
/// before today. An instance is created only when the rule's schedule
/// predicate holds and no task with that description exists on today yet.
/// Instances keep the template's category, rule, and anchor date, so future
/// runs see them as templates in turn.
pub fn materialize_recurring(db: &Database, today: NaiveDate) -> Result<usize> {
    db.with_conn(|conn| {
        let templates = recurring_templates(conn, today)?;

        let mut materialized = 0;
        for template in &templates {
            // Rows that predate the anchor column fall back to their own date.
            let anchor = template.anchor_date.unwrap_or(template.date);

            if !due_on(template.recurrence, anchor, today) {
                continue;
            }
            if task_exists_on(conn, &template.description, today)? {
                continue;
            }
            insert_task(
                conn,
                &template.description,
                today,
                &template.category,
                template.recurrence,
                Some(anchor),
            )?;
            materialized += 1;
        }

        Ok(materialized)
    })
}

/// Schedule predicate: is an instance of `rule` due on `today`?
///
/// The weekly rule compares weekdays against the task's anchor date, the day
/// it was first scheduled. The monthly rule fires on the 1st of the month
/// only, regardless of the anchor's day-of-month.
pub fn due_on(rule: Recurrence, anchor: NaiveDate, today: NaiveDate) -> bool {
    match rule {
        Recurrence::None => false,
        Recurrence::Daily => true,
        Recurrence::Weekly => today.weekday() == anchor.weekday(),
        Recurrence::Monthly => today.day() == 1,
    }
}

/// Most recent recurring row per description, among rows dated before `today`.
fn recurring_templates(conn: &Connection, today: NaiveDate) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT t.* FROM tasks t
         JOIN (
             SELECT description, MAX(date) AS last_date
             FROM tasks
             WHERE recurrence != 'none' AND date < ?1
             GROUP BY description
         ) latest
           ON latest.description = t.description AND latest.last_date = t.date
         WHERE t.recurrence != 'none'
         ORDER BY t.description",
    )?;

    let templates = stmt
        .query_map(params![today.to_string()], parse_task_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(templates)
}
