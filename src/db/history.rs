//! By-date history queries.

use super::Database;
use super::protein::protein_internal;
use super::tasks::parse_task_row;
use crate::types::DayHistory;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::params;

impl Database {
    /// Tasks and protein total for one calendar day.
    pub fn query_history(&self, date: NaiveDate) -> Result<DayHistory> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM tasks WHERE date = ?1
                 ORDER BY completed, order_index, id",
            )?;

            let tasks = stmt
                .query_map(params![date.to_string()], parse_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let protein = protein_internal(conn, date)?;

            Ok(DayHistory {
                date,
                tasks,
                protein,
            })
        })
    }
}
