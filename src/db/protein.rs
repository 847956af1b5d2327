//! Daily protein intake tracking.

use super::Database;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

pub(crate) fn protein_internal(conn: &Connection, date: NaiveDate) -> Result<Option<u32>> {
    let grams = conn
        .query_row(
            "SELECT grams FROM protein WHERE date = ?1",
            params![date.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(grams)
}

impl Database {
    /// Add grams to the day's running total and return the new total.
    ///
    /// Saves accumulate; the stored value is only ever replaced by a larger
    /// one. The row is created on first save for the date.
    pub fn save_protein(&self, date: NaiveDate, grams: u32) -> Result<u32> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO protein (date, grams) VALUES (?1, ?2)
                 ON CONFLICT(date) DO UPDATE SET grams = grams + excluded.grams",
                params![date.to_string(), grams],
            )?;

            Ok(protein_internal(conn, date)?.unwrap_or(grams))
        })
    }

    /// Cumulative grams recorded for a day, if any were saved.
    pub fn protein_for(&self, date: NaiveDate) -> Result<Option<u32>> {
        self.with_conn(|conn| protein_internal(conn, date))
    }
}
