//! Fixed-delay retry queue for individually failed exercises

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::config::RETRY_DELAY_DAYS;
use crate::domain::RetryEntry;

/// Enqueue a failed exercise for re-serving after the fixed delay.
/// `failed_on` is the day of the failed attempt.
pub fn schedule_retry(
    conn: &Connection,
    token: &str,
    template_id: &str,
    source_error_id: Option<i64>,
    failed_on: NaiveDate,
) -> Result<i64> {
    let scheduled_after = failed_on + Duration::days(RETRY_DELAY_DAYS);
    conn.execute(
        "INSERT INTO retry_queue (user_token, template_id, source_error_id, scheduled_after)
         VALUES (?1, ?2, ?3, ?4)",
        params![token, template_id, source_error_id, scheduled_after.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// The earliest-scheduled incomplete retry due on or before `on`. Entries
/// never expire; an old one stays due until completed.
pub fn get_due_retry(conn: &Connection, token: &str, on: NaiveDate) -> Result<Option<RetryEntry>> {
    conn.query_row(
        "SELECT id, user_token, template_id, source_error_id, scheduled_after, completed
         FROM retry_queue
         WHERE user_token = ?1 AND completed = 0 AND scheduled_after <= ?2
         ORDER BY scheduled_after ASC, id ASC
         LIMIT 1",
        params![token, on.to_string()],
        row_to_retry,
    )
    .optional()
}

/// Mark a retry as done. Completion is one-way; completing an already
/// completed entry is a no-op.
pub fn complete_retry(conn: &Connection, retry_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE retry_queue SET completed = 1 WHERE id = ?1",
        params![retry_id],
    )?;
    Ok(())
}

pub fn count_pending(conn: &Connection, token: &str) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM retry_queue WHERE user_token = ?1 AND completed = 0",
        params![token],
        |row| row.get(0),
    )
}

pub fn get_retry(conn: &Connection, retry_id: i64) -> Result<Option<RetryEntry>> {
    conn.query_row(
        "SELECT id, user_token, template_id, source_error_id, scheduled_after, completed
         FROM retry_queue WHERE id = ?1",
        params![retry_id],
        row_to_retry,
    )
    .optional()
}

fn row_to_retry(row: &rusqlite::Row) -> Result<RetryEntry> {
    let scheduled: String = row.get(4)?;
    Ok(RetryEntry {
        id: row.get(0)?,
        user_token: row.get(1)?,
        template_id: row.get(2)?,
        source_error_id: row.get(3)?,
        scheduled_after: scheduled.parse().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?,
        completed: row.get(5)?,
    })
}
