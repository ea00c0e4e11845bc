//! User rows and shown-sentence tracking

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

use super::now_str;

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub token: String,
    pub created_at: String,
}

/// Look up a user by opaque token, creating the row on first sight.
pub fn get_or_create_user(conn: &Connection, token: &str) -> Result<User> {
    let existing = conn
        .query_row(
            "SELECT id, token, created_at FROM users WHERE token = ?1",
            params![token],
            row_to_user,
        )
        .optional()?;
    if let Some(user) = existing {
        return Ok(user);
    }

    conn.execute(
        "INSERT INTO users (token, created_at) VALUES (?1, ?2)",
        params![token, now_str()],
    )?;
    conn.query_row(
        "SELECT id, token, created_at FROM users WHERE token = ?1",
        params![token],
        row_to_user,
    )
}

fn row_to_user(row: &rusqlite::Row) -> Result<User> {
    Ok(User {
        id: row.get(0)?,
        token: row.get(1)?,
        created_at: row.get(2)?,
    })
}

/// Record that a template was served to a user. Repeats are ignored, so a
/// template counts as seen exactly once.
pub fn mark_sentence_shown(conn: &Connection, token: &str, template_id: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO shown_sentences (user_token, template_id, shown_date)
         VALUES (?1, ?2, ?3)",
        params![token, template_id, Utc::now().date_naive().to_string()],
    )?;
    Ok(())
}

pub fn get_shown_template_ids(conn: &Connection, token: &str) -> Result<HashSet<String>> {
    let mut stmt =
        conn.prepare("SELECT template_id FROM shown_sentences WHERE user_token = ?1")?;
    let rows = stmt.query_map(params![token], |row| row.get::<_, String>(0))?;
    rows.collect()
}

/// Templates shown on a specific day, for the daily recap.
pub fn get_shown_on(conn: &Connection, token: &str, day: NaiveDate) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT template_id FROM shown_sentences WHERE user_token = ?1 AND shown_date = ?2",
    )?;
    let rows = stmt.query_map(params![token, day.to_string()], |row| row.get::<_, String>(0))?;
    rows.collect()
}
