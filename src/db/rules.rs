//! Per-rule spaced-repetition progress

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::{GrammarModule, RuleProgress};
use crate::srs;

use super::now_str;

/// Apply one review outcome to a rule's progress row, creating it on the
/// first attempt. Returns the updated progress.
pub fn update_rule_progress(
    conn: &Connection,
    token: &str,
    module: GrammarModule,
    rule_id: &str,
    was_correct: bool,
) -> Result<RuleProgress> {
    let existing = get_rule_progress(conn, token, rule_id)?;

    let result = srs::review_update(
        existing.as_ref().map(|p| (p.ease_factor, p.interval_days)),
        was_correct,
    );
    let next_review = result
        .next_review
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    match existing {
        Some(progress) => {
            conn.execute(
                "UPDATE grammar_rules
                 SET times_tested = ?1, times_correct = ?2, ease_factor = ?3,
                     interval_days = ?4, last_tested = ?5, next_review = ?6
                 WHERE user_token = ?7 AND rule_id = ?8",
                params![
                    progress.times_tested + 1,
                    progress.times_correct + if was_correct { 1 } else { 0 },
                    result.ease_factor,
                    result.interval_days,
                    now_str(),
                    next_review,
                    token,
                    rule_id,
                ],
            )?;
        }
        None => {
            conn.execute(
                "INSERT INTO grammar_rules
                 (user_token, module, rule_id, times_tested, times_correct,
                  ease_factor, interval_days, last_tested, next_review)
                 VALUES (?1, ?2, ?3, 1, ?4, ?5, ?6, ?7, ?8)",
                params![
                    token,
                    module.as_str(),
                    rule_id,
                    if was_correct { 1 } else { 0 },
                    result.ease_factor,
                    result.interval_days,
                    now_str(),
                    next_review,
                ],
            )?;
        }
    }

    get_rule_progress(conn, token, rule_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn get_rule_progress(conn: &Connection, token: &str, rule_id: &str) -> Result<Option<RuleProgress>> {
    conn.query_row(
        "SELECT user_token, module, rule_id, times_tested, times_correct,
                ease_factor, interval_days, last_tested, next_review
         FROM grammar_rules
         WHERE user_token = ?1 AND rule_id = ?2",
        params![token, rule_id],
        row_to_progress,
    )
    .optional()
}

/// Rules whose next review is at or before `now`, most overdue first.
pub fn get_rules_due(
    conn: &Connection,
    token: &str,
    module: Option<GrammarModule>,
    now: DateTime<Utc>,
) -> Result<Vec<RuleProgress>> {
    let now = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut rows = Vec::new();
    match module {
        Some(module) => {
            let mut stmt = conn.prepare(
                "SELECT user_token, module, rule_id, times_tested, times_correct,
                        ease_factor, interval_days, last_tested, next_review
                 FROM grammar_rules
                 WHERE user_token = ?1 AND module = ?2 AND next_review <= ?3
                 ORDER BY next_review ASC",
            )?;
            let mapped = stmt.query_map(params![token, module.as_str(), now], row_to_progress)?;
            for row in mapped {
                rows.push(row?);
            }
        }
        None => {
            let mut stmt = conn.prepare(
                "SELECT user_token, module, rule_id, times_tested, times_correct,
                        ease_factor, interval_days, last_tested, next_review
                 FROM grammar_rules
                 WHERE user_token = ?1 AND next_review <= ?2
                 ORDER BY next_review ASC",
            )?;
            let mapped = stmt.query_map(params![token, now], row_to_progress)?;
            for row in mapped {
                rows.push(row?);
            }
        }
    }
    Ok(rows)
}

fn row_to_progress(row: &rusqlite::Row) -> Result<RuleProgress> {
    Ok(RuleProgress {
        user_token: row.get(0)?,
        module: GrammarModule::from_str(&row.get::<_, String>(1)?)
            .unwrap_or(GrammarModule::VerbPosition),
        rule_id: row.get(2)?,
        times_tested: row.get(3)?,
        times_correct: row.get(4)?,
        ease_factor: row.get(5)?,
        interval_days: row.get(6)?,
        last_tested: parse_timestamp(row.get(7)?),
        next_review: parse_timestamp(row.get(8)?),
    })
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    let text = value?;
    match DateTime::parse_from_rfc3339(&text) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(timestamp = %text, error = %e, "unparseable timestamp in grammar_rules");
            None
        }
    }
}
