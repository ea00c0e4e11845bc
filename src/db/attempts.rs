//! Attempt history and aggregate statistics

use rusqlite::{params, Connection, Result};

use crate::domain::{ExerciseKind, GrammarModule};

use super::now_str;

/// One submission to record, with the raw placements and classified errors
/// already serialized by the caller.
#[derive(Debug)]
pub struct NewAttempt<'a> {
    pub user_token: &'a str,
    pub template_id: &'a str,
    pub positions_json: &'a str,
    pub correct: bool,
    pub errors_json: Option<&'a str>,
    pub module: GrammarModule,
    pub kind: ExerciseKind,
}

pub fn record_attempt(conn: &Connection, attempt: &NewAttempt) -> Result<i64> {
    conn.execute(
        "INSERT INTO attempts (user_token, template_id, user_positions_json, correct,
                               errors_json, module, exercise_type, attempted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            attempt.user_token,
            attempt.template_id,
            attempt.positions_json,
            attempt.correct,
            attempt.errors_json,
            attempt.module.as_str(),
            attempt.kind.as_str(),
            now_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Clone)]
pub struct AttemptRow {
    pub id: i64,
    pub template_id: String,
    pub positions_json: String,
    pub correct: bool,
    pub errors_json: Option<String>,
    pub module: GrammarModule,
    pub kind: ExerciseKind,
    pub attempted_at: String,
}

pub fn get_recent_attempts(conn: &Connection, token: &str, limit: i64) -> Result<Vec<AttemptRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, template_id, user_positions_json, correct, errors_json,
                module, exercise_type, attempted_at
         FROM attempts
         WHERE user_token = ?1
         ORDER BY attempted_at DESC, id DESC
         LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![token, limit], |row| {
        Ok(AttemptRow {
            id: row.get(0)?,
            template_id: row.get(1)?,
            positions_json: row.get(2)?,
            correct: row.get(3)?,
            errors_json: row.get(4)?,
            module: GrammarModule::from_str(&row.get::<_, String>(5)?)
                .unwrap_or(GrammarModule::VerbPosition),
            kind: ExerciseKind::from_str(&row.get::<_, String>(6)?)
                .unwrap_or(ExerciseKind::Reconstruction),
            attempted_at: row.get(7)?,
        })
    })?;
    rows.collect()
}

/// Per-day accuracy for the progress chart.
#[derive(Debug, Clone)]
pub struct DailyAccuracy {
    pub day: String,
    pub total: i64,
    pub correct: i64,
}

pub fn get_accuracy_over_time(conn: &Connection, token: &str, days: u32) -> Result<Vec<DailyAccuracy>> {
    let mut stmt = conn.prepare(
        "SELECT DATE(attempted_at) as day,
                COUNT(*) as total,
                SUM(correct) as correct_count
         FROM attempts
         WHERE user_token = ?1
           AND attempted_at >= DATE('now', ?2)
         GROUP BY DATE(attempted_at)
         ORDER BY day ASC",
    )?;
    let rows = stmt.query_map(params![token, format!("-{} days", days)], |row| {
        Ok(DailyAccuracy {
            day: row.get(0)?,
            total: row.get(1)?,
            correct: row.get(2)?,
        })
    })?;
    rows.collect()
}

#[derive(Debug, Clone, Default)]
pub struct UserSummary {
    pub total_attempts: i64,
    pub correct: i64,
    pub accuracy: f64,
    pub current_streak: i64,
    pub pending_retries: i64,
}

/// Totals, accuracy, pending retries and the current streak of consecutive
/// correct answers counted back from the latest attempt.
pub fn get_user_summary(conn: &Connection, token: &str) -> Result<UserSummary> {
    let total: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attempts WHERE user_token = ?1",
        params![token],
        |row| row.get(0),
    )?;
    let correct: i64 = conn.query_row(
        "SELECT COUNT(*) FROM attempts WHERE user_token = ?1 AND correct = 1",
        params![token],
        |row| row.get(0),
    )?;

    let mut streak = 0i64;
    let mut stmt = conn.prepare(
        "SELECT correct FROM attempts WHERE user_token = ?1 ORDER BY attempted_at DESC, id DESC",
    )?;
    let outcomes = stmt.query_map(params![token], |row| row.get::<_, bool>(0))?;
    for outcome in outcomes {
        if outcome? {
            streak += 1;
        } else {
            break;
        }
    }

    let pending_retries: i64 = conn.query_row(
        "SELECT COUNT(*) FROM retry_queue WHERE user_token = ?1 AND completed = 0",
        params![token],
        |row| row.get(0),
    )?;

    let accuracy = if total > 0 {
        (correct as f64 / total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    Ok(UserSummary {
        total_attempts: total,
        correct,
        accuracy,
        current_streak: streak,
        pending_retries,
    })
}

/// Attempt counts grouped by module and exercise kind.
#[derive(Debug, Clone)]
pub struct ModuleStats {
    pub module: GrammarModule,
    pub kind: ExerciseKind,
    pub total: i64,
    pub correct: i64,
}

pub fn get_module_stats(conn: &Connection, token: &str) -> Result<Vec<ModuleStats>> {
    let mut stmt = conn.prepare(
        "SELECT module, exercise_type, COUNT(*) as total, SUM(correct) as correct_count
         FROM attempts
         WHERE user_token = ?1
         GROUP BY module, exercise_type",
    )?;
    let rows = stmt.query_map(params![token], |row| {
        Ok(ModuleStats {
            module: GrammarModule::from_str(&row.get::<_, String>(0)?)
                .unwrap_or(GrammarModule::VerbPosition),
            kind: ExerciseKind::from_str(&row.get::<_, String>(1)?)
                .unwrap_or(ExerciseKind::Reconstruction),
            total: row.get(2)?,
            correct: row.get(3)?,
        })
    })?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_conn;

    fn attempt<'a>(token: &'a str, template: &'a str, correct: bool) -> NewAttempt<'a> {
        NewAttempt {
            user_token: token,
            template_id: template,
            positions_json: "[]",
            correct,
            errors_json: None,
            module: GrammarModule::VerbPosition,
            kind: ExerciseKind::Reconstruction,
        }
    }

    #[test]
    fn test_record_and_fetch_recent() {
        let conn = test_conn();
        record_attempt(&conn, &attempt("tok", "a2_dass_01", true)).unwrap();
        record_attempt(&conn, &attempt("tok", "a2_weil_01", false)).unwrap();

        let recent = get_recent_attempts(&conn, "tok", 10).unwrap();
        assert_eq!(recent.len(), 2);
        // Newest first
        assert_eq!(recent[0].template_id, "a2_weil_01");
        assert!(!recent[0].correct);
        assert_eq!(recent[1].template_id, "a2_dass_01");
    }

    #[test]
    fn test_accuracy_over_time_buckets_by_day() {
        let conn = test_conn();
        record_attempt(&conn, &attempt("tok", "a", true)).unwrap();
        record_attempt(&conn, &attempt("tok", "b", false)).unwrap();
        record_attempt(&conn, &attempt("other", "a", true)).unwrap();

        let daily = get_accuracy_over_time(&conn, "tok", 7).unwrap();
        // Both attempts land in today's bucket; the other user is excluded
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].total, 2);
        assert_eq!(daily[0].correct, 1);

        assert!(get_accuracy_over_time(&conn, "nobody", 7).unwrap().is_empty());
    }

    #[test]
    fn test_summary_streak_counts_back_from_latest() {
        let conn = test_conn();
        record_attempt(&conn, &attempt("tok", "a", true)).unwrap();
        record_attempt(&conn, &attempt("tok", "b", false)).unwrap();
        record_attempt(&conn, &attempt("tok", "c", true)).unwrap();
        record_attempt(&conn, &attempt("tok", "d", true)).unwrap();

        let summary = get_user_summary(&conn, "tok").unwrap();
        assert_eq!(summary.total_attempts, 4);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.current_streak, 2);
        assert!((summary.accuracy - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_for_unknown_user_is_zeroed() {
        let conn = test_conn();
        let summary = get_user_summary(&conn, "nobody").unwrap();
        assert_eq!(summary.total_attempts, 0);
        assert_eq!(summary.accuracy, 0.0);
        assert_eq!(summary.current_streak, 0);
    }

    #[test]
    fn test_module_stats_group_by_module_and_kind() {
        let conn = test_conn();
        record_attempt(&conn, &attempt("tok", "a", true)).unwrap();
        record_attempt(&conn, &attempt("tok", "b", true)).unwrap();
        let mut gap = attempt("tok", "adj_001", false);
        gap.module = GrammarModule::Adjektive;
        gap.kind = ExerciseKind::GapFill;
        record_attempt(&conn, &gap).unwrap();

        let stats = get_module_stats(&conn, "tok").unwrap();
        assert_eq!(stats.len(), 2);
        let verbs = stats
            .iter()
            .find(|s| s.module == GrammarModule::VerbPosition)
            .unwrap();
        assert_eq!(verbs.total, 2);
        assert_eq!(verbs.correct, 2);
        let adjectives = stats
            .iter()
            .find(|s| s.module == GrammarModule::Adjektive)
            .unwrap();
        assert_eq!(adjectives.total, 1);
        assert_eq!(adjectives.correct, 0);
    }
}
