//! Error log: every classified mistake, for the weakness report

use rusqlite::{params, Connection, Result};

use crate::engine::ErrorCategory;

use super::now_str;

/// Insert one classified error and return its row id, which the retry
/// queue references as the source error.
pub fn log_error(
    conn: &Connection,
    token: &str,
    template_id: &str,
    category: ErrorCategory,
    detail: Option<&str>,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO error_log (user_token, template_id, error_category, error_detail, logged_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![token, template_id, category.as_str(), detail, now_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Aggregated counts per category, most frequent first. The category comes
/// back as its stored key so rows written by older versions with since-
/// removed categories still surface.
#[derive(Debug, Clone)]
pub struct ErrorStat {
    pub category: String,
    pub count: i64,
    pub last_occurrence: String,
}

pub fn get_error_stats(conn: &Connection, token: &str) -> Result<Vec<ErrorStat>> {
    let mut stmt = conn.prepare(
        "SELECT error_category, COUNT(*) as count, MAX(logged_at) as last_occurrence
         FROM error_log
         WHERE user_token = ?1
         GROUP BY error_category
         ORDER BY count DESC",
    )?;
    let rows = stmt.query_map(params![token], |row| {
        Ok(ErrorStat {
            category: row.get(0)?,
            count: row.get(1)?,
            last_occurrence: row.get(2)?,
        })
    })?;
    rows.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_conn;

    #[test]
    fn test_log_error_returns_row_id() {
        let conn = test_conn();
        let first = log_error(&conn, "tok", "a2_dass_01", ErrorCategory::VerbNotAtEnd, None).unwrap();
        let second = log_error(
            &conn,
            "tok",
            "b1_perfekt_01",
            ErrorCategory::AuxiliaryBeforeParticiple,
            Some("Expected 'gelesen' at position 6, but got 'hat'."),
        )
        .unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_stats_group_and_order_by_frequency() {
        let conn = test_conn();
        for _ in 0..3 {
            log_error(&conn, "tok", "a", ErrorCategory::WrongVerbOrder, None).unwrap();
        }
        log_error(&conn, "tok", "b", ErrorCategory::VerbNotAtEnd, None).unwrap();
        log_error(&conn, "other", "a", ErrorCategory::VerbNotAtEnd, None).unwrap();

        let stats = get_error_stats(&conn, "tok").unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].category, "wrong_verb_order");
        assert_eq!(stats[0].count, 3);
        assert_eq!(stats[1].category, "verb_not_at_end");
        assert_eq!(stats[1].count, 1);
    }
}
