use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      token TEXT UNIQUE NOT NULL,
      created_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS attempts (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_token TEXT NOT NULL,
      template_id TEXT NOT NULL,
      user_positions_json TEXT NOT NULL,
      correct INTEGER NOT NULL DEFAULT 0,
      errors_json TEXT,
      module TEXT NOT NULL DEFAULT 'verb_position',
      exercise_type TEXT NOT NULL DEFAULT 'reconstruction',
      attempted_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS shown_sentences (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_token TEXT NOT NULL,
      template_id TEXT NOT NULL,
      shown_date TEXT NOT NULL,
      UNIQUE(user_token, template_id)
    );

    CREATE TABLE IF NOT EXISTS error_log (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_token TEXT NOT NULL,
      template_id TEXT NOT NULL,
      error_category TEXT NOT NULL,
      error_detail TEXT,
      logged_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS retry_queue (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_token TEXT NOT NULL,
      template_id TEXT NOT NULL,
      source_error_id INTEGER,
      scheduled_after TEXT NOT NULL,
      completed INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS grammar_rules (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      user_token TEXT NOT NULL,
      module TEXT NOT NULL,
      rule_id TEXT NOT NULL,
      times_tested INTEGER NOT NULL DEFAULT 0,
      times_correct INTEGER NOT NULL DEFAULT 0,
      ease_factor REAL NOT NULL DEFAULT 2.5,
      interval_days REAL NOT NULL DEFAULT 1,
      last_tested TEXT,
      next_review TEXT,
      UNIQUE(user_token, rule_id)
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_attempts_user ON attempts(user_token, attempted_at);
    CREATE INDEX IF NOT EXISTS idx_shown_user ON shown_sentences(user_token);
    CREATE INDEX IF NOT EXISTS idx_error_log_user ON error_log(user_token, error_category);
    CREATE INDEX IF NOT EXISTS idx_retry_due ON retry_queue(user_token, completed, scheduled_after);
    CREATE INDEX IF NOT EXISTS idx_rules_due ON grammar_rules(user_token, next_review);
    "#,
  )?;

  // Migration: attempts gained module/exercise_type when the single-module
  // verb drill grew into the full module set
  add_column_if_missing(conn, "attempts", "module", "TEXT NOT NULL DEFAULT 'verb_position'")?;
  add_column_if_missing(
    conn,
    "attempts",
    "exercise_type",
    "TEXT NOT NULL DEFAULT 'reconstruction'",
  )?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}
