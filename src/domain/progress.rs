use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::GrammarModule;

/// Per-(user, rule) spaced-repetition state. One row per rule a user has
/// been tested on; accumulates for the lifetime of the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleProgress {
  pub user_token: String,
  pub module: GrammarModule,
  pub rule_id: String,
  pub times_tested: i64,
  pub times_correct: i64,
  pub ease_factor: f64,
  pub interval_days: f64,
  pub last_tested: Option<DateTime<Utc>>,
  pub next_review: Option<DateTime<Utc>>,
}

/// A pending re-presentation of a failed exercise. Created once per logged
/// error; only ever mutated by setting `completed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryEntry {
  pub id: i64,
  pub user_token: String,
  pub template_id: String,
  pub source_error_id: Option<i64>,
  pub scheduled_after: NaiveDate,
  pub completed: bool,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_retry_entry_serializes_date_as_iso() {
    let entry = RetryEntry {
      id: 1,
      user_token: "tok".into(),
      template_id: "a2_dass_01".into(),
      source_error_id: Some(7),
      scheduled_after: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
      completed: false,
    };
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("2026-03-02"));
  }
}
