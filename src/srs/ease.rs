use chrono::{DateTime, Duration, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 3.0;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Interval after the very first attempt, depending on its outcome.
pub const FIRST_CORRECT_INTERVAL_DAYS: f64 = 2.5;
pub const FIRST_WRONG_INTERVAL_DAYS: f64 = 1.0;

pub struct EaseResult {
  pub ease_factor: f64,
  pub interval_days: f64,
  pub next_review: DateTime<Utc>,
}

/// Compute the next ease factor and review interval for a grammar rule.
///
/// `current` is `(ease_factor, interval_days)` from the stored progress row,
/// or `None` on the very first attempt. The first attempt only initializes
/// state: the +0.1 ease increment applies to subsequent correct attempts,
/// never the initializing one.
pub fn review_update(current: Option<(f64, f64)>, was_correct: bool) -> EaseResult {
  let (ease_factor, interval_days) = match current {
    Some((ease, interval)) => {
      if was_correct {
        (
          (ease + 0.1).min(MAX_EASE_FACTOR),
          interval * ease,
        )
      } else {
        ((ease - 0.2).max(MIN_EASE_FACTOR), 1.0)
      }
    }
    None => {
      let interval = if was_correct {
        FIRST_CORRECT_INTERVAL_DAYS
      } else {
        FIRST_WRONG_INTERVAL_DAYS
      };
      (INITIAL_EASE_FACTOR, interval)
    }
  };

  // Fractional days are allowed; store as a millisecond offset
  let next_review = Utc::now() + Duration::milliseconds((interval_days * 86_400_000.0) as i64);

  EaseResult {
    ease_factor,
    interval_days,
    next_review,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_first_attempt_correct() {
    let result = review_update(None, true);
    assert!((result.interval_days - 2.5).abs() < f64::EPSILON);
    // Ease is initialized, not incremented
    assert!((result.ease_factor - 2.5).abs() < f64::EPSILON);
  }

  #[test]
  fn test_first_attempt_wrong() {
    let result = review_update(None, false);
    assert!((result.interval_days - 1.0).abs() < f64::EPSILON);
    assert!((result.ease_factor - 2.5).abs() < f64::EPSILON);
  }

  #[test]
  fn test_correct_attempt_grows_interval() {
    let result = review_update(Some((2.5, 2.5)), true);
    // interval * old ease, ease + 0.1
    assert!((result.interval_days - 6.25).abs() < 0.001);
    assert!((result.ease_factor - 2.6).abs() < 0.001);
  }

  #[test]
  fn test_wrong_attempt_resets_interval() {
    let result = review_update(Some((2.5, 15.0)), false);
    assert!((result.interval_days - 1.0).abs() < f64::EPSILON);
    assert!((result.ease_factor - 2.3).abs() < 0.001);
  }

  #[test]
  fn test_ease_factor_ceiling() {
    let mut ease = 2.5;
    let mut interval = 2.5;
    for _ in 0..10 {
      let result = review_update(Some((ease, interval)), true);
      ease = result.ease_factor;
      interval = result.interval_days;
    }
    assert!(ease <= MAX_EASE_FACTOR + f64::EPSILON);
    assert!((ease - MAX_EASE_FACTOR).abs() < 0.01);
  }

  #[test]
  fn test_ease_factor_floor() {
    let mut ease = 2.5;
    let mut interval = 10.0;
    for _ in 0..10 {
      let result = review_update(Some((ease, interval)), false);
      ease = result.ease_factor;
      interval = result.interval_days;
    }
    assert!(ease >= MIN_EASE_FACTOR - f64::EPSILON);
    assert!((ease - MIN_EASE_FACTOR).abs() < 0.01);
  }

  #[test]
  fn test_interval_stays_positive() {
    let mut ease = 2.5;
    let mut interval = 2.5;
    // Alternate correct/wrong attempts
    for i in 0..20 {
      let result = review_update(Some((ease, interval)), i % 2 == 0);
      ease = result.ease_factor;
      interval = result.interval_days;
      assert!(interval > 0.0);
      assert!((MIN_EASE_FACTOR..=MAX_EASE_FACTOR).contains(&ease));
    }
  }

  #[test]
  fn test_next_review_in_future() {
    let before = Utc::now();
    let result = review_update(Some((2.5, 1.0)), true);
    assert!(result.next_review > before);
  }
}
