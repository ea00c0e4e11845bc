pub mod ease;

pub use ease::{review_update, EaseResult, MIN_EASE_FACTOR};
