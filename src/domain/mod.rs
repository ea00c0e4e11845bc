pub mod progress;
pub mod template;

pub use progress::{RetryEntry, RuleProgress};
pub use template::{ChoiceGap, ExerciseKind, Gap, GrammarModule, Payload, Template};
