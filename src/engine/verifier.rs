//! Deterministic answer checking.
//!
//! Verification is re-derived from the template alone; nothing the client
//! holds is trusted for the answer key. All functions are pure: recording
//! attempts and scheduling retries is the caller's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Payload, Template};
use crate::store::TemplateStore;

use super::materializer::{materialize, MaterializedExercise};

/// A learner-placed word chip: which slot it was dropped into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub slot_index: usize,
    pub word: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlotResult {
    pub index: usize,
    pub expected: String,
    pub submitted: Option<String>,
    pub is_correct: bool,
    pub is_answer: bool,
    pub suffix: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    /// True iff every slot matches, not just the verb slots
    pub overall_correct: bool,
    pub slots: Vec<SlotResult>,
}

/// Per-gap verdict for gap-fill and quick-select exercises.
#[derive(Debug, Clone, Serialize)]
pub struct GapResult {
    pub position: String,
    pub expected: String,
    pub submitted: Option<String>,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapCheck {
    pub overall_correct: bool,
    pub gaps: Vec<GapResult>,
}

/// Check a full-sentence reconstruction submission against a stored
/// template. Returns `None` when the template id is unknown or does not
/// name a reconstruction exercise.
pub fn verify(
    store: &TemplateStore,
    template_id: &str,
    placements: &[Placement],
) -> Option<VerificationResult> {
    let template = store.get(template_id)?;
    let exercise = materialize(template)?;
    Some(verify_reconstruction(&exercise, placements))
}

/// Exact-match comparison at every word position. String equality, no case
/// or diacritic normalization: German word forms are case- and
/// umlaut-sensitive and that sensitivity is the point of the drill.
pub fn verify_reconstruction(
    exercise: &MaterializedExercise,
    placements: &[Placement],
) -> VerificationResult {
    let placed: HashMap<usize, &str> = placements
        .iter()
        .map(|p| (p.slot_index, p.word.as_str()))
        .collect();

    let mut overall_correct = true;
    let slots = exercise
        .slots
        .iter()
        .map(|slot| {
            let submitted = placed.get(&slot.index).map(|w| w.to_string());
            let is_correct = submitted.as_deref() == Some(slot.word.as_str());
            if !is_correct {
                overall_correct = false;
            }
            SlotResult {
                index: slot.index,
                expected: slot.word.clone(),
                submitted,
                is_correct,
                is_answer: slot.is_answer,
                suffix: slot.suffix.clone(),
            }
        })
        .collect();

    VerificationResult { overall_correct, slots }
}

/// Check gap-fill answers. A missing submission counts as wrong, never as
/// an error.
pub fn verify_gap_fill(
    template: &Template,
    answers: &HashMap<String, String>,
) -> Option<GapCheck> {
    let Payload::GapFill { gaps, .. } = &template.payload else {
        return None;
    };
    Some(check_gaps(
        gaps.iter().map(|g| (g.position.as_str(), g.answer.as_str())),
        answers,
    ))
}

/// Check quick-select answers: string equality against the designated
/// option per gap.
pub fn verify_quick_select(
    template: &Template,
    answers: &HashMap<String, String>,
) -> Option<GapCheck> {
    let Payload::QuickSelect { gaps, .. } = &template.payload else {
        return None;
    };
    Some(check_gaps(
        gaps.iter().map(|g| (g.position.as_str(), g.answer.as_str())),
        answers,
    ))
}

fn check_gaps<'a>(
    expected: impl Iterator<Item = (&'a str, &'a str)>,
    answers: &HashMap<String, String>,
) -> GapCheck {
    let mut overall_correct = true;
    let gaps = expected
        .map(|(position, answer)| {
            let submitted = answers.get(position).cloned();
            let is_correct = submitted.as_deref() == Some(answer);
            if !is_correct {
                overall_correct = false;
            }
            GapResult {
                position: position.to_string(),
                expected: answer.to_string(),
                submitted,
                is_correct,
            }
        })
        .collect();
    GapCheck { overall_correct, gaps }
}

/// Check a transformation submission. The learner's chips are ranked by
/// their declared slot index and compared token-by-token against the
/// target word list; a length mismatch is a mismatch at every position
/// beyond the shorter list, not a separate error class.
pub fn verify_transformation(
    template: &Template,
    placements: &[Placement],
) -> Option<VerificationResult> {
    let Payload::Transformation { target_words, .. } = &template.payload else {
        return None;
    };

    let mut ordered: Vec<&Placement> = placements.iter().collect();
    ordered.sort_by_key(|p| p.slot_index);
    let submitted_words: Vec<&str> = ordered.iter().map(|p| p.word.as_str()).collect();

    let len = target_words.len().max(submitted_words.len());
    let mut overall_correct = true;
    let mut slots = Vec::with_capacity(len);
    for i in 0..len {
        let expected = target_words.get(i).cloned().unwrap_or_default();
        let submitted = submitted_words.get(i).map(|w| w.to_string());
        let is_correct =
            i < target_words.len() && submitted.as_deref() == Some(expected.as_str());
        if !is_correct {
            overall_correct = false;
        }
        slots.push(SlotResult {
            index: i,
            expected,
            submitted,
            is_correct,
            is_answer: true,
            suffix: String::new(),
        });
    }

    Some(VerificationResult { overall_correct, slots })
}
