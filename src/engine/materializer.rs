//! Exercise materialization: turning an immutable template into a
//! presentable instance without leaking the answer key.
//!
//! Re-materializing the same template always yields the same slot
//! structure; only the presentation shuffle differs between calls.

use rand::seq::SliceRandom;
use serde::Serialize;

use crate::domain::{Payload, Template};

/// Punctuation stripped from token ends and re-attached on display.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '–', '—',
];

/// Split a raw sentence token into its clean word and trailing punctuation.
pub(crate) fn split_word(word: &str) -> (&str, &str) {
    let mut split = word.len();
    for (idx, ch) in word.char_indices().rev() {
        if TRAILING_PUNCTUATION.contains(&ch) {
            split = idx;
        } else {
            break;
        }
    }
    word.split_at(split)
}

/// One word position of a reconstruction sentence.
#[derive(Debug, Clone, Serialize)]
pub struct Slot {
    pub index: usize,
    /// Clean word, punctuation stripped
    pub word: String,
    /// Trailing punctuation re-attached on display
    pub suffix: String,
    /// True for the verbs the learner must place, false for scaffolding
    pub is_answer: bool,
}

/// A reconstruction template expanded into its slot structure, answer key
/// included. Server-side only; the learner receives [`ServedExercise`].
#[derive(Debug, Clone)]
pub struct MaterializedExercise {
    pub template_id: String,
    pub full_text: String,
    pub slots: Vec<Slot>,
    /// Word positions of the answer tokens, in answer-token order
    pub answer_positions: Vec<usize>,
    /// Random permutation of all clean words, regenerated per call
    pub shuffled_words: Vec<String>,
    pub clause_type: String,
    pub level: u8,
    pub explanation: String,
}

/// Map answer tokens to word positions by first occurrence, left to right,
/// consuming each matched position once so repeated words map to distinct
/// positions. Tokens absent from the text are omitted: malformed templates
/// degrade to fewer answer slots rather than failing materialization.
fn answer_positions(words: &[(&str, &str)], answer_tokens: &[String]) -> Vec<usize> {
    let mut positions = Vec::with_capacity(answer_tokens.len());
    for token in answer_tokens {
        let found = words
            .iter()
            .enumerate()
            .find(|&(i, &(clean, _))| clean == token.as_str() && !positions.contains(&i))
            .map(|(i, _)| i);
        match found {
            Some(i) => positions.push(i),
            None => {
                tracing::warn!("Answer token '{}' not found in template text, slot omitted", token);
            }
        }
    }
    positions
}

/// Materialize a reconstruction template. Returns `None` for other
/// payload kinds; those are served directly via [`serve`].
pub fn materialize(template: &Template) -> Option<MaterializedExercise> {
    let Payload::Reconstruction { text, verbs, clause_type } = &template.payload else {
        return None;
    };

    let raw_words: Vec<&str> = text.split_whitespace().collect();
    let split_words: Vec<(&str, &str)> = raw_words.iter().map(|w| split_word(w)).collect();
    let positions = answer_positions(&split_words, verbs);

    let slots: Vec<Slot> = split_words
        .iter()
        .enumerate()
        .map(|(i, (clean, suffix))| Slot {
            index: i,
            word: clean.to_string(),
            suffix: suffix.to_string(),
            is_answer: positions.contains(&i),
        })
        .collect();

    // Full-sentence mode: every clean word goes into the tray
    let mut shuffled_words: Vec<String> = slots.iter().map(|s| s.word.clone()).collect();
    shuffled_words.shuffle(&mut rand::rng());

    Some(MaterializedExercise {
        template_id: template.id.clone(),
        full_text: text.clone(),
        slots,
        answer_positions: positions,
        shuffled_words,
        clause_type: clause_type.clone(),
        level: template.level,
        explanation: template.grammar_rule.clone(),
    })
}

/// A gap as shown to the learner: options only, answer withheld.
#[derive(Debug, Clone, Serialize)]
pub struct ServedGap {
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub options: Vec<String>,
}

/// Learner-facing exercise payload. Contains positions, decoration and
/// option sets but never an expected answer for any slot or gap.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServedExercise {
    Reconstruction {
        template_id: String,
        num_slots: usize,
        slot_suffixes: Vec<String>,
        /// Which slot indices are verb slots (for UI highlighting)
        answer_indices: Vec<usize>,
        shuffled_words: Vec<String>,
        clause_type: String,
        level: u8,
    },
    GapFill {
        exercise_id: String,
        sentence_template: String,
        gaps: Vec<ServedGap>,
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        grammar_tip: Option<String>,
    },
    Transformation {
        exercise_id: String,
        source: String,
        shuffled_words: Vec<String>,
        num_slots: usize,
        optional_words: Vec<String>,
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        grammar_tip: Option<String>,
    },
    QuickSelect {
        exercise_id: String,
        sentence: String,
        gaps: Vec<ServedGap>,
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        grammar_tip: Option<String>,
    },
}

/// Build the learner-facing payload for any template kind.
pub fn serve(template: &Template) -> ServedExercise {
    match &template.payload {
        Payload::Reconstruction { .. } => {
            // materialize() cannot fail here, the payload kind matches
            let exercise = materialize(template).expect("reconstruction payload");
            ServedExercise::Reconstruction {
                template_id: exercise.template_id,
                num_slots: exercise.slots.len(),
                slot_suffixes: exercise.slots.iter().map(|s| s.suffix.clone()).collect(),
                answer_indices: exercise.answer_positions,
                shuffled_words: exercise.shuffled_words,
                clause_type: exercise.clause_type,
                level: exercise.level,
            }
        }
        Payload::GapFill { sentence_template, gaps, .. } => ServedExercise::GapFill {
            exercise_id: template.id.clone(),
            sentence_template: sentence_template.clone(),
            gaps: gaps
                .iter()
                .map(|g| ServedGap {
                    position: g.position.clone(),
                    context: g.context.clone(),
                    options: g.options.clone(),
                })
                .collect(),
            level: template.level,
            grammar_tip: template.grammar_tip.clone(),
        },
        Payload::Transformation { source, target_words, optional_words, .. } => {
            let mut shuffled_words = target_words.clone();
            shuffled_words.shuffle(&mut rand::rng());
            ServedExercise::Transformation {
                exercise_id: template.id.clone(),
                source: source.clone(),
                shuffled_words,
                num_slots: target_words.len(),
                optional_words: optional_words.clone(),
                level: template.level,
                grammar_tip: template.grammar_tip.clone(),
            }
        }
        Payload::QuickSelect { sentence, gaps } => ServedExercise::QuickSelect {
            exercise_id: template.id.clone(),
            sentence: sentence.clone(),
            gaps: gaps
                .iter()
                .map(|g| ServedGap {
                    position: g.position.clone(),
                    context: None,
                    options: g.options.clone(),
                })
                .collect(),
            level: template.level,
            grammar_tip: template.grammar_tip.clone(),
        },
    }
}
