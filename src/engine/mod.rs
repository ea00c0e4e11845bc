//! Exercise engine: materialization, answer checking and error
//! classification.

pub mod classifier;
pub mod materializer;
pub mod verifier;

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde::Serialize;

use crate::domain::{ExerciseKind, Payload, Template};

pub use classifier::{
    classify_gap_fill, classify_quick_select, classify_reconstruction, classify_transformation,
    explain, explanation_for, ClassifiedError, ErrorCategory, ErrorExplanation, SlotRef,
};
pub use materializer::{materialize, serve, MaterializedExercise, ServedExercise, Slot};
pub use verifier::{
    verify, verify_gap_fill, verify_quick_select, verify_reconstruction, verify_transformation,
    GapCheck, GapResult, Placement, SlotResult, VerificationResult,
};

/// A learner's submission, one shape per exercise mechanic.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Word chips placed into indexed slots (reconstruction, transformation)
    Placements(Vec<Placement>),
    /// Gap label to chosen answer (gap fill, quick select)
    Answers(HashMap<String, String>),
}

/// Combined check result: per-slot verdicts, classified errors and their
/// explanations, plus the template's rule text for the feedback panel.
#[derive(Debug, Serialize)]
pub struct Feedback {
    pub template_id: String,
    pub overall_correct: bool,
    pub slots: Vec<SlotResult>,
    pub gaps: Vec<GapResult>,
    pub errors: Vec<ClassifiedError>,
    pub explanations: Vec<ErrorExplanation>,
    pub grammar_rule: String,
    pub grammar_tip: Option<String>,
}

#[derive(Debug)]
pub enum CheckError {
    /// Submission shape does not match the template's exercise kind
    KindMismatch { kind: ExerciseKind },
    /// Reconstruction template failed to materialize
    Unmaterializable,
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::KindMismatch { kind } => {
                write!(f, "submission shape does not fit a {} exercise", kind.as_str())
            }
            CheckError::Unmaterializable => write!(f, "template could not be materialized"),
        }
    }
}

impl Error for CheckError {}

/// Check a submission against a template: verify, classify whatever is
/// wrong, and attach explanations. The one entry point callers need.
pub fn check(template: &Template, submission: &Submission) -> Result<Feedback, CheckError> {
    let kind = template.kind();
    match (&template.payload, submission) {
        (Payload::Reconstruction { .. }, Submission::Placements(placements)) => {
            let exercise = materialize(template).ok_or(CheckError::Unmaterializable)?;
            let result = verify_reconstruction(&exercise, placements);
            let errors = if result.overall_correct {
                Vec::new()
            } else {
                classify_reconstruction(&exercise, placements)
            };
            Ok(feedback(template, result.overall_correct, result.slots, Vec::new(), errors))
        }
        (Payload::GapFill { gaps, .. }, Submission::Answers(answers)) => {
            let result = verify_gap_fill(template, answers).ok_or(CheckError::KindMismatch { kind })?;
            let errors = if result.overall_correct {
                Vec::new()
            } else {
                classify_gap_fill(gaps, answers)
            };
            Ok(feedback(template, result.overall_correct, Vec::new(), result.gaps, errors))
        }
        (Payload::QuickSelect { gaps, .. }, Submission::Answers(answers)) => {
            let result =
                verify_quick_select(template, answers).ok_or(CheckError::KindMismatch { kind })?;
            let errors = if result.overall_correct {
                Vec::new()
            } else {
                classify_quick_select(gaps, answers)
            };
            Ok(feedback(template, result.overall_correct, Vec::new(), result.gaps, errors))
        }
        (Payload::Transformation { correct_order, .. }, Submission::Placements(placements)) => {
            let result =
                verify_transformation(template, placements).ok_or(CheckError::KindMismatch { kind })?;
            let errors = classify_transformation(template.module, correct_order, result.overall_correct)
                .into_iter()
                .collect();
            Ok(feedback(template, result.overall_correct, result.slots, Vec::new(), errors))
        }
        _ => Err(CheckError::KindMismatch { kind }),
    }
}

fn feedback(
    template: &Template,
    overall_correct: bool,
    slots: Vec<SlotResult>,
    gaps: Vec<GapResult>,
    errors: Vec<ClassifiedError>,
) -> Feedback {
    let explanations = errors.iter().map(explanation_for).collect();
    Feedback {
        template_id: template.id.clone(),
        overall_correct,
        slots,
        gaps,
        errors,
        explanations,
        grammar_rule: template.grammar_rule.clone(),
        grammar_tip: template.grammar_tip.clone(),
    }
}
