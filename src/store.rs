//! In-memory exercise template store.
//!
//! Templates are validated on the way in and indexed by id; selection
//! helpers cover the level picker, the per-module drill pages and the
//! daily sentence.

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;

use rand::seq::IndexedRandom;

use crate::domain::{ExerciseKind, GrammarModule, Payload, Template};

#[derive(Debug)]
pub enum TemplateError {
    DuplicateId(String),
    KindMismatch { id: String, module: GrammarModule, kind: ExerciseKind },
    BadLevel { id: String, level: u8 },
    VerbMissing { id: String, verb: String },
    AnswerNotInOptions { id: String, position: String },
    TooFewTargetWords { id: String, count: usize },
    NoGaps { id: String },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::DuplicateId(id) => write!(f, "duplicate template id '{}'", id),
            TemplateError::KindMismatch { id, module, kind } => write!(
                f,
                "template '{}': payload kind '{}' does not fit module '{}'",
                id,
                kind.as_str(),
                module.name_en()
            ),
            TemplateError::BadLevel { id, level } => {
                write!(f, "template '{}': level {} outside 1..=4", id, level)
            }
            TemplateError::VerbMissing { id, verb } => {
                write!(f, "template '{}': verb '{}' not found in sentence text", id, verb)
            }
            TemplateError::AnswerNotInOptions { id, position } => {
                write!(f, "template '{}': answer for {} not among its options", id, position)
            }
            TemplateError::TooFewTargetWords { id, count } => {
                write!(f, "template '{}': only {} target words, need at least 3", id, count)
            }
            TemplateError::NoGaps { id } => write!(f, "template '{}': no gaps", id),
        }
    }
}

impl Error for TemplateError {}

/// Structural validation of a single template, independent of any store.
pub fn validate(template: &Template) -> Result<(), TemplateError> {
    let id = &template.id;

    if !(1..=4).contains(&template.level) {
        return Err(TemplateError::BadLevel { id: id.clone(), level: template.level });
    }
    let kind = template.kind();
    // Konjunktiv is reconstruction-first but drills Konjunktiv I
    // (indirekte Rede) as gap fill at level 4.
    let kind_ok = kind == template.module.exercise_kind()
        || (template.module == GrammarModule::Konjunktiv && kind == ExerciseKind::GapFill);
    if !kind_ok {
        return Err(TemplateError::KindMismatch {
            id: id.clone(),
            module: template.module,
            kind,
        });
    }

    match &template.payload {
        Payload::Reconstruction { text, verbs, .. } => {
            // Same trailing-punctuation treatment as materialization, so a
            // verb at sentence end still counts as present.
            let words: Vec<&str> = text
                .split_whitespace()
                .map(|w| crate::engine::materializer::split_word(w).0)
                .collect();
            for verb in verbs {
                if !words.contains(&verb.as_str()) {
                    return Err(TemplateError::VerbMissing {
                        id: id.clone(),
                        verb: verb.clone(),
                    });
                }
            }
        }
        Payload::GapFill { gaps, .. } => {
            if gaps.is_empty() {
                return Err(TemplateError::NoGaps { id: id.clone() });
            }
            for gap in gaps {
                if !gap.options.is_empty() && !gap.options.contains(&gap.answer) {
                    return Err(TemplateError::AnswerNotInOptions {
                        id: id.clone(),
                        position: gap.position.clone(),
                    });
                }
            }
        }
        Payload::Transformation { target_words, .. } => {
            if target_words.len() < 3 {
                return Err(TemplateError::TooFewTargetWords {
                    id: id.clone(),
                    count: target_words.len(),
                });
            }
        }
        Payload::QuickSelect { gaps, .. } => {
            if gaps.is_empty() {
                return Err(TemplateError::NoGaps { id: id.clone() });
            }
            for gap in gaps {
                if !gap.options.contains(&gap.answer) {
                    return Err(TemplateError::AnswerNotInOptions {
                        id: id.clone(),
                        position: gap.position.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

pub struct TemplateStore {
    templates: Vec<Template>,
    by_id: HashMap<String, usize>,
}

impl TemplateStore {
    pub fn new(templates: Vec<Template>) -> Result<Self, TemplateError> {
        let mut store = TemplateStore { templates: Vec::new(), by_id: HashMap::new() };
        for template in templates {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Store pre-loaded with the built-in exercise banks.
    pub fn seeded() -> Self {
        match Self::new(crate::content::bank::seed_templates()) {
            Ok(store) => store,
            // Seed data is validated by tests; a broken bank is a build defect.
            Err(e) => unreachable!("invalid seed template: {}", e),
        }
    }

    fn insert(&mut self, template: Template) -> Result<(), TemplateError> {
        validate(&template)?;
        if self.by_id.contains_key(&template.id) {
            return Err(TemplateError::DuplicateId(template.id));
        }
        self.by_id.insert(template.id.clone(), self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Add externally generated templates, dropping and logging the invalid
    /// or duplicate ones. Returns how many were accepted.
    pub fn append_validated(&mut self, templates: Vec<Template>) -> usize {
        let mut accepted = 0;
        for template in templates {
            let id = template.id.clone();
            match self.insert(template) {
                Ok(()) => accepted += 1,
                Err(e) => tracing::warn!(template_id = %id, error = %e, "dropped candidate template"),
            }
        }
        accepted
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.by_id.get(id).map(|&i| &self.templates[i])
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn by_module(&self, module: GrammarModule, level: Option<u8>) -> Vec<&Template> {
        self.templates
            .iter()
            .filter(|t| t.module == module && level.is_none_or(|l| t.level == l))
            .collect()
    }

    pub fn random_by_module(&self, module: GrammarModule, level: Option<u8>) -> Option<&Template> {
        self.by_module(module, level).choose(&mut rand::rng()).copied()
    }

    /// Random template at the given level, or from the whole store when no
    /// level is given.
    pub fn random_by_level(&self, level: Option<u8>) -> Option<&Template> {
        let pool: Vec<&Template> = match level {
            Some(l) => self.templates.iter().filter(|t| t.level == l).collect(),
            None => self.templates.iter().collect(),
        };
        pool.choose(&mut rand::rng()).copied()
    }

    /// Random template the user has not seen yet. Falls back to the full
    /// level pool once everything has been shown.
    pub fn random_unseen(&self, level: Option<u8>, exclude: &HashSet<String>) -> Option<&Template> {
        let pool: Vec<&Template> = self
            .templates
            .iter()
            .filter(|t| level.is_none_or(|l| t.level == l))
            .filter(|t| !exclude.contains(&t.id))
            .collect();
        match pool.choose(&mut rand::rng()) {
            Some(t) => Some(t),
            None => self.random_by_level(level),
        }
    }

    /// Deterministic pick for the daily sentence: hash of the date selects
    /// from the mid-level reconstruction pool so every user sees the same
    /// sentence on a given day.
    pub fn daily_sentence(&self, date: chrono::NaiveDate) -> Option<&Template> {
        let mut pool: Vec<&Template> = self
            .templates
            .iter()
            .filter(|t| t.kind() == ExerciseKind::Reconstruction && (2..=3).contains(&t.level))
            .collect();
        if pool.is_empty() {
            pool = self
                .templates
                .iter()
                .filter(|t| t.kind() == ExerciseKind::Reconstruction)
                .collect();
        }
        if pool.is_empty() {
            return None;
        }
        pool.sort_by_key(|t| t.id.as_str());
        let days = date.signed_duration_since(chrono::NaiveDate::default()).num_days();
        Some(pool[days.rem_euclid(pool.len() as i64) as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChoiceGap, Gap};
    use chrono::NaiveDate;

    fn reconstruction(id: &str, level: u8) -> Template {
        Template {
            id: id.into(),
            module: GrammarModule::VerbPosition,
            level,
            topic: "dass_clause".into(),
            payload: Payload::Reconstruction {
                text: "Ich weiß, dass er jeden Tag Deutsch lernt.".into(),
                verbs: vec!["lernt".into()],
                clause_type: "dass_clause".into(),
            },
            grammar_rule: "Nebensatz: Verb am Ende.".into(),
            grammar_tip: None,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = TemplateStore::new(vec![reconstruction("a", 1), reconstruction("b", 2)]).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().level, 1);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = TemplateStore::new(vec![reconstruction("a", 1), reconstruction("a", 2)]);
        assert!(matches!(result, Err(TemplateError::DuplicateId(_))));
    }

    #[test]
    fn test_verb_must_appear_in_text() {
        let mut t = reconstruction("a", 1);
        if let Payload::Reconstruction { verbs, .. } = &mut t.payload {
            verbs.push("fehlt".into());
        }
        assert!(matches!(validate(&t), Err(TemplateError::VerbMissing { .. })));
    }

    #[test]
    fn test_verb_at_sentence_end_counts_despite_punctuation() {
        // "lernt." in the text, "lernt" in the verb list
        assert!(validate(&reconstruction("a", 1)).is_ok());
    }

    #[test]
    fn test_level_bounds() {
        assert!(matches!(
            validate(&reconstruction("a", 0)),
            Err(TemplateError::BadLevel { .. })
        ));
        assert!(matches!(
            validate(&reconstruction("a", 5)),
            Err(TemplateError::BadLevel { .. })
        ));
    }

    #[test]
    fn test_kind_must_match_module() {
        let t = Template {
            id: "x".into(),
            module: GrammarModule::Adjektive,
            level: 2,
            topic: "deklination".into(),
            payload: Payload::Reconstruction {
                text: "Er lernt.".into(),
                verbs: vec!["lernt".into()],
                clause_type: "hauptsatz".into(),
            },
            grammar_rule: String::new(),
            grammar_tip: None,
        };
        assert!(matches!(validate(&t), Err(TemplateError::KindMismatch { .. })));
    }

    #[test]
    fn test_gap_answer_must_be_an_option() {
        let t = Template {
            id: "x".into(),
            module: GrammarModule::Praepositionen,
            level: 2,
            topic: "wechsel".into(),
            payload: Payload::QuickSelect {
                sentence: "Ich gehe ___ die Schule.".into(),
                gaps: vec![ChoiceGap {
                    position: "gap_1".into(),
                    answer: "in".into(),
                    options: vec!["an".into(), "auf".into()],
                    explanation: None,
                }],
            },
            grammar_rule: String::new(),
            grammar_tip: None,
        };
        assert!(matches!(validate(&t), Err(TemplateError::AnswerNotInOptions { .. })));
    }

    #[test]
    fn test_gap_fill_without_options_is_free_entry() {
        let t = Template {
            id: "x".into(),
            module: GrammarModule::Adjektive,
            level: 2,
            topic: "deklination".into(),
            payload: Payload::GapFill {
                sentence_template: "Ich sehe den neu{gap_1} Film.".into(),
                gaps: vec![Gap {
                    position: "gap_1".into(),
                    context: None,
                    answer: "en".into(),
                    article_type: Some("bestimmt".into()),
                    case: Some("Akkusativ".into()),
                    gender: Some("maskulin".into()),
                    indicative_hint: None,
                    options: vec![],
                }],
                full_correct: "Ich sehe den neuen Film.".into(),
            },
            grammar_rule: String::new(),
            grammar_tip: None,
        };
        assert!(validate(&t).is_ok());
    }

    #[test]
    fn test_transformation_needs_three_target_words() {
        let t = Template {
            id: "x".into(),
            module: GrammarModule::Passiv,
            level: 2,
            topic: "vorgangspassiv".into(),
            payload: Payload::Transformation {
                source: "Man repariert die Straße.".into(),
                target_words: vec!["Die".into(), "Straße".into()],
                correct_order: "Die Straße wird repariert.".into(),
                optional_words: vec![],
            },
            grammar_rule: String::new(),
            grammar_tip: None,
        };
        assert!(matches!(validate(&t), Err(TemplateError::TooFewTargetWords { .. })));
    }

    #[test]
    fn test_append_validated_drops_bad_and_duplicate() {
        let mut store = TemplateStore::new(vec![reconstruction("a", 1)]).unwrap();
        let accepted = store.append_validated(vec![
            reconstruction("a", 1),
            reconstruction("b", 0),
            reconstruction("c", 2),
        ]);
        assert_eq!(accepted, 1);
        assert_eq!(store.len(), 2);
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_random_unseen_excludes_shown() {
        let store = TemplateStore::new(vec![reconstruction("a", 1), reconstruction("b", 1)]).unwrap();
        let mut shown = HashSet::new();
        shown.insert("a".to_string());
        for _ in 0..20 {
            let picked = store.random_unseen(Some(1), &shown).unwrap();
            assert_eq!(picked.id, "b");
        }
    }

    #[test]
    fn test_random_unseen_falls_back_when_exhausted() {
        let store = TemplateStore::new(vec![reconstruction("a", 1)]).unwrap();
        let mut shown = HashSet::new();
        shown.insert("a".to_string());
        assert!(store.random_unseen(Some(1), &shown).is_some());
    }

    #[test]
    fn test_daily_sentence_is_stable_per_date() {
        let store = TemplateStore::new(vec![
            reconstruction("a", 2),
            reconstruction("b", 2),
            reconstruction("c", 3),
        ])
        .unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let first = store.daily_sentence(date).unwrap().id.clone();
        for _ in 0..5 {
            assert_eq!(store.daily_sentence(date).unwrap().id, first);
        }
        // A different day may pick a different sentence from the pool
        let next = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert!(store.daily_sentence(next).is_some());
    }

    #[test]
    fn test_by_module_level_filter() {
        let store = TemplateStore::seeded();
        let all = store.by_module(GrammarModule::VerbPosition, None);
        let level_one = store.by_module(GrammarModule::VerbPosition, Some(1));
        assert!(!level_one.is_empty());
        assert!(level_one.len() < all.len());
        assert!(level_one.iter().all(|t| t.level == 1));

        let picked = store.random_by_module(GrammarModule::Passiv, None).unwrap();
        assert_eq!(picked.module, GrammarModule::Passiv);
    }

    #[test]
    fn test_seeded_store_is_nonempty_and_valid() {
        let store = TemplateStore::seeded();
        assert!(store.len() >= 30);
        for module in GrammarModule::ALL {
            assert!(
                !store.by_module(module, None).is_empty(),
                "no templates for module {}",
                module.name_en()
            );
        }
    }
}
