//! Error classification: inferring *why* a placement is wrong.
//!
//! Categories are a closed enumeration; the decision procedure is a fixed
//! chain of positional and lexical checks over the exercise metadata.
//! The "belongs to another slot" check is a lookup against the static
//! answer key only, independent of the rest of the submission, so the
//! named category is a best-effort hint rather than a root-cause
//! diagnosis. Ties between the clause-assignment and verb-order branches
//! resolve by check order; callers should not rely on finer distinctions.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{ChoiceGap, Gap, GrammarModule};

use super::materializer::MaterializedExercise;
use super::verifier::Placement;

/// The fixed enumeration of grammatical error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    VerbNotAtEnd,
    WrongVerbOrder,
    AuxiliaryBeforeParticiple,
    ModalBeforeInfinitive,
    DoubleInfinitiveError,
    WrongClauseAssignment,
    SeparableNotJoined,
    InversionMissing,
    KonnektorPosition,
    ZweiteiligIncomplete,
    WrongAdjectiveEnding,
    WrongPassiveForm,
    WrongKonjunktivForm,
    WrongRelativePronoun,
    WrongPreposition,
    WrongNominalization,
}

/// Display data for one error category: German and English names, rule
/// description, a mnemonic tip and the formal rule statement.
pub struct CategoryInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
    pub rule: &'static str,
}

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 16] = [
        Self::VerbNotAtEnd,
        Self::WrongVerbOrder,
        Self::AuxiliaryBeforeParticiple,
        Self::ModalBeforeInfinitive,
        Self::DoubleInfinitiveError,
        Self::WrongClauseAssignment,
        Self::SeparableNotJoined,
        Self::InversionMissing,
        Self::KonnektorPosition,
        Self::ZweiteiligIncomplete,
        Self::WrongAdjectiveEnding,
        Self::WrongPassiveForm,
        Self::WrongKonjunktivForm,
        Self::WrongRelativePronoun,
        Self::WrongPreposition,
        Self::WrongNominalization,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.info().key == s)
    }

    pub fn as_str(&self) -> &'static str {
        self.info().key
    }

    pub fn info(&self) -> &'static CategoryInfo {
        match self {
            Self::VerbNotAtEnd => &CategoryInfo {
                key: "verb_not_at_end",
                name: "Verb nicht am Satzende",
                name_en: "Verb not at clause end",
                description: "The conjugated verb must go to the end of a subordinate clause.",
                tip: "In German subordinate clauses (after dass, weil, wenn, obwohl, etc.), the verb always moves to the final position.",
                rule: "Nebensatz-Regel: Das konjugierte Verb steht am Ende des Nebensatzes.",
            },
            Self::WrongVerbOrder => &CategoryInfo {
                key: "wrong_verb_order",
                name: "Falsche Verbreihenfolge",
                name_en: "Wrong verb order at clause end",
                description: "When multiple verbs appear at the end of a subordinate clause, they must be in the correct order.",
                tip: "In Perfekt: Partizip + Hilfsverb (gelesen hat). With modals: Infinitiv + Modalverb (lesen kann).",
                rule: "Reihenfolge am Satzende: Partizip vor Hilfsverb, Infinitiv vor Modalverb.",
            },
            Self::AuxiliaryBeforeParticiple => &CategoryInfo {
                key: "auxiliary_before_participle",
                name: "Hilfsverb vor Partizip",
                name_en: "Auxiliary before participle",
                description: "In subordinate clauses, the past participle comes before the auxiliary verb.",
                tip: "Correct: '...dass er das Buch gelesen hat' (not 'hat gelesen').",
                rule: "Im Nebensatz: Partizip II + Hilfsverb (hat/ist) am Ende.",
            },
            Self::ModalBeforeInfinitive => &CategoryInfo {
                key: "modal_before_infinitive",
                name: "Modalverb vor Infinitiv",
                name_en: "Modal before infinitive",
                description: "In subordinate clauses, the infinitive comes before the modal verb.",
                tip: "Correct: '...dass er kommen kann' (not 'kann kommen').",
                rule: "Im Nebensatz: Infinitiv + Modalverb am Ende.",
            },
            Self::DoubleInfinitiveError => &CategoryInfo {
                key: "double_infinitive_error",
                name: "Ersatzinfinitiv-Fehler",
                name_en: "Double infinitive error",
                description: "When a modal verb is used in Perfekt in a subordinate clause, 'hat' comes BEFORE the two infinitives.",
                tip: "Exception! '...dass er hat kommen wollen' — 'hat' precedes the infinitives.",
                rule: "Ersatzinfinitiv: hat/ist + Infinitiv + Infinitiv (hat kommen wollen).",
            },
            Self::WrongClauseAssignment => &CategoryInfo {
                key: "wrong_clause_assignment",
                name: "Verb im falschen Teilsatz",
                name_en: "Verb in wrong clause",
                description: "The verb was placed in a different clause than where it belongs.",
                tip: "Each subordinate clause has its own verb(s) at its end. Make sure you identify which clause each verb belongs to.",
                rule: "Jeder Nebensatz hat sein eigenes Verb/seine eigenen Verben am Ende.",
            },
            Self::SeparableNotJoined => &CategoryInfo {
                key: "separable_not_joined",
                name: "Trennbares Verb nicht zusammengesetzt",
                name_en: "Separable verb not recombined",
                description: "In subordinate clauses, separable verbs must be written as one word.",
                tip: "In Nebensatz: 'ankommt' (not 'kommt...an').",
                rule: "Im Nebensatz werden trennbare Verben zusammengeschrieben.",
            },
            Self::InversionMissing => &CategoryInfo {
                key: "inversion_missing",
                name: "Fehlende Inversion",
                name_en: "Missing inversion after adverbial connector",
                description: "After adverbial connectors (deshalb, trotzdem, ...) the verb must come before the subject.",
                tip: "Position 1: Konnektor -> Position 2: Verb -> Position 3: Subjekt",
                rule: "Nach Adverbialkonnektoren steht das Verb an Position 2, vor dem Subjekt.",
            },
            Self::KonnektorPosition => &CategoryInfo {
                key: "konnektor_position",
                name: "Konnektorposition falsch",
                name_en: "Connector at wrong position",
                description: "Conjunctions (und, aber, denn) stand at Position 0 and don't change word order.",
                tip: "und/aber/oder/denn/sondern = Position 0 (no inversion)\ndeshalb/trotzdem/deswegen = Position 1 (inversion!)",
                rule: "Position 0: und, aber, oder, denn, sondern. Position 1: deshalb, trotzdem, außerdem.",
            },
            Self::ZweiteiligIncomplete => &CategoryInfo {
                key: "zweiteilig_incomplete",
                name: "Zweiteiliger Konnektor unvollständig",
                name_en: "Two-part connector incomplete",
                description: "Two-part connectors must be used as a pair.",
                tip: "nicht nur ... sondern auch / entweder ... oder / weder ... noch",
                rule: "Zweiteilige Konnektoren müssen paarweise verwendet werden.",
            },
            Self::WrongAdjectiveEnding => &CategoryInfo {
                key: "wrong_adjective_ending",
                name: "Falsche Adjektivendung",
                name_en: "Wrong adjective ending",
                description: "The adjective ending depends on the article type, case, and gender.",
                tip: "Bestimmter Artikel: mostly -e/-en. Unbestimmter: shows gender in Nom. Ohne Artikel: strong endings.",
                rule: "Adjektivdeklination: Artikel + Kasus + Genus = Endung (-e, -en, -er, -es, -em).",
            },
            Self::WrongPassiveForm => &CategoryInfo {
                key: "wrong_passive_form",
                name: "Falsche Passivform",
                name_en: "Wrong passive construction",
                description: "The passive requires werden + Partizip II (Vorgangspassiv) or sein + Partizip II (Zustandspassiv).",
                tip: "Vorgangspassiv: werden + Part. II / Zustandspassiv: sein + Part. II",
                rule: "Passiv: Subjekt + werden/sein + Partizip II (+ von + Dativ).",
            },
            Self::WrongKonjunktivForm => &CategoryInfo {
                key: "wrong_konjunktiv_form",
                name: "Falsche Konjunktivform",
                name_en: "Wrong subjunctive form",
                description: "The Konjunktiv form is incorrect for the context.",
                tip: "K2: hätte/wäre/würde + Inf. K1 (indirekte Rede): habe/sei/könne",
                rule: "Konjunktiv II: Irrealis. Konjunktiv I: Indirekte Rede.",
            },
            Self::WrongRelativePronoun => &CategoryInfo {
                key: "wrong_relative_pronoun",
                name: "Falsches Relativpronomen",
                name_en: "Wrong relative pronoun",
                description: "The relative pronoun must match the noun's gender and the clause's case requirement.",
                tip: "Gender from noun, case from function in relative clause.",
                rule: "Relativpronomen: Genus vom Bezugswort, Kasus von der Funktion im Relativsatz.",
            },
            Self::WrongPreposition => &CategoryInfo {
                key: "wrong_preposition",
                name: "Falsche Präposition/Kasus",
                name_en: "Wrong preposition or case",
                description: "The preposition or the case after the preposition is incorrect.",
                tip: "Wechselpräpositionen: Wohin? = Akk., Wo? = Dat.",
                rule: "Präpositionen regieren einen bestimmten Kasus.",
            },
            Self::WrongNominalization => &CategoryInfo {
                key: "wrong_nominalization",
                name: "Falsche Nominalisierung",
                name_en: "Wrong nominalization",
                description: "The transformation from clause to noun phrase is incorrect.",
                tip: "weil es regnet -> wegen des Regens. obwohl -> trotz + Genitiv.",
                rule: "Nominalisierung: Nebensatz -> Präposition + Nomen (Genitiv).",
            },
        }
    }
}

/// Syntactic role of a verb surface form, for the positional heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbRole {
    Auxiliary,
    Modal,
}

/// Closed lookup table of verb surface forms. An enumerated table rather
/// than containment checks so new forms are a data change, not a logic
/// change.
static VERB_ROLES: &[(&str, VerbRole)] = &[
    ("hat", VerbRole::Auxiliary),
    ("hatte", VerbRole::Auxiliary),
    ("ist", VerbRole::Auxiliary),
    ("war", VerbRole::Auxiliary),
    ("habe", VerbRole::Auxiliary),
    ("hätte", VerbRole::Auxiliary),
    ("wäre", VerbRole::Auxiliary),
    ("worden", VerbRole::Auxiliary),
    ("kann", VerbRole::Modal),
    ("muss", VerbRole::Modal),
    ("will", VerbRole::Modal),
    ("soll", VerbRole::Modal),
    ("darf", VerbRole::Modal),
    ("möchte", VerbRole::Modal),
    ("konnte", VerbRole::Modal),
    ("musste", VerbRole::Modal),
    ("wollte", VerbRole::Modal),
    ("sollte", VerbRole::Modal),
    ("durfte", VerbRole::Modal),
    ("könnte", VerbRole::Modal),
];

pub fn verb_role(form: &str) -> Option<VerbRole> {
    VERB_ROLES.iter().find(|(f, _)| *f == form).map(|(_, role)| *role)
}

/// Where an error sits within an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SlotRef {
    /// Word position in a reconstruction/transformation sentence
    Index(usize),
    /// Gap label in a gap-fill/quick-select sentence
    Gap(String),
    /// The whole sentence (transformation exercises)
    Sentence,
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRef::Index(i) => write!(f, "{}", i),
            SlotRef::Gap(label) => write!(f, "{}", label),
            SlotRef::Sentence => write!(f, "sentence"),
        }
    }
}

/// One classified mistake, ready for explanation lookup and error logging.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub expected: String,
    pub submitted: Option<String>,
    pub position: SlotRef,
    pub detail: String,
}

/// Explanation payload for one classified error.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorExplanation {
    pub category: &'static str,
    pub category_name: &'static str,
    pub category_name_en: &'static str,
    pub description: &'static str,
    pub tip: &'static str,
    pub rule: &'static str,
    pub specific: String,
}

/// Static lookup: display data for a category.
pub fn explain(category: ErrorCategory) -> &'static CategoryInfo {
    category.info()
}

/// Attach the category's display data to a specific classified error.
pub fn explanation_for(error: &ClassifiedError) -> ErrorExplanation {
    let info = error.category.info();
    ErrorExplanation {
        category: info.key,
        category_name: info.name,
        category_name_en: info.name_en,
        description: info.description,
        tip: info.tip,
        rule: info.rule,
        specific: error.detail.clone(),
    }
}

/// Classify every wrong answer slot of a reconstruction submission.
///
/// Only answer slots (the verbs) are classified; scaffolding mistakes are
/// verdicts without a category.
pub fn classify_reconstruction(
    exercise: &MaterializedExercise,
    placements: &[Placement],
) -> Vec<ClassifiedError> {
    let placed: HashMap<usize, &str> = placements
        .iter()
        .map(|p| (p.slot_index, p.word.as_str()))
        .collect();
    let verbs: Vec<&str> = exercise
        .answer_positions
        .iter()
        .map(|&p| exercise.slots[p].word.as_str())
        .collect();

    let mut errors = Vec::new();
    for &pos in &exercise.answer_positions {
        let expected = exercise.slots[pos].word.as_str();
        match placed.get(&pos) {
            None => errors.push(ClassifiedError {
                category: ErrorCategory::VerbNotAtEnd,
                expected: expected.to_string(),
                submitted: None,
                position: SlotRef::Index(pos),
                detail: format!("No verb placed at position {}. Expected '{}'.", pos, expected),
            }),
            Some(&submitted) if submitted != expected => {
                let category = classify_misplacement(exercise, pos, submitted, &verbs);
                errors.push(ClassifiedError {
                    category,
                    expected: expected.to_string(),
                    submitted: Some(submitted.to_string()),
                    position: SlotRef::Index(pos),
                    detail: format!(
                        "Expected '{}' at position {}, but got '{}'.",
                        expected, pos, submitted
                    ),
                });
            }
            _ => {}
        }
    }
    errors
}

/// The fixed decision chain for a misplaced token. Checked in order:
/// swapped answer tokens refine by clause type and verb role, stray
/// answer tokens become clause-assignment errors, anything else falls
/// back to the generic verb-end category.
fn classify_misplacement(
    exercise: &MaterializedExercise,
    pos: usize,
    submitted: &str,
    verbs: &[&str],
) -> ErrorCategory {
    let clause_type = exercise.clause_type.as_str();

    if verbs.contains(&submitted) {
        // Static answer-key lookup only: whether the other slot is itself
        // filled or in conflict is deliberately not consulted.
        let belongs_elsewhere = exercise
            .answer_positions
            .iter()
            .any(|&p| p != pos && exercise.slots[p].word == submitted);

        if belongs_elsewhere {
            if clause_type.contains("perfekt") || clause_type.contains("plusquam") {
                return if verb_role(submitted) == Some(VerbRole::Auxiliary) {
                    ErrorCategory::AuxiliaryBeforeParticiple
                } else {
                    ErrorCategory::WrongVerbOrder
                };
            }
            if clause_type.contains("modal") {
                return if verb_role(submitted) == Some(VerbRole::Modal) {
                    ErrorCategory::ModalBeforeInfinitive
                } else {
                    ErrorCategory::WrongVerbOrder
                };
            }
            if clause_type.contains("double_infinitive") {
                return ErrorCategory::DoubleInfinitiveError;
            }
            return ErrorCategory::WrongVerbOrder;
        }

        return ErrorCategory::WrongClauseAssignment;
    }

    ErrorCategory::VerbNotAtEnd
}

/// Classify wrong gap-fill answers from gap metadata: an article/case/
/// gender triple means adjective declension, an indicative hint means
/// Konjunktiv; everything else defaults to the adjective category.
pub fn classify_gap_fill(gaps: &[Gap], answers: &HashMap<String, String>) -> Vec<ClassifiedError> {
    let mut errors = Vec::new();
    for gap in gaps {
        let submitted = answers.get(&gap.position).map(|s| s.as_str());
        if submitted == Some(gap.answer.as_str()) {
            continue;
        }
        let got = submitted.unwrap_or_default();

        let (category, detail) = if gap.article_type.is_some() {
            (
                ErrorCategory::WrongAdjectiveEnding,
                format!(
                    "Expected ending '-{}' but got '-{}'. ({} Artikel, {}, {})",
                    gap.answer,
                    got,
                    gap.article_type.as_deref().unwrap_or_default(),
                    gap.case.as_deref().unwrap_or_default(),
                    gap.gender.as_deref().unwrap_or_default(),
                ),
            )
        } else if let Some(hint) = &gap.indicative_hint {
            (
                ErrorCategory::WrongKonjunktivForm,
                format!("Expected '{}' but got '{}'. Hint: {}", gap.answer, got, hint),
            )
        } else {
            (
                ErrorCategory::WrongAdjectiveEnding,
                format!("Expected '{}' but got '{}'.", gap.answer, got),
            )
        };

        errors.push(ClassifiedError {
            category,
            expected: gap.answer.clone(),
            submitted: submitted.map(|s| s.to_string()),
            position: SlotRef::Gap(gap.position.clone()),
            detail,
        });
    }
    errors
}

/// Quick-select mismatches classify uniformly as preposition/case errors;
/// the module only tests preposition+case selection.
pub fn classify_quick_select(
    gaps: &[ChoiceGap],
    answers: &HashMap<String, String>,
) -> Vec<ClassifiedError> {
    let mut errors = Vec::new();
    for gap in gaps {
        let submitted = answers.get(&gap.position).map(|s| s.as_str());
        if submitted == Some(gap.answer.as_str()) {
            continue;
        }
        let got = submitted.unwrap_or_default();
        let mut detail = format!("Expected '{}' but got '{}'.", gap.answer, got);
        if let Some(explanation) = &gap.explanation {
            detail.push(' ');
            detail.push_str(explanation);
        }
        errors.push(ClassifiedError {
            category: ErrorCategory::WrongPreposition,
            expected: gap.answer.clone(),
            submitted: submitted.map(|s| s.to_string()),
            position: SlotRef::Gap(gap.position.clone()),
            detail,
        });
    }
    errors
}

/// Transformation exercises carry no per-slot classification: an overall
/// mismatch is one generic wrong-construction error for the module,
/// carrying the full expected sentence.
pub fn classify_transformation(
    module: GrammarModule,
    correct_order: &str,
    overall_correct: bool,
) -> Option<ClassifiedError> {
    if overall_correct {
        return None;
    }
    let category = match module {
        GrammarModule::Passiv => ErrorCategory::WrongPassiveForm,
        GrammarModule::Nominalisierung => ErrorCategory::WrongNominalization,
        GrammarModule::Konjunktiv => ErrorCategory::WrongKonjunktivForm,
        _ => ErrorCategory::WrongVerbOrder,
    };
    Some(ClassifiedError {
        category,
        expected: correct_order.to_string(),
        submitted: None,
        position: SlotRef::Sentence,
        detail: format!("Expected: {}", correct_order),
    })
}
