use serde::{Deserialize, Serialize};

/// Exercise mechanic. Each grammar module has a primary mechanic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
  Reconstruction,
  GapFill,
  Transformation,
  QuickSelect,
}

impl ExerciseKind {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "reconstruction" => Some(Self::Reconstruction),
      "gap_fill" => Some(Self::GapFill),
      "transformation" => Some(Self::Transformation),
      "quick_select" => Some(Self::QuickSelect),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Reconstruction => "reconstruction",
      Self::GapFill => "gap_fill",
      Self::Transformation => "transformation",
      Self::QuickSelect => "quick_select",
    }
  }

  /// German UI label for the mechanic.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Reconstruction => "Satzrekonstruktion",
      Self::GapFill => "Lückentext",
      Self::Transformation => "Umformung",
      Self::QuickSelect => "Schnellauswahl",
    }
  }
}

/// Grammar module under test. The module tag drives exercise selection and
/// per-rule progress tracking; the classifier only looks at it for
/// transformation exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarModule {
  VerbPosition,
  Adjektive,
  Konnektoren,
  Passiv,
  Konjunktiv,
  Relativ,
  Praepositionen,
  Nominalisierung,
}

impl GrammarModule {
  pub const ALL: [GrammarModule; 8] = [
    Self::VerbPosition,
    Self::Adjektive,
    Self::Konnektoren,
    Self::Passiv,
    Self::Konjunktiv,
    Self::Relativ,
    Self::Praepositionen,
    Self::Nominalisierung,
  ];

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "verb_position" => Some(Self::VerbPosition),
      "adjektive" => Some(Self::Adjektive),
      "konnektoren" => Some(Self::Konnektoren),
      "passiv" => Some(Self::Passiv),
      "konjunktiv" => Some(Self::Konjunktiv),
      "relativ" => Some(Self::Relativ),
      "praepositionen" => Some(Self::Praepositionen),
      "nominalisierung" => Some(Self::Nominalisierung),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::VerbPosition => "verb_position",
      Self::Adjektive => "adjektive",
      Self::Konnektoren => "konnektoren",
      Self::Passiv => "passiv",
      Self::Konjunktiv => "konjunktiv",
      Self::Relativ => "relativ",
      Self::Praepositionen => "praepositionen",
      Self::Nominalisierung => "nominalisierung",
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Self::VerbPosition => "Verbstellung",
      Self::Adjektive => "Adjektivdeklination",
      Self::Konnektoren => "Konnektoren",
      Self::Passiv => "Passiv",
      Self::Konjunktiv => "Konjunktiv",
      Self::Relativ => "Relativsätze",
      Self::Praepositionen => "Präpositionen",
      Self::Nominalisierung => "Nominalisierung",
    }
  }

  pub fn name_en(&self) -> &'static str {
    match self {
      Self::VerbPosition => "Verb Position",
      Self::Adjektive => "Adjective Declension",
      Self::Konnektoren => "Connectors & Word Order",
      Self::Passiv => "Passive Voice",
      Self::Konjunktiv => "Subjunctive Mood",
      Self::Relativ => "Relative Clauses",
      Self::Praepositionen => "Prepositions & Cases",
      Self::Nominalisierung => "Nominalization",
    }
  }

  /// The primary mechanic for this module's exercises. Konjunktiv
  /// additionally drills Konjunktiv I as gap fill at level 4.
  pub fn exercise_kind(&self) -> ExerciseKind {
    match self {
      Self::VerbPosition | Self::Konnektoren | Self::Konjunktiv | Self::Relativ => {
        ExerciseKind::Reconstruction
      }
      Self::Adjektive => ExerciseKind::GapFill,
      Self::Passiv | Self::Nominalisierung => ExerciseKind::Transformation,
      Self::Praepositionen => ExerciseKind::QuickSelect,
    }
  }

  /// Difficulty levels this module offers exercises for.
  pub fn levels(&self) -> &'static [u8] {
    match self {
      Self::VerbPosition | Self::Konnektoren => &[1, 2, 3, 4],
      Self::Adjektive | Self::Praepositionen => &[1, 2, 3],
      Self::Passiv | Self::Konjunktiv | Self::Relativ => &[2, 3, 4],
      Self::Nominalisierung => &[3, 4],
    }
  }
}

/// A gap in a gap-fill exercise. The article/case/gender triple (adjective
/// declension) and the indicative hint (Konjunktiv) are classifier metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gap {
  /// Label matching the `{gap_n}` marker in the sentence template
  pub position: String,
  /// Word stem shown next to the gap, e.g. "neu__"
  #[serde(default)]
  pub context: Option<String>,
  pub answer: String,
  #[serde(default)]
  pub article_type: Option<String>,
  #[serde(default)]
  pub case: Option<String>,
  #[serde(default)]
  pub gender: Option<String>,
  #[serde(default)]
  pub indicative_hint: Option<String>,
  pub options: Vec<String>,
}

/// A gap in a quick-select exercise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceGap {
  pub position: String,
  pub answer: String,
  pub options: Vec<String>,
  #[serde(default)]
  pub explanation: Option<String>,
}

/// Mechanic-specific template payload. Matches the candidate JSON shape of
/// the external generator: `"type"` selects the variant, `"data"` holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Payload {
  Reconstruction {
    /// Full correct sentence (ground truth)
    text: String,
    /// Verbs the learner must place, in textual order
    verbs: Vec<String>,
    clause_type: String,
  },
  GapFill {
    /// Sentence with `{gap_n}` markers
    sentence_template: String,
    gaps: Vec<Gap>,
    /// Complete corrected sentence, shown after checking
    full_correct: String,
  },
  Transformation {
    /// Source sentence the learner transforms
    source: String,
    /// The correct transformed sentence split into tokens
    target_words: Vec<String>,
    correct_order: String,
    #[serde(default)]
    optional_words: Vec<String>,
  },
  QuickSelect {
    sentence: String,
    gaps: Vec<ChoiceGap>,
  },
}

impl Payload {
  pub fn kind(&self) -> ExerciseKind {
    match self {
      Self::Reconstruction { .. } => ExerciseKind::Reconstruction,
      Self::GapFill { .. } => ExerciseKind::GapFill,
      Self::Transformation { .. } => ExerciseKind::Transformation,
      Self::QuickSelect { .. } => ExerciseKind::QuickSelect,
    }
  }
}

/// An immutable exercise template. Authored in `content::bank` or accepted
/// through the validated ingestion pipeline; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
  pub id: String,
  pub module: GrammarModule,
  /// 1=A2, 2=B1, 3=B2, 4=C1
  pub level: u8,
  /// Specific rule tag within the module, keys per-rule progress rows
  pub topic: String,
  #[serde(flatten)]
  pub payload: Payload,
  /// Human-readable rule text shown on completion
  pub grammar_rule: String,
  #[serde(default)]
  pub grammar_tip: Option<String>,
}

impl Template {
  pub fn kind(&self) -> ExerciseKind {
    self.payload.kind()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exercise_kind_roundtrip() {
    for kind in [
      ExerciseKind::Reconstruction,
      ExerciseKind::GapFill,
      ExerciseKind::Transformation,
      ExerciseKind::QuickSelect,
    ] {
      assert_eq!(ExerciseKind::from_str(kind.as_str()), Some(kind));
    }
    assert_eq!(ExerciseKind::from_str("cloze"), None);
  }

  #[test]
  fn test_module_roundtrip() {
    for module in GrammarModule::ALL {
      assert_eq!(GrammarModule::from_str(module.as_str()), Some(module));
    }
    assert_eq!(GrammarModule::from_str("artikel"), None);
  }

  #[test]
  fn test_module_kind_consistency() {
    assert_eq!(GrammarModule::VerbPosition.exercise_kind(), ExerciseKind::Reconstruction);
    assert_eq!(GrammarModule::Adjektive.exercise_kind(), ExerciseKind::GapFill);
    assert_eq!(GrammarModule::Passiv.exercise_kind(), ExerciseKind::Transformation);
    assert_eq!(GrammarModule::Praepositionen.exercise_kind(), ExerciseKind::QuickSelect);
  }

  #[test]
  fn test_parse_candidate_json() {
    let json = r#"{
      "id": "gen_adj_001",
      "module": "adjektive",
      "type": "gap_fill",
      "level": 1,
      "topic": "adj_bestimmt",
      "data": {
        "sentence_template": "Ich kaufe den neu{gap_1} Pullover.",
        "gaps": [{
          "position": "gap_1",
          "context": "neu__",
          "answer": "en",
          "article_type": "bestimmt",
          "case": "Akkusativ",
          "gender": "maskulin",
          "options": ["e", "en", "er", "es", "em"]
        }],
        "full_correct": "Ich kaufe den neuen Pullover."
      },
      "grammar_rule": "After bestimmter Artikel, Akkusativ maskulin -> -en"
    }"#;

    let t: Template = serde_json::from_str(json).unwrap();
    assert_eq!(t.id, "gen_adj_001");
    assert_eq!(t.module, GrammarModule::Adjektive);
    assert_eq!(t.kind(), ExerciseKind::GapFill);
    match &t.payload {
      Payload::GapFill { gaps, .. } => {
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].answer, "en");
        assert_eq!(gaps[0].article_type.as_deref(), Some("bestimmt"));
      }
      _ => panic!("wrong payload kind"),
    }
  }

  #[test]
  fn test_parse_reconstruction_json() {
    let json = r#"{
      "id": "gen_vp_001",
      "module": "verb_position",
      "type": "reconstruction",
      "level": 1,
      "topic": "dass_clause",
      "data": {
        "text": "Ich weiß, dass er jeden Tag Deutsch lernt.",
        "verbs": ["lernt"],
        "clause_type": "dass_clause"
      },
      "grammar_rule": "In a 'dass' clause the verb moves to the end.",
      "grammar_tip": "dass = Verb ans Ende"
    }"#;

    let t: Template = serde_json::from_str(json).unwrap();
    assert_eq!(t.kind(), ExerciseKind::Reconstruction);
    assert_eq!(t.grammar_tip.as_deref(), Some("dass = Verb ans Ende"));
  }
}
