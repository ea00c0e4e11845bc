//! Ingestion of externally generated exercise candidates.
//!
//! A generator pipeline writes candidate templates as a JSON array. Elements
//! are parsed one by one so a single malformed candidate never poisons the
//! whole batch; structural validation happens later at store insertion.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::domain::Template;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    /// Top-level document is not a JSON array
    NotAnArray,
    Json(serde_json::Error),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::Io(e) => write!(f, "failed to read candidate file: {}", e),
            IngestError::NotAnArray => write!(f, "candidate document must be a JSON array"),
            IngestError::Json(e) => write!(f, "failed to parse candidate document: {}", e),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IngestError::Io(e) => Some(e),
            IngestError::NotAnArray => None,
            IngestError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(e: std::io::Error) -> Self {
        IngestError::Io(e)
    }
}

/// Parse a JSON array of candidate templates. Malformed elements are logged
/// and skipped, well-formed ones returned in document order.
pub fn parse_candidates(json: &str) -> Result<Vec<Template>, IngestError> {
    let document: serde_json::Value = serde_json::from_str(json).map_err(IngestError::Json)?;
    let Some(items) = document.as_array() else {
        return Err(IngestError::NotAnArray);
    };

    let mut templates = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match serde_json::from_value::<Template>(item.clone()) {
            Ok(template) => templates.push(template),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping malformed candidate");
            }
        }
    }
    Ok(templates)
}

/// Load candidates from a file on disk.
pub fn load_candidates(path: &Path) -> Result<Vec<Template>, IngestError> {
    let json = fs::read_to_string(path)?;
    parse_candidates(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExerciseKind, GrammarModule};

    const VALID: &str = r#"{
        "id": "b1_perfekt_42",
        "module": "verb_position",
        "level": 2,
        "topic": "perfekt_in_nebensatz",
        "type": "reconstruction",
        "data": {
            "text": "Ich weiß, dass er das Buch gelesen hat.",
            "verbs": ["gelesen", "hat"],
            "clause_type": "perfekt_in_nebensatz"
        },
        "grammar_rule": "Partizip vor Hilfsverb."
    }"#;

    #[test]
    fn test_parse_valid_candidate() {
        let templates = parse_candidates(&format!("[{}]", VALID)).unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id, "b1_perfekt_42");
        assert_eq!(templates[0].module, GrammarModule::VerbPosition);
        assert_eq!(templates[0].kind(), ExerciseKind::Reconstruction);
        assert_eq!(templates[0].grammar_tip, None);
    }

    #[test]
    fn test_malformed_element_is_skipped_not_fatal() {
        let json = format!(r#"[{}, {{"id": "broken"}}, {}]"#, VALID, VALID.replace("_42", "_43"));
        let templates = parse_candidates(&json).unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].id, "b1_perfekt_43");
    }

    #[test]
    fn test_non_array_document_is_an_error() {
        assert!(matches!(parse_candidates("{}"), Err(IngestError::NotAnArray)));
        assert!(matches!(parse_candidates("not json"), Err(IngestError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_candidates(Path::new("/nonexistent/candidates.json"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
